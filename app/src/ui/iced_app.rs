use std::sync::Arc;

use anyhow::{anyhow, Result};
use iced::widget::{
    column, container, horizontal_space, row, scrollable, text, text_input, vertical_rule, Button,
    Checkbox, Column, Row, Text,
};
use iced::{Alignment, Element, Length, Task, Theme};
use log::*;

use infra::ids::{Code, Id};

use crate::menu::{AddOn, Inventory, MenuItem};
use crate::orders::{Order, OrderLine};

use super::{tax_rate, FrontEnd};

pub struct IcedFrontEnd;

impl FrontEnd for IcedFrontEnd {
    fn name(&self) -> &'static str {
        "iced"
    }

    fn run(&self, inventory: Arc<Inventory>) -> Result<()> {
        info!("Starting iced front-end");
        iced::application(OrderingGui::title, OrderingGui::update, OrderingGui::view)
            .theme(OrderingGui::theme)
            .run_with(move || OrderingGui::new(inventory))
            .map_err(|e| anyhow!("iced front-end: {}", e))
    }
}

pub struct OrderingGui {
    inventory: Arc<Inventory>,
    order: Order,
    category: Option<String>,
    selected_item: Option<Code<MenuItem>>,
    addon_picks: Vec<(Code<AddOn>, bool)>,
    quantity: String,
    status: String,
    theme: Theme,
}

#[derive(Debug, Clone)]
pub enum OrderingMessage {
    CategoryPicked(Option<String>),
    ItemPicked(Code<MenuItem>),
    AddonToggled(usize, bool),
    QuantityChanged(String),
    AddLine,
    RemoveLine(Id<OrderLine>),
    NewOrder,
}

impl OrderingGui {
    pub fn new(inventory: Arc<Inventory>) -> (Self, Task<OrderingMessage>) {
        let addon_picks = inventory
            .list_addons()
            .iter()
            .map(|addon| (addon.id.clone(), false))
            .collect();
        let order = Order::new(inventory.clone());

        let gui = OrderingGui {
            inventory,
            order,
            category: None,
            selected_item: None,
            addon_picks,
            quantity: String::from("1"),
            status: String::new(),
            theme: Theme::Dark,
        };

        (gui, Task::none())
    }

    pub fn title(&self) -> String {
        String::from("Rustaurant")
    }

    pub fn update(&mut self, message: OrderingMessage) -> Task<OrderingMessage> {
        match message {
            OrderingMessage::CategoryPicked(category) => {
                self.category = category;
                Task::none()
            }
            OrderingMessage::ItemPicked(code) => {
                self.selected_item = Some(code);
                Task::none()
            }
            OrderingMessage::AddonToggled(idx, picked) => {
                if let Some(entry) = self.addon_picks.get_mut(idx) {
                    entry.1 = picked;
                }
                Task::none()
            }
            OrderingMessage::QuantityChanged(quantity) => {
                self.quantity = quantity;
                Task::none()
            }
            OrderingMessage::AddLine => {
                self.add_selected();
                Task::none()
            }
            OrderingMessage::RemoveLine(id) => {
                match self.order.remove_line(id) {
                    Ok(line) => self.status = format!("Removed {}", line.description()),
                    Err(e) => self.status = e.to_string(),
                }
                Task::none()
            }
            OrderingMessage::NewOrder => {
                self.order = Order::new(self.inventory.clone());
                self.status = String::from("Started a new order");
                Task::none()
            }
        }
    }

    fn add_selected(&mut self) {
        let item = match self.selected_item.clone() {
            Some(item) => item,
            None => {
                self.status = String::from("Pick an item first");
                return;
            }
        };
        let quantity = match self.quantity.trim().parse::<u32>() {
            Ok(quantity) => quantity,
            Err(_) => {
                self.status = format!("Quantity must be a whole number, got {:?}", self.quantity);
                return;
            }
        };
        let addons: Vec<Code<AddOn>> = self
            .addon_picks
            .iter()
            .filter(|(_, picked)| *picked)
            .map(|(code, _)| code.clone())
            .collect();

        match self.order.add_line(&item, &addons, quantity) {
            Ok(line) => {
                self.status = format!("Added {}", line.description());
                for (_, picked) in &mut self.addon_picks {
                    *picked = false;
                }
            }
            Err(e) => self.status = e.to_string(),
        }
    }

    fn menu_column(&self) -> Element<OrderingMessage> {
        let mut categories = Row::new().spacing(5);
        categories = categories.push(
            Button::new(Text::new("All").align_x(Alignment::Center))
                .on_press(OrderingMessage::CategoryPicked(None)),
        );
        for category in self.inventory.categories() {
            let message = OrderingMessage::CategoryPicked(Some(category.clone()));
            categories = categories.push(Button::new(Text::new(category)).on_press(message));
        }

        let mut items = Column::new().spacing(5);
        for item in self.inventory.list_items(self.category.as_deref()) {
            let label = format!("{}  ${:.2}", item.name, item.price);
            items = items.push(
                Button::new(Text::new(label))
                    .on_press(OrderingMessage::ItemPicked(item.id.clone()))
                    .width(Length::Fill),
            );
        }
        let items_pane = scrollable(items).height(Length::Fill);

        let selected_caption = self
            .selected_item
            .as_ref()
            .and_then(|code| self.inventory.get_item(code))
            .map(|item| format!("Selected: {}  ${:.2}", item.name, item.price))
            .unwrap_or_else(|| String::from("Pick an item"));

        let mut addons = Column::new().spacing(5);
        for (idx, (code, picked)) in self.addon_picks.iter().enumerate() {
            if let Some(addon) = self.inventory.get_addon(code) {
                let label = format!("{} (+${:.2})", addon.name, addon.price);
                addons = addons.push(
                    Checkbox::new(label, *picked)
                        .on_toggle(move |value| OrderingMessage::AddonToggled(idx, value)),
                );
            }
        }

        let quantity_input = text_input("1", &self.quantity)
            .on_input(OrderingMessage::QuantityChanged)
            .width(60);
        let add_button = Button::new(Text::new("Add to Order").align_x(Alignment::Center))
            .on_press(OrderingMessage::AddLine)
            .width(140);
        let controls = row![
            text("Qty:"),
            quantity_input,
            horizontal_space().width(10),
            add_button
        ]
        .align_y(Alignment::Center)
        .spacing(5);

        column![
            text("Menu").size(24),
            categories,
            items_pane,
            text(selected_caption),
            text("Add-ons:"),
            addons,
            controls
        ]
        .spacing(10)
        .padding(10)
        .width(Length::FillPortion(5))
        .into()
    }

    fn order_column(&self) -> Element<OrderingMessage> {
        let mut lines = Column::new().spacing(5);
        for summary in self.order.summary() {
            let label = format!("{}  ${:.2}", summary.description, summary.subtotal);
            let remove_button = Button::new(Text::new("Remove").align_x(Alignment::Center))
                .on_press(OrderingMessage::RemoveLine(summary.line))
                .width(90);
            lines = lines.push(
                row![text(label).width(Length::Fill), remove_button]
                    .align_y(Alignment::Center)
                    .spacing(10),
            );
        }
        let receipt = scrollable(lines).height(Length::Fill);

        let subtotal = self.order.total();
        let tax = (subtotal * tax_rate()).round_dp(2);
        let totals = column![
            text(format!("Subtotal: ${:.2}", subtotal)),
            text(format!("Tax: ${:.2}", tax)),
            text(format!("Total: ${:.2}", subtotal + tax)).size(20)
        ]
        .spacing(5);

        let new_order_button = Button::new(Text::new("New Order").align_x(Alignment::Center))
            .on_press(OrderingMessage::NewOrder)
            .width(140);

        column![
            text("Order").size(24),
            receipt,
            totals,
            new_order_button,
            text(&self.status)
        ]
        .spacing(10)
        .padding(10)
        .width(Length::FillPortion(4))
        .into()
    }

    pub fn view(&self) -> Element<OrderingMessage> {
        let body = row![self.menu_column(), vertical_rule(1), self.order_column()]
            .height(Length::Fill);

        container(body)
            .center_x(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    pub fn theme(&self) -> Theme {
        self.theme.clone()
    }
}

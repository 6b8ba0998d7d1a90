use std::sync::Arc;

use anyhow::{anyhow, Result};
use log::*;

use infra::ids::{Code, Id};

use crate::menu::{AddOn, Inventory, MenuItem};
use crate::orders::{Order, OrderLine};

use super::{tax_rate, FrontEnd};

pub struct EguiFrontEnd;

impl FrontEnd for EguiFrontEnd {
    fn name(&self) -> &'static str {
        "egui"
    }

    fn run(&self, inventory: Arc<Inventory>) -> Result<()> {
        info!("Starting egui front-end");
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([960.0, 640.0])
                .with_title("Rustaurant"),
            ..Default::default()
        };

        eframe::run_native(
            "Rustaurant",
            options,
            Box::new(move |_cc| Ok(Box::new(OrderingApp::new(inventory)))),
        )
        .map_err(|e| anyhow!("egui front-end: {}", e))
    }
}

struct OrderingApp {
    inventory: Arc<Inventory>,
    order: Order,
    category: Option<String>,
    selected_item: Option<Code<MenuItem>>,
    addon_picks: Vec<(Code<AddOn>, bool)>,
    quantity: String,
    selected_line: Option<Id<OrderLine>>,
    status: String,
}

impl OrderingApp {
    fn new(inventory: Arc<Inventory>) -> Self {
        let addon_picks = inventory
            .list_addons()
            .iter()
            .map(|addon| (addon.id.clone(), false))
            .collect();
        let order = Order::new(inventory.clone());

        OrderingApp {
            inventory,
            order,
            category: None,
            selected_item: None,
            addon_picks,
            quantity: String::from("1"),
            selected_line: None,
            status: String::new(),
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

    fn remove_selected(&mut self) {
        let id = match self.selected_line.take() {
            Some(id) => id,
            None => {
                self.status = String::from("Pick a line to remove");
                return;
            }
        };
        match self.order.remove_line(id) {
            Ok(line) => self.status = format!("Removed {}", line.description()),
            Err(e) => self.status = e.to_string(),
        }
    }
}

impl eframe::App for OrderingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::left("menu_panel")
            .default_width(380.0)
            .show(ctx, |ui| {
                ui.heading("Menu");
                ui.separator();

                ui.horizontal_wrapped(|ui| {
                    if ui.selectable_label(self.category.is_none(), "All").clicked() {
                        self.category = None;
                    }
                    for category in self.inventory.categories() {
                        let selected = self.category.as_deref() == Some(category.as_str());
                        if ui.selectable_label(selected, &category).clicked() {
                            self.category = Some(category);
                        }
                    }
                });
                ui.add_space(5.0);

                egui::ScrollArea::vertical()
                    .max_height(260.0)
                    .show(ui, |ui| {
                        for item in self.inventory.list_items(self.category.as_deref()) {
                            let selected = self.selected_item.as_ref() == Some(&item.id);
                            let label = format!("{}  ${:.2}", item.name, item.price);
                            if ui.selectable_label(selected, label).clicked() {
                                self.selected_item = Some(item.id.clone());
                            }
                        }
                    });

                ui.add_space(10.0);
                ui.label("Add-ons:");
                for (code, picked) in &mut self.addon_picks {
                    if let Some(addon) = self.inventory.get_addon(code) {
                        let label = format!("{} (+${:.2})", addon.name, addon.price);
                        ui.checkbox(picked, label);
                    }
                }

                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.label("Qty:");
                    ui.text_edit_singleline(&mut self.quantity);
                });

                if ui.button("Add to Order").clicked() {
                    self.add_selected();
                }
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Order");
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(320.0)
                .show(ui, |ui| {
                    for row in self.order.summary() {
                        let selected = self.selected_line == Some(row.line);
                        let label = format!("{}  ${:.2}", row.description, row.subtotal);
                        if ui.selectable_label(selected, label).clicked() {
                            self.selected_line = Some(row.line);
                        }
                    }
                });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                if ui.button("Remove Selected").clicked() {
                    self.remove_selected();
                }
                if ui.button("New Order").clicked() {
                    self.order = Order::new(self.inventory.clone());
                    self.selected_line = None;
                    self.status = String::from("Started a new order");
                }
            });

            ui.separator();
            let subtotal = self.order.total();
            let tax = (subtotal * tax_rate()).round_dp(2);
            ui.label(format!("Subtotal: ${:.2}", subtotal));
            ui.label(format!("Tax: ${:.2}", tax));
            ui.strong(format!("Total: ${:.2}", subtotal + tax));

            ui.add_space(10.0);
            ui.label(&self.status);
        });
    }
}

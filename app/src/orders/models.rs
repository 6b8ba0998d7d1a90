use rust_decimal::Decimal;

use infra::ids::{Entity, Id};

use crate::menu::{AddOn, MenuItem};

/// One entry in an order: an item, its chosen add-ons, and a quantity.
/// The records are clones of the (immutable) catalog entries, so the line
/// prices what it describes even without the inventory in hand.
#[derive(Debug, Clone)]
pub struct OrderLine {
    pub id: Id<OrderLine>,
    pub item: MenuItem,
    pub addons: Vec<AddOn>,
    pub quantity: u32,
}

/// A receipt row for display: insertion order matches the order's lines.
#[derive(Debug, Clone, PartialEq)]
pub struct LineSummary {
    pub line: Id<OrderLine>,
    pub description: String,
    pub subtotal: Decimal,
}

impl Entity for OrderLine {
    const PREFIX: &'static str = "line";
}

impl OrderLine {
    /// Item price plus all add-on prices, for one unit.
    pub fn unit_price(&self) -> Decimal {
        self.addons
            .iter()
            .fold(self.item.price, |sum, addon| sum + addon.price)
    }

    pub fn subtotal(&self) -> Decimal {
        self.unit_price() * Decimal::from(self.quantity)
    }

    /// e.g. `Classic Burger + Cheese x2`
    pub fn description(&self) -> String {
        let mut description = self.item.name.clone();
        for addon in &self.addons {
            description.push_str(" + ");
            description.push_str(&addon.name);
        }
        description.push_str(&format!(" x{}", self.quantity));
        description
    }

    pub fn summary(&self) -> LineSummary {
        LineSummary {
            line: self.id,
            description: self.description(),
            subtotal: self.subtotal(),
        }
    }
}

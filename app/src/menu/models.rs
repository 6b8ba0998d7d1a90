use rust_decimal::Decimal;

use infra::ids::{Code, Entity};

/// One sellable dish or drink from the items file. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: Code<MenuItem>,
    pub name: String,
    pub price: Decimal,
    pub category: String,
}

/// An extra that can be attached to a menu item, from the add-ons file.
#[derive(Debug, Clone, PartialEq)]
pub struct AddOn {
    pub id: Code<AddOn>,
    pub name: String,
    pub price: Decimal,
}

impl Entity for MenuItem {
    const PREFIX: &'static str = "item";
}

impl Entity for AddOn {
    const PREFIX: &'static str = "addon";
}

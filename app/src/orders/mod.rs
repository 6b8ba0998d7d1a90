use std::sync::Arc;

use err_derive::Error;
use log::*;
use rust_decimal::Decimal;

use infra::ids::{Code, Entity, Id, IdGen};

use crate::menu::{AddOn, Inventory, MenuItem};

pub mod models;

pub use self::models::{LineSummary, OrderLine};

#[derive(Debug, Error, PartialEq)]
pub enum OrderError {
    #[error(display = "unknown {} id {:?}", _0, _1)]
    UnknownReference(&'static str, String),
    #[error(display = "quantity must be at least 1, got {}", _0)]
    InvalidQuantity(u32),
    #[error(display = "no line {} in this order", _0)]
    LineNotFound(Id<OrderLine>),
}

/// A single session's cart. Mutations validate against the inventory the
/// order was opened with; every failure leaves the lines untouched.
#[derive(Debug)]
pub struct Order {
    inventory: Arc<Inventory>,
    idgen: IdGen,
    lines: Vec<OrderLine>,
}

impl Order {
    pub fn new(inventory: Arc<Inventory>) -> Self {
        Order {
            inventory,
            idgen: IdGen::new(),
            lines: Vec::new(),
        }
    }

    /// Validate the references and quantity, then append a line and return it.
    pub fn add_line(
        &mut self,
        item: &Code<MenuItem>,
        addons: &[Code<AddOn>],
        quantity: u32,
    ) -> Result<&OrderLine, OrderError> {
        if quantity < 1 {
            return Err(OrderError::InvalidQuantity(quantity));
        }
        let item = self
            .inventory
            .get_item(item)
            .ok_or_else(|| OrderError::UnknownReference(MenuItem::PREFIX, item.to_string()))?
            .clone();
        let mut picked = Vec::with_capacity(addons.len());
        for code in addons {
            let addon = self
                .inventory
                .get_addon(code)
                .ok_or_else(|| OrderError::UnknownReference(AddOn::PREFIX, code.to_string()))?;
            picked.push(addon.clone());
        }

        let line = OrderLine {
            id: self.idgen.generate(),
            item,
            addons: picked,
            quantity,
        };
        debug!("add {}: {}", line.id, line.description());
        let idx = self.lines.len();
        self.lines.push(line);
        Ok(&self.lines[idx])
    }

    /// Remove a previously added line and hand it back.
    pub fn remove_line(&mut self, id: Id<OrderLine>) -> Result<OrderLine, OrderError> {
        match self.lines.iter().position(|line| line.id == id) {
            Some(idx) => {
                let line = self.lines.remove(idx);
                debug!("remove {}: {}", line.id, line.description());
                Ok(line)
            }
            None => Err(OrderError::LineNotFound(id)),
        }
    }

    /// Recomputed from the current lines on every call; nothing is cached.
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|line| line.subtotal()).sum()
    }

    /// Receipt rows in insertion order.
    pub fn summary(&self) -> Vec<LineSummary> {
        self.lines.iter().map(|line| line.summary()).collect()
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::menu::parser;

    fn sample_inventory() -> Arc<Inventory> {
        let items = parser::parse_items(
            "B01|Classic Burger|5.50|entree\nD01|Fountain Drink|1.95|drink",
            "items.txt",
        )
        .expect("parse items");
        let addons =
            parser::parse_addons("A01|Cheese|0.75\nA02|Bacon|1.25", "addons.txt")
                .expect("parse addons");
        Arc::new(Inventory::from_records(items, addons))
    }

    fn code<T>(s: &str) -> Code<T> {
        s.parse().expect("code")
    }

    #[test]
    fn computes_the_documented_example_total() {
        let mut order = Order::new(sample_inventory());

        let line = order
            .add_line(&code("B01"), &[code("A01")], 2)
            .expect("add line");

        assert_eq!(line.unit_price(), Decimal::new(625, 2));
        assert_eq!(line.subtotal(), Decimal::new(1250, 2));
        assert_eq!(order.total(), Decimal::new(1250, 2));
    }

    #[test]
    fn total_sums_over_all_lines() {
        let mut order = Order::new(sample_inventory());

        order
            .add_line(&code("B01"), &[code("A01"), code("A02")], 1)
            .expect("add burger");
        order.add_line(&code("D01"), &[], 3).expect("add drinks");

        // (5.50 + 0.75 + 1.25) + 3 * 1.95
        assert_eq!(order.total(), Decimal::new(1335, 2));
    }

    #[test]
    fn add_then_remove_restores_the_prior_total() {
        let mut order = Order::new(sample_inventory());
        order.add_line(&code("D01"), &[], 1).expect("add drink");
        let before = order.total();

        let id = order
            .add_line(&code("B01"), &[code("A01")], 2)
            .expect("add burger")
            .id;
        assert_ne!(order.total(), before);

        order.remove_line(id).expect("remove burger");
        assert_eq!(order.total(), before);
    }

    #[test]
    fn rejects_an_unknown_item() {
        let mut order = Order::new(sample_inventory());

        let err = order
            .add_line(&code("ZZZ"), &[], 1)
            .expect_err("should fail");

        assert_eq!(
            err,
            OrderError::UnknownReference("item", "ZZZ".to_string())
        );
        assert!(order.is_empty());
        assert_eq!(order.total(), Decimal::ZERO);
    }

    #[test]
    fn rejects_an_unknown_addon() {
        let mut order = Order::new(sample_inventory());

        let err = order
            .add_line(&code("B01"), &[code("A01"), code("A99")], 1)
            .expect_err("should fail");

        assert_eq!(
            err,
            OrderError::UnknownReference("addon", "A99".to_string())
        );
        assert!(order.is_empty());
    }

    #[test]
    fn rejects_a_zero_quantity() {
        let mut order = Order::new(sample_inventory());

        let err = order
            .add_line(&code("B01"), &[], 0)
            .expect_err("should fail");

        assert_eq!(err, OrderError::InvalidQuantity(0));
        assert!(order.is_empty());
    }

    #[test]
    fn removing_an_absent_line_leaves_the_order_alone() {
        let mut order = Order::new(sample_inventory());
        order.add_line(&code("B01"), &[], 1).expect("add burger");
        let before = order.total();

        let bogus = IdGen::new().generate();
        let err = order.remove_line(bogus).expect_err("should fail");

        assert_eq!(err, OrderError::LineNotFound(bogus));
        assert_eq!(order.total(), before);
        assert_eq!(order.lines().len(), 1);
    }

    #[test]
    fn summary_preserves_insertion_order() {
        let mut order = Order::new(sample_inventory());
        order.add_line(&code("D01"), &[], 2).expect("add drinks");
        order
            .add_line(&code("B01"), &[code("A01")], 1)
            .expect("add burger");

        let summary = order.summary();

        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].description, "Fountain Drink x2");
        assert_eq!(summary[1].description, "Classic Burger + Cheese x1");
        assert_eq!(summary[1].subtotal, Decimal::new(625, 2));
    }

    #[test]
    fn identical_selections_become_distinct_lines() {
        let mut order = Order::new(sample_inventory());

        let first = order.add_line(&code("D01"), &[], 1).expect("first").id;
        let second = order.add_line(&code("D01"), &[], 1).expect("second").id;

        assert_ne!(first, second);
        assert_eq!(order.lines().len(), 2);

        order.remove_line(first).expect("remove first");
        assert_eq!(order.total(), Decimal::new(195, 2));
    }
}

use std::sync::Arc;

use log::*;

pub mod config;
pub mod menu;
pub mod orders;
pub mod ui;

use crate::menu::{Inventory, LoadError};
use crate::orders::Order;

/// The assembled application: the catalog, loaded once at startup and
/// read-only for the life of the process.
pub struct Rustaurant {
    inventory: Arc<Inventory>,
}

impl Rustaurant {
    pub fn new(config: &config::Config) -> Result<Self, LoadError> {
        debug!(
            "Loading catalog from {:?} and {:?}",
            config.data.items, config.data.addons
        );
        let inventory = Inventory::load(&config.data.items, &config.data.addons)?;
        info!(
            "Catalog ready: {} items, {} add-ons",
            inventory.list_items(None).len(),
            inventory.list_addons().len()
        );

        Ok(Rustaurant {
            inventory: Arc::new(inventory),
        })
    }

    /// Shared handle to the catalog for a front-end.
    pub fn inventory(&self) -> Arc<Inventory> {
        self.inventory.clone()
    }

    /// Open a new ordering session against the catalog.
    pub fn new_order(&self) -> Order {
        Order::new(self.inventory.clone())
    }
}

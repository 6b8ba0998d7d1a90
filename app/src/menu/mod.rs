use std::collections::HashMap;
use std::path::Path;

use log::*;

use infra::ids::Code;

pub mod models;
pub mod parser;

pub use self::models::{AddOn, MenuItem};
pub use self::parser::{LoadError, ParseError};

/// The catalog loaded from the two data files. Built once at startup and
/// never mutated afterwards; listings keep the file order so the front-ends
/// show the menu the way the data files spell it.
#[derive(Debug, Clone)]
pub struct Inventory {
    items: HashMap<Code<MenuItem>, MenuItem>,
    addons: HashMap<Code<AddOn>, AddOn>,
    item_order: Vec<Code<MenuItem>>,
    addon_order: Vec<Code<AddOn>>,
}

impl Inventory {
    pub fn load(items_path: &Path, addons_path: &Path) -> Result<Self, LoadError> {
        let items = parser::load_items(items_path)?;
        let addons = parser::load_addons(addons_path)?;
        Ok(Self::from_records(items, addons))
    }

    pub fn from_records(items: Vec<MenuItem>, addons: Vec<AddOn>) -> Self {
        let mut inventory = Inventory {
            items: HashMap::new(),
            addons: HashMap::new(),
            item_order: Vec::new(),
            addon_order: Vec::new(),
        };

        for item in items {
            let id = item.id.clone();
            if inventory.items.insert(id.clone(), item).is_some() {
                warn!("duplicate item id {}, keeping the later record", id);
            } else {
                inventory.item_order.push(id);
            }
        }
        for addon in addons {
            let id = addon.id.clone();
            if inventory.addons.insert(id.clone(), addon).is_some() {
                warn!("duplicate add-on id {}, keeping the later record", id);
            } else {
                inventory.addon_order.push(id);
            }
        }

        inventory
    }

    pub fn get_item(&self, id: &Code<MenuItem>) -> Option<&MenuItem> {
        self.items.get(id)
    }

    pub fn get_addon(&self, id: &Code<AddOn>) -> Option<&AddOn> {
        self.addons.get(id)
    }

    /// Items in file order, optionally restricted to one category.
    pub fn list_items(&self, category: Option<&str>) -> Vec<&MenuItem> {
        self.item_order
            .iter()
            .filter_map(|id| self.items.get(id))
            .filter(|item| category.map_or(true, |c| item.category == c))
            .collect()
    }

    pub fn list_addons(&self) -> Vec<&AddOn> {
        self.addon_order
            .iter()
            .filter_map(|id| self.addons.get(id))
            .collect()
    }

    /// Distinct categories in first-seen file order.
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = Vec::new();
        for item in self.list_items(None) {
            if !categories.contains(&item.category) {
                categories.push(item.category.clone());
            }
        }
        categories
    }
}

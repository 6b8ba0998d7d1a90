use std::sync::Arc;

use anyhow::Result;
use log::*;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::menu::Inventory;

pub mod egui_app;
pub mod iced_app;
pub mod terminal;

/// The two equivalent GUI toolkits the desk can run on.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Toolkit {
    Egui,
    Iced,
}

impl Default for Toolkit {
    fn default() -> Self {
        Toolkit::Egui
    }
}

impl Toolkit {
    pub fn name(self) -> &'static str {
        match self {
            Toolkit::Egui => "egui",
            Toolkit::Iced => "iced",
        }
    }

    pub fn fallback(self) -> Toolkit {
        match self {
            Toolkit::Egui => Toolkit::Iced,
            Toolkit::Iced => Toolkit::Egui,
        }
    }
}

/// A front-end owns the event loop: it reads the shared inventory and drives
/// a per-session `Order` in response to user actions.
pub trait FrontEnd {
    fn name(&self) -> &'static str;
    fn run(&self, inventory: Arc<Inventory>) -> Result<()>;
}

pub fn front_end(toolkit: Toolkit) -> Box<dyn FrontEnd> {
    match toolkit {
        Toolkit::Egui => Box::new(egui_app::EguiFrontEnd),
        Toolkit::Iced => Box::new(iced_app::IcedFrontEnd),
    }
}

/// Run the preferred toolkit; if it cannot come up, warn and try the other.
pub fn launch(preferred: Toolkit, inventory: Arc<Inventory>) -> Result<()> {
    let first = front_end(preferred);
    match first.run(inventory.clone()) {
        Ok(()) => Ok(()),
        Err(e) => {
            let second = front_end(preferred.fallback());
            warn!(
                "{} front-end unavailable ({}), trying {}",
                first.name(),
                e,
                second.name()
            );
            second.run(inventory)
        }
    }
}

/// The receipt tax rate both GUIs print under the subtotal. Display only;
/// `Order::total` stays the plain sum of line subtotals.
pub(crate) fn tax_rate() -> Decimal {
    Decimal::new(7, 2)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn each_toolkit_falls_back_to_the_other() {
        assert_eq!(Toolkit::Egui.fallback(), Toolkit::Iced);
        assert_eq!(Toolkit::Iced.fallback(), Toolkit::Egui);
        assert_eq!(Toolkit::Egui.fallback().fallback(), Toolkit::Egui);
    }

    #[test]
    fn deserializes_from_lowercase_names() {
        #[derive(Deserialize)]
        struct Probe {
            prefer: Toolkit,
        }

        let probe: Probe = toml::from_str("prefer = \"iced\"").expect("parse");
        assert_eq!(probe.prefer, Toolkit::Iced);
    }
}

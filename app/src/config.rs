use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::*;
use serde::Deserialize;

use crate::ui::Toolkit;

/// Consulted when no `--config` flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "rustaurant.toml";

const ENV_PREFIX: &str = "RUSTAURANT_";

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub ui: UiConfig,
    pub env_logger: EnvLogger,
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct DataConfig {
    pub items: PathBuf,
    pub addons: PathBuf,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct UiConfig {
    pub prefer: Toolkit,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct EnvLogger {
    level: Option<LogLevel>,
    modules: HashMap<String, LogLevel>,
    timestamp_nanos: bool,
}

/// Environment overrides, e.g. `RUSTAURANT_ITEMS_FILE=/tmp/menu.txt`.
/// Applied only when running without an explicit `--config`.
#[derive(Deserialize, Debug)]
struct Overrides {
    items_file: Option<PathBuf>,
    addons_file: Option<PathBuf>,
    front_end: Option<Toolkit>,
}

impl Default for DataConfig {
    fn default() -> Self {
        DataConfig {
            items: PathBuf::from("data/menu_items.txt"),
            addons: PathBuf::from("data/addons.txt"),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Config> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default = Path::new(DEFAULT_CONFIG_PATH);
                let mut config = if default.exists() {
                    Self::from_file(default)?
                } else {
                    Config::default()
                };
                let overrides = envy::prefixed(ENV_PREFIX)
                    .from_env::<Overrides>()
                    .context("read RUSTAURANT_* environment")?;
                config.apply(overrides);
                Ok(config)
            }
        }
    }

    fn from_file(path: &Path) -> Result<Config> {
        debug!("Read config from {:?}", path);
        let buf = fs::read_to_string(path).with_context(|| format!("read config {:?}", path))?;
        toml::from_str(&buf).with_context(|| format!("parse config {:?}", path))
    }

    fn apply(&mut self, overrides: Overrides) {
        if let Some(items) = overrides.items_file {
            self.data.items = items;
        }
        if let Some(addons) = overrides.addons_file {
            self.data.addons = addons;
        }
        if let Some(front_end) = overrides.front_end {
            self.ui.prefer = front_end;
        }
    }
}

impl LogLevel {
    fn to_filter(&self) -> log::LevelFilter {
        match self {
            &LogLevel::Off => log::LevelFilter::Off,
            &LogLevel::Error => log::LevelFilter::Error,
            &LogLevel::Warn => log::LevelFilter::Warn,
            &LogLevel::Info => log::LevelFilter::Info,
            &LogLevel::Debug => log::LevelFilter::Debug,
            &LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

impl EnvLogger {
    pub fn builder(&self) -> env_logger::Builder {
        let mut b = env_logger::Builder::from_default_env();
        if let Some(level) = self.level.as_ref() {
            b.filter_level(level.to_filter());
        }

        for (module, level) in self.modules.iter() {
            b.filter_module(&module, level.to_filter());
        }

        if self.timestamp_nanos {
            b.format_timestamp_nanos();
        }

        return b;
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_point_at_the_shipped_data_files() {
        let config = Config::default();

        assert_eq!(config.data.items, PathBuf::from("data/menu_items.txt"));
        assert_eq!(config.data.addons, PathBuf::from("data/addons.txt"));
        assert_eq!(config.ui.prefer, Toolkit::Egui);
    }

    #[test]
    fn parses_a_full_config_file() {
        let toml = r#"
            [data]
            items = "elsewhere/menu.txt"
            addons = "elsewhere/extras.txt"

            [ui]
            prefer = "iced"

            [env_logger]
            level = "debug"
            timestamp_nanos = true
            [env_logger.modules]
            rustaurant = "trace"
        "#;

        let config: Config = toml::from_str(toml).expect("parse config");

        assert_eq!(config.data.items, PathBuf::from("elsewhere/menu.txt"));
        assert_eq!(config.ui.prefer, Toolkit::Iced);
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config: Config = toml::from_str("[ui]\nprefer = \"iced\"\n").expect("parse config");

        assert_eq!(config.data.items, PathBuf::from("data/menu_items.txt"));
        assert_eq!(config.ui.prefer, Toolkit::Iced);
    }
}

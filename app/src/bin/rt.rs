use std::path::PathBuf;

use anyhow::Result;
use structopt::StructOpt;

use rustaurant::config::Config;
use rustaurant::ui::{self, Toolkit};
use rustaurant::Rustaurant;

#[derive(Debug, StructOpt)]
#[structopt(name = "rt", about = "Rustaurant ordering desk.")]
struct Opt {
    /// Config file; without it the defaults plus RUSTAURANT_* overrides apply
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
    /// Force the egui front-end
    #[structopt(long, conflicts_with_all = &["iced", "cli"])]
    egui: bool,
    /// Force the iced front-end
    #[structopt(long, conflicts_with = "cli")]
    iced: bool,
    /// Minimal console ordering mode; needs no display
    #[structopt(long)]
    cli: bool,
}

fn main() -> Result<()> {
    let opt = Opt::from_args();

    let config = Config::load(opt.config.as_deref())?;
    config.env_logger.builder().init();

    let app = Rustaurant::new(&config)?;
    let inventory = app.inventory();

    if opt.cli {
        ui::terminal::run(inventory)
    } else if opt.egui {
        ui::front_end(Toolkit::Egui).run(inventory)
    } else if opt.iced {
        ui::front_end(Toolkit::Iced).run(inventory)
    } else {
        ui::launch(config.ui.prefer, inventory)
    }
}

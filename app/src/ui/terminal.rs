use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Result};

use infra::ids::{Code, Id};

use crate::menu::{AddOn, Inventory, MenuItem};
use crate::orders::{Order, OrderLine};

/// Minimal console ordering mode: enough to smoke-test the catalog and the
/// order model on a machine with no display.
pub fn run(inventory: Arc<Inventory>) -> Result<()> {
    println!(
        "Loaded {} items and {} add-ons.",
        inventory.list_items(None).len(),
        inventory.list_addons().len()
    );
    print_menu(&inventory);
    print_addons(&inventory);
    println!();
    println!("Commands: menu, addons, add <item> [addon,addon] [qty], remove <line-id>, receipt, quit");

    let stdin = io::stdin();
    let mut order = Order::new(inventory.clone());

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let words: Vec<&str> = line.split_whitespace().collect();

        match words.as_slice() {
            [] => continue,
            ["quit"] | ["exit"] => break,
            ["menu"] => print_menu(&inventory),
            ["addons"] => print_addons(&inventory),
            ["receipt"] => print_receipt(&order),
            ["add", rest @ ..] => match add(&mut order, rest) {
                Ok(description) => println!("Added {}", description),
                Err(e) => println!("Could not add line: {}", e),
            },
            ["remove", id] => match remove(&mut order, id) {
                Ok(description) => println!("Removed {}", description),
                Err(e) => println!("Could not remove line: {}", e),
            },
            _ => println!("Unrecognized command: {}", line.trim()),
        }
    }

    if !order.is_empty() {
        print_receipt(&order);
    }

    Ok(())
}

fn add(order: &mut Order, args: &[&str]) -> Result<String> {
    let (item, rest) = match args.split_first() {
        Some(split) => split,
        None => bail!("usage: add <item> [addon,addon] [qty]"),
    };
    let item: Code<MenuItem> = item.parse().map_err(|e| anyhow!("item id: {}", e))?;

    let mut addons: Vec<Code<AddOn>> = Vec::new();
    let mut quantity = 1;
    for arg in rest {
        if let Ok(parsed) = arg.parse::<u32>() {
            quantity = parsed;
            continue;
        }
        for code in arg.split(',') {
            addons.push(code.parse().map_err(|e| anyhow!("add-on id: {}", e))?);
        }
    }

    let line = order.add_line(&item, &addons, quantity)?;
    Ok(line.description())
}

fn remove(order: &mut Order, id: &str) -> Result<String> {
    let id: Id<OrderLine> = id.parse().map_err(|e| anyhow!("{:?}: {}", id, e))?;
    let line = order.remove_line(id)?;
    Ok(line.description())
}

fn print_menu(inventory: &Inventory) {
    println!();
    for category in inventory.categories() {
        println!("[{}]", category);
        for item in inventory.list_items(Some(&category)) {
            println!("  {:<5} {:<28} ${:.2}", item.id.to_string(), item.name, item.price);
        }
    }
}

fn print_addons(inventory: &Inventory) {
    println!();
    println!("[add-ons]");
    for addon in inventory.list_addons() {
        println!("  {:<5} {:<28} ${:.2}", addon.id.to_string(), addon.name, addon.price);
    }
}

fn print_receipt(order: &Order) {
    println!("Receipt Summary:");
    for row in order.summary() {
        println!("  {}  {} = ${:.2}", row.line, row.description, row.subtotal);
    }
    println!("{}", "-".repeat(28));
    println!("Subtotal: ${:.2}", order.total());
}

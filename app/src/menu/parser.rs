use std::fs;
use std::path::{Path, PathBuf};

use err_derive::Error;
use log::*;
use rust_decimal::Decimal;

use infra::ids::Code;

use super::models::{AddOn, MenuItem};

/// Field separator used by the shipped data files.
pub const DELIMITER: char = '|';
const COMMENT: char = '#';

const ITEM_FIELDS: usize = 4;
const ADDON_FIELDS: usize = 3;

#[derive(Debug, Error)]
#[error(display = "{}:{}: {}", origin, line, problem)]
pub struct ParseError {
    pub origin: String,
    pub line: usize,
    pub problem: Problem,
}

#[derive(Debug, Error, PartialEq)]
pub enum Problem {
    #[error(display = "expected {} fields, found {}", _0, _1)]
    FieldCount(usize, usize),
    #[error(display = "empty {} field", _0)]
    EmptyField(&'static str),
    #[error(display = "unparseable price {:?}", _0)]
    Price(String),
    #[error(display = "negative price {}", _0)]
    NegativePrice(Decimal),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(display = "data file {:?} is missing", _0)]
    Missing(PathBuf),
    #[error(display = "could not read {:?}", _0)]
    Io(PathBuf, #[error(source)] std::io::Error),
    #[error(display = "{}", _0)]
    Parse(#[error(source)] ParseError),
}

/// Parse the items file format: `id | name | price | category`.
pub fn parse_items(text: &str, origin: &str) -> Result<Vec<MenuItem>, ParseError> {
    records(text, origin, |fields| {
        expect_fields(fields, ITEM_FIELDS)?;
        Ok(MenuItem {
            id: code(fields[0])?,
            name: required(fields[1], "name")?.to_string(),
            price: price(fields[2])?,
            category: required(fields[3], "category")?.to_string(),
        })
    })
}

/// Parse the add-ons file format: `id | name | price`.
pub fn parse_addons(text: &str, origin: &str) -> Result<Vec<AddOn>, ParseError> {
    records(text, origin, |fields| {
        expect_fields(fields, ADDON_FIELDS)?;
        Ok(AddOn {
            id: code(fields[0])?,
            name: required(fields[1], "name")?.to_string(),
            price: price(fields[2])?,
        })
    })
}

pub fn load_items(path: &Path) -> Result<Vec<MenuItem>, LoadError> {
    let text = read(path)?;
    let items =
        parse_items(&text, &path.display().to_string()).map_err(LoadError::Parse)?;
    debug!("{}: {} item records", path.display(), items.len());
    Ok(items)
}

pub fn load_addons(path: &Path) -> Result<Vec<AddOn>, LoadError> {
    let text = read(path)?;
    let addons =
        parse_addons(&text, &path.display().to_string()).map_err(LoadError::Parse)?;
    debug!("{}: {} add-on records", path.display(), addons.len());
    Ok(addons)
}

fn read(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::Missing(path.to_path_buf()));
    }
    fs::read_to_string(path).map_err(|e| LoadError::Io(path.to_path_buf(), e))
}

fn records<T, F: Fn(&[&str]) -> Result<T, Problem>>(
    text: &str,
    origin: &str,
    build: F,
) -> Result<Vec<T>, ParseError> {
    let mut out = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }
        let fields: Vec<&str> = line.split(DELIMITER).map(str::trim).collect();
        let record = build(&fields).map_err(|problem| ParseError {
            origin: origin.to_string(),
            line: idx + 1,
            problem,
        })?;
        out.push(record);
    }
    Ok(out)
}

fn expect_fields(fields: &[&str], want: usize) -> Result<(), Problem> {
    if fields.len() != want {
        return Err(Problem::FieldCount(want, fields.len()));
    }
    Ok(())
}

fn code<T>(field: &str) -> Result<Code<T>, Problem> {
    Code::new(field).map_err(|_| Problem::EmptyField("id"))
}

fn required<'a>(field: &'a str, label: &'static str) -> Result<&'a str, Problem> {
    if field.is_empty() {
        return Err(Problem::EmptyField(label));
    }
    Ok(field)
}

fn price(field: &str) -> Result<Decimal, Problem> {
    let price: Decimal = field
        .parse()
        .map_err(|_| Problem::Price(field.to_string()))?;
    if price < Decimal::ZERO {
        return Err(Problem::NegativePrice(price));
    }
    Ok(price)
}

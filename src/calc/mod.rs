//! Yield calculators.
//!
//! Each calculator is a pure `compute(&Params) -> ResultTable`. Parameters come
//! from defaults merged with the user's stored preferences; nothing here reads
//! ambient state, and no derived output is ever stored.

pub mod farmhouse;
pub mod husbandry;
pub mod orchard;
pub mod table;
pub mod tower;
pub mod wheel;
pub mod wine;

use crate::error::{EngineError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

pub use table::{Cell, ResultTable, Row};

/// Flat preference store: "<calculator>.<field>" -> value
pub type Preferences = Map<String, Value>;

pub trait Calculator {
    type Params: Default + Serialize + DeserializeOwned;

    /// Preference key prefix and dispatch name
    const NAME: &'static str;

    /// Fields written back to the preference store
    const PERSISTED: &'static [&'static str];

    fn compute(params: &Self::Params) -> ResultTable;
}

/// Overlay overrides on defaults. Null never replaces a default, unknown keys are ignored.
pub fn merge<T: Serialize + DeserializeOwned>(defaults: &T, overrides: &Map<String, Value>) -> Result<T> {
    let mut merged = match serde_json::to_value(defaults)? {
        Value::Object(map) => map,
        other => return Ok(serde_json::from_value(other)?),
    };

    for (key, value) in overrides {
        if value.is_null() {
            continue;
        }
        if let Some(slot) = merged.get_mut(key) {
            *slot = value.clone();
        }
    }

    serde_json::from_value(Value::Object(merged)).map_err(EngineError::InvalidParams)
}

/// Overrides for one calculator, with its prefix stripped
fn scoped(name: &str, prefs: &Preferences) -> Map<String, Value> {
    let prefix = format!("{}.", name);
    prefs
        .iter()
        .filter_map(|(k, v)| k.strip_prefix(&prefix).map(|field| (field.to_string(), v.clone())))
        .collect()
}

/// Effective parameters for calculator C given stored preferences
pub fn load_params<C: Calculator>(prefs: &Preferences) -> Result<C::Params> {
    merge(&C::Params::default(), &scoped(C::NAME, prefs))
}

/// Write the persisted subset of params back into the preference store
pub fn store_params<C: Calculator>(params: &C::Params, prefs: &mut Preferences) -> Result<()> {
    let value = serde_json::to_value(params)?;
    for field in C::PERSISTED {
        if let Some(v) = value.get(*field) {
            prefs.insert(format!("{}.{}", C::NAME, field), v.clone());
        }
    }
    Ok(())
}

fn run_with<C: Calculator>(prefs: &Preferences) -> Result<ResultTable> {
    Ok(C::compute(&load_params::<C>(prefs)?))
}

fn defaults_of<C: Calculator>() -> Result<Value> {
    Ok(serde_json::to_value(C::Params::default())?)
}

fn persist_with<C: Calculator>(params: &Map<String, Value>, prefs: &mut Preferences) -> Result<()> {
    let params: C::Params = merge(&C::Params::default(), params)?;
    store_params::<C>(&params, prefs)
}

/// Calculator names accepted by `run`
pub const CALCULATORS: &[&str] = &[
    tower::Tower::NAME,
    husbandry::Chickens::NAME,
    husbandry::Cows::NAME,
    husbandry::Pigs::NAME,
    husbandry::Raptors::NAME,
    orchard::Orchard::NAME,
    wine::Wine::NAME,
    wheel::Wheel::NAME,
    farmhouse::Farmhouse::NAME,
];

macro_rules! dispatch {
    ($name:expr, $call:ident ( $($arg:expr),* )) => {
        match $name {
            tower::Tower::NAME => $call::<tower::Tower>($($arg),*),
            husbandry::Chickens::NAME => $call::<husbandry::Chickens>($($arg),*),
            husbandry::Cows::NAME => $call::<husbandry::Cows>($($arg),*),
            husbandry::Pigs::NAME => $call::<husbandry::Pigs>($($arg),*),
            husbandry::Raptors::NAME => $call::<husbandry::Raptors>($($arg),*),
            orchard::Orchard::NAME => $call::<orchard::Orchard>($($arg),*),
            wine::Wine::NAME => $call::<wine::Wine>($($arg),*),
            wheel::Wheel::NAME => $call::<wheel::Wheel>($($arg),*),
            farmhouse::Farmhouse::NAME => $call::<farmhouse::Farmhouse>($($arg),*),
            other => Err(EngineError::UnknownCategory(format!("calculator {}", other))),
        }
    };
}

/// Run a calculator by name with stored preferences
pub fn run(name: &str, prefs: &Preferences) -> Result<ResultTable> {
    dispatch!(name, run_with(prefs))
}

/// Default parameters of a calculator as JSON
pub fn defaults(name: &str) -> Result<Value> {
    dispatch!(name, defaults_of())
}

/// Write the persisted subset of `params` (merged over defaults) into prefs
pub fn persist(name: &str, params: &Map<String, Value>, prefs: &mut Preferences) -> Result<()> {
    dispatch!(name, persist_with(params, prefs))
}

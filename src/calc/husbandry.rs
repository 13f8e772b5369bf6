//! Raise-and-sell tables for chickens, cows, pigs and raptors.
//!
//! An animal is bought, fed until it reaches level L, then sold for its
//! harvest. Some species also produce a byproduct every day while they grow.
//! Each row is one choice of L, with all money expressed per day of raising.

use super::table::{best_index, per, round2, Cell, ResultTable};
use super::Calculator;
use serde::{Deserialize, Serialize};

pub const MAX_LEVEL: usize = 15;

/// XP needed to reach each level from level 1 (index 0 unused)
pub const ANIMAL_XP: [u64; MAX_LEVEL + 1] = [
    0, 0, 1_000, 2_500, 5_000, 10_000, 17_500, 27_500, 40_000, 55_000, 75_000, 100_000, 130_000, 165_000,
    205_000, 250_000,
];

/// Days of feeding to reach `level`; 0 when no XP is gained
pub fn days_to_level(level: usize, xp_per_day: u64) -> u64 {
    if xp_per_day == 0 {
        return 0;
    }
    ANIMAL_XP[level].div_ceil(xp_per_day)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimalParams {
    pub xp_per_day: u64,
    pub feed_per_day: f64,
    pub feed_price: f64,
    pub purchase_price: f64,
    pub harvest_price: f64,
    pub byproduct_price: f64,
}

/// Fixed per-species data
pub struct Species {
    pub first_level: usize,
    pub harvest_label: &'static str,
    /// Units harvested when sold at each level (index 0 unused)
    pub harvest: [u64; MAX_LEVEL + 1],
    pub byproduct_label: Option<&'static str>,
    /// Units produced per day while at each level (index 0 unused)
    pub byproduct: [u64; MAX_LEVEL + 1],
}

pub const CHICKENS: Species = Species {
    first_level: 1,
    harvest_label: "Feathers",
    harvest: [0, 0, 1, 2, 3, 5, 7, 9, 12, 15, 18, 22, 26, 30, 35, 40],
    byproduct_label: Some("Eggs"),
    byproduct: [0, 1, 1, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5],
};

pub const COWS: Species = Species {
    first_level: 2,
    harvest_label: "Steaks",
    harvest: [0, 0, 1, 2, 3, 5, 7, 9, 12, 15, 18, 22, 26, 30, 35, 40],
    byproduct_label: Some("Milk"),
    byproduct: [0, 1, 1, 1, 2, 2, 2, 3, 3, 3, 4, 4, 4, 5, 5, 5],
};

pub const PIGS: Species = Species {
    first_level: 2,
    harvest_label: "Bacon",
    harvest: [0, 0, 5, 10, 20, 35, 55, 80, 110, 145, 185, 230, 280, 335, 395, 460],
    byproduct_label: None,
    byproduct: [0; MAX_LEVEL + 1],
};

pub const RAPTORS: Species = Species {
    first_level: 1,
    harvest_label: "Claws",
    harvest: [0, 0, 1, 2, 4, 6, 8, 11, 14, 17, 21, 25, 30, 35, 41, 48],
    byproduct_label: None,
    byproduct: [0; MAX_LEVEL + 1],
};

/// One computed row before display rounding
#[derive(Debug, Clone, PartialEq)]
pub struct LevelYield {
    pub level: usize,
    pub days: u64,
    pub harvest: u64,
    pub byproduct_total: u64,
    pub byproduct_per_day: f64,
    pub revenue_per_day: f64,
    pub feed_per_day: f64,
    pub opportunity_per_day: f64,
    pub profit_per_day: f64,
}

/// Byproduct collected while growing from level 1 up to `level`
fn byproduct_total(species: &Species, level: usize, xp_per_day: u64) -> u64 {
    (1..level)
        .map(|l| {
            let span = days_to_level(l + 1, xp_per_day) - days_to_level(l, xp_per_day);
            species.byproduct[l] * span
        })
        .sum()
}

pub fn level_yield(species: &Species, params: &AnimalParams, level: usize) -> LevelYield {
    let days = days_to_level(level, params.xp_per_day);
    let d = days as f64;
    let harvest = species.harvest[level];
    let byproduct_total = byproduct_total(species, level, params.xp_per_day);

    let revenue = harvest as f64 * params.harvest_price + byproduct_total as f64 * params.byproduct_price;
    let revenue_per_day = per(revenue, d);
    let feed_per_day = if days > 0 {
        params.feed_per_day * params.feed_price
    } else {
        0.0
    };
    let opportunity_per_day = per(params.purchase_price, d);

    LevelYield {
        level,
        days,
        harvest,
        byproduct_total,
        byproduct_per_day: per(byproduct_total as f64, d),
        revenue_per_day,
        feed_per_day,
        opportunity_per_day,
        profit_per_day: revenue_per_day - (feed_per_day + opportunity_per_day),
    }
}

pub fn yields(species: &Species, params: &AnimalParams) -> Vec<LevelYield> {
    (species.first_level..=MAX_LEVEL)
        .map(|level| level_yield(species, params, level))
        .collect()
}

/// Build the table and mark the best profit row (and best byproduct row, if any)
pub fn husbandry_table(species: &Species, params: &AnimalParams) -> ResultTable {
    let rows = yields(species, params);

    let mut headers = vec!["Level".to_string(), "Days".to_string(), species.harvest_label.to_string()];
    if let Some(label) = species.byproduct_label {
        headers.push(format!("{}/Day", label));
    }
    headers.extend(["Revenue/Day", "Feed/Day", "Opportunity/Day", "Profit/Day"].map(String::from));
    let mut table = ResultTable::new(headers);

    for row in &rows {
        let mut values: Vec<Cell> = vec![(row.level as u32).into(), row.days.into(), row.harvest.into()];
        if species.byproduct_label.is_some() {
            values.push(round2(row.byproduct_per_day).into());
        }
        values.push(row.revenue_per_day.round().into());
        values.push(row.feed_per_day.round().into());
        values.push(row.opportunity_per_day.round().into());
        values.push(row.profit_per_day.round().into());
        table.push_row(values);
    }

    let profit_col = table.headers.len() - 1;
    if let Some(best) = best_timed_row(&rows, |r| r.profit_per_day) {
        table.mark_best(profit_col, best);
    }
    if species.byproduct_label.is_some() {
        if let Some(best) = best_timed_row(&rows, |r| r.byproduct_per_day) {
            table.mark_best(3, best);
        }
    }

    table
}

/// Best row by `metric`, ignoring rows reached in zero days
/// Their rates are only the zero-denominator guard
fn best_timed_row(rows: &[LevelYield], metric: impl Fn(&LevelYield) -> f64) -> Option<usize> {
    let best = best_index(
        rows.iter()
            .map(|r| if r.days > 0 { metric(r) } else { f64::NEG_INFINITY }),
    )?;
    (rows[best].days > 0).then_some(best)
}

pub struct Chickens;
pub struct Cows;
pub struct Pigs;
pub struct Raptors;

/// Species default params differ, so each species gets its own params type
macro_rules! species_calculator {
    ($calc:ident, $params:ident, $species:expr, $name:literal, $defaults:expr) => {
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $params(pub AnimalParams);

        impl Default for $params {
            fn default() -> Self {
                $params($defaults)
            }
        }

        impl Calculator for $calc {
            type Params = $params;
            const NAME: &'static str = $name;
            const PERSISTED: &'static [&'static str] = &["xpPerDay", "feedPrice", "harvestPrice", "byproductPrice"];

            fn compute(params: &$params) -> ResultTable {
                husbandry_table(&$species, &params.0)
            }
        }
    };
}

species_calculator!(
    Chickens,
    ChickenParams,
    CHICKENS,
    "chickens",
    AnimalParams {
        xp_per_day: 300,
        feed_per_day: 0.0,
        feed_price: 0.0,
        purchase_price: 1_000.0,
        harvest_price: 200.0,
        byproduct_price: 300.0,
    }
);

species_calculator!(
    Cows,
    CowParams,
    COWS,
    "cows",
    AnimalParams {
        xp_per_day: 400,
        feed_per_day: 3.0,
        feed_price: 25.0,
        purchase_price: 50_000.0,
        harvest_price: 7_500.0,
        byproduct_price: 500.0,
    }
);

species_calculator!(
    Pigs,
    PigParams,
    PIGS,
    "pigs",
    AnimalParams {
        xp_per_day: 500,
        feed_per_day: 2.0,
        feed_price: 50.0,
        purchase_price: 10_000.0,
        harvest_price: 1_000.0,
        byproduct_price: 0.0,
    }
);

species_calculator!(
    Raptors,
    RaptorParams,
    RAPTORS,
    "raptors",
    AnimalParams {
        xp_per_day: 200,
        feed_per_day: 1.0,
        feed_price: 1_000.0,
        purchase_price: 25_000.0,
        harvest_price: 5_000.0,
        byproduct_price: 0.0,
    }
);

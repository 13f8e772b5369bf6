use super::table::{best_index, per, ResultTable};
use super::Calculator;
use serde::{Deserialize, Serialize};

/// Days at which the cellar is evaluated
pub const CHECKPOINTS: [u64; 9] = [0, 7, 14, 30, 60, 90, 120, 180, 365];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WineParams {
    pub bottles: u64,
    pub base_value: f64,
    pub daily_growth_pct: f64,
    /// Cap on bottle value, as a multiple of the base value
    pub max_multiplier: f64,
}

impl Default for WineParams {
    fn default() -> Self {
        WineParams {
            bottles: 10,
            base_value: 500.0,
            daily_growth_pct: 2.0,
            max_multiplier: 4.0,
        }
    }
}

/// Value of one bottle after `days` in the cellar
pub fn bottle_value(params: &WineParams, days: u64) -> f64 {
    let grown = params.base_value + (params.base_value * params.daily_growth_pct * days as f64 / 100.0).floor();
    let cap = (params.base_value * params.max_multiplier).floor();
    grown.min(cap)
}

pub struct Wine;

impl Calculator for Wine {
    type Params = WineParams;
    const NAME: &'static str = "wine";
    const PERSISTED: &'static [&'static str] = &["bottles", "baseValue"];

    fn compute(params: &WineParams) -> ResultTable {
        let bottles = params.bottles as f64;
        let mut table = ResultTable::new(["Day", "Bottle Value", "Cellar Value", "Gain/Day"]);
        let mut gains = Vec::with_capacity(CHECKPOINTS.len());

        for day in CHECKPOINTS {
            let value = bottle_value(params, day);
            let gain = per((value - params.base_value) * bottles, day as f64);
            table.push_row(vec![
                day.into(),
                value.into(),
                (value * bottles).into(),
                gain.round().into(),
            ]);
            gains.push(gain);
        }

        if let Some(best) = best_index(gains) {
            table.mark_best(3, best);
        }
        table
    }
}

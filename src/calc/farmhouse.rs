use super::table::{best_index, ResultTable};
use super::Calculator;
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: u64 = 1_440;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crop {
    pub name: String,
    pub seed_price: f64,
    pub sell_price: f64,
    /// Growth time before perks
    pub minutes: u64,
}

impl Crop {
    fn new(name: &str, seed_price: f64, sell_price: f64, minutes: u64) -> Self {
        Crop {
            name: name.to_string(),
            seed_price,
            sell_price,
            minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmhouseParams {
    pub rows: u64,
    pub plots_per_row: u64,
    /// Growth time reduction, percent
    pub speed_pct: f64,
    /// Extra crops per harvest, percent
    pub yield_pct: f64,
    pub crops: Vec<Crop>,
}

impl Default for FarmhouseParams {
    fn default() -> Self {
        FarmhouseParams {
            rows: 4,
            plots_per_row: 4,
            speed_pct: 0.0,
            yield_pct: 0.0,
            crops: vec![
                Crop::new("Peppers", 10.0, 25.0, 60),
                Crop::new("Carrots", 20.0, 60.0, 120),
                Crop::new("Potatoes", 40.0, 130.0, 240),
                Crop::new("Tomatoes", 80.0, 280.0, 480),
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropThroughput {
    pub growth_minutes: u64,
    pub harvests_per_day: u64,
    pub crops_per_day: u64,
    pub profit_per_day: f64,
}

pub fn throughput(params: &FarmhouseParams, crop: &Crop) -> CropThroughput {
    let plots = params.rows.saturating_mul(params.plots_per_row);
    let growth_minutes = (crop.minutes as f64 * (100.0 - params.speed_pct) / 100.0).ceil().max(0.0) as u64;
    let harvests_per_day = MINUTES_PER_DAY.checked_div(growth_minutes).unwrap_or(0);

    let planted = plots.saturating_mul(harvests_per_day) as f64;
    let crops_per_day = (planted * (100.0 + params.yield_pct) / 100.0).floor().max(0.0) as u64;
    let profit_per_day = (crops_per_day as f64 * crop.sell_price - planted * crop.seed_price).round();

    CropThroughput {
        growth_minutes,
        harvests_per_day,
        crops_per_day,
        profit_per_day,
    }
}

pub struct Farmhouse;

impl Calculator for Farmhouse {
    type Params = FarmhouseParams;
    const NAME: &'static str = "farmhouse";
    const PERSISTED: &'static [&'static str] = &["rows", "plotsPerRow", "speedPct", "yieldPct"];

    fn compute(params: &FarmhouseParams) -> ResultTable {
        let mut table = ResultTable::new(["Crop", "Growth", "Harvests/Day", "Crops/Day", "Profit/Day"]);
        let mut profits = Vec::with_capacity(params.crops.len());

        for crop in &params.crops {
            let t = throughput(params, crop);
            table.push_row(vec![
                crop.name.as_str().into(),
                t.growth_minutes.into(),
                t.harvests_per_day.into(),
                t.crops_per_day.into(),
                t.profit_per_day.into(),
            ]);
            profits.push(t.profit_per_day);
        }

        if let Some(best) = best_index(profits) {
            table.mark_best(4, best);
        }
        table
    }
}

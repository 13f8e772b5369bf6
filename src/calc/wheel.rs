use super::table::{best_index, round2, ResultTable};
use super::Calculator;
use serde::{Deserialize, Serialize};

/// Sum of all segment weights
const TOTAL_WEIGHT: u64 = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WheelParams {
    pub spins_per_day: u64,
    pub days: u64,
    pub bonus_spin_pct: f64,
    pub gold_value: f64,
    pub apple_price: f64,
    pub iron_price: f64,
    pub stone_price: f64,
}

impl Default for WheelParams {
    fn default() -> Self {
        WheelParams {
            spins_per_day: 1,
            days: 30,
            bonus_spin_pct: 0.0,
            gold_value: 25_000.0,
            apple_price: 60.0,
            iron_price: 250.0,
            stone_price: 20.0,
        }
    }
}

#[derive(Clone, Copy)]
enum Reward {
    Silver,
    Gold,
    Apples,
    Iron,
    Stone,
}

impl Reward {
    /// Silver value of one unit
    fn price(self, params: &WheelParams) -> f64 {
        match self {
            Reward::Silver => 1.0,
            Reward::Gold => params.gold_value,
            Reward::Apples => params.apple_price,
            Reward::Iron => params.iron_price,
            Reward::Stone => params.stone_price,
        }
    }
}

struct Segment {
    label: &'static str,
    weight: u64,
    amount: u64,
    reward: Reward,
}

const SEGMENTS: [Segment; 5] = [
    Segment { label: "Silver", weight: 6, amount: 2_500, reward: Reward::Silver },
    Segment { label: "Gold", weight: 1, amount: 1, reward: Reward::Gold },
    Segment { label: "Apples", weight: 5, amount: 25, reward: Reward::Apples },
    Segment { label: "Iron", weight: 4, amount: 10, reward: Reward::Iron },
    Segment { label: "Stone", weight: 4, amount: 50, reward: Reward::Stone },
];

pub fn total_spins(params: &WheelParams) -> u64 {
    let spins = params.spins_per_day.saturating_mul(params.days) as f64 * (100.0 + params.bonus_spin_pct) / 100.0;
    spins.floor().max(0.0) as u64
}

pub struct Wheel;

impl Calculator for Wheel {
    type Params = WheelParams;
    const NAME: &'static str = "wheel";
    const PERSISTED: &'static [&'static str] = &["spinsPerDay", "days", "bonusSpinPct"];

    fn compute(params: &WheelParams) -> ResultTable {
        let spins = total_spins(params) as f64;
        let mut table = ResultTable::new(["Segment", "Hits", "Items", "Silver"]);
        let mut values = Vec::with_capacity(SEGMENTS.len());

        for segment in &SEGMENTS {
            let hits = spins * segment.weight as f64 / TOTAL_WEIGHT as f64;
            let items = (hits * segment.amount as f64).floor();
            let silver = (items * segment.reward.price(params)).round();
            table.push_row(vec![segment.label.into(), round2(hits).into(), items.into(), silver.into()]);
            values.push(silver);
        }

        if let Some(best) = best_index(values) {
            table.mark_best(3, best);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum() {
        assert_eq!(SEGMENTS.iter().map(|s| s.weight).sum::<u64>(), TOTAL_WEIGHT);
    }

    #[test]
    fn test_total_spins_bonus_floors() {
        let params = WheelParams {
            bonus_spin_pct: 5.0,
            ..WheelParams::default()
        };
        // 30 * 1.05 = 31.5
        assert_eq!(total_spins(&params), 31);
    }

    #[test]
    fn test_default_expectation() {
        let table = Wheel::compute(&WheelParams::default());
        // 30 spins: silver 9 hits * 2500
        assert_eq!(table.rows[0].values[1].as_f64(), Some(9.0));
        assert_eq!(table.rows[0].values[3].as_f64(), Some(22_500.0));
        // gold 1.5 hits -> 1 item
        assert_eq!(table.rows[1].values[2].as_f64(), Some(1.0));
        assert_eq!(table.rows[1].values[3].as_f64(), Some(25_000.0));
        assert_eq!(table.best_row(3), Some(1));
    }

    #[test]
    fn test_zero_days() {
        let params = WheelParams {
            days: 0,
            ..WheelParams::default()
        };
        let table = Wheel::compute(&params);
        assert!(table.rows.iter().all(|r| r.values[3].as_f64() == Some(0.0)));
        assert_eq!(table.best_row(3), Some(0));
    }
}

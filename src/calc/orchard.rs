use super::table::{best_index, ResultTable};
use super::Calculator;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrchardParams {
    pub apple_trees: u64,
    pub orange_trees: u64,
    pub lemon_trees: u64,
    /// Orchard perk bonus, percent
    pub bonus_pct: f64,
    pub apple_price: f64,
    pub orange_price: f64,
    pub lemon_price: f64,
}

impl Default for OrchardParams {
    fn default() -> Self {
        OrchardParams {
            apple_trees: 10,
            orange_trees: 10,
            lemon_trees: 10,
            bonus_pct: 0.0,
            apple_price: 60.0,
            orange_price: 80.0,
            lemon_price: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FruitYield {
    pub trees: u64,
    pub per_day: u64,
    pub per_week: u64,
    pub silver_per_day: f64,
}

/// One fruit per tree per day, scaled by the bonus and floored
pub fn fruit_yield(trees: u64, bonus_pct: f64, price: f64) -> FruitYield {
    let per_day = (trees as f64 * (100.0 + bonus_pct) / 100.0).floor().max(0.0) as u64;
    FruitYield {
        trees,
        per_day,
        per_week: per_day * 7,
        silver_per_day: (per_day as f64 * price).round(),
    }
}

pub struct Orchard;

impl Calculator for Orchard {
    type Params = OrchardParams;
    const NAME: &'static str = "orchard";
    const PERSISTED: &'static [&'static str] = &["appleTrees", "orangeTrees", "lemonTrees", "bonusPct"];

    fn compute(params: &OrchardParams) -> ResultTable {
        let fruits = [
            ("Apples", fruit_yield(params.apple_trees, params.bonus_pct, params.apple_price)),
            ("Oranges", fruit_yield(params.orange_trees, params.bonus_pct, params.orange_price)),
            ("Lemons", fruit_yield(params.lemon_trees, params.bonus_pct, params.lemon_price)),
        ];

        let mut table = ResultTable::new(["Fruit", "Trees", "Per Day", "Per Week", "Silver/Day"]);
        for (name, y) in &fruits {
            table.push_row(vec![
                (*name).into(),
                y.trees.into(),
                y.per_day.into(),
                y.per_week.into(),
                y.silver_per_day.into(),
            ]);
        }
        table.push_row(vec![
            "Total".into(),
            fruits.iter().map(|(_, y)| y.trees).sum::<u64>().into(),
            fruits.iter().map(|(_, y)| y.per_day).sum::<u64>().into(),
            fruits.iter().map(|(_, y)| y.per_week).sum::<u64>().into(),
            fruits.iter().map(|(_, y)| y.silver_per_day).sum::<f64>().into(),
        ]);

        // Total row never competes
        if let Some(best) = best_index(fruits.iter().map(|(_, y)| y.silver_per_day)) {
            table.mark_best(4, best);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bonus_is_floored() {
        let y = fruit_yield(7, 15.0, 60.0);
        // 7 * 1.15 = 8.05
        assert_eq!(y.per_day, 8);
        assert_eq!(y.per_week, 56);
        assert_eq!(y.silver_per_day, 480.0);
    }

    #[test]
    fn test_default_table() {
        let table = Orchard::compute(&OrchardParams::default());
        assert_eq!(table.rows.len(), 4);
        // lemons are worth the most
        assert_eq!(table.best_row(4), Some(2));
        let total = &table.rows[3].values;
        assert_eq!(total[2].as_f64(), Some(30.0));
        assert_eq!(total[4].as_f64(), Some(600.0 + 800.0 + 1_000.0));
    }

    #[test]
    fn test_empty_orchard() {
        let params = OrchardParams {
            apple_trees: 0,
            orange_trees: 0,
            lemon_trees: 0,
            ..OrchardParams::default()
        };
        let table = Orchard::compute(&params);
        assert_eq!(table.best_row(4), Some(0));
        assert!(!table.rows[3].is_best[4]);
    }
}

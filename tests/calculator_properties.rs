use proptest::prelude::*;
use wiki_engine::calc::husbandry::{husbandry_table, AnimalParams, CHICKENS, COWS, PIGS, RAPTORS};
use wiki_engine::calc::tower::{climb, silver_cost, Tower, TowerMode, TowerParams};
use wiki_engine::calc::{load_params, run, Calculator, Preferences, CALCULATORS};

fn mode_strategy() -> impl Strategy<Value = TowerMode> {
    prop_oneof![Just(TowerMode::Level), Just(TowerMode::Silver), Just(TowerMode::Ak)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn test_tower_is_deterministic(
        from_level in 0u32..300,
        to_level in 0u32..400,
        silver in 0u64..5_000_000,
        ak in 0u64..50_000,
        mode in mode_strategy(),
    ) {
        let params = TowerParams { from_level, mode, to_level, silver, ak };
        prop_assert_eq!(Tower::compute(&params), Tower::compute(&params));
    }

    #[test]
    fn test_tower_budgets_hold(
        from_level in 0u32..300,
        silver in 0u64..5_000_000,
        ak in 0u64..50_000,
    ) {
        let by_silver = climb(&TowerParams { from_level, mode: TowerMode::Silver, silver, ..TowerParams::default() });
        prop_assert!(by_silver.total_silver <= silver);
        prop_assert!(silver_cost(by_silver.end_level + 1) > silver - by_silver.total_silver);
        prop_assert_eq!(by_silver.total_ak, by_silver.levels_climbed as u64 * 100);

        let by_ak = climb(&TowerParams { from_level, mode: TowerMode::Ak, ak, ..TowerParams::default() });
        prop_assert_eq!(by_ak.levels_climbed as u64, ak / 100);
        prop_assert_eq!(by_ak.end_level, from_level + by_ak.levels_climbed);
    }

    #[test]
    fn test_husbandry_has_one_best_profit_row(
        xp_per_day in 1u64..5_000,
        harvest_price in 0.0f64..10_000.0,
        purchase_price in 0.0f64..100_000.0,
        feed_per_day in 0.0f64..10.0,
        feed_price in 0.0f64..1_000.0,
    ) {
        let params = AnimalParams {
            xp_per_day,
            harvest_price,
            purchase_price,
            feed_per_day,
            feed_price,
            ..AnimalParams::default()
        };
        for species in [&CHICKENS, &COWS, &PIGS, &RAPTORS] {
            let table = husbandry_table(species, &params);
            let col = table.column("Profit/Day").unwrap();
            let days = table.column("Days").unwrap();
            let flagged: Vec<_> = table.rows.iter().filter(|r| r.is_best[col]).collect();
            prop_assert_eq!(flagged.len(), 1);
            prop_assert!(flagged[0].values[days].as_f64().unwrap() > 0.0);
            for row in &table.rows {
                prop_assert_eq!(row.values.len(), table.headers.len());
                prop_assert_eq!(row.is_best.len(), table.headers.len());
            }
        }
    }
}

#[test]
fn test_every_calculator_is_deterministic() {
    let prefs = Preferences::new();
    for name in CALCULATORS {
        assert_eq!(run(name, &prefs).unwrap(), run(name, &prefs).unwrap(), "{} differs", name);
    }
}

#[test]
fn test_tower_example_from_defaults() {
    let params = load_params::<Tower>(&Preferences::new()).unwrap();
    let result = climb(&params);
    assert_eq!(result.total_silver, 252_500);
    assert_eq!(result.total_ak, 10_000);
    assert_eq!(result.mms_required, 0);
}

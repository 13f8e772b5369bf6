//! Tower climb simulator.

use super::table::ResultTable;
use super::Calculator;
use serde::{Deserialize, Serialize};

/// AK spent per level climbed
pub const AK_PER_LEVEL: u64 = 100;

/// What bounds the climb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TowerMode {
    /// Climb until `to_level`
    #[default]
    Level,
    /// Climb while the next level fits the silver budget
    Silver,
    /// Climb while at least one level's worth of AK remains
    Ak,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TowerParams {
    pub from_level: u32,
    pub mode: TowerMode,
    pub to_level: u32,
    pub silver: u64,
    pub ak: u64,
}

impl Default for TowerParams {
    fn default() -> Self {
        TowerParams {
            from_level: 0,
            mode: TowerMode::Level,
            to_level: 100,
            silver: 0,
            ak: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TowerClimb {
    pub end_level: u32,
    pub levels_climbed: u32,
    pub total_silver: u64,
    pub total_ak: u64,
    pub mms_required: u32,
}

/// Per-level silver multiplier, by inclusive level range
const COST_TIERS: [(u64, u64, u64); 3] = [(0, 100, 50), (101, 200, 100), (201, u32::MAX as u64, 150)];

/// Silver needed to climb to `level`
pub fn silver_cost(level: u32) -> u64 {
    let level = level as u64;
    match level {
        0..=100 => level * 50,
        101..=200 => level * 100,
        _ => level * 150,
    }
}

/// Silver to climb from `from` to `to`, i.e. the cost of levels `from+1..=to`
fn range_silver(from: u32, to: u32) -> u128 {
    let (first, last) = (from as u64 + 1, to as u64);
    COST_TIERS
        .iter()
        .map(|&(lo, hi, mult)| {
            let (a, b) = (first.max(lo), last.min(hi));
            if a > b {
                return 0;
            }
            let (a, b) = (a as u128, b as u128);
            mult as u128 * (a + b) * (b - a + 1) / 2
        })
        .sum()
}

/// Mega masteries needed to reach `level`: one per four levels past 100
pub fn mms_required(level: u32) -> u32 {
    if level > 100 {
        (level - 100).div_ceil(4)
    } else {
        0
    }
}

/// Highest level reachable from `from` without spending more than `budget`
fn silver_reach(from: u32, budget: u64) -> u32 {
    let (mut lo, mut hi) = (from as u64, u32::MAX as u64);
    while lo < hi {
        let mid = lo + (hi - lo + 1) / 2;
        if range_silver(from, mid as u32) <= budget as u128 {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    lo as u32
}

/// Climb until the mode's stop condition holds
/// Totals are summed per cost tier rather than level by level
pub fn climb(params: &TowerParams) -> TowerClimb {
    let from = params.from_level;
    let end_level = match params.mode {
        TowerMode::Level => params.to_level.max(from),
        TowerMode::Silver => silver_reach(from, params.silver),
        TowerMode::Ak => {
            let affordable = u32::try_from(params.ak / AK_PER_LEVEL).unwrap_or(u32::MAX);
            from.saturating_add(affordable)
        }
    };
    let levels_climbed = end_level - from;

    TowerClimb {
        end_level,
        levels_climbed,
        total_silver: u64::try_from(range_silver(from, end_level)).unwrap_or(u64::MAX),
        total_ak: levels_climbed as u64 * AK_PER_LEVEL,
        mms_required: mms_required(end_level),
    }
}

pub struct Tower;

impl Calculator for Tower {
    type Params = TowerParams;
    const NAME: &'static str = "tower";
    const PERSISTED: &'static [&'static str] = &["fromLevel", "mode", "toLevel"];

    fn compute(params: &TowerParams) -> ResultTable {
        let result = climb(params);
        let mut table = ResultTable::new(["From", "To", "Levels", "Silver", "AK", "MMs"]);
        table.push_row(vec![
            params.from_level.into(),
            result.end_level.into(),
            result.levels_climbed.into(),
            result.total_silver.into(),
            result.total_ak.into(),
            result.mms_required.into(),
        ]);
        table
    }
}

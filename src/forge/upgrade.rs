//! Enhancement engine
//!
//! Per-level costs, success rates, and the single-step and
//! continuous-to-target upgrade transitions.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::items::item::Item;

/// Spirit-stone cost seed per level
const BASE_STONE_COST: f64 = 100.0;
/// Refined-material cost seed per level
const BASE_MATERIAL_COST: f64 = 2.0;
/// Success-rate bonus per tempering stone consumed
pub const STONE_BONUS_PER_UNIT: f64 = 0.10;
/// Success-rate decay per consecutive failure, continuous mode only
pub const FAILURE_PENALTY_RATE: f64 = 0.05;
/// Hard floor on the effective success rate
pub const MIN_SUCCESS_RATE: f64 = 0.05;
/// Floor on the base rate before stone bonuses
pub const BASE_RATE_FLOOR: f64 = 0.10;

/// Resources one enhancement level costs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeCost {
    pub spirit_stones: u64,
    pub materials: u32,
}

/// The caller-owned resource snapshot an upgrade draws on
///
/// The engine never reads ambient player state; callers pass this in and
/// apply the mutated result back to wherever it lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeResources {
    pub spirit_stones: u64,
    pub materials: u32,
    pub upgrade_stones: u32,
}

impl UpgradeResources {
    pub fn can_afford(&self, cost: &UpgradeCost, stones_used: u32) -> bool {
        self.spirit_stones >= cost.spirit_stones
            && self.materials >= cost.materials
            && self.upgrade_stones >= stones_used
    }

    fn debit(&mut self, cost: &UpgradeCost, stones_used: u32) {
        self.spirit_stones -= cost.spirit_stones;
        self.materials -= cost.materials;
        self.upgrade_stones -= stones_used;
    }
}

/// Result of one upgrade attempt
///
/// `Failure` rolled and lost (resources spent); `Error` could not attempt
/// (nothing spent). The two are distinct outcomes by design.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpgradeOutcome {
    Success,
    Failure,
    Error,
}

/// Cost of raising an item from `level` to `level + 1`
///
/// Pure function: identical inputs always give identical output.
pub fn upgrade_cost(level: u32, multiplier: f64) -> UpgradeCost {
    let l = level as f64;
    let spirit_stones = (BASE_STONE_COST * (l + 1.0) * multiplier * (1.0 + l * 0.25)).floor() as u64;
    let materials = (BASE_MATERIAL_COST * multiplier * (l + 1.0) * (1.0 + l * 0.5)).floor() as u32;
    UpgradeCost {
        spirit_stones,
        materials,
    }
}

/// Exact total cost of raising an item from `current` to `target`
pub fn cost_to_target(current: u32, target: u32, multiplier: f64) -> UpgradeCost {
    let mut total = UpgradeCost::default();
    for level in current..target {
        let step = upgrade_cost(level, multiplier);
        total.spirit_stones = total.spirit_stones.saturating_add(step.spirit_stones);
        total.materials = total.materials.saturating_add(step.materials);
    }
    total
}

/// Success probability for one attempt, before any failure penalty
///
/// Degrades with level and rarity, recovered by tempering stones, always
/// within [BASE_RATE_FLOOR, 1].
pub fn success_rate(level: u32, multiplier: f64, stones_used: u32) -> f64 {
    let base = (1.0 - level as f64 * 0.1 - (multiplier - 1.0) * 0.15).max(BASE_RATE_FLOOR);
    (base + stones_used as f64 * STONE_BONUS_PER_UNIT).min(1.0)
}

/// Apply the consecutive-failure decay used by continuous mode
///
/// Isolated manual attempts pass 0 failures; only the bulk loop feeds its
/// counter through, which keeps automation riskier than patient clicking.
pub fn effective_rate(rate: f64, consecutive_failures: u32) -> f64 {
    (rate - consecutive_failures as f64 * FAILURE_PENALTY_RATE).max(MIN_SUCCESS_RATE)
}

/// Attempt to raise the item one enhancement level
///
/// Affordability is checked before anything is consumed; an unaffordable
/// attempt returns `Error` and touches nothing. Otherwise the cost and
/// tempering stones are spent win or lose. On success every attribute is
/// rescaled by the rarity's growth rate.
pub fn attempt_upgrade(
    item: &mut Item,
    stones_used: u32,
    consecutive_failures: u32,
    resources: &mut UpgradeResources,
    rng: &mut impl Rng,
) -> UpgradeOutcome {
    let cost = upgrade_cost(item.enhance_level, item.rarity.multiplier());
    if !resources.can_afford(&cost, stones_used) {
        return UpgradeOutcome::Error;
    }
    resources.debit(&cost, stones_used);

    let rate = effective_rate(
        success_rate(item.enhance_level, item.rarity.multiplier(), stones_used),
        consecutive_failures,
    );
    let roll = rng.gen_range(0.0..1.0);
    if roll >= rate {
        return UpgradeOutcome::Failure;
    }

    item.enhance_level += 1;
    let growth = 1.0 + item.rarity.growth_rate();
    for attr in item.attributes.iter_mut() {
        attr.value = ((attr.value as f64 * growth).floor()).min(u32::MAX as f64) as u32;
    }
    UpgradeOutcome::Success
}

/// Why a continuous upgrade run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContinuousOutcome {
    /// Target level reached
    Completed,
    /// Could not afford the next level's cost
    MaterialsExhausted,
    /// The underlying attempt refused to run
    Error,
}

/// Report from a continuous upgrade run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContinuousReport {
    pub start_level: u32,
    pub end_level: u32,
    pub successes: u32,
    pub failures: u32,
    pub outcome: ContinuousOutcome,
}

/// Upgrade repeatedly until the target level, a resource wall, or an error
///
/// Sequential single-step attempts; each iteration re-checks affordability
/// against the wallet as consumed so far. Consecutive failures decay the
/// effective rate until a success resets the counter.
pub fn upgrade_to_target(
    item: &mut Item,
    target_level: u32,
    stones_per_attempt: u32,
    resources: &mut UpgradeResources,
    rng: &mut impl Rng,
) -> ContinuousReport {
    let start_level = item.enhance_level;
    let mut successes = 0;
    let mut failures = 0;
    let mut consecutive = 0;

    let outcome = loop {
        if item.enhance_level >= target_level {
            break ContinuousOutcome::Completed;
        }
        let cost = upgrade_cost(item.enhance_level, item.rarity.multiplier());
        if !resources.can_afford(&cost, stones_per_attempt) {
            break ContinuousOutcome::MaterialsExhausted;
        }
        match attempt_upgrade(item, stones_per_attempt, consecutive, resources, rng) {
            UpgradeOutcome::Success => {
                successes += 1;
                consecutive = 0;
            }
            UpgradeOutcome::Failure => {
                failures += 1;
                consecutive += 1;
            }
            UpgradeOutcome::Error => break ContinuousOutcome::Error,
        }
    };

    log::info!(
        "Continuous upgrade of {}: +{} -> +{} ({} up, {} down, {:?})",
        item.name,
        start_level,
        item.enhance_level,
        successes,
        failures,
        outcome
    );

    ContinuousReport {
        start_level,
        end_level: item.enhance_level,
        successes,
        failures,
        outcome,
    }
}

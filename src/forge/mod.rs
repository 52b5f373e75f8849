//! Forge engine
//!
//! Stat generation, enhancement, material synthesis, and fusion.

pub mod craft;
pub mod error;
pub mod fusion;
pub mod generator;
pub mod upgrade;

pub use craft::{craft_from_materials, MAX_MATERIALS, MIN_MATERIALS};
pub use error::ForgeError;
pub use fusion::{fuse_equipment, FUSION_RETENTION};
pub use generator::{
    attribute_ceiling, attribute_floor, core_attribute, generate_equipment, roll_attribute_value,
    roll_attributes, synthesize_name,
};
pub use upgrade::{
    attempt_upgrade, cost_to_target, effective_rate, success_rate, upgrade_cost,
    upgrade_to_target, ContinuousOutcome, ContinuousReport, UpgradeCost, UpgradeOutcome,
    UpgradeResources,
};

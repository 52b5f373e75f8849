//! Qiforge - equipment forging engine for an idle cultivation game
//!
//! Generates gear from weighted attribute pools, enhances it with
//! success-rate decay, refines raw materials into new equipment, and
//! fuses treasures into one.

pub mod data;
pub mod forge;
pub mod items;

// Re-export commonly used types
pub use data::ForgeData;
pub use forge::{
    attempt_upgrade, craft_from_materials, fuse_equipment, generate_equipment, success_rate,
    upgrade_cost, upgrade_to_target, ForgeError, UpgradeOutcome, UpgradeResources,
};
pub use items::{
    AttributeKind, EquipSlot, Inventory, Item, ItemCategory, ItemId, Loadout, Rarity,
};

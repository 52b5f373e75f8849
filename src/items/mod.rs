//! Item system

pub mod equipment;
pub mod inventory;
pub mod item;

pub use equipment::Loadout;
pub use inventory::Inventory;
pub use item::{
    next_item_id, Attribute, AttributeKind, AttributeSet, EquipSlot, Item, ItemCategory, ItemId,
    Rarity,
};

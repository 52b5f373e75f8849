//! Equipment system
//!
//! Manages equipped items and calculates total attribute bonuses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::item::{AttributeKind, AttributeSet, EquipSlot, Item};

/// Player equipment slots
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Loadout {
    /// Items in each slot
    slots: HashMap<EquipSlot, Item>,
}

impl Loadout {
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Equip an item into a slot, returning the previously equipped item
    ///
    /// The slot must be one the item's category allows; an item's own slot
    /// assignment never changes, only which compatible slot it occupies.
    pub fn equip(&mut self, item: Item, slot: EquipSlot) -> Result<Option<Item>, Item> {
        if !EquipSlot::candidates_for(item.category).contains(&slot) {
            return Err(item);
        }
        Ok(self.slots.insert(slot, item))
    }

    /// Equip into the item's creation slot
    pub fn equip_default(&mut self, item: Item) -> Result<Option<Item>, Item> {
        match item.equip_slot {
            Some(slot) => self.equip(item, slot),
            None => Err(item),
        }
    }

    /// Unequip an item from a slot
    pub fn unequip(&mut self, slot: EquipSlot) -> Option<Item> {
        self.slots.remove(&slot)
    }

    /// Get item in a slot
    pub fn get(&self, slot: EquipSlot) -> Option<&Item> {
        self.slots.get(&slot)
    }

    /// Get mutable reference to item in a slot
    pub fn get_mut(&mut self, slot: EquipSlot) -> Option<&mut Item> {
        self.slots.get_mut(&slot)
    }

    /// Check if a slot is empty
    pub fn is_empty(&self, slot: EquipSlot) -> bool {
        !self.slots.contains_key(&slot)
    }

    /// Get all equipped items
    pub fn all_items(&self) -> impl Iterator<Item = &Item> {
        self.slots.values()
    }

    /// Total bonus for one attribute across all equipment
    pub fn total_attribute(&self, kind: AttributeKind) -> u64 {
        self.slots
            .values()
            .filter_map(|item| item.attributes.get(kind))
            .map(u64::from)
            .sum()
    }

    /// Aggregate totals for every attribute present on equipped gear
    pub fn attribute_totals(&self) -> AttributeSet {
        let mut totals = AttributeSet::new();
        for kind in AttributeKind::all() {
            let sum = self.total_attribute(*kind);
            if sum > 0 {
                totals.set(*kind, sum.min(u32::MAX as u64) as u32);
            }
        }
        totals
    }

    /// Total revive charges across equipped gear, capped at 3
    pub fn revive_charges(&self) -> u8 {
        let sum: u32 = self.slots.values().map(|i| i.revive_charges as u32).sum();
        sum.min(3) as u8
    }
}

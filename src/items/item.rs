//! Item definitions
//!
//! Core item types, rarity tiers, and attributes.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Unique item ID for tracking
pub type ItemId = u64;

static NEXT_ITEM_ID: AtomicU64 = AtomicU64::new(1);

/// Get next unique item ID
pub fn next_item_id() -> ItemId {
    NEXT_ITEM_ID.fetch_add(1, Ordering::Relaxed)
}

/// Item rarity tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,    // White - mortal-grade gear
    Rare,      // Blue - spirit-grade gear
    Legendary, // Gold - profound-grade gear
    Immortal,  // Red - immortal-grade gear
}

impl Rarity {
    /// Get display color RGB
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Rarity::Common => (200, 200, 200),
            Rarity::Rare => (100, 150, 255),
            Rarity::Legendary => (255, 180, 50),
            Rarity::Immortal => (255, 90, 90),
        }
    }

    /// Get rarity name
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Legendary => "Legendary",
            Rarity::Immortal => "Immortal",
        }
    }

    /// Get numeric value for sorting (higher = rarer)
    pub fn sort_value(&self) -> u8 {
        match self {
            Rarity::Common => 0,
            Rarity::Rare => 1,
            Rarity::Legendary => 2,
            Rarity::Immortal => 3,
        }
    }

    /// Power multiplier applied to costs and generated stats
    pub fn multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 1.5,
            Rarity::Legendary => 2.5,
            Rarity::Immortal => 6.0,
        }
    }

    /// Per-level attribute growth when an enhancement succeeds
    pub fn growth_rate(&self) -> f64 {
        match self {
            Rarity::Common => 0.10,
            Rarity::Rare => 0.12,
            Rarity::Legendary => 0.15,
            Rarity::Immortal => 0.20,
        }
    }

    /// How many attributes generated gear of this rarity carries (min, max)
    pub fn attribute_range(&self) -> (usize, usize) {
        match self {
            Rarity::Common => (1, 2),
            Rarity::Rare => (2, 3),
            Rarity::Legendary => (3, 5),
            Rarity::Immortal => (4, 6),
        }
    }

    /// Quality score a material of this rarity contributes to crafting
    pub fn craft_score(&self) -> f64 {
        match self {
            Rarity::Common => 1.0,
            Rarity::Rare => 3.0,
            Rarity::Legendary => 8.0,
            Rarity::Immortal => 20.0,
        }
    }

    /// Get the higher of two rarities
    pub fn higher(a: Rarity, b: Rarity) -> Rarity {
        if a.sort_value() >= b.sort_value() {
            a
        } else {
            b
        }
    }

    /// All tiers in ascending order
    pub fn all() -> &'static [Rarity] {
        &[
            Rarity::Common,
            Rarity::Rare,
            Rarity::Legendary,
            Rarity::Immortal,
        ]
    }
}

/// Main item categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    Weapon,
    Armor,
    Accessory,
    Ring,
    Artifact,
    Material,
    Herb,
    Pill,
    CatalystStone,
}

impl ItemCategory {
    /// Get sort value for grouping (lower = appears first)
    pub fn sort_value(&self) -> u8 {
        match self {
            ItemCategory::Weapon => 0,
            ItemCategory::Armor => 1,
            ItemCategory::Accessory => 2,
            ItemCategory::Ring => 3,
            ItemCategory::Artifact => 4,
            ItemCategory::CatalystStone => 5,
            ItemCategory::Material => 6,
            ItemCategory::Herb => 7,
            ItemCategory::Pill => 8,
        }
    }

    /// Check if this is an equipment category
    pub fn is_equipment(&self) -> bool {
        matches!(
            self,
            ItemCategory::Weapon
                | ItemCategory::Armor
                | ItemCategory::Accessory
                | ItemCategory::Ring
                | ItemCategory::Artifact
        )
    }

    /// Categories that fuse by matching category rather than exact slot
    pub fn matches_by_category(&self) -> bool {
        matches!(
            self,
            ItemCategory::Ring | ItemCategory::Artifact | ItemCategory::Accessory
        )
    }

    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::Weapon => "Weapon",
            ItemCategory::Armor => "Armor",
            ItemCategory::Accessory => "Accessory",
            ItemCategory::Ring => "Ring",
            ItemCategory::Artifact => "Artifact",
            ItemCategory::Material => "Material",
            ItemCategory::Herb => "Herb",
            ItemCategory::Pill => "Pill",
            ItemCategory::CatalystStone => "Catalyst Stone",
        }
    }
}

/// Equipment slot for wearable items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Head,
    Chest,
    Shoulder,
    Gloves,
    Legs,
    Boots,
    Accessory1,
    Accessory2,
    Ring1,
    Ring2,
    Ring3,
    Ring4,
    Artifact1,
    Artifact2,
}

impl EquipSlot {
    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "Weapon",
            EquipSlot::Head => "Head",
            EquipSlot::Chest => "Chest",
            EquipSlot::Shoulder => "Shoulder",
            EquipSlot::Gloves => "Gloves",
            EquipSlot::Legs => "Legs",
            EquipSlot::Boots => "Boots",
            EquipSlot::Accessory1 => "Accessory 1",
            EquipSlot::Accessory2 => "Accessory 2",
            EquipSlot::Ring1 => "Ring 1",
            EquipSlot::Ring2 => "Ring 2",
            EquipSlot::Ring3 => "Ring 3",
            EquipSlot::Ring4 => "Ring 4",
            EquipSlot::Artifact1 => "Artifact 1",
            EquipSlot::Artifact2 => "Artifact 2",
        }
    }

    /// The equipment category an item in this slot belongs to
    pub fn category(&self) -> ItemCategory {
        match self {
            EquipSlot::Weapon => ItemCategory::Weapon,
            EquipSlot::Head
            | EquipSlot::Chest
            | EquipSlot::Shoulder
            | EquipSlot::Gloves
            | EquipSlot::Legs
            | EquipSlot::Boots => ItemCategory::Armor,
            EquipSlot::Accessory1 | EquipSlot::Accessory2 => ItemCategory::Accessory,
            EquipSlot::Ring1 | EquipSlot::Ring2 | EquipSlot::Ring3 | EquipSlot::Ring4 => {
                ItemCategory::Ring
            }
            EquipSlot::Artifact1 | EquipSlot::Artifact2 => ItemCategory::Artifact,
        }
    }

    /// Get all slots in display order
    pub fn all() -> &'static [EquipSlot] {
        &[
            EquipSlot::Weapon,
            EquipSlot::Head,
            EquipSlot::Chest,
            EquipSlot::Shoulder,
            EquipSlot::Gloves,
            EquipSlot::Legs,
            EquipSlot::Boots,
            EquipSlot::Accessory1,
            EquipSlot::Accessory2,
            EquipSlot::Ring1,
            EquipSlot::Ring2,
            EquipSlot::Ring3,
            EquipSlot::Ring4,
            EquipSlot::Artifact1,
            EquipSlot::Artifact2,
        ]
    }

    /// The six armor slots
    pub fn armor_slots() -> &'static [EquipSlot] {
        &[
            EquipSlot::Head,
            EquipSlot::Chest,
            EquipSlot::Shoulder,
            EquipSlot::Gloves,
            EquipSlot::Legs,
            EquipSlot::Boots,
        ]
    }

    /// Slots random crafting output can land in
    pub fn craftable() -> &'static [EquipSlot] {
        &[
            EquipSlot::Weapon,
            EquipSlot::Head,
            EquipSlot::Chest,
            EquipSlot::Shoulder,
            EquipSlot::Gloves,
            EquipSlot::Legs,
            EquipSlot::Boots,
            EquipSlot::Accessory1,
            EquipSlot::Ring1,
            EquipSlot::Artifact1,
        ]
    }

    /// All slots an item of the given category may occupy
    pub fn candidates_for(category: ItemCategory) -> &'static [EquipSlot] {
        match category {
            ItemCategory::Weapon => &[EquipSlot::Weapon],
            ItemCategory::Armor => EquipSlot::armor_slots(),
            ItemCategory::Accessory => &[EquipSlot::Accessory1, EquipSlot::Accessory2],
            ItemCategory::Ring => &[
                EquipSlot::Ring1,
                EquipSlot::Ring2,
                EquipSlot::Ring3,
                EquipSlot::Ring4,
            ],
            ItemCategory::Artifact => &[EquipSlot::Artifact1, EquipSlot::Artifact2],
            _ => &[],
        }
    }
}

/// The six combat attributes gear can grant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttributeKind {
    Attack,
    Defense,
    Hp,
    Spirit,
    Physique,
    Speed,
}

impl AttributeKind {
    pub fn name(&self) -> &'static str {
        match self {
            AttributeKind::Attack => "Attack",
            AttributeKind::Defense => "Defense",
            AttributeKind::Hp => "HP",
            AttributeKind::Spirit => "Spirit",
            AttributeKind::Physique => "Physique",
            AttributeKind::Speed => "Speed",
        }
    }

    pub fn all() -> &'static [AttributeKind] {
        &[
            AttributeKind::Attack,
            AttributeKind::Defense,
            AttributeKind::Hp,
            AttributeKind::Spirit,
            AttributeKind::Physique,
            AttributeKind::Speed,
        ]
    }
}

/// A single granted attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub kind: AttributeKind,
    pub value: u32,
}

/// Sparse attribute map: one entry per present key
///
/// Presence of a key means the item grants that stat. Values are
/// non-negative by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeSet {
    entries: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value for a key, if present
    pub fn get(&self, kind: AttributeKind) -> Option<u32> {
        self.entries
            .iter()
            .find(|a| a.kind == kind)
            .map(|a| a.value)
    }

    /// Insert or replace the value for a key
    pub fn set(&mut self, kind: AttributeKind, value: u32) {
        if let Some(entry) = self.entries.iter_mut().find(|a| a.kind == kind) {
            entry.value = value;
        } else {
            self.entries.push(Attribute { kind, value });
        }
    }

    pub fn contains(&self, kind: AttributeKind) -> bool {
        self.entries.iter().any(|a| a.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.entries.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Attribute> {
        self.entries.iter_mut()
    }

    /// Sum of all attribute values
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|a| a.value as u64).sum()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        let mut set = Self::new();
        for attr in iter {
            set.set(attr.kind, attr.value);
        }
        set
    }
}

/// The main Item struct
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    /// Unique instance ID
    pub id: ItemId,
    /// Display name
    pub name: String,
    /// Description/flavor text
    pub description: String,
    /// Item category
    pub category: ItemCategory,
    /// Rarity tier
    pub rarity: Rarity,
    /// Equipment slot (if equippable); fixed at creation
    pub equip_slot: Option<EquipSlot>,
    /// Granted attributes
    pub attributes: AttributeSet,
    /// Enhancement level (+1, +2, ...); only ever increases
    #[serde(default)]
    pub enhance_level: u32,
    /// Stack count (for stackable items)
    pub stack_count: u32,
    /// Max stack size; equippables never stack
    pub max_stack: u32,
    /// Revive charges granted by rare crafting outcomes (0-3)
    #[serde(default)]
    pub revive_charges: u8,
    /// Spirit-stone value
    pub value: u32,
}

impl Item {
    /// Create a new item with a unique ID
    pub fn new(id: ItemId, name: impl Into<String>, category: ItemCategory) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            category,
            rarity: Rarity::Common,
            equip_slot: None,
            attributes: AttributeSet::new(),
            enhance_level: 0,
            stack_count: 1,
            max_stack: 1,
            revive_charges: 0,
            value: 1,
        }
    }

    /// Check if item is equippable
    pub fn is_equippable(&self) -> bool {
        self.equip_slot.is_some()
    }

    /// Check if item can stack
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Get display name including enhancement level
    pub fn display_name(&self) -> String {
        if self.enhance_level > 0 {
            format!("+{} {}", self.enhance_level, self.name)
        } else {
            self.name.clone()
        }
    }
}

/// Item templates for non-equipment items the forge consumes
pub mod templates {
    use super::*;

    /// Raw forging material of a given rarity
    pub fn forge_material(id: ItemId, rarity: Rarity) -> Item {
        let name = match rarity {
            Rarity::Common => "Iron Sand",
            Rarity::Rare => "Spirit Jade Shard",
            Rarity::Legendary => "Starsteel Fragment",
            Rarity::Immortal => "Dragonmarrow Crystal",
        };
        let mut item = Item::new(id, name, ItemCategory::Material);
        item.rarity = rarity;
        item.max_stack = 99;
        item.value = (10.0 * rarity.multiplier()) as u32;
        item.description = format!("{} forging material.", rarity.name());
        item
    }

    /// Consumable that raises enhancement success rate
    pub fn upgrade_stone(id: ItemId) -> Item {
        let mut item = Item::new(id, "Tempering Stone", ItemCategory::Material);
        item.max_stack = 99;
        item.value = 50;
        item.description = "Steadies the forge flame. Raises enhancement success rate.".to_string();
        item
    }

    /// Catalyst stone required for fusion, rarity-gated
    pub fn catalyst_stone(id: ItemId, rarity: Rarity) -> Item {
        let name = match rarity {
            Rarity::Common => "Dull Catalyst Stone",
            Rarity::Rare => "Azure Catalyst Stone",
            Rarity::Legendary => "Golden Catalyst Stone",
            Rarity::Immortal => "Voidfire Catalyst Stone",
        };
        let mut item = Item::new(id, name, ItemCategory::CatalystStone);
        item.rarity = rarity;
        item.max_stack = 99;
        item.value = (100.0 * rarity.multiplier()) as u32;
        item.description = format!(
            "Binds two treasures of {} grade or below into one.",
            rarity.name()
        );
        item
    }

    pub fn spirit_herb(id: ItemId) -> Item {
        let mut item = Item::new(id, "Spirit Grass", ItemCategory::Herb);
        item.max_stack = 99;
        item.value = 5;
        item.description = "A common herb that gathers thin qi.".to_string();
        item
    }

    pub fn qi_pill(id: ItemId) -> Item {
        let mut item = Item::new(id, "Qi Gathering Pill", ItemCategory::Pill);
        item.max_stack = 99;
        item.value = 20;
        item.description = "Condensed qi in pill form.".to_string();
        item
    }
}

//! Name vocabularies
//!
//! Word lists the stat generator draws on to synthesize equipment names
//! and descriptions. Kept as plain data so they can be overridden from
//! RON files.

use serde::{Deserialize, Serialize};

use crate::items::item::{EquipSlot, ItemCategory, Rarity};

/// One word list per rarity tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RarityWords {
    pub common: Vec<String>,
    pub rare: Vec<String>,
    pub legendary: Vec<String>,
    pub immortal: Vec<String>,
}

impl RarityWords {
    pub fn for_rarity(&self, rarity: Rarity) -> &[String] {
        match rarity {
            Rarity::Common => &self.common,
            Rarity::Rare => &self.rare,
            Rarity::Legendary => &self.legendary,
            Rarity::Immortal => &self.immortal,
        }
    }
}

/// Armor nouns keyed by slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorNouns {
    pub head: Vec<String>,
    pub chest: Vec<String>,
    pub shoulder: Vec<String>,
    pub gloves: Vec<String>,
    pub legs: Vec<String>,
    pub boots: Vec<String>,
}

impl ArmorNouns {
    pub fn for_slot(&self, slot: EquipSlot) -> &[String] {
        match slot {
            EquipSlot::Head => &self.head,
            EquipSlot::Chest => &self.chest,
            EquipSlot::Shoulder => &self.shoulder,
            EquipSlot::Gloves => &self.gloves,
            EquipSlot::Legs => &self.legs,
            _ => &self.boots,
        }
    }
}

/// All word lists used for name synthesis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NameVocab {
    /// Material words, increasingly exotic with rarity
    pub materials: RarityWords,
    /// Name prefixes per rarity
    pub prefixes: RarityWords,
    /// Flavor line appended to descriptions per rarity
    pub flavor: RarityWords,
    pub weapon_nouns: Vec<String>,
    pub armor_nouns: ArmorNouns,
    pub accessory_nouns: Vec<String>,
    pub ring_nouns: Vec<String>,
    pub artifact_nouns: Vec<String>,
}

impl NameVocab {
    /// Noun list for an equipment category; armor is keyed further by slot
    pub fn nouns_for(&self, category: ItemCategory, slot: EquipSlot) -> &[String] {
        match category {
            ItemCategory::Weapon => &self.weapon_nouns,
            ItemCategory::Armor => self.armor_nouns.for_slot(slot),
            ItemCategory::Accessory => &self.accessory_nouns,
            ItemCategory::Ring => &self.ring_nouns,
            _ => &self.artifact_nouns,
        }
    }
}

impl Default for NameVocab {
    fn default() -> Self {
        default_name_vocab()
    }
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Built-in vocabulary, used when no RON override is present
pub fn default_name_vocab() -> NameVocab {
    NameVocab {
        materials: RarityWords {
            common: words(&["Iron", "Bronze", "Granite", "Oakheart", "Boar Bone"]),
            rare: words(&["Silver", "Azure Jade", "Obsidian", "Coldsteel", "River Pearl"]),
            legendary: words(&[
                "Starsteel",
                "Moonsilver",
                "Drakebone",
                "Thunderwood",
                "Phoenix Feather",
            ]),
            immortal: words(&[
                "Voidgold",
                "Dragonmarrow",
                "Celestial Jade",
                "Stardust",
                "Chaos Amber",
            ]),
        },
        prefixes: RarityWords {
            common: words(&["Plain", "Sturdy", "Keen", "Weathered"]),
            rare: words(&["Spirit", "Azure", "Flowing", "Tempered"]),
            legendary: words(&["Profound", "Radiant", "Thunderous", "Ancient"]),
            immortal: words(&[
                "Immortal",
                "Heaven-Piercing",
                "Void-Treading",
                "Dao-Sealing",
            ]),
        },
        flavor: RarityWords {
            common: words(&["Mortal-grade work, honest and unremarkable."]),
            rare: words(&["Spirit qi flows faintly through it."]),
            legendary: words(&["Profound light coils about it."]),
            immortal: words(&["An immortal treasure that bends the surrounding qi."]),
        },
        weapon_nouns: words(&[
            "Sword", "Saber", "Spear", "Halberd", "Bow", "Staff", "Whip", "Fan",
        ]),
        armor_nouns: ArmorNouns {
            head: words(&["Helm", "Crown", "Veil"]),
            chest: words(&["Robe", "Breastplate", "Vestment"]),
            shoulder: words(&["Pauldrons", "Mantle"]),
            gloves: words(&["Gauntlets", "Wraps"]),
            legs: words(&["Greaves", "Leggings"]),
            boots: words(&["Boots", "Treads"]),
        },
        accessory_nouns: words(&["Pendant", "Amulet", "Talisman", "Sash"]),
        ring_nouns: words(&["Ring", "Band", "Signet", "Loop"]),
        artifact_nouns: words(&["Seal", "Mirror", "Bell", "Pagoda", "Gourd", "Cauldron"]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_empty_lists() {
        let vocab = default_name_vocab();
        for rarity in Rarity::all() {
            assert!(!vocab.materials.for_rarity(*rarity).is_empty());
            assert!(!vocab.prefixes.for_rarity(*rarity).is_empty());
            assert!(!vocab.flavor.for_rarity(*rarity).is_empty());
        }
        for slot in EquipSlot::armor_slots() {
            assert!(!vocab.armor_nouns.for_slot(*slot).is_empty());
        }
        assert!(!vocab.weapon_nouns.is_empty());
        assert!(!vocab.ring_nouns.is_empty());
        assert!(!vocab.artifact_nouns.is_empty());
        assert!(!vocab.accessory_nouns.is_empty());
    }
}

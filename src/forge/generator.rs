//! Equipment stat generator
//!
//! Synthesizes names from rarity/category vocabularies and rolls a
//! weighted-random attribute spread bounded by per-rarity floors and
//! ceilings.

use rand::Rng;

use crate::data::vocab::NameVocab;
use crate::items::item::{
    next_item_id, AttributeKind, AttributeSet, EquipSlot, Item, ItemCategory, Rarity,
};

/// Per-category sampling weights over the six attribute keys.
/// The first entry is the core attribute: always present on generated gear.
fn weight_table(category: ItemCategory) -> &'static [(AttributeKind, u32)] {
    match category {
        ItemCategory::Weapon => &[
            (AttributeKind::Attack, 50),
            (AttributeKind::Speed, 15),
            (AttributeKind::Spirit, 12),
            (AttributeKind::Hp, 8),
            (AttributeKind::Defense, 8),
            (AttributeKind::Physique, 7),
        ],
        ItemCategory::Armor => &[
            (AttributeKind::Defense, 40),
            (AttributeKind::Hp, 30),
            (AttributeKind::Physique, 15),
            (AttributeKind::Speed, 6),
            (AttributeKind::Spirit, 5),
            (AttributeKind::Attack, 4),
        ],
        ItemCategory::Accessory => &[
            (AttributeKind::Spirit, 35),
            (AttributeKind::Hp, 20),
            (AttributeKind::Speed, 15),
            (AttributeKind::Attack, 10),
            (AttributeKind::Defense, 10),
            (AttributeKind::Physique, 10),
        ],
        ItemCategory::Ring => &[
            (AttributeKind::Attack, 30),
            (AttributeKind::Spirit, 25),
            (AttributeKind::Speed, 15),
            (AttributeKind::Hp, 10),
            (AttributeKind::Defense, 10),
            (AttributeKind::Physique, 10),
        ],
        _ => &[
            (AttributeKind::Spirit, 30),
            (AttributeKind::Attack, 20),
            (AttributeKind::Hp, 20),
            (AttributeKind::Physique, 10),
            (AttributeKind::Defense, 10),
            (AttributeKind::Speed, 10),
        ],
    }
}

/// The attribute a category always grants
pub fn core_attribute(category: ItemCategory) -> AttributeKind {
    weight_table(category)[0].0
}

/// Weight factor for a non-core attribute: proportional to its sampling
/// weight, floored at 0.4
pub(crate) fn weight_factor(category: ItemCategory, kind: AttributeKind) -> f64 {
    let table = weight_table(category);
    let max = table[0].1 as f64;
    let weight = table
        .iter()
        .find(|(k, _)| *k == kind)
        .map(|(_, w)| *w)
        .unwrap_or(0) as f64;
    (weight / max).max(0.4)
}

/// Raw per-rarity value band before key scaling (floor, ceiling).
/// Each floor sits adjacent to the previous tier's ceiling so a higher
/// rarity never rolls below the lower tier's top range.
fn rarity_band(rarity: Rarity) -> (f64, f64) {
    match rarity {
        Rarity::Common => (10.0, 60.0),
        Rarity::Rare => (50.0, 150.0),
        Rarity::Legendary => (120.0, 400.0),
        Rarity::Immortal => (350.0, 1200.0),
    }
}

/// Per-key scale: HP is a big number, speed a small one
fn key_scale(kind: AttributeKind) -> f64 {
    match kind {
        AttributeKind::Attack => 1.0,
        AttributeKind::Defense => 0.8,
        AttributeKind::Hp => 5.0,
        AttributeKind::Spirit => 0.9,
        AttributeKind::Physique => 0.9,
        AttributeKind::Speed => 0.5,
    }
}

/// Guaranteed minimum for an attribute at a rarity
pub fn attribute_floor(rarity: Rarity, kind: AttributeKind) -> u32 {
    (rarity_band(rarity).0 * key_scale(kind)).round() as u32
}

/// Hard ceiling for an attribute at a rarity
pub fn attribute_ceiling(rarity: Rarity, kind: AttributeKind) -> u32 {
    (rarity_band(rarity).1 * key_scale(kind)).round() as u32
}

/// Base power seed; grows with the template index
fn base_value(index: usize) -> f64 {
    15.0 + (index.min(400) as f64) * 1.2
}

/// Roll one attribute value, clamped into the rarity's band for the key
pub fn roll_attribute_value(
    rarity: Rarity,
    kind: AttributeKind,
    factor: f64,
    base: f64,
    rng: &mut impl Rng,
) -> u32 {
    let floor = attribute_floor(rarity, kind);
    let ceiling = attribute_ceiling(rarity, kind);
    let jitter = rng.gen_range(0.8..=1.2);
    let raw = floor as f64 + base * rarity.multiplier() * factor * key_scale(kind) * jitter;
    (raw.min(ceiling as f64).max(floor as f64)).round() as u32
}

/// Roll the full attribute spread for a category at a rarity
///
/// The core attribute is always present; the rest are drawn by weighted
/// sampling without replacement until the rarity's target count is hit.
pub fn roll_attributes(
    category: ItemCategory,
    rarity: Rarity,
    index: usize,
    rng: &mut impl Rng,
) -> AttributeSet {
    let (min_count, max_count) = rarity.attribute_range();
    let target = rng.gen_range(min_count..=max_count);
    let base = base_value(index);

    let core = core_attribute(category);
    let mut attributes = AttributeSet::new();
    attributes.set(
        core,
        roll_attribute_value(rarity, core, 1.0, base, rng).max(1),
    );

    let mut pool: Vec<(AttributeKind, u32)> = weight_table(category)
        .iter()
        .filter(|(k, _)| *k != core)
        .copied()
        .collect();

    while attributes.len() < target && !pool.is_empty() {
        let total: u32 = pool.iter().map(|(_, w)| w).sum();
        let mut roll = rng.gen_range(0..total);
        let mut picked = 0;
        for (i, (_, w)) in pool.iter().enumerate() {
            if roll < *w {
                picked = i;
                break;
            }
            roll -= w;
        }
        let (kind, _) = pool.remove(picked);
        let factor = weight_factor(category, kind);
        attributes.set(kind, roll_attribute_value(rarity, kind, factor, base, rng));
    }

    attributes
}

/// Equipment slot derived from category and index. Armor cycles its six
/// slots so the same index always names the same part.
fn slot_for(category: ItemCategory, index: usize) -> EquipSlot {
    match category {
        ItemCategory::Weapon => EquipSlot::Weapon,
        ItemCategory::Armor => EquipSlot::armor_slots()[index % 6],
        ItemCategory::Accessory => EquipSlot::Accessory1,
        ItemCategory::Ring => EquipSlot::Ring1,
        _ => EquipSlot::Artifact1,
    }
}

/// Synthesize a display name. Deterministic in (category, rarity, index):
/// the index walks material/prefix/noun combinations and picks one of
/// three patterns, so repeated calls reproduce the name while attribute
/// rolls stay random.
pub fn synthesize_name(
    vocab: &NameVocab,
    category: ItemCategory,
    slot: EquipSlot,
    rarity: Rarity,
    index: usize,
) -> String {
    let nouns = vocab.nouns_for(category, slot);
    let materials = vocab.materials.for_rarity(rarity);
    let prefixes = vocab.prefixes.for_rarity(rarity);

    let noun = &nouns[index % nouns.len()];
    let material = &materials[(index / nouns.len()) % materials.len()];
    let prefix = &prefixes[(index / (nouns.len() * materials.len())) % prefixes.len()];

    match index % 3 {
        0 => format!("{} {}", material, noun),
        1 => format!("{} {}", prefix, noun),
        _ => format!("{} {} {}", prefix, material, noun),
    }
}

pub(crate) fn rarity_value(rarity: Rarity) -> u32 {
    match rarity {
        Rarity::Common => 50,
        Rarity::Rare => 200,
        Rarity::Legendary => 800,
        Rarity::Immortal => 5000,
    }
}

/// Generate a piece of equipment
///
/// `category` must be an equipment category. `index` varies the name and
/// seeds the power curve; it is not a random seed.
pub fn generate_equipment(
    category: ItemCategory,
    rarity: Rarity,
    index: usize,
    vocab: &NameVocab,
    rng: &mut impl Rng,
) -> Item {
    debug_assert!(category.is_equipment());

    let slot = slot_for(category, index);
    let mut item = Item::new(
        next_item_id(),
        synthesize_name(vocab, category, slot, rarity, index),
        category,
    );
    item.rarity = rarity;
    item.equip_slot = Some(slot);
    item.attributes = roll_attributes(category, rarity, index, rng);

    let materials = vocab.materials.for_rarity(rarity);
    let material = &materials[(index / vocab.nouns_for(category, slot).len()) % materials.len()];
    let flavor = &vocab.flavor.for_rarity(rarity)[0];
    item.description = format!("Forged from {}. {}", material.to_lowercase(), flavor);
    item.value = rarity_value(rarity);

    item
}

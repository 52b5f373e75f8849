//! Material synthesis
//!
//! Refines 4-8 raw materials into a piece of equipment whose rarity
//! follows the quality average of what went in.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::data::vocab::NameVocab;
use crate::forge::error::ForgeError;
use crate::forge::generator::{
    core_attribute, rarity_value, roll_attribute_value, synthesize_name, weight_factor,
};
use crate::items::item::{next_item_id, AttributeKind, EquipSlot, Item, Rarity};

pub const MIN_MATERIALS: usize = 4;
pub const MAX_MATERIALS: usize = 8;

/// Rarity band the average quality score lands in
fn result_rarity(avg_score: f64) -> Rarity {
    if avg_score >= 15.0 {
        Rarity::Immortal
    } else if avg_score >= 6.0 {
        Rarity::Legendary
    } else if avg_score >= 2.5 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

/// Total attribute count on crafted gear; leaner than generated gear
fn attribute_cap(rarity: Rarity) -> usize {
    match rarity {
        Rarity::Common | Rarity::Rare => 2,
        Rarity::Legendary => 3,
        Rarity::Immortal => 4,
    }
}

/// Chance the forge grants revive charges
fn revive_chance(rarity: Rarity) -> f64 {
    match rarity {
        Rarity::Common => 0.03,
        Rarity::Rare => 0.05,
        Rarity::Legendary => 0.10,
        Rarity::Immortal => 0.20,
    }
}

/// Refine materials into a new piece of equipment
///
/// Consumption of the inputs is the caller's side: one unit per material,
/// unconditional, applied through `Inventory::take_one` before or after
/// this call. The function itself never touches inventory state.
pub fn craft_from_materials(
    materials: &[Item],
    custom_name: Option<String>,
    preferred_slot: Option<EquipSlot>,
    vocab: &NameVocab,
    rng: &mut impl Rng,
) -> Result<Item, ForgeError> {
    if materials.len() < MIN_MATERIALS || materials.len() > MAX_MATERIALS {
        return Err(ForgeError::MaterialCount {
            got: materials.len(),
            min: MIN_MATERIALS,
            max: MAX_MATERIALS,
        });
    }

    let avg_score = materials
        .iter()
        .map(|m| m.rarity.craft_score())
        .sum::<f64>()
        / materials.len() as f64;
    let rarity = result_rarity(avg_score);

    let slot = preferred_slot
        .filter(|s| EquipSlot::craftable().contains(s))
        .unwrap_or_else(|| {
            EquipSlot::craftable()
                .choose(rng)
                .copied()
                .unwrap_or(EquipSlot::Weapon)
        });
    let category = slot.category();

    // More materials within the window mean a hotter forge.
    let base = 100.0 * (1.0 + (materials.len() - MIN_MATERIALS) as f64 * 0.1);

    let core = core_attribute(category);
    let mut item = Item::new(
        next_item_id(),
        custom_name.unwrap_or_else(|| {
            synthesize_name(vocab, category, slot, rarity, rng.gen_range(0..1000))
        }),
        category,
    );
    item.rarity = rarity;
    item.equip_slot = Some(slot);
    item.attributes
        .set(core, roll_attribute_value(rarity, core, 1.0, base, rng).max(1));

    let cap = attribute_cap(rarity);
    let mut remaining: Vec<AttributeKind> = AttributeKind::all()
        .iter()
        .filter(|k| **k != core)
        .copied()
        .collect();
    while item.attributes.len() < cap && !remaining.is_empty() {
        let pick = rng.gen_range(0..remaining.len());
        let kind = remaining.remove(pick);
        let factor = weight_factor(category, kind);
        item.attributes
            .set(kind, roll_attribute_value(rarity, kind, factor, base, rng));
    }

    if rng.gen_bool(revive_chance(rarity)) {
        item.revive_charges = if rarity == Rarity::Immortal { 2 } else { 1 };
    }

    item.value = rarity_value(rarity);
    item.description = format!(
        "Refined from {} materials. {}",
        materials.len(),
        vocab.flavor.for_rarity(rarity)[0]
    );

    log::info!(
        "Crafted {} ({}, {}) from {} materials",
        item.name,
        rarity.name(),
        slot.name(),
        materials.len()
    );

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocab::default_name_vocab;
    use crate::forge::generator::{attribute_ceiling, attribute_floor};
    use crate::items::inventory::Inventory;
    use crate::items::item::templates;
    use rand::rngs::mock::StepRng;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn mats(rarities: &[Rarity]) -> Vec<Item> {
        rarities
            .iter()
            .map(|r| templates::forge_material(crate::items::item::next_item_id(), *r))
            .collect()
    }

    #[test]
    fn test_material_count_validated() {
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(1);
        for n in [0, 3, 9] {
            let materials = mats(&vec![Rarity::Common; n]);
            let result = craft_from_materials(&materials, None, None, &vocab, &mut rng);
            assert!(matches!(
                result,
                Err(ForgeError::MaterialCount { got, .. }) if got == n
            ));
        }
    }

    #[test]
    fn test_basic_craft_is_common() {
        // Four Common materials: average score 1, Common band.
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(2);
        let materials = mats(&[Rarity::Common; 4]);
        let item = craft_from_materials(&materials, None, None, &vocab, &mut rng).unwrap();
        assert_eq!(item.rarity, Rarity::Common);
    }

    #[test]
    fn test_mixed_craft_is_rare() {
        // (1 + 1 + 8 + 8) / 4 = 4.5: inside the Rare band, below Legendary.
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(3);
        let materials = mats(&[
            Rarity::Common,
            Rarity::Common,
            Rarity::Legendary,
            Rarity::Legendary,
        ]);
        let item = craft_from_materials(&materials, None, None, &vocab, &mut rng).unwrap();
        assert_eq!(item.rarity, Rarity::Rare);
    }

    #[test]
    fn test_all_immortal_craft() {
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(4);
        let materials = mats(&[Rarity::Immortal; 4]);
        let item = craft_from_materials(&materials, None, None, &vocab, &mut rng).unwrap();
        assert_eq!(item.rarity, Rarity::Immortal);
        assert!(item.attributes.len() <= 4);
    }

    #[test]
    fn test_preferred_slot_honored() {
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(5);
        let materials = mats(&[Rarity::Common; 5]);
        let item = craft_from_materials(
            &materials,
            None,
            Some(EquipSlot::Boots),
            &vocab,
            &mut rng,
        )
        .unwrap();
        assert_eq!(item.equip_slot, Some(EquipSlot::Boots));
    }

    #[test]
    fn test_crafted_values_within_bounds() {
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(6);
        for _ in 0..50 {
            let materials = mats(&[Rarity::Legendary; 8]);
            let item = craft_from_materials(&materials, None, None, &vocab, &mut rng).unwrap();
            for attr in item.attributes.iter() {
                assert!(attr.value >= attribute_floor(item.rarity, attr.kind));
                assert!(attr.value <= attribute_ceiling(item.rarity, attr.kind));
            }
        }
    }

    #[test]
    fn test_revive_charges_on_lucky_roll() {
        // A zero-stream RNG makes every bool roll come up true.
        let vocab = default_name_vocab();
        let mut rng = StepRng::new(0, 0);
        let materials = mats(&[Rarity::Immortal; 4]);
        let item = craft_from_materials(&materials, None, None, &vocab, &mut rng).unwrap();
        assert_eq!(item.revive_charges, 2);
    }

    #[test]
    fn test_custom_name_used() {
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(7);
        let materials = mats(&[Rarity::Common; 4]);
        let item = craft_from_materials(
            &materials,
            Some("Grandpa's Hoe".to_string()),
            None,
            &vocab,
            &mut rng,
        )
        .unwrap();
        assert_eq!(item.name, "Grandpa's Hoe");
    }

    #[test]
    fn test_materials_consumed_one_each() {
        // The inventory seam: one unit per input leaves the stack,
        // regardless of what the forge produces.
        let vocab = default_name_vocab();
        let mut rng = StdRng::seed_from_u64(8);
        let mut inv = Inventory::new();
        let mut stack = templates::forge_material(crate::items::item::next_item_id(), Rarity::Rare);
        stack.stack_count = 6;
        let id = stack.id;
        inv.add_item(stack);

        let consumed: Vec<Item> = (0..4).filter_map(|_| inv.take_one(id)).collect();
        assert_eq!(consumed.len(), 4);
        assert_eq!(inv.count_of("Spirit Jade Shard"), 2);

        let item = craft_from_materials(&consumed, None, None, &vocab, &mut rng).unwrap();
        assert_eq!(item.rarity, Rarity::Rare);
        // Stack stays reduced whatever came out of the forge.
        assert_eq!(inv.count_of("Spirit Jade Shard"), 2);
    }
}

//! Equipment fusion
//!
//! Binds two compatible pieces of equipment and a catalyst stone into one
//! item. Deterministic: every precondition is checked up front and a
//! passing fusion always produces its result.

use std::cmp::Reverse;

use crate::forge::error::ForgeError;
use crate::forge::generator::rarity_value;
use crate::items::item::{next_item_id, AttributeKind, AttributeSet, Item, ItemCategory, Rarity};

/// Share of the summed attribute values the fused item keeps
pub const FUSION_RETENTION: f64 = 0.8;

/// Attribute cap on the fused result
fn max_fused_attributes(rarity: Rarity) -> usize {
    if rarity == Rarity::Immortal {
        5
    } else {
        4
    }
}

fn check_fusable(item: &Item) -> Result<(), ForgeError> {
    if !item.is_equippable() || item.attributes.is_empty() {
        return Err(ForgeError::MissingAttributes(item.name.clone()));
    }
    Ok(())
}

/// Merge priority: keys on both inputs, then the attack/defense/hp trio,
/// then everything else; merged value breaks ties within a class.
fn prune_rank(kind: AttributeKind, on_both: bool) -> u8 {
    if on_both {
        0
    } else if matches!(
        kind,
        AttributeKind::Attack | AttributeKind::Defense | AttributeKind::Hp
    ) {
        1
    } else {
        2
    }
}

fn derive_name(a: &Item, b: &Item) -> String {
    let first = a.name.split_whitespace().next().unwrap_or(a.name.as_str());
    let last = b.name.split_whitespace().last().unwrap_or(b.name.as_str());
    format!("{} {}", first, last)
}

/// Fuse two pieces of equipment with a catalyst stone
///
/// Both inputs and one unit of the catalyst are consumed by the caller on
/// success; a rejection must consume nothing, which holds trivially since
/// this function only borrows its inputs.
pub fn fuse_equipment(
    a: &Item,
    b: &Item,
    catalyst: &Item,
    custom_name: Option<String>,
) -> Result<Item, ForgeError> {
    check_fusable(a)?;
    check_fusable(b)?;

    let slot_match = match (a.equip_slot, b.equip_slot) {
        (Some(sa), Some(sb)) if sa == sb => true,
        _ => a.category == b.category && a.category.matches_by_category(),
    };
    if !slot_match {
        return Err(ForgeError::SlotMismatch {
            a: a.name.clone(),
            b: b.name.clone(),
        });
    }

    if catalyst.category != ItemCategory::CatalystStone {
        return Err(ForgeError::InvalidCatalyst(catalyst.name.clone()));
    }
    let required = Rarity::higher(a.rarity, b.rarity);
    if catalyst.rarity.sort_value() < required.sort_value() {
        return Err(ForgeError::CatalystTooWeak {
            catalyst: catalyst.rarity,
            required,
        });
    }

    let rarity = required;

    // Union of keys, summed with the fusion loss applied.
    let mut merged: Vec<(AttributeKind, u32, bool)> = Vec::new();
    for kind in AttributeKind::all() {
        let va = a.attributes.get(*kind);
        let vb = b.attributes.get(*kind);
        if va.is_none() && vb.is_none() {
            continue;
        }
        let sum = va.unwrap_or(0) as u64 + vb.unwrap_or(0) as u64;
        let kept = ((sum as f64 * FUSION_RETENTION).floor()).min(u32::MAX as f64) as u32;
        merged.push((*kind, kept, va.is_some() && vb.is_some()));
    }

    merged.sort_by_key(|(kind, value, on_both)| (prune_rank(*kind, *on_both), Reverse(*value)));
    merged.truncate(max_fused_attributes(rarity));

    let attributes: AttributeSet = merged
        .into_iter()
        .map(|(kind, value, _)| crate::items::item::Attribute { kind, value })
        .collect();

    let mut item = Item::new(
        next_item_id(),
        custom_name.unwrap_or_else(|| derive_name(a, b)),
        a.category,
    );
    item.rarity = rarity;
    item.equip_slot = a.equip_slot;
    item.attributes = attributes;
    item.revive_charges = (a.revive_charges + b.revive_charges).min(3);
    item.value = rarity_value(rarity);
    item.description = format!("Two treasures bound into one by {}.", catalyst.name);

    log::info!(
        "Fused {} and {} into {} ({})",
        a.name,
        b.name,
        item.name,
        rarity.name()
    );

    Ok(item)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::item::{templates, EquipSlot};

    fn equipment(
        name: &str,
        category: ItemCategory,
        slot: EquipSlot,
        rarity: Rarity,
        attrs: &[(AttributeKind, u32)],
    ) -> Item {
        let mut item = Item::new(next_item_id(), name, category);
        item.rarity = rarity;
        item.equip_slot = Some(slot);
        for (kind, value) in attrs {
            item.attributes.set(*kind, *value);
        }
        item
    }

    fn catalyst(rarity: Rarity) -> Item {
        templates::catalyst_stone(next_item_id(), rarity)
    }

    #[test]
    fn test_result_rarity_is_max_of_inputs() {
        let a = equipment(
            "Azure Saber",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Rare,
            &[(AttributeKind::Attack, 100)],
        );
        let b = equipment(
            "Starsteel Saber",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Legendary,
            &[(AttributeKind::Attack, 200)],
        );
        let fused = fuse_equipment(&a, &b, &catalyst(Rarity::Legendary), None).unwrap();
        assert_eq!(fused.rarity, Rarity::Legendary);
    }

    #[test]
    fn test_merge_applies_fusion_loss() {
        let a = equipment(
            "Iron Band",
            ItemCategory::Ring,
            EquipSlot::Ring1,
            Rarity::Common,
            &[(AttributeKind::Attack, 100), (AttributeKind::Speed, 31)],
        );
        let b = equipment(
            "Bronze Band",
            ItemCategory::Ring,
            EquipSlot::Ring2,
            Rarity::Common,
            &[(AttributeKind::Attack, 50)],
        );
        let fused = fuse_equipment(&a, &b, &catalyst(Rarity::Common), None).unwrap();
        // floor((100 + 50) * 0.8) and floor(31 * 0.8)
        assert_eq!(fused.attributes.get(AttributeKind::Attack), Some(120));
        assert_eq!(fused.attributes.get(AttributeKind::Speed), Some(24));
    }

    #[test]
    fn test_prune_priority_and_cap() {
        let a = equipment(
            "Helm A",
            ItemCategory::Armor,
            EquipSlot::Head,
            Rarity::Common,
            &[
                (AttributeKind::Attack, 10),
                (AttributeKind::Speed, 500),
                (AttributeKind::Spirit, 400),
            ],
        );
        let b = equipment(
            "Helm B",
            ItemCategory::Armor,
            EquipSlot::Head,
            Rarity::Common,
            &[
                (AttributeKind::Speed, 5),
                (AttributeKind::Hp, 30),
                (AttributeKind::Defense, 20),
                (AttributeKind::Physique, 900),
            ],
        );
        let fused = fuse_equipment(&a, &b, &catalyst(Rarity::Common), None).unwrap();
        // Cap 4: Speed is on both inputs, then the Attack/Defense/Hp trio
        // beats the higher-valued Spirit and Physique leftovers.
        assert_eq!(fused.attributes.len(), 4);
        assert!(fused.attributes.contains(AttributeKind::Speed));
        assert!(fused.attributes.contains(AttributeKind::Attack));
        assert!(fused.attributes.contains(AttributeKind::Defense));
        assert!(fused.attributes.contains(AttributeKind::Hp));
    }

    #[test]
    fn test_immortal_result_keeps_five() {
        let a = equipment(
            "Seal A",
            ItemCategory::Artifact,
            EquipSlot::Artifact1,
            Rarity::Immortal,
            &[
                (AttributeKind::Attack, 400),
                (AttributeKind::Spirit, 500),
                (AttributeKind::Speed, 200),
            ],
        );
        let b = equipment(
            "Seal B",
            ItemCategory::Artifact,
            EquipSlot::Artifact2,
            Rarity::Common,
            &[
                (AttributeKind::Hp, 90),
                (AttributeKind::Defense, 40),
                (AttributeKind::Physique, 35),
            ],
        );
        let fused = fuse_equipment(&a, &b, &catalyst(Rarity::Immortal), None).unwrap();
        assert_eq!(fused.rarity, Rarity::Immortal);
        assert_eq!(fused.attributes.len(), 5);
    }

    #[test]
    fn test_slot_mismatch_rejected() {
        let a = equipment(
            "Saber",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Common,
            &[(AttributeKind::Attack, 10)],
        );
        let b = equipment(
            "Helm",
            ItemCategory::Armor,
            EquipSlot::Head,
            Rarity::Common,
            &[(AttributeKind::Defense, 10)],
        );
        let result = fuse_equipment(&a, &b, &catalyst(Rarity::Common), None);
        assert!(matches!(result, Err(ForgeError::SlotMismatch { .. })));
    }

    #[test]
    fn test_rings_match_by_category() {
        let a = equipment(
            "Band A",
            ItemCategory::Ring,
            EquipSlot::Ring1,
            Rarity::Common,
            &[(AttributeKind::Attack, 10)],
        );
        let b = equipment(
            "Band B",
            ItemCategory::Ring,
            EquipSlot::Ring4,
            Rarity::Common,
            &[(AttributeKind::Spirit, 10)],
        );
        assert!(fuse_equipment(&a, &b, &catalyst(Rarity::Common), None).is_ok());
    }

    #[test]
    fn test_weak_catalyst_rejected() {
        let a = equipment(
            "Saber A",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Legendary,
            &[(AttributeKind::Attack, 10)],
        );
        let b = equipment(
            "Saber B",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Common,
            &[(AttributeKind::Attack, 10)],
        );
        let result = fuse_equipment(&a, &b, &catalyst(Rarity::Rare), None);
        assert!(matches!(
            result,
            Err(ForgeError::CatalystTooWeak {
                catalyst: Rarity::Rare,
                required: Rarity::Legendary,
            })
        ));
    }

    #[test]
    fn test_non_catalyst_rejected() {
        let a = equipment(
            "Saber A",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Common,
            &[(AttributeKind::Attack, 10)],
        );
        let b = a.clone();
        let herb = templates::spirit_herb(next_item_id());
        let result = fuse_equipment(&a, &b, &herb, None);
        assert!(matches!(result, Err(ForgeError::InvalidCatalyst(_))));
    }

    #[test]
    fn test_empty_attributes_rejected() {
        let a = equipment(
            "Saber A",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Common,
            &[],
        );
        let b = equipment(
            "Saber B",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Common,
            &[(AttributeKind::Attack, 10)],
        );
        let result = fuse_equipment(&a, &b, &catalyst(Rarity::Common), None);
        assert!(matches!(result, Err(ForgeError::MissingAttributes(_))));
    }

    #[test]
    fn test_revive_charges_sum_capped() {
        let mut a = equipment(
            "Seal A",
            ItemCategory::Artifact,
            EquipSlot::Artifact1,
            Rarity::Common,
            &[(AttributeKind::Spirit, 10)],
        );
        let mut b = equipment(
            "Seal B",
            ItemCategory::Artifact,
            EquipSlot::Artifact2,
            Rarity::Common,
            &[(AttributeKind::Spirit, 10)],
        );
        a.revive_charges = 2;
        b.revive_charges = 2;
        let fused = fuse_equipment(&a, &b, &catalyst(Rarity::Common), None).unwrap();
        assert_eq!(fused.revive_charges, 3);
    }

    #[test]
    fn test_enhancement_resets_on_fusion() {
        let mut a = equipment(
            "Saber A",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Common,
            &[(AttributeKind::Attack, 10)],
        );
        a.enhance_level = 7;
        let b = equipment(
            "Saber B",
            ItemCategory::Weapon,
            EquipSlot::Weapon,
            Rarity::Common,
            &[(AttributeKind::Attack, 10)],
        );
        let fused = fuse_equipment(&a, &b, &catalyst(Rarity::Common), None).unwrap();
        assert_eq!(fused.enhance_level, 0);
    }
}

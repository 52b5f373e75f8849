//! Qiforge - demo walkthrough
//!
//! Runs the forge end to end: generates gear, refines materials into a
//! new piece, enhances it, then fuses two treasures with a catalyst.

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;

use qiforge::data::ForgeData;
use qiforge::forge::{
    craft_from_materials, fuse_equipment, generate_equipment, upgrade_to_target, UpgradeResources,
};
use qiforge::items::item::{next_item_id, templates};
use qiforge::items::{Inventory, ItemCategory, Rarity};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Optional numeric seed as the first argument for reproducible runs.
    let mut rng = match std::env::args().nth(1).and_then(|s| s.parse::<u64>().ok()) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let data = ForgeData::new();

    // A freshly generated treasure of each rarity.
    for (i, rarity) in Rarity::all().iter().enumerate() {
        let item = generate_equipment(ItemCategory::Weapon, *rarity, i * 7, &data.vocab, &mut rng);
        println!(
            "{:10} {:28} {:?}",
            rarity.name(),
            item.name,
            item.attributes.iter().collect::<Vec<_>>()
        );
    }

    // Refine a batch of materials from the inventory.
    let mut inventory = Inventory::new();
    inventory.add_spirit_stones(50_000);
    let mut stack = templates::forge_material(next_item_id(), Rarity::Legendary);
    stack.stack_count = 6;
    let stack_id = stack.id;
    inventory.add_item(stack);

    let batch: Vec<_> = (0..6).filter_map(|_| inventory.take_one(stack_id)).collect();
    let mut crafted = craft_from_materials(&batch, None, None, &data.vocab, &mut rng)?;
    println!("\nRefined {} ({})", crafted.name, crafted.rarity.name());

    // Enhance it as far as the wallet allows.
    let mut resources = UpgradeResources {
        spirit_stones: inventory.spirit_stones(),
        materials: 60,
        upgrade_stones: 5,
    };
    let before = resources;
    let report = upgrade_to_target(&mut crafted, 8, 1, &mut resources, &mut rng);
    inventory.spend_spirit_stones(before.spirit_stones - resources.spirit_stones);
    println!(
        "Enhanced to +{} ({} up, {} down, {:?})",
        report.end_level, report.successes, report.failures, report.outcome
    );

    // Fuse it with a second treasure of the same slot.
    let slot = crafted.equip_slot.unwrap_or(qiforge::EquipSlot::Weapon);
    let partner = generate_equipment(slot.category(), crafted.rarity, 3, &data.vocab, &mut rng);
    if partner.equip_slot == crafted.equip_slot {
        let catalyst = templates::catalyst_stone(next_item_id(), Rarity::Immortal);
        let fused = fuse_equipment(&crafted, &partner, &catalyst, None)?;
        println!("Fused into {} ({})", fused.name, fused.rarity.name());
        println!("\n{}", serde_json::to_string_pretty(&fused)?);
    } else {
        println!("\n{}", serde_json::to_string_pretty(&crafted)?);
    }

    Ok(())
}

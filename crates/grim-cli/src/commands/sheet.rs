use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use grim_core::{INVENTORY_CAPACITY, Stat};

use super::Store;
use crate::config::CliConfig;

pub fn run(config: &CliConfig) -> Result<(), String> {
    let store = super::open_store(config)?;
    print_sheet(&store);
    Ok(())
}

/// Print the whole adventure sheet of the active profile.
pub fn print_sheet(store: &Store) {
    let character = store.character();
    let name = store
        .active_profile()
        .map(|p| p.name.as_str())
        .unwrap_or_default();
    println!("  {}", name.bold());
    println!();

    let mut stats = Table::new();
    stats.set_content_arrangement(ContentArrangement::Dynamic);
    stats.set_header(vec!["Stat", "Current", "Initial"]);
    for stat in Stat::ALL {
        let pair = character.stat(stat);
        stats.add_row(vec![
            capitalize(&stat.to_string()),
            pair.cur.to_string(),
            pair.init.to_string(),
        ]);
    }
    println!("{stats}");
    println!(
        "  Gold: {}   Provisions: {}",
        character.gold, character.provisions
    );
    println!();

    println!(
        "  Pack ({}/{INVENTORY_CAPACITY})",
        character.inventory_count()
    );
    if character.inventory_count() > 0 {
        let mut pack = Table::new();
        pack.set_content_arrangement(ContentArrangement::Dynamic);
        pack.set_header(vec!["Id", "Kind", "Name", "Mastery"]);
        for weapon in &character.weapons {
            pack.add_row(vec![
                weapon.id.to_string(),
                "weapon".to_string(),
                weapon.name.clone(),
                format!("{:+}/{}", weapon.val, weapon.pot),
            ]);
        }
        for item in &character.items {
            pack.add_row(vec![
                item.id.to_string(),
                "item".to_string(),
                item.name.clone(),
                "—".to_string(),
            ]);
        }
        println!("{pack}");
    }

    if !character.notes.is_empty() {
        println!();
        println!("  Notes: {}", character.notes);
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

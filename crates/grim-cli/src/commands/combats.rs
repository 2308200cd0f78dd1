use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use grim_core::EntryId;
use grim_store::{CombatField, PendingAction};

use crate::config::CliConfig;

pub fn list(config: &CliConfig) -> Result<(), String> {
    let store = super::open_store(config)?;
    let combats = &store.character().combats;

    if combats.is_empty() {
        println!("  No fights recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Enemy", "Skill", "Stamina", "Dead", "Result"]);
    for record in combats {
        let result = record
            .result
            .map(|r| r.to_string())
            .unwrap_or_else(|| "—".to_string());
        table.add_row(vec![
            record.id.to_string(),
            record.enemy.clone(),
            record.skill.to_string(),
            record.stam.to_string(),
            if record.dead { "yes" } else { "no" }.to_string(),
            result,
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn add(config: &CliConfig) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = store.add_combat().map_err(|e| e.to_string())?;
    println!("  Blank fight added (#{id})");
    Ok(())
}

pub fn edit(
    config: &CliConfig,
    id: u64,
    enemy: Option<String>,
    skill: Option<i32>,
    stamina: Option<i32>,
) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = EntryId(id);
    if !store.character().combats.iter().any(|c| c.id == id) {
        return Err(format!("no fight with id {id}"));
    }
    let fields = enemy
        .map(CombatField::Enemy)
        .into_iter()
        .chain(skill.map(CombatField::Skill))
        .chain(stamina.map(CombatField::Stamina));
    for field in fields {
        store.update_combat(id, field).map_err(|e| e.to_string())?;
    }
    println!("  Fight #{id} updated.");
    Ok(())
}

pub fn toggle(config: &CliConfig, id: u64) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = EntryId(id);
    store.toggle_combat_dead(id).map_err(|e| e.to_string())?;
    match store.character().combats.iter().find(|c| c.id == id) {
        Some(record) if record.dead => println!("  {} is {}", record.enemy, "dead".red()),
        Some(record) => println!("  {} is alive", record.enemy),
        None => return Err(format!("no fight with id {id}")),
    }
    Ok(())
}

pub fn remove(config: &CliConfig, id: u64, yes: bool) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = EntryId(id);
    if !store.character().combats.iter().any(|c| c.id == id) {
        return Err(format!("no fight with id {id}"));
    }
    let confirmation = store
        .request(PendingAction::RemoveCombat(id))
        .map_err(|e| e.to_string())?;
    if super::confirm(&mut store, confirmation, yes)? {
        println!("  Fight removed.");
    }
    Ok(())
}

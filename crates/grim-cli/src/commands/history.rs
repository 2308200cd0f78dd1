use comfy_table::{ContentArrangement, Table};

use grim_core::{ChapterTags, EntryId};
use grim_store::PendingAction;

use crate::config::CliConfig;

pub fn add(config: &CliConfig, chap: &str, tags: ChapterTags, notes: &str) -> Result<(), String> {
    let chap = chap.trim();
    if chap.is_empty() {
        return Err("the chapter label must not be empty".into());
    }
    let mut store = super::open_store(config)?;
    let id = store
        .add_history_entry(chap, tags, notes)
        .map_err(|e| e.to_string())?;
    println!("  Chapter {chap} recorded (#{id})");
    Ok(())
}

pub fn list(config: &CliConfig) -> Result<(), String> {
    let store = super::open_store(config)?;
    let history = &store.character().history;

    if history.is_empty() {
        println!("  No chapters recorded.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Id", "Chapter", "Tags", "Notes"]);
    for entry in history {
        table.add_row(vec![
            entry.id.to_string(),
            entry.chap.clone(),
            entry.tags.to_string(),
            entry.notes.clone(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} chapters", history.len());
    Ok(())
}

pub fn remove(config: &CliConfig, id: u64, yes: bool) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = EntryId(id);
    if !store.character().history.iter().any(|h| h.id == id) {
        return Err(format!("no chapter entry with id {id}"));
    }
    let confirmation = store
        .request(PendingAction::RemoveHistoryEntry(id))
        .map_err(|e| e.to_string())?;
    if super::confirm(&mut store, confirmation, yes)? {
        println!("  Chapter entry removed.");
    }
    Ok(())
}

pub fn clear(config: &CliConfig, yes: bool) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let confirmation = store
        .request(PendingAction::ClearHistory)
        .map_err(|e| e.to_string())?;
    if super::confirm(&mut store, confirmation, yes)? {
        println!("  History cleared.");
    }
    Ok(())
}

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use grim_core::ProfileId;
use grim_store::PendingAction;

use super::Store;
use crate::config::CliConfig;

pub fn list(config: &CliConfig) -> Result<(), String> {
    let store = super::open_store(config)?;
    let active = store.active_id();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["", "Id", "Name", "Stamina", "Chapters"]);
    for profile in store.profiles() {
        let marker = if Some(profile.id) == active { "*" } else { "" };
        table.add_row(vec![
            marker.to_string(),
            profile.id.to_string(),
            profile.name.clone(),
            profile.data.stamina.to_string(),
            profile.data.history.len().to_string(),
        ]);
    }

    println!("{table}");
    Ok(())
}

pub fn new(config: &CliConfig, name: &str) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = store.add_profile(name).map_err(|e| e.to_string())?;
    println!("  {} {name} (#{id})", "Started".bold());
    Ok(())
}

pub fn switch(config: &CliConfig, id: u64) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = find(&store, id)?;
    store.switch_profile(id).map_err(|e| e.to_string())?;
    let name = store
        .active_profile()
        .map(|p| p.name.clone())
        .unwrap_or_default();
    println!("  Now playing {name}");
    Ok(())
}

pub fn rename(config: &CliConfig, id: u64, name: &str) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = find(&store, id)?;
    store.rename_profile(id, name).map_err(|e| e.to_string())?;
    println!("  Renamed to {name}");
    Ok(())
}

pub fn delete(config: &CliConfig, id: u64, yes: bool) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = find(&store, id)?;
    let confirmation = store
        .request(PendingAction::DeleteProfile(id))
        .map_err(|e| e.to_string())?;
    if super::confirm(&mut store, confirmation, yes)? {
        println!("  Adventure deleted.");
    }
    Ok(())
}

fn find(store: &Store, id: u64) -> Result<ProfileId, String> {
    let id = ProfileId(id);
    if store.profiles().iter().any(|p| p.id == id) {
        Ok(id)
    } else {
        Err(format!("no adventure with id {id}"))
    }
}

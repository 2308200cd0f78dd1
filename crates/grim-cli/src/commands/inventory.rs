use grim_core::EntryId;
use grim_store::PendingAction;

use crate::config::CliConfig;

pub fn add_item(config: &CliConfig, name: &str) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = store.add_item(name).map_err(|e| e.to_string())?;
    println!("  Added {name} (#{id})");
    Ok(())
}

pub fn remove_item(config: &CliConfig, id: u64, yes: bool) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = EntryId(id);
    let Some(name) = store
        .character()
        .items
        .iter()
        .find(|i| i.id == id)
        .map(|i| i.name.clone())
    else {
        return Err(format!("no item with id {id}"));
    };
    let confirmation = store
        .request(PendingAction::RemoveItem(id))
        .map_err(|e| e.to_string())?;
    if super::confirm(&mut store, confirmation, yes)? {
        println!("  Dropped {name}");
    }
    Ok(())
}

pub fn add_weapon(config: &CliConfig, name: &str, pot: i32) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = store.add_weapon(name, pot).map_err(|e| e.to_string())?;
    let weapon = store
        .character()
        .weapon(id)
        .map(ToString::to_string)
        .unwrap_or_default();
    println!("  Added {weapon} (#{id})");
    Ok(())
}

pub fn train_weapon(config: &CliConfig, id: u64) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = EntryId(id);
    if store
        .improve_weapon(id)
        .map_err(|e| e.to_string())?
        .is_none()
    {
        return Err(format!("no weapon with id {id}"));
    }
    if let Some(weapon) = store.character().weapon(id) {
        let note = if weapon.is_mastered() { " (mastered)" } else { "" };
        println!("  {weapon}{note}");
    }
    Ok(())
}

pub fn remove_weapon(config: &CliConfig, id: u64, yes: bool) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let id = EntryId(id);
    let Some(name) = store.character().weapon(id).map(|w| w.name.clone()) else {
        return Err(format!("no weapon with id {id}"));
    };
    let confirmation = store
        .request(PendingAction::RemoveWeapon(id))
        .map_err(|e| e.to_string())?;
    if super::confirm(&mut store, confirmation, yes)? {
        println!("  Dropped {name}");
    }
    Ok(())
}

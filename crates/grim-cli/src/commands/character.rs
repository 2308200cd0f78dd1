use colored::Colorize;

use grim_core::{HEPTAGRAM_SLOTS, Stat};

use crate::config::CliConfig;

pub fn roll(config: &CliConfig, yes: bool) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    if let Some(confirmation) = store.roll_new_char(false).map_err(|e| e.to_string())?
        && !super::confirm(&mut store, confirmation, yes)?
    {
        return Ok(());
    }
    let c = store.character();
    println!(
        "  {} skill {}, stamina {}, luck {}",
        "New character:".bold(),
        c.skill.init,
        c.stamina.init,
        c.luck.init
    );
    Ok(())
}

pub fn stat(config: &CliConfig, stat: Stat, delta: i32) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    store.mod_stat(stat, delta).map_err(|e| e.to_string())?;
    println!("  {stat}: {}", store.character().stat(stat));
    Ok(())
}

pub fn luck(config: &CliConfig) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let test = store.test_luck().map_err(|e| e.to_string())?;
    let verdict = if test.success {
        "Lucky!".green().bold()
    } else {
        "Unlucky.".red().bold()
    };
    println!(
        "  {verdict} Rolled {} against {}. Luck is now {}.",
        test.roll,
        test.current_luck,
        store.character().luck
    );
    Ok(())
}

pub fn gold(config: &CliConfig, delta: i32) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let gold = store.mod_gold(delta).map_err(|e| e.to_string())?;
    println!("  Gold: {gold}");
    Ok(())
}

pub fn provisions(config: &CliConfig, delta: i32) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    let provisions = store.mod_provisions(delta).map_err(|e| e.to_string())?;
    println!("  Provisions: {provisions}");
    Ok(())
}

pub fn notes(config: &CliConfig, text: Option<&str>) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    match text {
        Some(text) => {
            store.set_notes(text).map_err(|e| e.to_string())?;
            println!("  Notes saved.");
        }
        None if store.character().notes.is_empty() => println!("  No notes."),
        None => println!("{}", store.character().notes),
    }
    Ok(())
}

pub fn heptagram(config: &CliConfig, slot: Option<usize>, text: Option<&str>) -> Result<(), String> {
    let mut store = super::open_store(config)?;
    if let Some(slot) = slot {
        store
            .update_heptagram(slot, text.unwrap_or_default())
            .map_err(|e| e.to_string())?;
    }
    let heptagram = &store.character().heptagram;
    for slot in 0..HEPTAGRAM_SLOTS {
        let text = heptagram.get(slot).unwrap_or_default();
        println!("  {slot}: {text}");
    }
    Ok(())
}

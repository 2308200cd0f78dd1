pub mod character;
pub mod combats;
pub mod fight;
pub mod history;
pub mod inventory;
pub mod profile;
pub mod sheet;

use std::io::{self, BufRead, Write};

use colored::Colorize;

use grim_mechanics::RandomDie;
use grim_store::{AdventureStore, Confirmation, FileStorage, LoadOutcome, StoreConfig, storage};

use crate::config::CliConfig;

/// The store as the binary uses it.
pub type Store = AdventureStore<FileStorage, RandomDie>;

/// Open and load the save described by `config`.
pub fn open_store(config: &CliConfig) -> Result<Store, String> {
    storage::validate_key(&config.storage_key).map_err(|e| e.to_string())?;
    let files = FileStorage::new(&config.data_dir).map_err(|e| {
        format!(
            "cannot open data directory {}: {e}",
            config.data_dir.display()
        )
    })?;
    let store_config = StoreConfig::default().with_storage_key(config.storage_key.clone());
    let mut store = AdventureStore::new(files, dice(config, 0), store_config);
    match store.load() {
        LoadOutcome::Unreadable { error } => Err(format!(
            "cannot read the save in {}: {error}",
            config.data_dir.display()
        )),
        outcome => {
            tracing::debug!(?outcome, dir = %config.data_dir.display(), "save opened");
            Ok(store)
        }
    }
}

/// Dice for one purpose. Seeded runs give each purpose its own stream.
pub fn dice(config: &CliConfig, stream: u64) -> RandomDie {
    match config.seed {
        Some(seed) => RandomDie::seeded(seed.wrapping_add(stream)),
        None => RandomDie::from_entropy(),
    }
}

/// Ask a yes/no question on stdout and read the answer from `reader`.
/// Anything but yes is a no.
pub fn ask(reader: &mut impl BufRead, question: &str) -> Result<bool, String> {
    print!("  {question} [y/N] ");
    io::stdout().flush().map_err(|e| e.to_string())?;
    let mut line = String::new();
    reader.read_line(&mut line).map_err(|e| e.to_string())?;
    Ok(matches!(
        line.trim().to_lowercase().as_str(),
        "y" | "yes" | "o" | "oui"
    ))
}

/// Confirm a destructive action, prompting on stdin unless `yes` is set.
/// Returns whether the action was carried out.
pub fn confirm(store: &mut Store, confirmation: Confirmation, yes: bool) -> Result<bool, String> {
    if !yes {
        let question = confirmation.action().prompt();
        if !ask(&mut io::stdin().lock(), question)? {
            drop(confirmation);
            println!("  {}", "Cancelled.".dimmed());
            return Ok(false);
        }
    }
    store.confirm(confirmation).map_err(|e| e.to_string())?;
    Ok(true)
}

//! Command-line adventure sheet for solo gamebooks.

mod commands;
mod config;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use grim_core::{ChapterTags, Stat};
use grim_store::Enemy;

use crate::config::CliConfig;

#[derive(Parser)]
#[command(
    name = "grimoire",
    about = "Grimoire — adventure sheet and combat arena for gamebooks",
    version,
    propagate_version = true
)]
struct Cli {
    /// Directory holding the save (overrides GRIMOIRE_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Seed the dice for a reproducible run (overrides GRIMOIRE_SEED)
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Answer yes to every confirmation
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the adventure sheet
    Sheet,

    /// Start over with a freshly rolled character
    Roll,

    /// Change a stat's current value (skill, stamina, luck)
    Stat {
        /// Which stat
        stat: Stat,
        /// Amount to add; negative to subtract
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Test your luck
    Luck,

    /// Add or spend gold
    Gold {
        /// Amount to add; negative to spend
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Add or eat provisions
    Provisions {
        /// Amount to add; negative to eat
        #[arg(allow_negative_numbers = true)]
        delta: i32,
    },

    /// Manage items
    Item {
        #[command(subcommand)]
        action: ItemCommand,
    },

    /// Manage weapons
    Weapon {
        #[command(subcommand)]
        action: WeaponCommand,
    },

    /// Record the chapters you read
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },

    /// Show or replace the free-form notes
    Notes {
        /// New notes text
        text: Option<String>,
    },

    /// Show the heptagram, or write one of its seven slots
    Heptagram {
        /// Slot to write (0 to 6)
        #[arg(requires = "text")]
        slot: Option<usize>,
        /// Text for the slot
        text: Option<String>,
    },

    /// Manage the combat log
    Combats {
        #[command(subcommand)]
        action: CombatsCommand,
    },

    /// Manage adventures
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },

    /// Fight an enemy round by round
    Fight {
        /// Enemy name
        #[arg(long)]
        enemy: String,
        /// Enemy skill
        #[arg(long)]
        skill: i32,
        /// Enemy stamina
        #[arg(long)]
        stamina: i32,
        /// Weapon id to wield (default: the first weapon)
        #[arg(long)]
        weapon: Option<u64>,
    },
}

#[derive(Subcommand)]
enum ItemCommand {
    /// Put an item in the pack
    Add {
        /// Item name
        name: String,
    },
    /// Drop an item
    Remove {
        /// Item id
        id: u64,
    },
}

#[derive(Subcommand)]
enum WeaponCommand {
    /// Add an untrained weapon
    Add {
        /// Weapon name
        name: String,
        /// Mastery potential
        pot: i32,
    },
    /// Raise a weapon's mastery by one
    Train {
        /// Weapon id
        id: u64,
    },
    /// Drop a weapon
    Remove {
        /// Weapon id
        id: u64,
    },
}

#[derive(Args)]
struct TagArgs {
    /// The chapter had a fight
    #[arg(long)]
    combat: bool,
    /// The chapter gave an item
    #[arg(long)]
    item: bool,
    /// The chapter involved food
    #[arg(long)]
    food: bool,
    /// The chapter offered a choice
    #[arg(long)]
    choice: bool,
}

impl From<TagArgs> for ChapterTags {
    fn from(t: TagArgs) -> Self {
        Self {
            combat: t.combat,
            item: t.item,
            food: t.food,
            choice: t.choice,
        }
    }
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// Record a chapter
    Add {
        /// Chapter label, usually its number
        chap: String,
        #[command(flatten)]
        tags: TagArgs,
        /// Notes for the chapter
        #[arg(short, long, default_value = "")]
        notes: String,
    },
    /// List recorded chapters
    List,
    /// Delete one chapter entry
    Remove {
        /// Entry id
        id: u64,
    },
    /// Delete every chapter entry
    Clear,
}

#[derive(Subcommand)]
enum CombatsCommand {
    /// List recorded fights
    List,
    /// Add a blank fight to fill in by hand
    Add,
    /// Edit a recorded fight
    Edit {
        /// Fight id
        id: u64,
        /// Enemy name
        #[arg(long)]
        enemy: Option<String>,
        /// Enemy skill
        #[arg(long)]
        skill: Option<i32>,
        /// Enemy stamina
        #[arg(long)]
        stamina: Option<i32>,
    },
    /// Mark the enemy dead or alive
    Toggle {
        /// Fight id
        id: u64,
    },
    /// Delete a recorded fight
    Remove {
        /// Fight id
        id: u64,
    },
}

#[derive(Subcommand)]
enum ProfileCommand {
    /// List adventures (* marks the active one)
    List,
    /// Start a new adventure and switch to it
    New {
        /// Adventure name
        name: String,
    },
    /// Switch to another adventure
    Switch {
        /// Adventure id
        id: u64,
    },
    /// Rename an adventure
    Rename {
        /// Adventure id
        id: u64,
        /// New name
        name: String,
    },
    /// Delete an adventure
    Delete {
        /// Adventure id
        id: u64,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::from_env().with_overrides(cli.data_dir, cli.seed);
    tracing::debug!(data_dir = %config.data_dir.display(), seed = ?config.seed, "configured");
    let yes = cli.yes;

    let result = match cli.command {
        Commands::Sheet => commands::sheet::run(&config),
        Commands::Roll => commands::character::roll(&config, yes),
        Commands::Stat { stat, delta } => commands::character::stat(&config, stat, delta),
        Commands::Luck => commands::character::luck(&config),
        Commands::Gold { delta } => commands::character::gold(&config, delta),
        Commands::Provisions { delta } => commands::character::provisions(&config, delta),
        Commands::Notes { text } => commands::character::notes(&config, text.as_deref()),
        Commands::Heptagram { slot, text } => {
            commands::character::heptagram(&config, slot, text.as_deref())
        }
        Commands::Item { action } => match action {
            ItemCommand::Add { name } => commands::inventory::add_item(&config, &name),
            ItemCommand::Remove { id } => commands::inventory::remove_item(&config, id, yes),
        },
        Commands::Weapon { action } => match action {
            WeaponCommand::Add { name, pot } => {
                commands::inventory::add_weapon(&config, &name, pot)
            }
            WeaponCommand::Train { id } => commands::inventory::train_weapon(&config, id),
            WeaponCommand::Remove { id } => commands::inventory::remove_weapon(&config, id, yes),
        },
        Commands::History { action } => match action {
            HistoryCommand::Add { chap, tags, notes } => {
                commands::history::add(&config, &chap, tags.into(), &notes)
            }
            HistoryCommand::List => commands::history::list(&config),
            HistoryCommand::Remove { id } => commands::history::remove(&config, id, yes),
            HistoryCommand::Clear => commands::history::clear(&config, yes),
        },
        Commands::Combats { action } => match action {
            CombatsCommand::List => commands::combats::list(&config),
            CombatsCommand::Add => commands::combats::add(&config),
            CombatsCommand::Edit {
                id,
                enemy,
                skill,
                stamina,
            } => commands::combats::edit(&config, id, enemy, skill, stamina),
            CombatsCommand::Toggle { id } => commands::combats::toggle(&config, id),
            CombatsCommand::Remove { id } => commands::combats::remove(&config, id, yes),
        },
        Commands::Profile { action } => match action {
            ProfileCommand::List => commands::profile::list(&config),
            ProfileCommand::New { name } => commands::profile::new(&config, &name),
            ProfileCommand::Switch { id } => commands::profile::switch(&config, id),
            ProfileCommand::Rename { id, name } => commands::profile::rename(&config, id, &name),
            ProfileCommand::Delete { id } => commands::profile::delete(&config, id, yes),
        },
        Commands::Fight {
            enemy,
            skill,
            stamina,
            weapon,
        } => commands::fight::run(&config, Enemy::new(enemy, skill, stamina), weapon, yes),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

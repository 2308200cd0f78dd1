//! Binary configuration from the environment and global flags.

use std::env;
use std::path::PathBuf;

use grim_store::config::DEFAULT_STORAGE_KEY;

/// Where saves live and how dice are seeded.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Directory holding the save files.
    pub data_dir: PathBuf,
    /// Fixed dice seed, for reproducible runs.
    pub seed: Option<u64>,
    /// Key (file stem) of the save blob.
    pub storage_key: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            seed: None,
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
        }
    }
}

impl CliConfig {
    /// Construct configuration from environment variables.
    ///
    /// Environment variables:
    /// - `GRIMOIRE_DATA_DIR` - save directory (default: platform data dir)
    /// - `GRIMOIRE_SEED` - dice seed (default: random)
    /// - `GRIMOIRE_STORAGE_KEY` - save name (default: `ldvelh_data_web_v1`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("GRIMOIRE_DATA_DIR").filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(seed) = read_var::<u64>(&lookup, "GRIMOIRE_SEED") {
            config.seed = Some(seed);
        }
        if let Some(key) = lookup("GRIMOIRE_STORAGE_KEY").filter(|k| !k.is_empty()) {
            config.storage_key = key;
        }

        config
    }

    /// Apply command-line flags, which win over the environment.
    pub fn with_overrides(mut self, data_dir: Option<PathBuf>, seed: Option<u64>) -> Self {
        if let Some(dir) = data_dir {
            self.data_dir = dir;
        }
        if seed.is_some() {
            self.seed = seed;
        }
        self
    }
}

fn default_data_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "grimoire")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("./grimoire_data"))
}

fn read_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    lookup(key)?.trim().parse().ok()
}

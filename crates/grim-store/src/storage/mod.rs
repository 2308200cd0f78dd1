//! Key-value byte storage backing the adventure store.
//!
//! The store writes one blob under one key. Backends only need to get and
//! put whole values; there is no partial update and no transaction.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors surfaced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key contains characters the backend cannot store.
    #[error("invalid storage key \"{0}\" (use letters, digits, '.', '_' or '-')")]
    InvalidKey(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// A synchronous store of byte values addressed by string keys.
pub trait KeyValueStore {
    /// Fetch the value under `key`, or `None` if nothing was written there.
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>>;

    /// Replace the value under `key`.
    fn put(&mut self, key: &str, value: &[u8]) -> StorageResult<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn put(&mut self, key: &str, value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }
}

/// Keys are used as file names, so only a conservative set is accepted.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let ok = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if ok {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_default_key_and_backup() {
        assert!(validate_key("ldvelh_data_web_v1").is_ok());
        assert!(validate_key("ldvelh_data_web_v1.corrupt-20260301T093005-2").is_ok());
    }

    #[test]
    fn rejects_paths_and_blanks() {
        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            assert!(
                matches!(validate_key(key), Err(StorageError::InvalidKey(_))),
                "{key:?} should be rejected"
            );
        }
    }
}

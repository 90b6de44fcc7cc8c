//! Error types for store operations.

use oracle_core::{AccountId, ItemId};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors reported by a [`Store`](crate::Store).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No account with this ID exists.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// An account with this ID already exists.
    #[error("account already exists: {0}")]
    AccountExists(AccountId),

    /// No catalog item with this ID exists.
    #[error("catalog item not found: {0}")]
    ItemNotFound(ItemId),

    /// A compare-and-swap on the account's last access lost a race, or would
    /// have moved it backwards.
    #[error("concurrent update conflict on account {0}")]
    Conflict(AccountId),

    /// The backing storage could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Store data could not be encoded to, or decoded from, its persisted
    /// JSON form.
    #[error("store data (de)serialization failed: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// Reading or writing a snapshot failed.
    #[error("snapshot I/O: {0}")]
    Io(#[from] std::io::Error),
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::account::AccountId;
use crate::catalog::ItemId;

/// Unique identifier for a collection entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntryId(pub Uuid);

impl EntryId {
    /// Generate a new random entry ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// One confirmed selection in an account's collection.
///
/// Entries are append-only: once written they are never updated or removed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    /// Entry identifier.
    pub id: EntryId,
    /// The account that drew the card.
    pub account_id: AccountId,
    /// The chosen catalog item.
    pub item_id: ItemId,
    /// When the selection was confirmed.
    pub drawn_at: DateTime<Utc>,
}

impl CollectionEntry {
    /// Create a new entry with a fresh ID.
    pub fn new(account_id: AccountId, item_id: ItemId, drawn_at: DateTime<Utc>) -> Self {
        Self {
            id: EntryId::new(),
            account_id,
            item_id,
            drawn_at,
        }
    }
}

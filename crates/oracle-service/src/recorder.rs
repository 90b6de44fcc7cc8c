//! Append-only collection recording.

use chrono::{DateTime, Utc};
use oracle_core::{AccountId, CollectionEntry, ItemId};
use oracle_store::{Store, StoreResult};

/// Writes and reads an account's collection through a [`Store`].
///
/// Entries are only ever appended. Listing returns the newest draw first;
/// draws with the same timestamp come back latest-inserted first.
pub struct CollectionRecorder<'a, S: Store + ?Sized> {
    store: &'a S,
}

impl<'a, S: Store + ?Sized> CollectionRecorder<'a, S> {
    /// Create a recorder over `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Append an entry without touching the account's gate.
    pub fn record(
        &self,
        account_id: AccountId,
        item_id: ItemId,
        drawn_at: DateTime<Utc>,
    ) -> StoreResult<CollectionEntry> {
        let entry = CollectionEntry::new(account_id, item_id, drawn_at);
        self.store.append_collection_entry(entry.clone())?;
        Ok(entry)
    }

    /// Append an entry and stamp the account's last access with `drawn_at`
    /// in one atomic store operation, provided last access still equals
    /// `expected_last_access`.
    pub fn record_draw(
        &self,
        expected_last_access: Option<DateTime<Utc>>,
        account_id: AccountId,
        item_id: ItemId,
        drawn_at: DateTime<Utc>,
    ) -> StoreResult<CollectionEntry> {
        let entry = CollectionEntry::new(account_id, item_id, drawn_at);
        self.store.commit_draw(expected_last_access, entry)
    }

    /// The account's entries, newest first.
    pub fn list(&self, account_id: AccountId) -> StoreResult<Vec<CollectionEntry>> {
        let mut entries = self.store.list_collection_entries(account_id)?;
        // Reverse first so the stable sort leaves later insertions ahead on ties.
        entries.reverse();
        entries.sort_by(|a, b| b.drawn_at.cmp(&a.drawn_at));
        Ok(entries)
    }
}

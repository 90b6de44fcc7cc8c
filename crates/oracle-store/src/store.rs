//! The store collaborator interface.

use chrono::{DateTime, Utc};
use oracle_core::{Account, AccountId, CatalogItem, CollectionEntry, SubscriptionPlan};

use crate::error::StoreResult;

/// Durable storage for accounts, the catalog, and collections.
///
/// Implementations are shared across threads, so every method takes `&self`
/// and must serialize its own writes.
pub trait Store: Send + Sync {
    /// Load a fresh snapshot of an account.
    fn get_account(&self, id: AccountId) -> StoreResult<Account>;

    /// Register a new account.
    fn insert_account(&self, account: Account) -> StoreResult<()>;

    /// Overwrite the subscription fields of an account and return the
    /// updated snapshot. Last access is left untouched.
    fn update_subscription(
        &self,
        id: AccountId,
        active: bool,
        plan: Option<SubscriptionPlan>,
        expires_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Account>;

    /// Set `last_access_at` to `new` only if it currently equals `expected`
    /// and `new` does not move it backwards.
    fn cas_update_account(
        &self,
        id: AccountId,
        expected: Option<DateTime<Utc>>,
        new: DateTime<Utc>,
    ) -> StoreResult<()>;

    /// Append an entry to its account's collection.
    fn append_collection_entry(&self, entry: CollectionEntry) -> StoreResult<()>;

    /// All entries for an account in insertion order.
    fn list_collection_entries(&self, account_id: AccountId) -> StoreResult<Vec<CollectionEntry>>;

    /// Every catalog item.
    fn list_catalog(&self) -> StoreResult<Vec<CatalogItem>>;

    /// Add catalog items, returning how many were inserted.
    fn insert_catalog_items(&self, items: Vec<CatalogItem>) -> StoreResult<usize>;

    /// Stamp the account's last access with `entry.drawn_at` and append
    /// `entry`, as one atomic unit.
    ///
    /// Succeeds only if the account's last access still equals `expected`.
    /// On any error nothing is applied.
    fn commit_draw(
        &self,
        expected: Option<DateTime<Utc>>,
        entry: CollectionEntry,
    ) -> StoreResult<CollectionEntry>;
}

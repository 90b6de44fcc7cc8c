//! In-memory reference store.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use oracle_core::{Account, AccountId, CatalogItem, CollectionEntry, ItemId, SubscriptionPlan};
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<AccountId, Account>,
    catalog: Vec<CatalogItem>,
    entries: Vec<CollectionEntry>,
}

impl State {
    fn account_mut(&mut self, id: AccountId) -> StoreResult<&mut Account> {
        self.accounts
            .get_mut(&id)
            .ok_or(StoreError::AccountNotFound(id))
    }

    fn has_item(&self, id: ItemId) -> bool {
        self.catalog.iter().any(|item| item.id == id)
    }

    /// Checks shared by every write that appends an entry.
    fn check_entry(&self, entry: &CollectionEntry) -> StoreResult<()> {
        if !self.accounts.contains_key(&entry.account_id) {
            return Err(StoreError::AccountNotFound(entry.account_id));
        }
        if !self.has_item(entry.item_id) {
            return Err(StoreError::ItemNotFound(entry.item_id));
        }
        Ok(())
    }
}

/// On-disk layout of a [`MemoryStore`].
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    accounts: Vec<Account>,
    catalog: Vec<CatalogItem>,
    entries: Vec<CollectionEntry>,
}

/// A [`Store`] holding everything in memory behind one mutex.
///
/// Every operation takes the lock for its full duration, so
/// [`Store::commit_draw`] is serializable with respect to all other writes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    /// Serialize the whole store to JSON.
    pub fn to_json(&self) -> StoreResult<String> {
        let state = self.lock()?;
        let mut accounts: Vec<Account> = state.accounts.values().cloned().collect();
        accounts.sort_by_key(|a| (a.created_at, a.id.0));
        let snapshot = Snapshot {
            accounts,
            catalog: state.catalog.clone(),
            entries: state.entries.clone(),
        };
        Ok(serde_json::to_string_pretty(&snapshot)?)
    }

    /// Rebuild a store from JSON produced by [`MemoryStore::to_json`].
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        let accounts = snapshot
            .accounts
            .into_iter()
            .map(|a| (a.id, a))
            .collect();
        Ok(Self {
            state: Mutex::new(State {
                accounts,
                catalog: snapshot.catalog,
                entries: snapshot.entries,
            }),
        })
    }

    /// Write a JSON snapshot to `path`.
    pub fn save_json(&self, path: &Path) -> StoreResult<()> {
        let json = self.to_json()?;
        fs::write(path, json)?;
        tracing::debug!(path = %path.display(), "saved store snapshot");
        Ok(())
    }

    /// Load a store from a JSON snapshot at `path`.
    pub fn load_json(path: &Path) -> StoreResult<Self> {
        let json = fs::read_to_string(path)?;
        let store = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "loaded store snapshot");
        Ok(store)
    }
}

impl Store for MemoryStore {
    fn get_account(&self, id: AccountId) -> StoreResult<Account> {
        self.lock()?
            .accounts
            .get(&id)
            .cloned()
            .ok_or(StoreError::AccountNotFound(id))
    }

    fn insert_account(&self, account: Account) -> StoreResult<()> {
        let mut state = self.lock()?;
        if state.accounts.contains_key(&account.id) {
            return Err(StoreError::AccountExists(account.id));
        }
        state.accounts.insert(account.id, account);
        Ok(())
    }

    fn update_subscription(
        &self,
        id: AccountId,
        active: bool,
        plan: Option<SubscriptionPlan>,
        expires_at: Option<DateTime<Utc>>,
    ) -> StoreResult<Account> {
        let mut state = self.lock()?;
        let account = state.account_mut(id)?;
        account.subscription_active = active;
        account.subscription_plan = plan;
        account.subscription_expires_at = expires_at;
        Ok(account.clone())
    }

    fn cas_update_account(
        &self,
        id: AccountId,
        expected: Option<DateTime<Utc>>,
        new: DateTime<Utc>,
    ) -> StoreResult<()> {
        let mut state = self.lock()?;
        let account = state.account_mut(id)?;
        if account.last_access_at != expected || expected.is_some_and(|prev| new < prev) {
            tracing::warn!(account = %id, "last access compare-and-swap lost");
            return Err(StoreError::Conflict(id));
        }
        account.last_access_at = Some(new);
        Ok(())
    }

    fn append_collection_entry(&self, entry: CollectionEntry) -> StoreResult<()> {
        let mut state = self.lock()?;
        state.check_entry(&entry)?;
        state.entries.push(entry);
        Ok(())
    }

    fn list_collection_entries(&self, account_id: AccountId) -> StoreResult<Vec<CollectionEntry>> {
        let state = self.lock()?;
        if !state.accounts.contains_key(&account_id) {
            return Err(StoreError::AccountNotFound(account_id));
        }
        Ok(state
            .entries
            .iter()
            .filter(|e| e.account_id == account_id)
            .cloned()
            .collect())
    }

    fn list_catalog(&self) -> StoreResult<Vec<CatalogItem>> {
        Ok(self.lock()?.catalog.clone())
    }

    fn insert_catalog_items(&self, items: Vec<CatalogItem>) -> StoreResult<usize> {
        let mut state = self.lock()?;
        let before = state.catalog.len();
        for item in items {
            if !state.has_item(item.id) {
                state.catalog.push(item);
            }
        }
        Ok(state.catalog.len() - before)
    }

    fn commit_draw(
        &self,
        expected: Option<DateTime<Utc>>,
        entry: CollectionEntry,
    ) -> StoreResult<CollectionEntry> {
        let mut state = self.lock()?;
        state.check_entry(&entry)?;

        let account = state.account_mut(entry.account_id)?;
        if account.last_access_at != expected
            || expected.is_some_and(|prev| entry.drawn_at < prev)
        {
            tracing::warn!(account = %entry.account_id, "draw commit lost a race");
            return Err(StoreError::Conflict(entry.account_id));
        }
        account.last_access_at = Some(entry.drawn_at);
        state.entries.push(entry.clone());

        tracing::debug!(account = %entry.account_id, item = %entry.item_id, "draw committed");
        Ok(entry)
    }
}

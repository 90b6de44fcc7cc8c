//! Error types for the entitlement service.

use oracle_core::{AccountId, ItemId, OracleError};
use oracle_store::StoreError;
use thiserror::Error;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures of a service call.
///
/// Business denials (no subscription, cooldown) are not errors; they are
/// reported as [`Denial`](crate::Denial) values.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The account does not exist.
    #[error("account not found: {0}")]
    AccountNotFound(AccountId),

    /// The selected item is not in the catalog.
    #[error("unknown catalog item: {0}")]
    UnknownItem(ItemId),

    /// Not enough catalog items to present a draw. Seed more items.
    #[error("insufficient catalog: a draw needs {required} items but only {available} exist")]
    InsufficientCatalog {
        /// Candidates per draw.
        required: usize,
        /// Distinct items available.
        available: usize,
    },

    /// Another request updated the account first. Reload and re-evaluate
    /// rather than repeating the same confirmation.
    #[error("concurrent draw conflict on account {0}")]
    Conflict(AccountId),

    /// The store failed; no verdict was reached.
    #[error("store failure: {0}")]
    Store(StoreError),

    /// A rule computation failed.
    #[error("{0}")]
    Oracle(OracleError),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AccountNotFound(id) => Self::AccountNotFound(id),
            StoreError::ItemNotFound(id) => Self::UnknownItem(id),
            StoreError::Conflict(id) => Self::Conflict(id),
            other => Self::Store(other),
        }
    }
}

impl From<OracleError> for ServiceError {
    fn from(err: OracleError) -> Self {
        match err {
            OracleError::InsufficientCatalog {
                required,
                available,
            } => Self::InsufficientCatalog {
                required,
                available,
            },
            other => Self::Oracle(other),
        }
    }
}

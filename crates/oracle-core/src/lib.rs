//! Core types for the daily oracle: accounts, the card catalog, collection
//! entries, and the pure rules that gate a daily draw.
//!
//! Everything in this crate is free of I/O. The entitlement verdict, the
//! access gate, and the draw selector all take `now` and (where needed) an
//! RNG as explicit arguments, so the same inputs always give the same output.

/// Accounts, subscription plans, and account identifiers.
pub mod account;
/// Catalog items (the draw universe) and the stock sample deck.
pub mod catalog;
/// Append-only collection entries.
pub mod collection;
/// Tunable parameters for draws and the access gate.
pub mod config;
/// Random selection of candidate cards.
pub mod draw;
/// Subscription entitlement derived from an account snapshot.
pub mod entitlement;
/// Error types used throughout the crate.
pub mod error;
/// The rolling-window daily access gate.
pub mod gate;

/// Re-export account types.
pub use account::{Account, AccountId, SubscriptionPlan};
/// Re-export catalog types.
pub use catalog::{CatalogItem, ItemId, sample_catalog};
/// Re-export collection types.
pub use collection::{CollectionEntry, EntryId};
/// Re-export configuration.
pub use config::OracleConfig;
/// Re-export the draw selector.
pub use draw::draw;
/// Re-export entitlement types.
pub use entitlement::{Entitlement, SubscriptionState, evaluate};
/// Re-export error types.
pub use error::{OracleError, OracleResult};
/// Re-export gate types.
pub use gate::{
    DailyAccessGate, GateDecision, MAX_COOLDOWN_MINUTES, MIN_COOLDOWN_MINUTES, RetryAfter,
};

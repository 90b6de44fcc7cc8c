//! Store interface for the daily oracle, plus an in-memory reference store.
//!
//! The [`Store`] trait is everything the entitlement service needs from
//! durable storage. [`MemoryStore`] implements it behind a single mutex and
//! can snapshot its contents to JSON.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::Store;

//! Entitlement service for the daily oracle.
//!
//! [`EntitlementService`] answers "may this account draw now?", offers the
//! candidate cards, and records the confirmed choice. It keeps no state of
//! its own: every call reloads the account from the [`Store`] and recomputes
//! the verdict, and the final stamp-and-append is a single atomic store
//! operation.
//!
//! [`Store`]: oracle_store::Store

pub mod error;
pub mod outcome;
pub mod recorder;
pub mod service;

pub use error::{ServiceError, ServiceResult};
pub use outcome::{
    AccountStatus, CollectedCard, ConfirmOutcome, Denial, DenialReason, DrawOutcome,
};
pub use recorder::CollectionRecorder;
pub use service::EntitlementService;

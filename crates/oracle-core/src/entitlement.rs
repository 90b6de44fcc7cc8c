//! Subscription entitlement.
//!
//! [`evaluate`] is the single place that decides whether an account currently
//! has paid access. It is total over well-formed snapshots and reads nothing
//! but its arguments, so callers capture `now` once per request and reuse it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::account::{Account, SubscriptionPlan};

/// Coarse subscription state of an account at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionState {
    /// Never subscribed, or billing cleared the active flag.
    Unsubscribed,
    /// Paid access is in effect.
    Active,
    /// The active flag is still set but the paid period has ended.
    Expired,
}

impl fmt::Display for SubscriptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsubscribed => write!(f, "unsubscribed"),
            Self::Active => write!(f, "active"),
            Self::Expired => write!(f, "expired"),
        }
    }
}

/// The entitlement verdict for one account at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Whether the account has paid access right now.
    pub subscribed: bool,
    /// The plan on record.
    pub plan: Option<SubscriptionPlan>,
    /// End of the paid period on record.
    pub expires_at: Option<DateTime<Utc>>,
    /// The state this verdict was derived from.
    pub state: SubscriptionState,
}

/// Derive the entitlement of `account` at `now`.
///
/// An account is subscribed when its active flag is set and its expiry is
/// either absent or strictly after `now`.
pub fn evaluate(account: &Account, now: DateTime<Utc>) -> Entitlement {
    let state = if !account.subscription_active {
        SubscriptionState::Unsubscribed
    } else {
        match account.subscription_expires_at {
            Some(expires_at) if expires_at <= now => SubscriptionState::Expired,
            _ => SubscriptionState::Active,
        }
    };

    Entitlement {
        subscribed: state == SubscriptionState::Active,
        plan: account.subscription_plan,
        expires_at: account.subscription_expires_at,
        state,
    }
}

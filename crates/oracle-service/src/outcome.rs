//! Values returned to callers of the entitlement service.

use std::fmt;

use chrono::{DateTime, Utc};
use oracle_core::{CatalogItem, CollectionEntry, Entitlement, RetryAfter};

/// Why a draw was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialReason {
    /// The account has no active, unexpired subscription.
    SubscriptionRequired,
    /// The account already drew within the current window.
    CooldownActive,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SubscriptionRequired => write!(f, "subscription required"),
            Self::CooldownActive => write!(f, "cooldown active"),
        }
    }
}

/// A refused draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Denial {
    /// Why the draw was refused.
    pub reason: DenialReason,
    /// How long until the gate reopens; set only for a cooldown.
    pub retry_after: Option<RetryAfter>,
}

impl Denial {
    /// Denial for an account without paid access.
    pub fn subscription_required() -> Self {
        Self {
            reason: DenialReason::SubscriptionRequired,
            retry_after: None,
        }
    }

    /// Denial for an account still cooling down.
    pub fn cooldown(retry_after: Option<RetryAfter>) -> Self {
        Self {
            reason: DenialReason::CooldownActive,
            retry_after,
        }
    }
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.retry_after {
            Some(retry) => write!(f, "{} (next draw in {retry})", self.reason),
            None => write!(f, "{}", self.reason),
        }
    }
}

/// Result of asking for a draw.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOutcome {
    /// The draw is open; choose one of these.
    Allowed {
        /// Distinct candidate cards in presentation order.
        candidates: Vec<CatalogItem>,
    },
    /// The draw is refused.
    Denied(Denial),
}

/// Result of confirming a chosen card.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfirmOutcome {
    /// The choice was recorded and the gate closed.
    Recorded(CollectionEntry),
    /// The draw was refused on re-validation; nothing was written.
    Denied(Denial),
}

/// A collection entry joined with the card it refers to.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectedCard {
    /// The collection entry.
    pub entry: CollectionEntry,
    /// The drawn card.
    pub item: CatalogItem,
}

/// Subscription and gate state of an account, for profile screens.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountStatus {
    /// The entitlement verdict.
    pub entitlement: Entitlement,
    /// Last successful draw.
    pub last_access_at: Option<DateTime<Utc>>,
    /// When the next draw opens, for a subscribed account that has drawn.
    pub next_draw_at: Option<DateTime<Utc>>,
    /// Time left in the cooldown, if cooling down.
    pub retry_after: Option<RetryAfter>,
    /// Whether a draw is possible right now.
    pub can_draw: bool,
}

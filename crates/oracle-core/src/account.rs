use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{OracleError, OracleResult};

/// Unique identifier for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// A paid subscription plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    /// Billed every calendar month.
    Monthly,
    /// Billed every calendar year.
    Yearly,
}

impl SubscriptionPlan {
    /// Human-readable label for profile screens.
    pub fn label(self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Yearly => "Yearly",
        }
    }

    /// Length of one billing period in calendar months.
    pub fn period(self) -> Months {
        match self {
            Self::Monthly => Months::new(1),
            Self::Yearly => Months::new(12),
        }
    }

    /// Expiry of a subscription to this plan activated at `from`.
    ///
    /// Month arithmetic clamps to the last day of shorter months, so a plan
    /// started on January 31st expires on the last day of February.
    pub fn expiry_from(self, from: DateTime<Utc>) -> OracleResult<DateTime<Utc>> {
        from.checked_add_months(self.period()).ok_or(OracleError::ExpiryOutOfRange)
    }
}

impl fmt::Display for SubscriptionPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

impl FromStr for SubscriptionPlan {
    type Err = OracleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(OracleError::UnknownPlan(other.to_string())),
        }
    }
}

/// A persisted account snapshot as read from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Account identifier.
    pub id: AccountId,
    /// Contact address shown on the profile.
    pub email: String,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
    /// Flag set by billing when a subscription is activated.
    pub subscription_active: bool,
    /// The plan the account is subscribed to, if any.
    pub subscription_plan: Option<SubscriptionPlan>,
    /// End of the paid period. `None` means no expiry is tracked.
    pub subscription_expires_at: Option<DateTime<Utc>>,
    /// Instant of the last successful gated draw.
    pub last_access_at: Option<DateTime<Utc>>,
}

impl Account {
    /// Create an unsubscribed account that has never drawn.
    pub fn new(email: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id: AccountId::new(),
            email: email.into(),
            created_at,
            subscription_active: false,
            subscription_plan: None,
            subscription_expires_at: None,
            last_access_at: None,
        }
    }

    /// Mark the account as subscribed to `plan` until `expires_at`.
    pub fn with_subscription(
        mut self,
        plan: SubscriptionPlan,
        expires_at: Option<DateTime<Utc>>,
    ) -> Self {
        self.subscription_active = true;
        self.subscription_plan = Some(plan);
        self.subscription_expires_at = expires_at;
        self
    }

    /// Set the last access instant.
    pub fn with_last_access(mut self, at: DateTime<Utc>) -> Self {
        self.last_access_at = Some(at);
        self
    }
}

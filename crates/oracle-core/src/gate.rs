//! The daily access gate.
//!
//! The gate is a rolling window: after a successful draw at `t`, the next
//! draw opens at `t + cooldown` (24 hours by default). It does not reset at
//! midnight.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

use crate::entitlement::Entitlement;

/// Time left before the gate reopens, for display.
///
/// Always at least one whole minute: a denial never reads as "0h 0m".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryAfter {
    remaining: Duration,
}

impl RetryAfter {
    /// Wrap the exact time left before the gate reopens.
    pub fn from_remaining(remaining: Duration) -> Self {
        Self { remaining }
    }

    /// The exact remaining duration.
    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    /// Whole minutes left, never less than one.
    pub fn total_minutes(&self) -> i64 {
        self.remaining.num_minutes().max(1)
    }

    /// The hours component of the display value.
    pub fn hours(&self) -> i64 {
        self.total_minutes() / 60
    }

    /// The minutes component of the display value.
    pub fn minutes(&self) -> i64 {
        self.total_minutes() % 60
    }
}

impl fmt::Display for RetryAfter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}h {}m", self.hours(), self.minutes())
    }
}

/// Outcome of a gate check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateDecision {
    /// Whether a draw may happen now.
    pub allowed: bool,
    /// Time left when the gate is cooling down. `None` when allowed or when
    /// the account is not subscribed.
    pub retry_after: Option<RetryAfter>,
    /// When the gate opens (or opened) for a subscribed account that has
    /// drawn before.
    pub next_eligible_at: Option<DateTime<Utc>>,
}

/// Shortest accepted cooldown, in minutes.
pub const MIN_COOLDOWN_MINUTES: i64 = 1;

/// Longest accepted cooldown, in minutes: one leap year.
pub const MAX_COOLDOWN_MINUTES: i64 = 366 * 24 * 60;

/// The rolling-window gate limiting draws to one per cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DailyAccessGate {
    cooldown: Duration,
}

impl Default for DailyAccessGate {
    fn default() -> Self {
        Self::new(Duration::hours(24))
    }
}

impl DailyAccessGate {
    /// Create a gate with the given cooldown, clamped to between one
    /// minute and one leap year.
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown: cooldown.clamp(
                Duration::minutes(MIN_COOLDOWN_MINUTES),
                Duration::minutes(MAX_COOLDOWN_MINUTES),
            ),
        }
    }

    /// The configured cooldown.
    pub fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// The instant a draw becomes possible again after `last_access_at`,
    /// or `None` when that instant is past the representable range.
    pub fn next_eligible_at(&self, last_access_at: DateTime<Utc>) -> Option<DateTime<Utc>> {
        last_access_at.checked_add_signed(self.cooldown)
    }

    /// Decide whether a draw is allowed at `now`.
    pub fn can_access(
        &self,
        entitlement: &Entitlement,
        last_access_at: Option<DateTime<Utc>>,
        now: DateTime<Utc>,
    ) -> GateDecision {
        if !entitlement.subscribed {
            return GateDecision {
                allowed: false,
                retry_after: None,
                next_eligible_at: None,
            };
        }

        let Some(last) = last_access_at else {
            return GateDecision {
                allowed: true,
                retry_after: None,
                next_eligible_at: None,
            };
        };

        let Some(next) = self.next_eligible_at(last) else {
            // The gate never reopens within the representable range.
            return GateDecision {
                allowed: false,
                retry_after: Some(RetryAfter::from_remaining(
                    DateTime::<Utc>::MAX_UTC.signed_duration_since(now),
                )),
                next_eligible_at: None,
            };
        };

        if now >= next {
            GateDecision {
                allowed: true,
                retry_after: None,
                next_eligible_at: Some(next),
            }
        } else {
            GateDecision {
                allowed: false,
                retry_after: Some(RetryAfter::from_remaining(next - now)),
                next_eligible_at: Some(next),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::entitlement::SubscriptionState;

    fn subscribed() -> Entitlement {
        Entitlement {
            subscribed: true,
            plan: None,
            expires_at: None,
            state: SubscriptionState::Active,
        }
    }

    fn unsubscribed() -> Entitlement {
        Entitlement {
            subscribed: false,
            plan: None,
            expires_at: None,
            state: SubscriptionState::Unsubscribed,
        }
    }

    #[test]
    fn first_draw_is_allowed() {
        let d = DailyAccessGate::default().can_access(&subscribed(), None, Utc::now());
        assert!(d.allowed);
        assert!(d.retry_after.is_none());
    }

    #[test]
    fn unsubscribed_has_no_cooldown() {
        let now = Utc::now();
        let gate = DailyAccessGate::default();
        let d = gate.can_access(&unsubscribed(), Some(now - Duration::hours(1)), now);
        assert!(!d.allowed);
        assert!(d.retry_after.is_none());
        let d = gate.can_access(&unsubscribed(), None, now);
        assert!(!d.allowed);
        assert!(d.retry_after.is_none());
    }

    #[test]
    fn one_minute_short_of_a_day_is_denied() {
        let now = Utc::now();
        let last = now - (Duration::hours(23) + Duration::minutes(59));
        let d = DailyAccessGate::default().can_access(&subscribed(), Some(last), now);
        assert!(!d.allowed);
        let retry = d.retry_after.unwrap();
        assert_eq!(retry.total_minutes(), 1);
        assert_eq!(retry.to_string(), "0h 1m");
    }

    #[test]
    fn one_minute_past_a_day_is_allowed() {
        let now = Utc::now();
        let last = now - (Duration::hours(24) + Duration::minutes(1));
        let d = DailyAccessGate::default().can_access(&subscribed(), Some(last), now);
        assert!(d.allowed);
        assert!(d.retry_after.is_none());
    }

    #[test]
    fn exactly_a_day_is_allowed() {
        let now = Utc::now();
        let d = DailyAccessGate::default().can_access(
            &subscribed(),
            Some(now - Duration::hours(24)),
            now,
        );
        assert!(d.allowed);
        assert_eq!(d.next_eligible_at, Some(now));
    }

    #[test]
    fn window_is_rolling_not_midnight() {
        use chrono::TimeZone;
        // Drew late in the evening; just after midnight is still a cooldown.
        let last = Utc.with_ymd_and_hms(2025, 3, 10, 23, 30, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2025, 3, 11, 0, 30, 0).unwrap();
        let d = DailyAccessGate::default().can_access(&subscribed(), Some(last), now);
        assert!(!d.allowed);
        assert_eq!(d.retry_after.unwrap().to_string(), "23h 0m");
    }

    #[test]
    fn seconds_left_still_show_one_minute() {
        let now = Utc::now();
        let last = now - Duration::hours(24) + Duration::seconds(5);
        let d = DailyAccessGate::default().can_access(&subscribed(), Some(last), now);
        assert!(!d.allowed);
        assert_eq!(d.retry_after.unwrap().to_string(), "0h 1m");
    }

    #[test]
    fn custom_cooldown() {
        let now = Utc::now();
        let gate = DailyAccessGate::new(Duration::hours(1));
        assert_eq!(gate.cooldown(), Duration::hours(1));
        let d = gate.can_access(&subscribed(), Some(now - Duration::minutes(30)), now);
        assert_eq!(d.retry_after.unwrap().to_string(), "0h 30m");
    }

    #[test]
    fn cooldown_is_clamped() {
        assert_eq!(
            DailyAccessGate::new(Duration::days(200_000_000)).cooldown(),
            Duration::days(366)
        );
        assert_eq!(
            DailyAccessGate::new(Duration::seconds(5)).cooldown(),
            Duration::minutes(1)
        );
        assert_eq!(
            DailyAccessGate::new(-Duration::hours(3)).cooldown(),
            Duration::minutes(1)
        );
    }

    #[test]
    fn huge_cooldown_does_not_overflow() {
        let now = Utc::now();
        let gate = DailyAccessGate::new(Duration::days(200_000_000));
        let d = gate.can_access(&subscribed(), Some(now), now);
        assert!(!d.allowed);
        assert_eq!(d.next_eligible_at, Some(now + Duration::days(366)));
    }

    #[test]
    fn last_access_near_end_of_time_is_denied() {
        let now = Utc::now();
        let last = DateTime::<Utc>::MAX_UTC - Duration::hours(1);
        let d = DailyAccessGate::default().can_access(&subscribed(), Some(last), now);
        assert!(!d.allowed);
        assert!(d.next_eligible_at.is_none());
        let retry = d.retry_after.unwrap();
        assert!(retry.remaining() > Duration::days(365 * 1000));
        assert!(retry.total_minutes() >= 1);
    }

    proptest! {
        #[test]
        fn denial_always_has_positive_retry(elapsed_secs in 0i64..86_400) {
            let now = Utc::now();
            let last = now - Duration::seconds(elapsed_secs);
            let d = DailyAccessGate::default().can_access(&subscribed(), Some(last), now);
            prop_assert!(!d.allowed);
            let retry = d.retry_after.unwrap();
            prop_assert!(retry.total_minutes() >= 1);
            prop_assert!(retry.remaining() > Duration::zero());
        }

        #[test]
        fn past_cooldown_always_allowed(extra_secs in 0i64..10_000_000) {
            let now = Utc::now();
            let last = now - Duration::hours(24) - Duration::seconds(extra_secs);
            let d = DailyAccessGate::default().can_access(&subscribed(), Some(last), now);
            prop_assert!(d.allowed);
        }
    }
}

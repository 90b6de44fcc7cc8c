//! Orchestration of entitlement, gating, draws, and recording.

use chrono::{DateTime, Utc};
use oracle_core::{
    Account, AccountId, CollectionEntry, DailyAccessGate, Entitlement, GateDecision, ItemId,
    OracleConfig, SubscriptionPlan, draw, evaluate, sample_catalog,
};
use oracle_store::Store;
use rand::Rng;

use crate::error::{ServiceError, ServiceResult};
use crate::outcome::{AccountStatus, CollectedCard, ConfirmOutcome, Denial, DrawOutcome};
use crate::recorder::CollectionRecorder;

/// Entitlement and daily-draw gating over a [`Store`].
///
/// Each method takes `now` from the caller, who should capture it once per
/// request. Nothing is cached between calls.
pub struct EntitlementService<S: Store> {
    store: S,
    config: OracleConfig,
    gate: DailyAccessGate,
}

impl<S: Store> EntitlementService<S> {
    /// Create a service over `store`.
    pub fn new(store: S, config: OracleConfig) -> Self {
        let gate = config.gate();
        Self {
            store,
            config,
            gate,
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn recorder(&self) -> CollectionRecorder<'_, S> {
        CollectionRecorder::new(&self.store)
    }

    /// Verdict for a freshly loaded account: the gate decision when a draw
    /// is open, the denial otherwise.
    fn check(
        &self,
        account: &Account,
        now: DateTime<Utc>,
    ) -> (Entitlement, GateDecision, Option<Denial>) {
        let entitlement = evaluate(account, now);
        let decision = self.gate.can_access(&entitlement, account.last_access_at, now);
        let denial = if !entitlement.subscribed {
            Some(Denial::subscription_required())
        } else if !decision.allowed {
            Some(Denial::cooldown(decision.retry_after))
        } else {
            None
        };
        tracing::debug!(
            account = %account.id,
            state = %entitlement.state,
            allowed = decision.allowed,
            "evaluated draw access"
        );
        (entitlement, decision, denial)
    }

    fn load(&self, account_id: AccountId) -> ServiceResult<Account> {
        self.store.get_account(account_id).map_err(|err| {
            tracing::warn!(account = %account_id, error = %err, "account load failed");
            ServiceError::from(err)
        })
    }

    /// Register a new unsubscribed account.
    pub fn register_account(
        &self,
        email: impl Into<String>,
        now: DateTime<Utc>,
    ) -> ServiceResult<Account> {
        let account = Account::new(email, now);
        self.store.insert_account(account.clone())?;
        tracing::info!(account = %account.id, "account registered");
        Ok(account)
    }

    /// Activate `plan` for the account, starting at `now`.
    ///
    /// This stands in for a payment provider: it only sets the subscription
    /// fields, with the expiry one billing period from `now`.
    pub fn activate_subscription(
        &self,
        account_id: AccountId,
        plan: SubscriptionPlan,
        now: DateTime<Utc>,
    ) -> ServiceResult<Account> {
        let expires_at = plan.expiry_from(now)?;
        let account = self
            .store
            .update_subscription(account_id, true, Some(plan), Some(expires_at))?;
        tracing::info!(account = %account_id, %plan, %expires_at, "subscription activated");
        Ok(account)
    }

    /// Seed the stock deck when the catalog is empty. Returns the number of
    /// items inserted.
    pub fn ensure_catalog_seeded(&self, now: DateTime<Utc>) -> ServiceResult<usize> {
        if !self.store.list_catalog()?.is_empty() {
            return Ok(0);
        }
        let inserted = self.store.insert_catalog_items(sample_catalog(now))?;
        tracing::info!(inserted, "seeded empty catalog");
        Ok(inserted)
    }

    /// Ask whether the account may draw now and, if so, offer candidates.
    ///
    /// Offering candidates writes nothing; only
    /// [`confirm_selection`](Self::confirm_selection) closes the gate.
    pub fn request_draw<R: Rng + ?Sized>(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> ServiceResult<DrawOutcome> {
        let account = self.load(account_id)?;
        if let (_, _, Some(denial)) = self.check(&account, now) {
            return Ok(DrawOutcome::Denied(denial));
        }

        let catalog = self.store.list_catalog()?;
        let candidates = draw(&catalog, self.config.draw_size, rng).map_err(|err| {
            tracing::warn!(error = %err, "draw failed");
            ServiceError::from(err)
        })?;
        Ok(DrawOutcome::Allowed { candidates })
    }

    /// Record the account's chosen card and close the gate.
    ///
    /// Entitlement and gate are re-checked against a freshly loaded account.
    /// The stamp and the append are committed atomically, conditional on the
    /// last access seen here; a concurrent draw that got there first yields
    /// [`ServiceError::Conflict`].
    pub fn confirm_selection(
        &self,
        account_id: AccountId,
        item_id: ItemId,
        now: DateTime<Utc>,
    ) -> ServiceResult<ConfirmOutcome> {
        let account = self.load(account_id)?;
        if let (_, _, Some(denial)) = self.check(&account, now) {
            return Ok(ConfirmOutcome::Denied(denial));
        }

        if !self.store.list_catalog()?.iter().any(|item| item.id == item_id) {
            return Err(ServiceError::UnknownItem(item_id));
        }

        match self
            .recorder()
            .record_draw(account.last_access_at, account_id, item_id, now)
        {
            Ok(entry) => {
                tracing::info!(account = %account_id, item = %item_id, "draw recorded");
                Ok(ConfirmOutcome::Recorded(entry))
            }
            Err(err) => {
                tracing::warn!(account = %account_id, error = %err, "draw commit failed");
                Err(err.into())
            }
        }
    }

    /// The account's collection, newest first.
    pub fn get_collection(&self, account_id: AccountId) -> ServiceResult<Vec<CollectionEntry>> {
        Ok(self.recorder().list(account_id)?)
    }

    /// The account's collection joined with card details, newest first.
    pub fn get_collection_cards(
        &self,
        account_id: AccountId,
    ) -> ServiceResult<Vec<CollectedCard>> {
        let entries = self.get_collection(account_id)?;
        let catalog = self.store.list_catalog()?;
        entries
            .into_iter()
            .map(|entry| {
                let item = catalog
                    .iter()
                    .find(|item| item.id == entry.item_id)
                    .cloned()
                    .ok_or(ServiceError::UnknownItem(entry.item_id))?;
                Ok(CollectedCard { entry, item })
            })
            .collect()
    }

    /// Subscription and gate state for the account at `now`.
    pub fn account_status(
        &self,
        account_id: AccountId,
        now: DateTime<Utc>,
    ) -> ServiceResult<AccountStatus> {
        let account = self.load(account_id)?;
        let (entitlement, decision, denial) = self.check(&account, now);
        Ok(AccountStatus {
            entitlement,
            last_access_at: account.last_access_at,
            next_draw_at: decision.next_eligible_at,
            retry_after: decision.retry_after,
            can_draw: denial.is_none(),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use oracle_store::MemoryStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::outcome::DenialReason;

    fn service() -> EntitlementService<MemoryStore> {
        EntitlementService::new(MemoryStore::new(), OracleConfig::default())
    }

    #[test]
    fn seeding_only_fills_an_empty_catalog() {
        let svc = service();
        let now = Utc::now();
        assert_eq!(svc.ensure_catalog_seeded(now).unwrap(), 6);
        assert_eq!(svc.ensure_catalog_seeded(now).unwrap(), 0);
        assert_eq!(svc.store().list_catalog().unwrap().len(), 6);
    }

    #[test]
    fn activation_sets_plan_and_expiry() {
        let svc = service();
        let now = Utc::now();
        let account = svc.register_account("seer@example.com", now).unwrap();
        let updated = svc
            .activate_subscription(account.id, SubscriptionPlan::Yearly, now)
            .unwrap();
        assert!(updated.subscription_active);
        assert_eq!(updated.subscription_plan, Some(SubscriptionPlan::Yearly));
        assert!(updated.subscription_expires_at.unwrap() > now + Duration::days(364));
    }

    #[test]
    fn status_of_fresh_subscriber() {
        let svc = service();
        let now = Utc::now();
        let account = svc.register_account("seer@example.com", now).unwrap();
        svc.activate_subscription(account.id, SubscriptionPlan::Monthly, now)
            .unwrap();
        let status = svc.account_status(account.id, now).unwrap();
        assert!(status.can_draw);
        assert!(status.entitlement.subscribed);
        assert!(status.next_draw_at.is_none());
        assert!(status.retry_after.is_none());
    }

    #[test]
    fn status_while_cooling_down() {
        let svc = service();
        let now = Utc::now();
        svc.ensure_catalog_seeded(now).unwrap();
        let account = svc.register_account("seer@example.com", now).unwrap();
        svc.activate_subscription(account.id, SubscriptionPlan::Monthly, now)
            .unwrap();
        let item = svc.store().list_catalog().unwrap()[0].id;
        svc.confirm_selection(account.id, item, now).unwrap();

        let later = now + Duration::hours(6);
        let status = svc.account_status(account.id, later).unwrap();
        assert!(!status.can_draw);
        assert_eq!(status.last_access_at, Some(now));
        assert_eq!(status.next_draw_at, Some(now + Duration::hours(24)));
        assert_eq!(status.retry_after.unwrap().to_string(), "18h 0m");
    }

    #[test]
    fn unknown_account_is_an_error_not_a_denial() {
        let svc = service();
        let mut rng = StdRng::seed_from_u64(1);
        let missing = AccountId::new();
        assert!(matches!(
            svc.request_draw(missing, Utc::now(), &mut rng),
            Err(ServiceError::AccountNotFound(id)) if id == missing
        ));
    }

    #[test]
    fn unsubscribed_denial_has_no_retry() {
        let svc = service();
        let now = Utc::now();
        let account = svc.register_account("seer@example.com", now).unwrap();
        let outcome = svc
            .request_draw(account.id, now, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let denial = match outcome {
            DrawOutcome::Denied(denial) => denial,
            other => panic!("expected denial, got {other:?}"),
        };
        assert_eq!(denial.reason, DenialReason::SubscriptionRequired);
        assert!(denial.retry_after.is_none());
        assert_eq!(denial.to_string(), "subscription required");
    }
}

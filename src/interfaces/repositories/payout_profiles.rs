use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::payout_profile::PayoutProfile;
use crate::middleware::error::AppError;

#[async_trait]
pub trait PayoutProfilesInterface {
    /// Profiles whose stored connected-account id matches. Fallback path for
    /// `account.updated` events whose metadata carries no profile id.
    async fn find_by_account_id(&self, account_id: &str) -> Result<Vec<PayoutProfile>, AppError>;

    /// Stores the connected-account id and the recomputed setup-complete flag.
    async fn save_account_state(
        &self,
        profile_id: &str,
        account_id: &str,
        setup_complete: bool,
    ) -> Result<(), AppError>;

    /// Sets the onboarding-started timestamp only if it is currently unset.
    /// Returns whether the write took effect.
    async fn mark_onboarding_started(
        &self,
        profile_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError>;

    /// Sets the setup-completed timestamp only if it is currently unset.
    /// Returns whether the write took effect - the caller fires the
    /// setup-complete notification exactly when it did.
    async fn mark_setup_completed(
        &self,
        profile_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError>;
}

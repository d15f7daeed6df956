use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;

use crate::database::data_api::{eq, DataApiClient, IS_NULL};
use crate::entities::payout_profile::PayoutProfile;
use crate::interfaces::repositories::payout_profiles::PayoutProfilesInterface;
use crate::middleware::error::AppError;

pub const TABLE_NAME: &str = "profiles";

pub struct PayoutProfilesRepository {
    api: Arc<DataApiClient>,
}

impl PayoutProfilesRepository {
    pub fn new(api: Arc<DataApiClient>) -> Self {
        Self { api }
    }

    /// Guarded timestamp write: matches only while the column is still null,
    /// so concurrent redeliveries cannot both observe the write taking effect.
    async fn mark_once(
        &self,
        profile_id: &str,
        column: &'static str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let rows: Vec<PayoutProfile> = self
            .api
            .update(
                TABLE_NAME,
                &[("id", eq(profile_id)), (column, IS_NULL.to_string())],
                json!({ column: at.to_rfc3339() }),
            )
            .await?;
        Ok(!rows.is_empty())
    }
}

#[async_trait]
impl PayoutProfilesInterface for PayoutProfilesRepository {
    async fn find_by_account_id(&self, account_id: &str) -> Result<Vec<PayoutProfile>, AppError> {
        self.api
            .select(TABLE_NAME, &[("stripe_account_id", eq(account_id))])
            .await
    }

    async fn save_account_state(
        &self,
        profile_id: &str,
        account_id: &str,
        setup_complete: bool,
    ) -> Result<(), AppError> {
        let _: Vec<PayoutProfile> = self
            .api
            .update(
                TABLE_NAME,
                &[("id", eq(profile_id))],
                json!({
                    "stripe_account_id": account_id,
                    "stripe_setup_complete": setup_complete,
                }),
            )
            .await?;
        Ok(())
    }

    async fn mark_onboarding_started(
        &self,
        profile_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        self.mark_once(profile_id, "stripe_onboarding_started_at", at)
            .await
    }

    async fn mark_setup_completed(
        &self,
        profile_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        self.mark_once(profile_id, "stripe_setup_completed_at", at)
            .await
    }
}

use chrono::Utc;
use serde_json::json;

use crate::middleware::error::AppResult;
use crate::middleware::mw_ctx::CtxState;
use crate::services::notification_service::spawn_notify;
use crate::utils::stripe::webhook::event::{CheckoutSession, ConnectAccount, HookEvent};

const METADATA_TYPE_TIP: &str = "tip";
const METADATA_TYPE_QR_PURCHASE: &str = "qr_code_purchase";

/// Applies a verified Stripe event to the platform's records. Stripe delivers
/// at least once and out of order, so every branch must tolerate re-delivery:
/// the checkout mutations are plain field sets keyed by session id, and the
/// onboarding timestamps go through conditional writes.
pub struct StripeEventService<'a> {
    state: &'a CtxState,
}

impl<'a> StripeEventService<'a> {
    pub fn new(state: &'a CtxState) -> Self {
        Self { state }
    }

    pub async fn handle(&self, event: HookEvent) -> AppResult<()> {
        match event {
            HookEvent::CheckoutSessionCompleted(data) => {
                self.on_checkout_completed(data.object).await
            }
            HookEvent::AccountUpdated(data) => self.on_account_updated(data.object).await,
            HookEvent::Unknown => {
                // Stripe's event vocabulary grows; unknown types are
                // acknowledged so the delivery is not retried forever.
                tracing::info!("ignoring unrecognized webhook event type");
                Ok(())
            }
        }
    }

    async fn on_checkout_completed(&self, session: CheckoutSession) -> AppResult<()> {
        match session.metadata.get("type").map(String::as_str) {
            Some(METADATA_TYPE_TIP) => self.complete_tip(session).await,
            Some(METADATA_TYPE_QR_PURCHASE) => self.activate_qr_purchase(session).await,
            other => {
                tracing::info!(
                    session_id = %session.id,
                    metadata_type = ?other,
                    "checkout session without a recognized metadata type"
                );
                Ok(())
            }
        }
    }

    async fn complete_tip(&self, session: CheckoutSession) -> AppResult<()> {
        let updated = self
            .state
            .tips
            .complete_by_session(&session.id, session.customer_email.as_deref())
            .await?;

        match updated {
            Some(tip) => {
                tracing::info!(session_id = %session.id, tip_id = %tip.id, "tip completed");
                spawn_notify(
                    self.state.notifier.clone(),
                    "tip_received",
                    tip.author_id.clone(),
                    json!({
                        "tip_id": tip.id,
                        "amount": tip.amount,
                        "message": tip.message,
                        "book_title": tip.book_title,
                    }),
                );
            }
            None => {
                tracing::warn!(session_id = %session.id, "no tip matches checkout session");
            }
        }
        Ok(())
    }

    async fn activate_qr_purchase(&self, session: CheckoutSession) -> AppResult<()> {
        let Some(purchase_id) = session.metadata.get("qr_code_id") else {
            tracing::warn!(
                session_id = %session.id,
                "qr purchase session without qr_code_id metadata"
            );
            return Ok(());
        };

        let updated = self
            .state
            .qr_purchases
            .activate(purchase_id, &session.id)
            .await?;

        match updated {
            Some(purchase) => {
                tracing::info!(
                    session_id = %session.id,
                    purchase_id = %purchase.id,
                    "qr code purchase activated"
                );
                spawn_notify(
                    self.state.notifier.clone(),
                    "qr_code_purchased",
                    purchase.author_id.clone(),
                    json!({
                        "qr_code_id": purchase.id,
                        "book_title": purchase.book_title,
                    }),
                );
            }
            None => {
                tracing::warn!(
                    session_id = %session.id,
                    %purchase_id,
                    "no qr purchase matches metadata id"
                );
            }
        }
        Ok(())
    }

    async fn on_account_updated(&self, account: ConnectAccount) -> AppResult<()> {
        let profile_ids: Vec<String> = match account.metadata.get("profile_id") {
            Some(id) => vec![id.clone()],
            None => self
                .state
                .payout_profiles
                .find_by_account_id(&account.id)
                .await?
                .into_iter()
                .map(|p| p.id)
                .collect(),
        };

        if profile_ids.is_empty() {
            tracing::warn!(account_id = %account.id, "no profile linked to account");
            return Ok(());
        }

        let started = account.onboarding_started();
        let completed = account.onboarding_completed();
        let now = Utc::now();

        for profile_id in profile_ids {
            self.state
                .payout_profiles
                .save_account_state(&profile_id, &account.id, completed)
                .await?;

            if started {
                self.state
                    .payout_profiles
                    .mark_onboarding_started(&profile_id, now)
                    .await?;
            }

            if completed {
                let newly_completed = self
                    .state
                    .payout_profiles
                    .mark_setup_completed(&profile_id, now)
                    .await?;

                // The conditional write took effect exactly once per profile,
                // which is also how often the notification fires.
                if newly_completed {
                    tracing::info!(
                        account_id = %account.id,
                        %profile_id,
                        "payout account setup completed"
                    );
                    spawn_notify(
                        self.state.notifier.clone(),
                        "setup_complete",
                        profile_id.clone(),
                        json!({ "stripe_account_id": account.id }),
                    );
                }
            }
        }
        Ok(())
    }
}

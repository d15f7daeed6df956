use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::{HeaderName, HeaderValue};
use axum_test::{TestResponse, TestServer};
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde_json::Value;
use sha2::Sha256;

use quilltips_server::entities::payout_profile::PayoutProfile;
use quilltips_server::entities::qr_purchase::QrPurchase;
use quilltips_server::entities::tip::Tip;
use quilltips_server::init::main_router;
use quilltips_server::interfaces::notify::NotifyInterface;
use quilltips_server::interfaces::repositories::payout_profiles::PayoutProfilesInterface;
use quilltips_server::interfaces::repositories::qr_purchases::QrPurchasesInterface;
use quilltips_server::interfaces::repositories::tips::TipsInterface;
use quilltips_server::middleware::error::AppError;
use quilltips_server::middleware::mw_ctx::CtxState;

pub const TEST_WH_SECRET: &str = "whsec_test123secret456";

pub struct MockTips {
    pub rows: Mutex<Vec<Tip>>,
    pub calls: Mutex<Vec<(String, Option<String>)>>,
    pub fail_with: Option<String>,
}

impl MockTips {
    pub fn seeded() -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(vec![Tip {
                id: "tip_1".to_string(),
                author_id: "author_1".to_string(),
                status: "pending".to_string(),
                amount: Some(5.0),
                message: Some("loved the book".to_string()),
                reader_email: None,
                book_title: Some("My Book".to_string()),
                stripe_session_id: Some("sess_1".to_string()),
            }]),
            calls: Mutex::new(vec![]),
            fail_with: None,
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(vec![]),
            calls: Mutex::new(vec![]),
            fail_with: Some(message.to_string()),
        })
    }
}

#[async_trait]
impl TipsInterface for MockTips {
    async fn complete_by_session(
        &self,
        session_id: &str,
        reader_email: Option<&str>,
    ) -> Result<Option<Tip>, AppError> {
        if let Some(message) = &self.fail_with {
            return Err(AppError::DataApi {
                source: message.clone(),
            });
        }
        self.calls
            .lock()
            .unwrap()
            .push((session_id.to_string(), reader_email.map(str::to_string)));

        let mut rows = self.rows.lock().unwrap();
        let tip = rows
            .iter_mut()
            .find(|t| t.stripe_session_id.as_deref() == Some(session_id));
        Ok(tip.map(|t| {
            t.status = "complete".to_string();
            if let Some(email) = reader_email {
                t.reader_email = Some(email.to_string());
            }
            t.clone()
        }))
    }
}

pub struct MockQrPurchases {
    pub rows: Mutex<Vec<QrPurchase>>,
    pub calls: Mutex<Vec<(String, String)>>,
}

impl MockQrPurchases {
    pub fn seeded() -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(vec![QrPurchase {
                id: "qr_1".to_string(),
                author_id: "author_1".to_string(),
                qr_code_status: "pending".to_string(),
                is_paid: false,
                book_title: Some("My Book".to_string()),
                stripe_session_id: None,
            }]),
            calls: Mutex::new(vec![]),
        })
    }
}

#[async_trait]
impl QrPurchasesInterface for MockQrPurchases {
    async fn activate(
        &self,
        purchase_id: &str,
        session_id: &str,
    ) -> Result<Option<QrPurchase>, AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((purchase_id.to_string(), session_id.to_string()));

        let mut rows = self.rows.lock().unwrap();
        let purchase = rows.iter_mut().find(|p| p.id == purchase_id);
        Ok(purchase.map(|p| {
            p.qr_code_status = "active".to_string();
            p.is_paid = true;
            p.stripe_session_id = Some(session_id.to_string());
            p.clone()
        }))
    }
}

pub struct MockPayoutProfiles {
    pub rows: Mutex<Vec<PayoutProfile>>,
}

impl MockPayoutProfiles {
    pub fn seeded() -> Arc<Self> {
        Arc::new(Self {
            rows: Mutex::new(vec![PayoutProfile {
                id: "profile_1".to_string(),
                stripe_account_id: Some("acct_1".to_string()),
                stripe_setup_complete: false,
                stripe_onboarding_started_at: None,
                stripe_setup_completed_at: None,
            }]),
        })
    }

    pub fn get(&self, profile_id: &str) -> Option<PayoutProfile> {
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == profile_id)
            .cloned()
    }
}

#[async_trait]
impl PayoutProfilesInterface for MockPayoutProfiles {
    async fn find_by_account_id(&self, account_id: &str) -> Result<Vec<PayoutProfile>, AppError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.stripe_account_id.as_deref() == Some(account_id))
            .cloned()
            .collect())
    }

    async fn save_account_state(
        &self,
        profile_id: &str,
        account_id: &str,
        setup_complete: bool,
    ) -> Result<(), AppError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(profile) = rows.iter_mut().find(|p| p.id == profile_id) {
            profile.stripe_account_id = Some(account_id.to_string());
            profile.stripe_setup_complete = setup_complete;
        }
        Ok(())
    }

    async fn mark_onboarding_started(
        &self,
        profile_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|p| p.id == profile_id && p.stripe_onboarding_started_at.is_none())
        {
            Some(profile) => {
                profile.stripe_onboarding_started_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn mark_setup_completed(
        &self,
        profile_id: &str,
        at: DateTime<Utc>,
    ) -> Result<bool, AppError> {
        let mut rows = self.rows.lock().unwrap();
        match rows
            .iter_mut()
            .find(|p| p.id == profile_id && p.stripe_setup_completed_at.is_none())
        {
            Some(profile) => {
                profile.stripe_setup_completed_at = Some(at);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub calls: Mutex<Vec<(String, String, Value)>>,
}

#[async_trait]
impl NotifyInterface for MockNotifier {
    async fn notify(&self, event_type: &str, user_id: &str, data: Value) -> Result<(), AppError> {
        self.calls
            .lock()
            .unwrap()
            .push((event_type.to_string(), user_id.to_string(), data));
        Ok(())
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub tips: Arc<MockTips>,
    pub qr_purchases: Arc<MockQrPurchases>,
    pub payout_profiles: Arc<MockPayoutProfiles>,
    pub notifier: Arc<MockNotifier>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_tips(MockTips::seeded())
    }

    pub fn with_tips(tips: Arc<MockTips>) -> Self {
        let qr_purchases = MockQrPurchases::seeded();
        let payout_profiles = MockPayoutProfiles::seeded();
        let notifier = Arc::new(MockNotifier::default());

        let ctx_state = Arc::new(CtxState {
            is_development: true,
            stripe_wh_secret: TEST_WH_SECRET.to_string(),
            stripe_wh_tolerance_secs: 300,
            tips: tips.clone(),
            qr_purchases: qr_purchases.clone(),
            payout_profiles: payout_profiles.clone(),
            notifier: notifier.clone(),
        });

        let server = TestServer::new(main_router(&ctx_state)).unwrap();
        Self {
            server,
            tips,
            qr_purchases,
            payout_profiles,
            notifier,
        }
    }

    pub async fn post_signed(&self, body: &str) -> TestResponse {
        let timestamp = Utc::now().timestamp();
        let header = format!(
            "t={},v1={}",
            timestamp,
            compute_signature(body, TEST_WH_SECRET, timestamp)
        );
        self.post_with_header(body, &header).await
    }

    pub async fn post_with_header(&self, body: &str, sig_header: &str) -> TestResponse {
        self.server
            .post("/webhooks/stripe")
            .add_header(
                HeaderName::from_static("stripe-signature"),
                HeaderValue::from_str(sig_header).unwrap(),
            )
            .text(body.to_string())
            .await
    }

    /// Polls the notifier's call log until at least `count` notifications
    /// arrived, with a bounded retry so a loaded runtime cannot fail the
    /// assertion spuriously. Returns whatever was logged by the deadline.
    pub async fn wait_for_notifications(&self, count: usize) -> Vec<(String, String, Value)> {
        for _ in 0..100 {
            {
                let calls = self.notifier.calls.lock().unwrap();
                if calls.len() >= count {
                    return calls.clone();
                }
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.notifier.calls.lock().unwrap().clone()
    }

    /// Lets any stray fire-and-forget task run before asserting that nothing
    /// was notified. Absence checks can only pass early, never fail early, so
    /// a fixed wait is safe here.
    pub async fn settle(&self) {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }
}

pub fn compute_signature(payload: &str, secret: &str, timestamp: i64) -> String {
    let signed_payload = format!("{}.{}", timestamp, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(signed_payload.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

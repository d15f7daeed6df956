use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use reqwest::Client;

use crate::config::AppConfig;
use crate::database::data_api::DataApiClient;
use crate::database::repositories::payout_profiles_repo::PayoutProfilesRepository;
use crate::database::repositories::qr_purchases_repo::QrPurchasesRepository;
use crate::database::repositories::tips_repo::TipsRepository;
use crate::interfaces::notify::NotifyInterface;
use crate::interfaces::repositories::payout_profiles::PayoutProfilesInterface;
use crate::interfaces::repositories::qr_purchases::QrPurchasesInterface;
use crate::interfaces::repositories::tips::TipsInterface;
use crate::services::notification_service::NotificationSender;

pub struct CtxState {
    pub is_development: bool,
    pub stripe_wh_secret: String,
    pub stripe_wh_tolerance_secs: i64,
    pub tips: Arc<dyn TipsInterface + Send + Sync>,
    pub qr_purchases: Arc<dyn QrPurchasesInterface + Send + Sync>,
    pub payout_profiles: Arc<dyn PayoutProfilesInterface + Send + Sync>,
    pub notifier: Arc<dyn NotifyInterface + Send + Sync>,
}

impl Debug for CtxState {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("CtxState")
    }
}

pub fn create_ctx_state(config: &AppConfig) -> Arc<CtxState> {
    let http = Client::new();
    let data_api = Arc::new(DataApiClient::new(
        http.clone(),
        &config.data_api_url,
        &config.data_api_service_key,
    ));

    let ctx_state = CtxState {
        is_development: config.is_development,
        stripe_wh_secret: config.stripe_wh_secret.clone(),
        stripe_wh_tolerance_secs: config.stripe_wh_tolerance_secs,
        tips: Arc::new(TipsRepository::new(data_api.clone())),
        qr_purchases: Arc::new(QrPurchasesRepository::new(data_api.clone())),
        payout_profiles: Arc::new(PayoutProfilesRepository::new(data_api)),
        notifier: Arc::new(NotificationSender::new(
            http,
            &config.notify_base_url,
            &config.notify_bearer_token,
        )),
    };
    Arc::new(ctx_state)
}

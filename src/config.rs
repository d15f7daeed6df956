use dotenvy;

#[derive(Debug)]
pub struct AppConfig {
    pub data_api_url: String,
    pub data_api_service_key: String,
    pub stripe_wh_secret: String,
    pub stripe_wh_tolerance_secs: i64,
    pub notify_base_url: String,
    pub notify_bearer_token: String,
    pub is_development: bool,
    pub sentry_project_link: Option<String>,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let data_api_url = std::env::var("DATA_API_URL").expect("Missing DATA_API_URL in env");
        let data_api_service_key =
            std::env::var("DATA_API_SERVICE_KEY").expect("Missing DATA_API_SERVICE_KEY in env");

        let stripe_wh_secret =
            std::env::var("STRIPE_WEBHOOK_SECRET").expect("Missing STRIPE_WEBHOOK_SECRET in env");

        let stripe_wh_tolerance_secs: i64 = std::env::var("STRIPE_WEBHOOK_TOLERANCE_SECS")
            .unwrap_or("300".to_string())
            .parse()
            .expect("STRIPE_WEBHOOK_TOLERANCE_SECS should be number");

        let notify_base_url =
            std::env::var("NOTIFY_BASE_URL").expect("Missing NOTIFY_BASE_URL in env");
        let notify_bearer_token =
            std::env::var("NOTIFY_BEARER_TOKEN").expect("Missing NOTIFY_BEARER_TOKEN in env");

        let is_development = std::env::var("DEVELOPMENT")
            .unwrap_or("false".to_string())
            .eq("true");

        let sentry_project_link = std::env::var("SENTRY_PROJECT_LINK").ok();

        let port: u16 = std::env::var("PORT")
            .unwrap_or("8080".to_string())
            .parse()
            .expect("PORT should be number");

        Self {
            data_api_url,
            data_api_service_key,
            stripe_wh_secret,
            stripe_wh_tolerance_secs,
            notify_base_url,
            notify_bearer_token,
            is_development,
            sentry_project_link,
            port,
        }
    }
}

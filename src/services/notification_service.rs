use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::interfaces::notify::NotifyInterface;
use crate::middleware::error::AppError;

/// Calls the internal notification endpoint over HTTP with bearer auth.
pub struct NotificationSender {
    http: Client,
    base_url: String,
    bearer_token: String,
}

impl NotificationSender {
    pub fn new(http: Client, base_url: &str, bearer_token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer_token: bearer_token.to_string(),
        }
    }
}

#[async_trait]
impl NotifyInterface for NotificationSender {
    async fn notify(&self, event_type: &str, user_id: &str, data: Value) -> Result<(), AppError> {
        let payload = serde_json::json!({
            "type": event_type,
            "userId": user_id,
            "data": data,
        });

        let response = self
            .http
            .post(format!("{}/notify", self.base_url))
            .bearer_auth(&self.bearer_token)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AppError::Notify {
                source: e.to_string(),
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::Notify {
                source: response.text().await.unwrap_or_default(),
            })
        }
    }
}

/// Fire-and-forget trigger. Webhook handlers must acknowledge the delivery
/// even when the notification side channel is down, so the call runs on its
/// own task and failures only reach the logs.
pub fn spawn_notify(
    notifier: Arc<dyn NotifyInterface + Send + Sync>,
    event_type: &'static str,
    user_id: String,
    data: Value,
) {
    tokio::spawn(async move {
        if let Err(err) = notifier.notify(event_type, &user_id, data).await {
            tracing::warn!(event_type, %user_id, %err, "notification trigger failed");
        }
    });
}

use async_trait::async_trait;
use serde_json::Value;

use crate::middleware::error::AppError;

#[async_trait]
pub trait NotifyInterface {
    /// One-shot call to the internal notification endpoint. No retry or
    /// backoff; a non-2xx response is an error carrying the response body.
    async fn notify(&self, event_type: &str, user_id: &str, data: Value) -> Result<(), AppError>;
}

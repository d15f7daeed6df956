use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::database::data_api::{eq, DataApiClient};
use crate::entities::tip::Tip;
use crate::interfaces::repositories::tips::TipsInterface;
use crate::middleware::error::AppError;

pub const TABLE_NAME: &str = "tips";

pub struct TipsRepository {
    api: Arc<DataApiClient>,
}

impl TipsRepository {
    pub fn new(api: Arc<DataApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl TipsInterface for TipsRepository {
    async fn complete_by_session(
        &self,
        session_id: &str,
        reader_email: Option<&str>,
    ) -> Result<Option<Tip>, AppError> {
        let mut body = json!({ "status": "complete" });
        if let Some(email) = reader_email {
            body["reader_email"] = json!(email);
        }

        let rows: Vec<Tip> = self
            .api
            .update(TABLE_NAME, &[("stripe_session_id", eq(session_id))], body)
            .await?;
        Ok(rows.into_iter().next())
    }
}

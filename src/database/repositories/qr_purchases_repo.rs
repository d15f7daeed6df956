use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::database::data_api::{eq, DataApiClient};
use crate::entities::qr_purchase::QrPurchase;
use crate::interfaces::repositories::qr_purchases::QrPurchasesInterface;
use crate::middleware::error::AppError;

pub const TABLE_NAME: &str = "qr_codes";

pub struct QrPurchasesRepository {
    api: Arc<DataApiClient>,
}

impl QrPurchasesRepository {
    pub fn new(api: Arc<DataApiClient>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl QrPurchasesInterface for QrPurchasesRepository {
    async fn activate(
        &self,
        purchase_id: &str,
        session_id: &str,
    ) -> Result<Option<QrPurchase>, AppError> {
        let rows: Vec<QrPurchase> = self
            .api
            .update(
                TABLE_NAME,
                &[("id", eq(purchase_id))],
                json!({
                    "qr_code_status": "active",
                    "is_paid": true,
                    "stripe_session_id": session_id,
                }),
            )
            .await?;
        Ok(rows.into_iter().next())
    }
}

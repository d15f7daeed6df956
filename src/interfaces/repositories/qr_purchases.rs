use async_trait::async_trait;

use crate::entities::qr_purchase::QrPurchase;
use crate::middleware::error::AppError;

#[async_trait]
pub trait QrPurchasesInterface {
    /// Sets the purchase active and paid and stores the checkout session id.
    /// Returns the updated row, or `None` when no purchase matches the id.
    async fn activate(
        &self,
        purchase_id: &str,
        session_id: &str,
    ) -> Result<Option<QrPurchase>, AppError>;
}

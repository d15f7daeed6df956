use async_trait::async_trait;

use crate::entities::tip::Tip;
use crate::middleware::error::AppError;

#[async_trait]
pub trait TipsInterface {
    /// Marks the tip matching `stripe_session_id` complete, recording the
    /// payer email when the checkout session carried one. Returns the updated
    /// row, or `None` when no tip matches the session id. Safe to apply more
    /// than once for the same session.
    async fn complete_by_session(
        &self,
        session_id: &str,
        reader_email: Option<&str>,
    ) -> Result<Option<Tip>, AppError>;
}

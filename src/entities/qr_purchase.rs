use serde::{Deserialize, Serialize};

/// A QR code purchase row. Becomes `active` + paid once Stripe reports the
/// checkout session completed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QrPurchase {
    pub id: String,
    pub author_id: String,
    pub qr_code_status: String,
    #[serde(default)]
    pub is_paid: bool,
    pub book_title: Option<String>,
    pub stripe_session_id: Option<String>,
}

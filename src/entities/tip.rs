use serde::{Deserialize, Serialize};

/// A reader tip row as stored in the hosted data store. Created when checkout
/// starts; this service only moves it from `pending` to `complete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tip {
    pub id: String,
    pub author_id: String,
    pub status: String,
    pub amount: Option<f64>,
    pub message: Option<String>,
    pub reader_email: Option<String>,
    pub book_title: Option<String>,
    pub stripe_session_id: Option<String>,
}

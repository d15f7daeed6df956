use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An author profile's link to its Stripe connected account. The two
/// timestamps record the first time onboarding was observed started and
/// completed; each is written at most once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayoutProfile {
    pub id: String,
    pub stripe_account_id: Option<String>,
    #[serde(default)]
    pub stripe_setup_complete: bool,
    pub stripe_onboarding_started_at: Option<DateTime<Utc>>,
    pub stripe_setup_completed_at: Option<DateTime<Utc>>,
}

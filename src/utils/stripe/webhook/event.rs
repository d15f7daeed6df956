use std::collections::HashMap;

use serde::Deserialize;

/// Webhook envelope, routed on the `type` tag. Event types Stripe adds in the
/// future fall into `Unknown`, which the dispatcher acknowledges without
/// touching any record.
#[derive(Debug)]
pub enum HookEvent {
    CheckoutSessionCompleted(HookObject<CheckoutSession>),
    AccountUpdated(HookObject<ConnectAccount>),
    Unknown,
}

/// The envelope is parsed in two steps: the `type` tag with the payload left
/// raw, then the payload against the matching variant. Unrecognized tags keep
/// their payload untouched and become `Unknown`, whatever shape it has.
#[derive(Deserialize)]
struct RawEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default)]
    data: serde_json::Value,
}

impl<'de> serde::Deserialize<'de> for HookEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = RawEnvelope::deserialize(deserializer)?;
        let event = match raw.event_type.as_str() {
            "checkout.session.completed" => HookEvent::CheckoutSessionCompleted(
                serde_json::from_value(raw.data).map_err(serde::de::Error::custom)?,
            ),
            "account.updated" => HookEvent::AccountUpdated(
                serde_json::from_value(raw.data).map_err(serde::de::Error::custom)?,
            ),
            _ => HookEvent::Unknown,
        };
        Ok(event)
    }
}

#[derive(Debug, Deserialize)]
pub struct HookObject<T> {
    pub object: T,
}

#[derive(Debug, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    pub customer_email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ConnectAccount {
    pub id: String,
    #[serde(default)]
    pub metadata: HashMap<String, String>,
    #[serde(default)]
    pub payouts_enabled: bool,
    #[serde(default)]
    pub details_submitted: bool,
    #[serde(default)]
    pub requirements: AccountRequirements,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountRequirements {
    #[serde(default)]
    pub currently_due: Vec<String>,
    #[serde(default)]
    pub eventually_due: Vec<String>,
}

impl ConnectAccount {
    /// Onboarding has begun once details are submitted, or once the set of
    /// currently-due requirements no longer matches the eventually-due set.
    pub fn onboarding_started(&self) -> bool {
        self.details_submitted
            || self.requirements.currently_due != self.requirements.eventually_due
    }

    pub fn onboarding_completed(&self) -> bool {
        self.payouts_enabled && self.details_submitted
    }
}

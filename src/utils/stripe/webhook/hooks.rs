use std::collections::HashMap;

use chrono::Utc;
use hmac::{Hmac, Mac};
use sha2::Sha256;

use super::event::HookEvent;

#[derive(Debug)]
pub enum WebhookError {
    BadKey,
    BadSignature,
    BadTimestamp(i64),
    ParseError(serde_json::Error),
    HeaderMissing,
}

/// Splits a `stripe-signature` header into its `t` and `v1` tokens.
/// Token order is not assumed.
fn parse_signature_header(sig_header: &str) -> Result<(i64, String), WebhookError> {
    let pairs: HashMap<_, _> = sig_header
        .split(',')
        .filter_map(|part| {
            let mut kv = part.trim().split('=');
            Some((kv.next()?, kv.next()?))
        })
        .collect();

    let timestamp = pairs
        .get("t")
        .ok_or(WebhookError::HeaderMissing)?
        .parse::<i64>()
        .map_err(|_| WebhookError::BadSignature)?;

    let signature = pairs
        .get("v1")
        .ok_or(WebhookError::HeaderMissing)?
        .to_string();

    Ok((timestamp, signature))
}

/// Checks the header's HMAC-SHA256 over `"<t>.<payload>"`. `verify_slice`
/// compares in constant time. `tolerance_secs` bounds how far the signed
/// timestamp may drift from now, rejecting replays of captured deliveries.
pub fn verify_signature(
    payload: &str,
    sig_header: &str,
    secret: &str,
    tolerance_secs: i64,
) -> Result<(), WebhookError> {
    let (timestamp, signature) = parse_signature_header(sig_header)?;
    let signed_payload = format!("{}.{}", timestamp, payload);

    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).map_err(|_| WebhookError::BadKey)?;
    mac.update(signed_payload.as_bytes());

    let signature_bytes = hex::decode(signature).map_err(|_| WebhookError::BadSignature)?;
    mac.verify_slice(&signature_bytes)
        .map_err(|_| WebhookError::BadSignature)?;

    if (Utc::now().timestamp() - timestamp).abs() > tolerance_secs {
        return Err(WebhookError::BadTimestamp(timestamp));
    }
    Ok(())
}

pub fn verify_and_parse_event(
    payload: &str,
    sig_header: &str,
    secret: &str,
    tolerance_secs: i64,
) -> Result<HookEvent, WebhookError> {
    verify_signature(payload, sig_header, secret, tolerance_secs)?;
    serde_json::from_str(payload).map_err(WebhookError::ParseError)
}

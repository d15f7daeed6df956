use axum::body::Body;
use axum::extract::{self, Request};
use axum::RequestExt;

use crate::middleware::error::AppError;
use crate::middleware::mw_ctx::CtxState;
use crate::utils::stripe::webhook::event::HookEvent;
use crate::utils::stripe::webhook::hooks::verify_and_parse_event;

/// Pulls the raw body and `stripe-signature` header out of the request and
/// runs signature verification over the exact bytes Stripe signed. The body
/// must not be re-encoded before this point.
pub async fn extract_stripe_event(
    req: Request<Body>,
    state: &CtxState,
) -> Result<HookEvent, AppError> {
    if state.stripe_wh_secret.is_empty() {
        return Err(AppError::SignatureMissing);
    }

    let (parts, body) = req.into_parts();

    let signature = parts
        .headers
        .get("stripe-signature")
        .ok_or(AppError::SignatureMissing)?
        .to_str()
        .map_err(|_| AppError::SignatureInvalid)?
        .to_string();

    let req = Request::from_parts(parts, body);
    let payload: String =
        req.extract()
            .await
            .map_err(|e: extract::rejection::StringRejection| AppError::Payload {
                source: e.to_string(),
            })?;

    let event = verify_and_parse_event(
        &payload,
        &signature,
        &state.stripe_wh_secret,
        state.stripe_wh_tolerance_secs,
    )?;
    Ok(event)
}

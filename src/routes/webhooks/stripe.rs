use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::middleware::error::AppResult;
use crate::middleware::mw_ctx::CtxState;
use crate::middleware::utils::extractor_utils::extract_stripe_event;
use crate::services::stripe_event_service::StripeEventService;

pub fn routes() -> Router<Arc<CtxState>> {
    Router::new().route("/webhooks/stripe", post(handle_webhook))
}

async fn handle_webhook(
    State(state): State<Arc<CtxState>>,
    req: Request<Body>,
) -> AppResult<Response> {
    let event = extract_stripe_event(req, &state).await?;

    if state.is_development {
        tracing::debug!(?event, "verified stripe event");
    }

    StripeEventService::new(&state).handle(event).await?;

    Ok((StatusCode::OK, Json(json!({ "status": "success" }))).into_response())
}

use axum::Json;
use serde_json::{json, Value};

use crate::screening::{GREETING, STAGE_LABELS};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "greenroom-api"
    }))
}

/// GET /
/// Service meta: the greeting shown before intake and the step labels a
/// client renders as the flow progresses.
pub async fn meta_handler() -> Json<Value> {
    Json(json!({
        "service": "greenroom-api",
        "version": env!("CARGO_PKG_VERSION"),
        "greeting": GREETING,
        "steps": STAGE_LABELS,
    }))
}

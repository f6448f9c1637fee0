// handlers/system.rs - service description and health probe

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /
pub async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Campus Resources API",
            "version": version,
            "endpoints": {
                "institutions": "/educationalInstitutions[/:institution_id]",
                "classes": "/educationalInstitutions/:institution_id/classes",
                "resources": "/educationalInstitutions/:institution_id/classes/:class_id/resources[/:resource_id]",
                "comments": "/educationalInstitutions/:institution_id/classes/:class_id/resources/:resource_id/comments",
                "health": "/health",
            }
        }
    }))
}

/// GET /health - pings the document store
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "database": "ok"
                }
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "database unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "database_error": e.to_string()
                }
            })),
        ),
    }
}

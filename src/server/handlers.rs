//! HTTP route handlers

use crate::server::state::AppState;
use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::warn;

/// Health check endpoint handler
///
/// Reports 503 when the credential store cannot be reached.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let (status, store) = match state.auth.health_check().await {
        Ok(()) => ("healthy", "up"),
        Err(e) => {
            warn!("Health check failed: {}", e);
            ("unhealthy", "down")
        }
    };

    let body = json!({
        "status": status,
        "store": store,
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    });

    if store == "up" {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}

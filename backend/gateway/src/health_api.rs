//! Public health endpoint. No auth, no dependency probing.

use axum::Json;

use snapsight_core::HealthReport;

/// Handler for `GET /health`.
pub async fn get_health() -> Json<HealthReport> {
    Json(HealthReport {
        status: "ok".into(),
        service: "snapsight".into(),
        version: env!("CARGO_PKG_VERSION").into(),
    })
}

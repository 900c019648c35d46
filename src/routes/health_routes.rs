use axum::{http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "message": "EcoTrack rental backend is running",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Respuesta JSON para rutas inexistentes
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "message": "The requested endpoint does not exist",
        })),
    )
}

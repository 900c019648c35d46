use axum::{extract::State, routing::get, Json, Router};

use crate::services::geofence_service::GeofenceZone;
use crate::state::AppState;

pub fn create_geofence_router() -> Router<AppState> {
    Router::new().route("/", get(get_zone))
}

async fn get_zone(State(state): State<AppState>) -> Json<GeofenceZone> {
    Json(state.geofence.zone())
}

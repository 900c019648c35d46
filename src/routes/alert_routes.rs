use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};

use crate::controllers::alert_controller::AlertController;
use crate::dto::alert_dto::{AlertListResponse, AlertQuery, EvaluateAlertsRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_alert_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_alerts))
        .route("/evaluate", post(evaluate_alerts))
}

async fn list_alerts(
    State(state): State<AppState>,
    Query(query): Query<AlertQuery>,
) -> Result<Json<AlertListResponse>, AppError> {
    let controller = AlertController::new(state.alerts.clone());
    Ok(Json(controller.list(query).await?))
}

async fn evaluate_alerts(
    State(state): State<AppState>,
    Json(request): Json<EvaluateAlertsRequest>,
) -> Json<AlertListResponse> {
    let controller = AlertController::new(state.alerts.clone());
    Json(controller.evaluate(request))
}

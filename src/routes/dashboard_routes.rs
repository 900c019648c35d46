use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::dashboard_controller::DashboardController;
use crate::dto::common_dto::DealerScope;
use crate::dto::dashboard_dto::{CustomerUsage, DashboardStats};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dashboard_router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dashboard))
        .route("/customer/:id", get(get_customer_usage))
}

async fn get_dashboard(
    State(state): State<AppState>,
    Query(scope): Query<DealerScope>,
) -> Result<Json<DashboardStats>, AppError> {
    let controller = DashboardController::new(state.pool.clone(), state.alerts.clone());
    Ok(Json(controller.stats(scope.dealer_id).await?))
}

async fn get_customer_usage(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CustomerUsage>, AppError> {
    let controller = DashboardController::new(state.pool.clone(), state.alerts.clone());
    Ok(Json(controller.customer_usage(id).await?))
}

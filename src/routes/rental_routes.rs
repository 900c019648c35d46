use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::rental_controller::RentalController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::rental_dto::{CheckoutRequest, RentalQuery, RentalResponse, ReturnRequest};
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_rental_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_rentals).post(checkout))
        .route("/:id", get(get_rental))
        .route("/:id/return", post(return_vehicle))
}

async fn checkout(
    State(state): State<AppState>,
    Json(request): Json<CheckoutRequest>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    Ok(Json(controller.checkout(request).await?))
}

async fn return_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ReturnRequest>,
) -> Result<Json<ApiResponse<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    Ok(Json(controller.return_vehicle(id, request).await?))
}

async fn get_rental(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<RentalResponse>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn list_rentals(
    State(state): State<AppState>,
    Query(query): Query<RentalQuery>,
) -> Result<Json<Vec<RentalResponse>>, AppError> {
    let controller = RentalController::new(state.pool.clone());
    Ok(Json(controller.list(query).await?))
}

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::dealer_controller::DealerController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::dealer_dto::{CreateDealerRequest, UpdateDealerRequest};
use crate::models::dealer::Dealer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_dealer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_dealers).post(create_dealer))
        .route("/:id", get(get_dealer).put(update_dealer).delete(delete_dealer))
}

async fn create_dealer(
    State(state): State<AppState>,
    Json(request): Json<CreateDealerRequest>,
) -> Result<Json<ApiResponse<Dealer>>, AppError> {
    let controller = DealerController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn list_dealers(State(state): State<AppState>) -> Result<Json<Vec<Dealer>>, AppError> {
    let controller = DealerController::new(state.pool.clone());
    Ok(Json(controller.list().await?))
}

async fn get_dealer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Dealer>, AppError> {
    let controller = DealerController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_dealer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDealerRequest>,
) -> Result<Json<ApiResponse<Dealer>>, AppError> {
    let controller = DealerController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_dealer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = DealerController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Dealer deleted successfully")))
}

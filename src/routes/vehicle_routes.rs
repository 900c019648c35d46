use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::vehicle_controller::VehicleController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, LocationReportRequest, LocationReportResponse, UpdateVehicleRequest,
    VehicleQuery,
};
use crate::models::vehicle::Vehicle;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_vehicle_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_vehicles).post(create_vehicle))
        .route("/:id", get(get_vehicle).put(update_vehicle).delete(delete_vehicle))
        .route("/:id/location", post(report_location))
}

async fn create_vehicle(
    State(state): State<AppState>,
    Json(request): Json<CreateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn list_vehicles(
    State(state): State<AppState>,
    Query(query): Query<VehicleQuery>,
) -> Result<Json<Vec<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.list(query).await?))
}

async fn get_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vehicle>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateVehicleRequest>,
) -> Result<Json<ApiResponse<Vehicle>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_vehicle(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Vehicle deleted successfully")))
}

async fn report_location(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<LocationReportRequest>,
) -> Result<Json<LocationReportResponse>, AppError> {
    let controller = VehicleController::new(state.pool.clone());
    Ok(Json(controller.report_location(id, request, &state.geofence).await?))
}

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::customer_controller::CustomerController;
use crate::dto::common_dto::ApiResponse;
use crate::dto::customer_dto::{
    CreateCustomerRequest, CustomerQuery, RecordPaymentRequest, UpdateCustomerRequest,
};
use crate::models::customer::Customer;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_customer_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/:id/payments", post(record_payment))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.create(request).await?))
}

async fn list_customers(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<Vec<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.list(query).await?))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Customer>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.get_by_id(id).await?))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.update(id, request).await?))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    controller.delete(id).await?;
    Ok(Json(ApiResponse::message("Customer deleted successfully")))
}

async fn record_payment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RecordPaymentRequest>,
) -> Result<Json<ApiResponse<Customer>>, AppError> {
    let controller = CustomerController::new(state.pool.clone());
    Ok(Json(controller.record_payment(id, request).await?))
}

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::customer_dto::{
    CreateCustomerRequest, CustomerQuery, RecordPaymentRequest, UpdateCustomerRequest,
};
use crate::models::customer::Customer;
use crate::repositories::customer_repository::CustomerRepository;
use crate::services::inventory_filter::CustomerFilter;
use crate::utils::errors::{not_found_error, AppResult};

pub struct CustomerController {
    repository: CustomerRepository,
}

impl CustomerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: CustomerRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateCustomerRequest) -> AppResult<ApiResponse<Customer>> {
        request.validate()?;

        let customer = self.repository.create(request).await?;
        info!("👤 Cliente creado: {} ({})", customer.name, customer.id);

        Ok(ApiResponse::success_with_message(customer, "Customer created successfully"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Customer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Customer", id))
    }

    pub async fn list(&self, query: CustomerQuery) -> AppResult<Vec<Customer>> {
        let filter = CustomerFilter::new(query.search.as_deref());
        let customers = self.repository.list(query.dealer_id).await?;
        Ok(filter.apply(customers))
    }

    pub async fn update(&self, id: Uuid, request: UpdateCustomerRequest) -> AppResult<ApiResponse<Customer>> {
        request.validate()?;

        let customer = self.repository.update(id, request).await?;
        Ok(ApiResponse::success_with_message(customer, "Customer updated successfully"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        info!("🗑️ Cliente eliminado: {}", id);
        Ok(())
    }

    pub async fn record_payment(
        &self,
        id: Uuid,
        request: RecordPaymentRequest,
    ) -> AppResult<ApiResponse<Customer>> {
        request.validate()?;

        let customer = self.repository.record_payment(id, request.amount).await?;
        info!(
            "💰 Pago de {} registrado para {} (deuda restante: {})",
            request.amount, customer.name, customer.outstanding_dues
        );

        Ok(ApiResponse::success_with_message(customer, "Payment recorded successfully"))
    }
}

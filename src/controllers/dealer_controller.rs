use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::dealer_dto::{CreateDealerRequest, UpdateDealerRequest};
use crate::models::dealer::Dealer;
use crate::repositories::dealer_repository::DealerRepository;
use crate::utils::errors::{not_found_error, AppResult};

pub struct DealerController {
    repository: DealerRepository,
}

impl DealerController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: DealerRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateDealerRequest) -> AppResult<ApiResponse<Dealer>> {
        request.validate()?;

        let dealer = self.repository.create(request).await?;
        info!("🏢 Dealer registrado: {} ({})", dealer.business_name, dealer.id);

        Ok(ApiResponse::success_with_message(dealer, "Dealer created successfully"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Dealer> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Dealer", id))
    }

    pub async fn list(&self) -> AppResult<Vec<Dealer>> {
        self.repository.list().await
    }

    pub async fn update(&self, id: Uuid, request: UpdateDealerRequest) -> AppResult<ApiResponse<Dealer>> {
        request.validate()?;

        let dealer = self.repository.update(id, request).await?;
        Ok(ApiResponse::success_with_message(dealer, "Dealer updated successfully"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        info!("🗑️ Dealer eliminado: {}", id);
        Ok(())
    }
}

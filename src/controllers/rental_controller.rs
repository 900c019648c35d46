use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::rental_dto::{CheckoutRequest, RentalQuery, RentalResponse, ReturnRequest};
use crate::repositories::rental_repository::{validate_rental_period, RentalRepository};
use crate::utils::errors::{not_found_error, AppResult};

pub struct RentalController {
    repository: RentalRepository,
}

impl RentalController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: RentalRepository::new(pool),
        }
    }

    pub async fn checkout(&self, request: CheckoutRequest) -> AppResult<ApiResponse<RentalResponse>> {
        request.validate()?;
        if let Some(start) = request.start_date {
            validate_rental_period(start, request.expected_return_date)?;
        }

        let rental = self.repository.checkout(request).await?;
        Ok(ApiResponse::success_with_message(
            RentalResponse::at(rental, Utc::now()),
            "Vehicle checked out successfully",
        ))
    }

    pub async fn return_vehicle(
        &self,
        id: Uuid,
        request: ReturnRequest,
    ) -> AppResult<ApiResponse<RentalResponse>> {
        let rental = self.repository.return_vehicle(id, request).await?;
        Ok(ApiResponse::success_with_message(
            RentalResponse::at(rental, Utc::now()),
            "Vehicle returned successfully",
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<RentalResponse> {
        let rental = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Rental", id))?;
        Ok(RentalResponse::at(rental, Utc::now()))
    }

    pub async fn list(&self, query: RentalQuery) -> AppResult<Vec<RentalResponse>> {
        let now = Utc::now();
        let rentals = self.repository.list(&query).await?;
        Ok(rentals.into_iter().map(|r| RentalResponse::at(r, now)).collect())
    }
}

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::dealer_dto::{CreateDealerRequest, UpdateDealerRequest};
use crate::models::dealer::{Dealer, DealerRole};
use crate::utils::errors::{db_error, not_found_error, AppError, AppResult};

pub struct DealerRepository {
    pool: PgPool,
}

impl DealerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateDealerRequest) -> AppResult<Dealer> {
        if request.role == DealerRole::Staff && request.parent_dealer_id.is_none() {
            return Err(AppError::BadRequest(
                "Staff accounts require a parent_dealer_id".to_string(),
            ));
        }

        let now = Utc::now();
        let dealer = sqlx::query_as::<_, Dealer>(
            r#"
            INSERT INTO dealers (id, name, email, phone, business_name, address, role, parent_dealer_id, is_active, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, TRUE, $9, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.name.trim())
        .bind(request.email.trim().to_lowercase())
        .bind(request.phone.trim())
        .bind(request.business_name.trim())
        .bind(request.address)
        .bind(request.role)
        .bind(request.parent_dealer_id)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating dealer", e))?;

        Ok(dealer)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Dealer>> {
        sqlx::query_as::<_, Dealer>("SELECT * FROM dealers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding dealer", e))
    }

    pub async fn list(&self) -> AppResult<Vec<Dealer>> {
        sqlx::query_as::<_, Dealer>("SELECT * FROM dealers ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("listing dealers", e))
    }

    pub async fn update(&self, id: Uuid, request: UpdateDealerRequest) -> AppResult<Dealer> {
        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Dealer", id))?;

        sqlx::query_as::<_, Dealer>(
            r#"
            UPDATE dealers
            SET name = $2, email = $3, phone = $4, business_name = $5, address = $6, is_active = $7, updated_at = $8
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(request.name.unwrap_or(current.name))
        .bind(request.email.map(|e| e.trim().to_lowercase()).unwrap_or(current.email))
        .bind(request.phone.unwrap_or(current.phone))
        .bind(request.business_name.unwrap_or(current.business_name))
        .bind(request.address.or(current.address))
        .bind(request.is_active.unwrap_or(current.is_active))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("updating dealer", e))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM dealers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting dealer", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Dealer", id));
        }
        Ok(())
    }
}

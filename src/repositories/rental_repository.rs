//! Repositorio de alquileres
//!
//! Salida y devolución de equipos. Cada operación toca tres tablas
//! (rentals, vehicles, customers) dentro de una única transacción, con el
//! vehículo bloqueado (`FOR UPDATE`) para que dos salidas simultáneas del
//! mismo equipo no puedan prosperar.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::dto::rental_dto::{CheckoutRequest, RentalQuery, ReturnRequest};
use crate::models::customer::Customer;
use crate::models::rental::{Rental, RentalStatus};
use crate::models::vehicle::{Vehicle, VehicleCondition, VehicleStatus};
use crate::utils::errors::{db_error, not_found_error, AppError, AppResult};

pub struct RentalRepository {
    pool: PgPool,
}

/// Estado del vehículo tras la devolución
pub fn status_after_return(condition: VehicleCondition) -> VehicleStatus {
    match condition {
        VehicleCondition::Damaged | VehicleCondition::UnderRepair => VehicleStatus::UnderMaintenance,
        VehicleCondition::Good | VehicleCondition::NeedsInspection => VehicleStatus::Available,
    }
}

/// Valida las fechas de una salida
pub fn validate_rental_period(start: DateTime<Utc>, expected_return: DateTime<Utc>) -> AppResult<()> {
    if expected_return <= start {
        return Err(AppError::BadRequest(
            "expected_return_date must be after start_date".to_string(),
        ));
    }
    Ok(())
}

impl RentalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn checkout(&self, request: CheckoutRequest) -> AppResult<Rental> {
        let start = request.start_date.unwrap_or_else(Utc::now);
        validate_rental_period(start, request.expected_return_date)?;

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting checkout", e))?;

        let vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(request.vehicle_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("locking vehicle", e))?
            .ok_or_else(|| not_found_error("Vehicle", request.vehicle_id))?;

        if !vehicle.status.can_check_out() {
            return Err(AppError::Conflict(format!(
                "Vehicle {} is {} and cannot be checked out",
                vehicle.vehicle_code, vehicle.status
            )));
        }

        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = $1 FOR UPDATE")
            .bind(request.customer_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("locking customer", e))?
            .ok_or_else(|| not_found_error("Customer", request.customer_id))?;

        if customer.dealer_id != vehicle.dealer_id {
            return Err(AppError::BadRequest(
                "Customer and vehicle belong to different dealers".to_string(),
            ));
        }

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            INSERT INTO rentals (id, dealer_id, customer_id, vehicle_id, start_date, expected_return_date, amount, status, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(vehicle.dealer_id)
        .bind(customer.id)
        .bind(vehicle.id)
        .bind(start)
        .bind(request.expected_return_date)
        .bind(request.amount)
        .bind(RentalStatus::Active)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("creating rental", e))?;

        sqlx::query(
            r#"
            UPDATE vehicles
            SET status = $2, current_rental_id = $3, expected_return_date = $4,
                check_out_time = $5, updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(vehicle.id)
        .bind(VehicleStatus::Rented)
        .bind(rental.id)
        .bind(rental.expected_return_date)
        .bind(rental.start_date)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("marking vehicle as rented", e))?;

        sqlx::query(
            r#"
            UPDATE customers
            SET outstanding_dues = outstanding_dues + $2,
                total_rentals = total_rentals + 1,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(customer.id)
        .bind(rental.amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("charging customer", e))?;

        tx.commit().await.map_err(|e| db_error("committing checkout", e))?;

        info!(
            "🚜 {} alquilado a {} hasta {}",
            vehicle.vehicle_code,
            customer.name,
            rental.expected_return_date.format("%Y-%m-%d")
        );
        Ok(rental)
    }

    pub async fn return_vehicle(&self, rental_id: Uuid, request: ReturnRequest) -> AppResult<Rental> {
        let returned_at = request.returned_at.unwrap_or_else(Utc::now);

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting return", e))?;

        let current = sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1 FOR UPDATE")
            .bind(rental_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("locking rental", e))?
            .ok_or_else(|| not_found_error("Rental", rental_id))?;

        if !current.is_open() {
            return Err(AppError::Conflict(format!("Rental {} is already completed", rental_id)));
        }
        if returned_at < current.start_date {
            return Err(AppError::BadRequest(
                "returned_at cannot be before the rental start".to_string(),
            ));
        }

        let rental = sqlx::query_as::<_, Rental>(
            r#"
            UPDATE rentals
            SET end_date = $2, return_condition = $3, status = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(rental_id)
        .bind(returned_at)
        .bind(request.condition)
        .bind(RentalStatus::Completed)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("closing rental", e))?;

        sqlx::query(
            r#"
            UPDATE vehicles
            SET status = $2, condition = $3, check_in_time = $4,
                current_rental_id = NULL, expected_return_date = NULL,
                total_rentals = total_rentals + 1,
                total_revenue = total_revenue + $5,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(rental.vehicle_id)
        .bind(status_after_return(request.condition))
        .bind(request.condition)
        .bind(returned_at)
        .bind(rental.amount)
        .execute(&mut *tx)
        .await
        .map_err(|e| db_error("checking vehicle in", e))?;

        tx.commit().await.map_err(|e| db_error("committing return", e))?;

        info!("📦 Alquiler {} cerrado (condición: {})", rental.id, request.condition);
        Ok(rental)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Rental>> {
        sqlx::query_as::<_, Rental>("SELECT * FROM rentals WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding rental", e))
    }

    pub async fn list(&self, query: &RentalQuery) -> AppResult<Vec<Rental>> {
        sqlx::query_as::<_, Rental>(
            r#"
            SELECT * FROM rentals
            WHERE ($1::uuid IS NULL OR dealer_id = $1)
              AND ($2::uuid IS NULL OR customer_id = $2)
              AND ($3::uuid IS NULL OR vehicle_id = $3)
              AND ($4::rental_status IS NULL OR status = $4)
            ORDER BY start_date DESC
            "#,
        )
        .bind(query.dealer_id)
        .bind(query.customer_id)
        .bind(query.vehicle_id)
        .bind(query.status)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing rentals", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_after_return() {
        assert_eq!(status_after_return(VehicleCondition::Good), VehicleStatus::Available);
        assert_eq!(
            status_after_return(VehicleCondition::Damaged),
            VehicleStatus::UnderMaintenance
        );
    }

    #[test]
    fn test_validate_rental_period() {
        let start = Utc::now();
        assert!(validate_rental_period(start, start + Duration::days(3)).is_ok());
        assert!(matches!(
            validate_rental_period(start, start),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_rental_period(start, start - Duration::hours(1)).is_err());
    }
}

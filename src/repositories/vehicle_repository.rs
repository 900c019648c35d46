use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::vehicle_dto::{CreateVehicleRequest, UpdateVehicleRequest};
use crate::models::vehicle::{MaintenanceStatus, Vehicle, VehicleCondition, VehicleStatus};
use crate::utils::errors::{db_error, not_found_error, AppResult};

pub struct VehicleRepository {
    pool: PgPool,
}

impl VehicleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<Vehicle> {
        let now = Utc::now();
        let engine_hours = request.engine_hours_per_day.unwrap_or(0.0);
        let operating_days = request.operating_days.unwrap_or(0);
        let emission_per_day = request.carbon_emission_per_day.unwrap_or(0.0);

        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            INSERT INTO vehicles (
                id, dealer_id, vehicle_code, vehicle_type, model, condition, status,
                maintenance_status, last_maintenance_date, next_maintenance_date,
                total_rentals, total_revenue, fuel_type, engine_hours_per_day, operating_days,
                carbon_emission_per_day, total_carbon_emission, latitude, longitude,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, 0, 0, $11, $12, $13, $14, $15, $16, $17, $18, $18)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(request.dealer_id)
        .bind(request.vehicle_code.trim())
        .bind(request.vehicle_type.trim())
        .bind(request.model.trim())
        .bind(request.condition.unwrap_or(VehicleCondition::Good))
        .bind(request.status.unwrap_or(VehicleStatus::Available))
        .bind(request.maintenance_status.unwrap_or(MaintenanceStatus::Operational))
        .bind(request.last_maintenance_date)
        .bind(request.next_maintenance_date)
        .bind(request.fuel_type)
        .bind(engine_hours)
        .bind(operating_days)
        .bind(emission_per_day)
        .bind(emission_per_day * f64::from(operating_days))
        .bind(request.latitude)
        .bind(request.longitude)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("creating vehicle", e))?;

        Ok(vehicle)
    }

    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Vehicle>> {
        sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("finding vehicle", e))
    }

    pub async fn list(&self, dealer_id: Option<Uuid>) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            "SELECT * FROM vehicles WHERE ($1::uuid IS NULL OR dealer_id = $1) ORDER BY created_at DESC",
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing vehicles", e))
    }

    /// Vehículos distintos que el cliente alquiló alguna vez
    pub async fn rented_by_customer(&self, customer_id: Uuid) -> AppResult<Vec<Vehicle>> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            SELECT v.*
            FROM vehicles v
            WHERE EXISTS (
                SELECT 1 FROM rentals r
                WHERE r.vehicle_id = v.id AND r.customer_id = $1
            )
            ORDER BY v.vehicle_code
            "#,
        )
        .bind(customer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("listing vehicles rented by customer", e))
    }

    /// Actualización parcial con la fila bloqueada: no pisa el estado ni los
    /// ingresos que un checkout o una devolución concurrente acaba de escribir
    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<Vehicle> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| db_error("starting vehicle update", e))?;

        let mut vehicle = sqlx::query_as::<_, Vehicle>("SELECT * FROM vehicles WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| db_error("locking vehicle", e))?
            .ok_or_else(|| not_found_error("Vehicle", id))?;

        request.apply_to(&mut vehicle);

        let updated = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET vehicle_type = $2, model = $3, condition = $4, status = $5, maintenance_status = $6,
                last_maintenance_date = $7, next_maintenance_date = $8, fuel_type = $9,
                engine_hours_per_day = $10, operating_days = $11, carbon_emission_per_day = $12,
                total_carbon_emission = $13, total_revenue = $14, updated_at = $15
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(vehicle.vehicle_type)
        .bind(vehicle.model)
        .bind(vehicle.condition)
        .bind(vehicle.status)
        .bind(vehicle.maintenance_status)
        .bind(vehicle.last_maintenance_date)
        .bind(vehicle.next_maintenance_date)
        .bind(vehicle.fuel_type)
        .bind(vehicle.engine_hours_per_day)
        .bind(vehicle.operating_days)
        .bind(vehicle.carbon_emission_per_day)
        .bind(vehicle.total_carbon_emission)
        .bind(vehicle.total_revenue)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| db_error("updating vehicle", e))?;

        tx.commit().await.map_err(|e| db_error("committing vehicle update", e))?;
        Ok(updated)
    }

    pub async fn update_location(&self, id: Uuid, latitude: f64, longitude: f64) -> AppResult<Vehicle> {
        sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET latitude = $2, longitude = $3, updated_at = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(latitude)
        .bind(longitude)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("updating vehicle location", e))?
        .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("deleting vehicle", e))?;

        if result.rows_affected() == 0 {
            return Err(not_found_error("Vehicle", id));
        }
        Ok(())
    }
}

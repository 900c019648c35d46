//! Fuente de snapshots para el generador de alertas
//!
//! `SnapshotSource` es la interfaz de acceso a datos que se inyecta en
//! `AlertService`. En producción la implementa `PgSnapshotRepository`;
//! `InMemorySnapshotSource` sirve para tests y para evaluar datos sueltos.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::snapshot::{CustomerSnapshot, VehicleSnapshot};
use crate::utils::errors::{db_error, AppResult};

#[async_trait]
pub trait SnapshotSource: Send + Sync {
    async fn customer_snapshots(&self, dealer_id: Option<Uuid>) -> AppResult<Vec<CustomerSnapshot>>;
    async fn vehicle_snapshots(&self, dealer_id: Option<Uuid>) -> AppResult<Vec<VehicleSnapshot>>;
}

pub struct PgSnapshotRepository {
    pool: PgPool,
}

impl PgSnapshotRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SnapshotSource for PgSnapshotRepository {
    async fn customer_snapshots(&self, dealer_id: Option<Uuid>) -> AppResult<Vec<CustomerSnapshot>> {
        let rows = sqlx::query_as::<_, CustomerSnapshot>(
            r#"
            SELECT id, name, outstanding_dues
            FROM customers
            WHERE ($1::uuid IS NULL OR dealer_id = $1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading customer snapshots", e))?;

        log::debug!("📥 {} customer snapshots cargados", rows.len());
        Ok(rows)
    }

    async fn vehicle_snapshots(&self, dealer_id: Option<Uuid>) -> AppResult<Vec<VehicleSnapshot>> {
        // renter_id: cliente del alquiler más reciente del vehículo
        let rows = sqlx::query_as::<_, VehicleSnapshot>(
            r#"
            SELECT
                v.id,
                v.vehicle_code,
                v.vehicle_type,
                v.status,
                v.condition,
                v.maintenance_status,
                v.expected_return_date,
                v.check_in_time,
                (
                    SELECT r.customer_id
                    FROM rentals r
                    WHERE r.vehicle_id = v.id
                    ORDER BY r.start_date DESC
                    LIMIT 1
                ) AS renter_id
            FROM vehicles v
            WHERE ($1::uuid IS NULL OR v.dealer_id = $1)
            ORDER BY v.created_at DESC
            "#,
        )
        .bind(dealer_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("loading vehicle snapshots", e))?;

        log::debug!("📥 {} vehicle snapshots cargados", rows.len());
        Ok(rows)
    }
}

/// Fuente en memoria: devuelve siempre los mismos snapshots, sin filtrar por dealer
#[derive(Debug, Clone, Default)]
pub struct InMemorySnapshotSource {
    customers: Vec<CustomerSnapshot>,
    vehicles: Vec<VehicleSnapshot>,
}

impl InMemorySnapshotSource {
    pub fn new(customers: Vec<CustomerSnapshot>, vehicles: Vec<VehicleSnapshot>) -> Self {
        Self { customers, vehicles }
    }
}

#[async_trait]
impl SnapshotSource for InMemorySnapshotSource {
    async fn customer_snapshots(&self, _dealer_id: Option<Uuid>) -> AppResult<Vec<CustomerSnapshot>> {
        Ok(self.customers.clone())
    }

    async fn vehicle_snapshots(&self, _dealer_id: Option<Uuid>) -> AppResult<Vec<VehicleSnapshot>> {
        Ok(self.vehicles.clone())
    }
}

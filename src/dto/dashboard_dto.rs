use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::models::vehicle::VehicleStatus;
use crate::services::alert_service::AlertSummary;

// Conteos de flota por estado
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct StatusBreakdown {
    pub available: usize,
    pub reserved: usize,
    pub rented: usize,
    pub under_maintenance: usize,
}

// Conteos de flota por combustible
#[derive(Debug, Default, Serialize, PartialEq)]
pub struct FuelBreakdown {
    pub ev: usize,
    pub petrol: usize,
    pub diesel: usize,
}

// Entrada de la lista de check-ins / check-outs recientes
#[derive(Debug, Serialize, PartialEq)]
pub struct RecentMovement {
    pub vehicle_id: Uuid,
    pub vehicle_code: String,
    pub vehicle_type: String,
    pub status: VehicleStatus,
    pub at: DateTime<Utc>,
}

// Resumen del dashboard
#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub total_customers: usize,
    pub total_vehicles: usize,
    pub by_status: StatusBreakdown,
    pub by_fuel_type: FuelBreakdown,
    pub total_outstanding_dues: Decimal,
    pub total_revenue: Decimal,
    pub total_carbon_emission: f64,
    pub total_engine_hours_per_day: f64,
    pub recent_check_ins: Vec<RecentMovement>,
    pub recent_check_outs: Vec<RecentMovement>,
    pub alerts: AlertSummary,
    pub generated_at: DateTime<Utc>,
}

// Agregado de uso de un cliente sobre los equipos que alquiló
#[derive(Debug, Serialize, PartialEq)]
pub struct CustomerUsage {
    pub customer_id: Uuid,
    pub vehicles_rented: usize,
    pub total_operating_days: i64,
    pub total_engine_hours: f64,
    pub total_carbon_emission: f64,
    pub estimated_fuel_used: f64,
}

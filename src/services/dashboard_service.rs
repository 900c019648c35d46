//! Agregados del dashboard
//!
//! Funciones puras sobre listas ya cargadas: el controller obtiene los datos
//! del dealer y delega aquí los cálculos.

use chrono::{DateTime, Utc};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::dto::dashboard_dto::{
    CustomerUsage, DashboardStats, FuelBreakdown, RecentMovement, StatusBreakdown,
};
use crate::models::alert::Alert;
use crate::models::customer::Customer;
use crate::models::vehicle::{FuelType, Vehicle, VehicleStatus};
use crate::services::alert_service::AlertSummary;

/// Número de movimientos recientes que muestra el dashboard
pub const RECENT_MOVEMENTS: usize = 5;
/// Litros estimados por hora de motor
pub const FUEL_LITERS_PER_ENGINE_HOUR: f64 = 0.5;

pub fn dashboard_stats(
    customers: &[Customer],
    vehicles: &[Vehicle],
    alerts: &[Alert],
    now: DateTime<Utc>,
) -> DashboardStats {
    let mut by_status = StatusBreakdown::default();
    let mut by_fuel_type = FuelBreakdown::default();

    for vehicle in vehicles {
        match vehicle.status {
            VehicleStatus::Available => by_status.available += 1,
            VehicleStatus::Reserved => by_status.reserved += 1,
            VehicleStatus::Rented => by_status.rented += 1,
            VehicleStatus::UnderMaintenance => by_status.under_maintenance += 1,
        }
        match vehicle.fuel_type {
            FuelType::Ev => by_fuel_type.ev += 1,
            FuelType::Petrol => by_fuel_type.petrol += 1,
            FuelType::Diesel => by_fuel_type.diesel += 1,
        }
    }

    DashboardStats {
        total_customers: customers.len(),
        total_vehicles: vehicles.len(),
        by_status,
        by_fuel_type,
        total_outstanding_dues: customers.iter().map(|c| c.outstanding_dues).sum::<Decimal>(),
        total_revenue: vehicles.iter().map(|v| v.total_revenue).sum::<Decimal>(),
        total_carbon_emission: vehicles.iter().map(|v| v.total_carbon_emission).sum(),
        total_engine_hours_per_day: vehicles.iter().map(|v| v.engine_hours_per_day).sum(),
        recent_check_ins: recent_movements(vehicles, |v| v.check_in_time),
        recent_check_outs: recent_movements(vehicles, |v| v.check_out_time),
        alerts: AlertSummary::from_alerts(alerts),
        generated_at: now,
    }
}

/// Los `RECENT_MOVEMENTS` vehículos con la marca de tiempo más reciente
fn recent_movements<F>(vehicles: &[Vehicle], at: F) -> Vec<RecentMovement>
where
    F: Fn(&Vehicle) -> Option<DateTime<Utc>>,
{
    let mut movements: Vec<RecentMovement> = vehicles
        .iter()
        .filter_map(|v| {
            at(v).map(|at| RecentMovement {
                vehicle_id: v.id,
                vehicle_code: v.vehicle_code.clone(),
                vehicle_type: v.vehicle_type.clone(),
                status: v.status,
                at,
            })
        })
        .collect();

    movements.sort_by(|a, b| b.at.cmp(&a.at));
    movements.truncate(RECENT_MOVEMENTS);
    movements
}

/// Combustible estimado en litros; los eléctricos no consumen
pub fn estimated_fuel(vehicle: &Vehicle) -> f64 {
    match vehicle.fuel_type {
        FuelType::Ev => 0.0,
        FuelType::Petrol | FuelType::Diesel => {
            vehicle.engine_hours_per_day * f64::from(vehicle.operating_days) * FUEL_LITERS_PER_ENGINE_HOUR
        }
    }
}

/// Uso agregado sobre los vehículos que el cliente alquiló
pub fn customer_usage(customer_id: Uuid, vehicles: &[Vehicle]) -> CustomerUsage {
    let fuel: f64 = vehicles.iter().map(estimated_fuel).sum();

    CustomerUsage {
        customer_id,
        vehicles_rented: vehicles.len(),
        total_operating_days: vehicles.iter().map(|v| i64::from(v.operating_days)).sum(),
        total_engine_hours: vehicles.iter().map(|v| v.engine_hours_per_day).sum(),
        total_carbon_emission: vehicles.iter().map(|v| v.total_carbon_emission).sum(),
        estimated_fuel_used: round_one_decimal(fuel),
    }
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Conversión para logs y métricas en coma flotante
pub fn decimal_to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

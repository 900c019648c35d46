use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::vehicle::{FuelType, MaintenanceStatus, Vehicle, VehicleCondition, VehicleStatus};
use crate::utils::validation::{validate_coordinates, validate_non_negative_amount, VEHICLE_CODE_REGEX};

// Request para crear un vehículo
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_create_coordinates"))]
pub struct CreateVehicleRequest {
    pub dealer_id: Uuid,

    #[validate(regex(path = "VEHICLE_CODE_REGEX", message = "Vehicle code must look like EXC-001"))]
    pub vehicle_code: String,

    #[validate(length(min = 2, max = 60))]
    pub vehicle_type: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    pub condition: Option<VehicleCondition>,
    pub status: Option<VehicleStatus>,
    pub maintenance_status: Option<MaintenanceStatus>,
    pub last_maintenance_date: DateTime<Utc>,
    pub next_maintenance_date: DateTime<Utc>,
    pub fuel_type: FuelType,

    #[validate(range(min = 0.0, max = 24.0))]
    pub engine_hours_per_day: Option<f64>,

    #[validate(range(min = 0))]
    pub operating_days: Option<i32>,

    #[validate(range(min = 0.0))]
    pub carbon_emission_per_day: Option<f64>,

    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

fn validate_create_coordinates(request: &CreateVehicleRequest) -> Result<(), ValidationError> {
    match (request.latitude, request.longitude) {
        (Some(lat), Some(lng)) => validate_coordinates(lat, lng),
        (None, None) => Ok(()),
        _ => Err(ValidationError::new("coordinates_incomplete")),
    }
}

// Request para actualizar un vehículo (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateVehicleRequest {
    #[validate(length(min = 2, max = 60))]
    pub vehicle_type: Option<String>,

    #[validate(length(min = 1, max = 100))]
    pub model: Option<String>,

    pub condition: Option<VehicleCondition>,
    pub status: Option<VehicleStatus>,
    pub maintenance_status: Option<MaintenanceStatus>,
    pub last_maintenance_date: Option<DateTime<Utc>>,
    pub next_maintenance_date: Option<DateTime<Utc>>,
    pub fuel_type: Option<FuelType>,

    #[validate(range(min = 0.0, max = 24.0))]
    pub engine_hours_per_day: Option<f64>,

    #[validate(range(min = 0))]
    pub operating_days: Option<i32>,

    #[validate(range(min = 0.0))]
    pub carbon_emission_per_day: Option<f64>,

    #[validate(range(min = 0.0))]
    pub total_carbon_emission: Option<f64>,

    #[validate(custom = "validate_non_negative_amount")]
    pub total_revenue: Option<Decimal>,
}

impl UpdateVehicleRequest {
    /// Aplica los campos presentes sobre la fila bloqueada. Estado, ingresos
    /// y demás campos ausentes conservan el valor actual; el total de
    /// emisiones se recalcula si cambió alguno de sus factores.
    pub fn apply_to(self, vehicle: &mut Vehicle) {
        let factors_changed = self.operating_days.is_some() || self.carbon_emission_per_day.is_some();

        if let Some(vehicle_type) = self.vehicle_type {
            vehicle.vehicle_type = vehicle_type;
        }
        if let Some(model) = self.model {
            vehicle.model = model;
        }
        if let Some(condition) = self.condition {
            vehicle.condition = condition;
        }
        if let Some(status) = self.status {
            vehicle.status = status;
        }
        if let Some(maintenance_status) = self.maintenance_status {
            vehicle.maintenance_status = maintenance_status;
        }
        if let Some(date) = self.last_maintenance_date {
            vehicle.last_maintenance_date = date;
        }
        if let Some(date) = self.next_maintenance_date {
            vehicle.next_maintenance_date = date;
        }
        if let Some(fuel_type) = self.fuel_type {
            vehicle.fuel_type = fuel_type;
        }
        if let Some(hours) = self.engine_hours_per_day {
            vehicle.engine_hours_per_day = hours;
        }
        if let Some(days) = self.operating_days {
            vehicle.operating_days = days;
        }
        if let Some(emission) = self.carbon_emission_per_day {
            vehicle.carbon_emission_per_day = emission;
        }
        if let Some(revenue) = self.total_revenue {
            vehicle.total_revenue = revenue;
        }

        match self.total_carbon_emission {
            Some(total) => vehicle.total_carbon_emission = total,
            None if factors_changed => {
                vehicle.total_carbon_emission =
                    vehicle.carbon_emission_per_day * f64::from(vehicle.operating_days);
            }
            None => {}
        }
    }
}

// Filtros del inventario: todos deben cumplirse
#[derive(Debug, Default, Deserialize)]
pub struct VehicleQuery {
    pub dealer_id: Option<Uuid>,
    pub search: Option<String>,
    pub status: Option<String>,
    pub condition: Option<String>,
    pub fuel_type: Option<String>,
}

// Posición reportada por el equipo
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_report_coordinates"))]
pub struct LocationReportRequest {
    pub latitude: f64,
    pub longitude: f64,
}

fn validate_report_coordinates(request: &LocationReportRequest) -> Result<(), ValidationError> {
    validate_coordinates(request.latitude, request.longitude)
}

// Resultado del chequeo de geocerca tras un reporte de posición
#[derive(Debug, Serialize)]
pub struct LocationReportResponse {
    pub vehicle_id: Uuid,
    pub vehicle_code: String,
    pub latitude: f64,
    pub longitude: f64,
    pub inside_zone: bool,
    pub distance_meters: f64,
    pub distance_km: String,
    pub notified: bool,
}

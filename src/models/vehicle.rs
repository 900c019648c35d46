//! Modelo de Vehicle
//!
//! Este módulo contiene el struct Vehicle y los enums de estado.
//! Mapea exactamente a la tabla `vehicles` y a sus tipos ENUM de PostgreSQL.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::normalize_token;

/// Error al interpretar un valor enumerado desconocido
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("valor desconocido para {kind}: '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl UnknownVariant {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Estado del ciclo de vida del vehículo - mapea al ENUM vehicle_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleStatus {
    Available,
    Reserved,
    Rented,
    #[serde(alias = "under maintenance")]
    UnderMaintenance,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "available",
            VehicleStatus::Reserved => "reserved",
            VehicleStatus::Rented => "rented",
            VehicleStatus::UnderMaintenance => "under_maintenance",
        }
    }

    /// Un vehículo solo puede salir en alquiler si está libre o reservado
    pub fn can_check_out(&self) -> bool {
        matches!(self, VehicleStatus::Available | VehicleStatus::Reserved)
    }
}

impl FromStr for VehicleStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "available" => Ok(VehicleStatus::Available),
            "reserved" => Ok(VehicleStatus::Reserved),
            "rented" => Ok(VehicleStatus::Rented),
            "under_maintenance" => Ok(VehicleStatus::UnderMaintenance),
            _ => Err(UnknownVariant::new("vehicle_status", s)),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Condición física del vehículo - mapea al ENUM vehicle_condition
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "vehicle_condition", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum VehicleCondition {
    Good,
    Damaged,
    #[serde(alias = "under repair")]
    UnderRepair,
    #[serde(alias = "needs inspection")]
    NeedsInspection,
}

impl VehicleCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleCondition::Good => "good",
            VehicleCondition::Damaged => "damaged",
            VehicleCondition::UnderRepair => "under_repair",
            VehicleCondition::NeedsInspection => "needs_inspection",
        }
    }
}

impl FromStr for VehicleCondition {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "good" => Ok(VehicleCondition::Good),
            "damaged" => Ok(VehicleCondition::Damaged),
            "under_repair" => Ok(VehicleCondition::UnderRepair),
            "needs_inspection" => Ok(VehicleCondition::NeedsInspection),
            _ => Err(UnknownVariant::new("vehicle_condition", s)),
        }
    }
}

impl fmt::Display for VehicleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Estado de mantenimiento - mapea al ENUM maintenance_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "maintenance_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum MaintenanceStatus {
    Operational,
    #[serde(alias = "maintenance due")]
    MaintenanceDue,
    #[serde(alias = "under repair")]
    UnderRepair,
}

impl FromStr for MaintenanceStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "operational" => Ok(MaintenanceStatus::Operational),
            "maintenance_due" => Ok(MaintenanceStatus::MaintenanceDue),
            "under_repair" => Ok(MaintenanceStatus::UnderRepair),
            _ => Err(UnknownVariant::new("maintenance_status", s)),
        }
    }
}

/// Tipo de combustible - mapea al ENUM fuel_type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq, Hash)]
#[sqlx(type_name = "fuel_type", rename_all = "lowercase")]
pub enum FuelType {
    #[serde(rename = "EV", alias = "ev")]
    Ev,
    #[serde(rename = "petrol")]
    Petrol,
    #[serde(rename = "diesel")]
    Diesel,
}

impl FromStr for FuelType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "ev" => Ok(FuelType::Ev),
            "petrol" => Ok(FuelType::Petrol),
            "diesel" => Ok(FuelType::Diesel),
            _ => Err(UnknownVariant::new("fuel_type", s)),
        }
    }
}

/// Vehicle principal - mapea exactamente a la tabla vehicles
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vehicle {
    pub id: Uuid,
    pub dealer_id: Uuid,
    /// Código visible del equipo, p.ej. `EXC-001`
    pub vehicle_code: String,
    pub vehicle_type: String,
    pub model: String,
    pub condition: VehicleCondition,
    pub status: VehicleStatus,
    pub current_rental_id: Option<Uuid>,
    pub expected_return_date: Option<DateTime<Utc>>,
    pub check_in_time: Option<DateTime<Utc>>,
    pub check_out_time: Option<DateTime<Utc>>,
    pub maintenance_status: MaintenanceStatus,
    pub last_maintenance_date: DateTime<Utc>,
    pub next_maintenance_date: DateTime<Utc>,
    pub total_rentals: i32,
    pub total_revenue: Decimal,
    pub fuel_type: FuelType,
    pub engine_hours_per_day: f64,
    pub operating_days: i32,
    pub carbon_emission_per_day: f64,
    pub total_carbon_emission: f64,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_from_str_accepts_legacy_spelling() {
        assert_eq!("under maintenance".parse::<VehicleStatus>().unwrap(), VehicleStatus::UnderMaintenance);
        assert_eq!("Rented".parse::<VehicleStatus>().unwrap(), VehicleStatus::Rented);
        assert!("out of service".parse::<VehicleStatus>().is_err());
    }

    #[test]
    fn test_enum_serde_names() {
        assert_eq!(serde_json::to_string(&FuelType::Ev).unwrap(), "\"EV\"");
        assert_eq!(
            serde_json::from_str::<MaintenanceStatus>("\"maintenance due\"").unwrap(),
            MaintenanceStatus::MaintenanceDue
        );
        assert_eq!(
            serde_json::to_string(&VehicleCondition::NeedsInspection).unwrap(),
            "\"needs_inspection\""
        );
    }

    #[test]
    fn test_can_check_out() {
        assert!(VehicleStatus::Available.can_check_out());
        assert!(VehicleStatus::Reserved.can_check_out());
        assert!(!VehicleStatus::Rented.can_check_out());
        assert!(!VehicleStatus::UnderMaintenance.can_check_out());
    }
}

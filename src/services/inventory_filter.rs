//! Filtros de inventario y de clientes
//!
//! Predicados en memoria sobre listas ya acotadas por dealer: búsqueda por
//! subcadena sin distinguir mayúsculas y filtros exactos por enum. Los
//! valores `all` o vacíos significan "sin filtro".

use std::fmt::Display;
use std::str::FromStr;

use crate::dto::alert_dto::AlertQuery;
use crate::dto::vehicle_dto::VehicleQuery;
use crate::models::customer::Customer;
use crate::models::vehicle::{FuelType, Vehicle, VehicleCondition, VehicleStatus};
use crate::services::alert_service::AlertFilter;
use crate::utils::errors::{AppError, AppResult};

/// Interpreta un filtro opcional de query string
pub fn parse_filter<T>(value: Option<&str>, field: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) if v.eq_ignore_ascii_case("all") => Ok(None),
        Some(v) => v
            .parse::<T>()
            .map(Some)
            .map_err(|e| AppError::BadRequest(format!("Invalid {} filter: {}", field, e))),
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

#[derive(Debug, Default, Clone)]
pub struct VehicleFilter {
    search: Option<String>,
    pub status: Option<VehicleStatus>,
    pub condition: Option<VehicleCondition>,
    pub fuel_type: Option<FuelType>,
}

impl VehicleFilter {
    pub fn from_query(query: &VehicleQuery) -> AppResult<Self> {
        Ok(Self {
            search: normalize_search(query.search.as_deref()),
            status: parse_filter(query.status.as_deref(), "status")?,
            condition: parse_filter(query.condition.as_deref(), "condition")?,
            fuel_type: parse_filter(query.fuel_type.as_deref(), "fuel_type")?,
        })
    }

    /// Búsqueda sobre código, tipo y modelo; los demás filtros son exactos
    pub fn matches(&self, vehicle: &Vehicle) -> bool {
        let matches_search = self.search.as_deref().map_or(true, |term| {
            contains_ci(&vehicle.vehicle_code, term)
                || contains_ci(&vehicle.vehicle_type, term)
                || contains_ci(&vehicle.model, term)
        });

        matches_search
            && self.status.map_or(true, |s| s == vehicle.status)
            && self.condition.map_or(true, |c| c == vehicle.condition)
            && self.fuel_type.map_or(true, |f| f == vehicle.fuel_type)
    }

    pub fn apply(&self, vehicles: Vec<Vehicle>) -> Vec<Vehicle> {
        vehicles.into_iter().filter(|v| self.matches(v)).collect()
    }
}

#[derive(Debug, Default, Clone)]
pub struct CustomerFilter {
    search: Option<String>,
}

impl CustomerFilter {
    pub fn new(search: Option<&str>) -> Self {
        Self {
            search: normalize_search(search),
        }
    }

    /// Búsqueda sobre nombre, tipo de negocio y email
    pub fn matches(&self, customer: &Customer) -> bool {
        self.search.as_deref().map_or(true, |term| {
            contains_ci(&customer.name, term)
                || contains_ci(&customer.business_type, term)
                || contains_ci(&customer.email, term)
        })
    }

    pub fn apply(&self, customers: Vec<Customer>) -> Vec<Customer> {
        customers.into_iter().filter(|c| self.matches(c)).collect()
    }
}

impl AlertFilter {
    pub fn from_query(query: &AlertQuery) -> AppResult<Self> {
        Ok(Self {
            category: parse_filter(query.category.as_deref(), "category")?,
            priority: parse_filter(query.priority.as_deref(), "priority")?,
        })
    }
}

fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
}

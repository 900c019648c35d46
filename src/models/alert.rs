//! Modelo de Alert
//!
//! Las alertas son derivadas: se recalculan en cada petición y nunca se persisten.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::normalize_token;
use super::vehicle::UnknownVariant;

/// Categoría de la alerta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    OverdueRental,
    OverduePayment,
    DamagedReturn,
    MaintenanceDue,
}

impl AlertCategory {
    pub const ALL: [AlertCategory; 4] = [
        AlertCategory::OverdueRental,
        AlertCategory::OverduePayment,
        AlertCategory::DamagedReturn,
        AlertCategory::MaintenanceDue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::OverdueRental => "overdue_rental",
            AlertCategory::OverduePayment => "overdue_payment",
            AlertCategory::DamagedReturn => "damaged_return",
            AlertCategory::MaintenanceDue => "maintenance_due",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            AlertCategory::OverdueRental => "Overdue Rental",
            AlertCategory::OverduePayment => "Overdue Payment",
            AlertCategory::DamagedReturn => "Damaged Equipment Return",
            AlertCategory::MaintenanceDue => "Maintenance Due",
        }
    }
}

impl FromStr for AlertCategory {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "overdue_rental" => Ok(AlertCategory::OverdueRental),
            "overdue_payment" => Ok(AlertCategory::OverduePayment),
            "damaged_return" => Ok(AlertCategory::DamagedReturn),
            "maintenance_due" => Ok(AlertCategory::MaintenanceDue),
            _ => Err(UnknownVariant::new("alert_category", s)),
        }
    }
}

/// Prioridad de la alerta
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum AlertPriority {
    High,
    Medium,
    Low,
}

impl AlertPriority {
    /// Peso usado para ordenar: high=3, medium=2, low=1
    pub fn weight(&self) -> u8 {
        match self {
            AlertPriority::High => 3,
            AlertPriority::Medium => 2,
            AlertPriority::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AlertPriority::High => "high",
            AlertPriority::Medium => "medium",
            AlertPriority::Low => "low",
        }
    }
}

impl FromStr for AlertPriority {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_token(s).as_str() {
            "high" => Ok(AlertPriority::High),
            "medium" => Ok(AlertPriority::Medium),
            "low" => Ok(AlertPriority::Low),
            _ => Err(UnknownVariant::new("alert_priority", s)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Alert {
    pub id: String,
    pub category: AlertCategory,
    pub priority: AlertPriority,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

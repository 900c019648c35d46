//! Modelo de Customer
//!
//! Cliente de un dealer. `outstanding_dues` alimenta las alertas de pago.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Customer principal - mapea exactamente a la tabla customers
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_type: String,
    pub work_category: String,
    pub address: String,
    pub contact_person: String,
    pub emergency_contact: String,
    pub frequently_rented_machines: Vec<String>,
    pub outstanding_dues: Decimal,
    pub total_rentals: i32,
    pub total_spent: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//! Modelo de Rental
//!
//! Un registro por salida de equipo; se cierra con la devolución.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

use super::vehicle::VehicleCondition;

/// Estado del alquiler - mapea al ENUM rental_status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "rental_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Rental {
    pub id: Uuid,
    pub dealer_id: Uuid,
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub expected_return_date: DateTime<Utc>,
    pub end_date: Option<DateTime<Utc>>,
    pub return_condition: Option<VehicleCondition>,
    pub amount: Decimal,
    pub status: RentalStatus,
    pub created_at: DateTime<Utc>,
}

impl Rental {
    pub fn is_open(&self) -> bool {
        self.status == RentalStatus::Active
    }

    /// Un alquiler abierto cuya fecha de devolución ya pasó
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.is_open() && self.expected_return_date < now
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn rental(status: RentalStatus, expected_in: Duration) -> Rental {
        let now = Utc::now();
        Rental {
            id: Uuid::new_v4(),
            dealer_id: Uuid::new_v4(),
            customer_id: Uuid::new_v4(),
            vehicle_id: Uuid::new_v4(),
            start_date: now - Duration::days(10),
            expected_return_date: now + expected_in,
            end_date: None,
            return_condition: None,
            amount: Decimal::new(150000, 2),
            status,
            created_at: now,
        }
    }

    #[test]
    fn test_is_overdue() {
        let now = Utc::now();
        assert!(rental(RentalStatus::Active, Duration::days(-2)).is_overdue(now));
        assert!(!rental(RentalStatus::Active, Duration::days(2)).is_overdue(now));
        assert!(!rental(RentalStatus::Completed, Duration::days(-2)).is_overdue(now));
    }
}

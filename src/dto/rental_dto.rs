use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::rental::{Rental, RentalStatus};
use crate::models::vehicle::VehicleCondition;
use crate::utils::validation::validate_non_negative_amount;

// Salida de un equipo en alquiler
#[derive(Debug, Deserialize, Validate)]
pub struct CheckoutRequest {
    pub customer_id: Uuid,
    pub vehicle_id: Uuid,
    /// Por defecto: ahora
    pub start_date: Option<DateTime<Utc>>,
    pub expected_return_date: DateTime<Utc>,

    #[validate(custom = "validate_non_negative_amount")]
    pub amount: Decimal,
}

// Devolución del equipo
#[derive(Debug, Deserialize)]
pub struct ReturnRequest {
    pub condition: VehicleCondition,
    /// Por defecto: ahora
    pub returned_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RentalQuery {
    pub dealer_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub vehicle_id: Option<Uuid>,
    pub status: Option<RentalStatus>,
}

// Response de alquiler con el estado de retraso calculado
#[derive(Debug, Serialize)]
pub struct RentalResponse {
    #[serde(flatten)]
    pub rental: Rental,
    pub overdue: bool,
}

impl RentalResponse {
    pub fn at(rental: Rental, now: DateTime<Utc>) -> Self {
        let overdue = rental.is_overdue(now);
        Self { rental, overdue }
    }
}

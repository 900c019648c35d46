use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::dealer::DealerRole;
use crate::utils::validation::{validate_phone, EMAIL_REGEX};

// Request para registrar un dealer
#[derive(Debug, Deserialize, Validate)]
pub struct CreateDealerRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: String,

    #[validate(regex(path = "EMAIL_REGEX", message = "Please enter a valid email"))]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(length(min = 2, max = 150))]
    pub business_name: String,

    pub address: Option<String>,

    #[serde(default)]
    pub role: DealerRole,

    pub parent_dealer_id: Option<Uuid>,
}

// Request para actualizar un dealer
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDealerRequest {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,

    #[validate(regex(path = "EMAIL_REGEX", message = "Please enter a valid email"))]
    pub email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    #[validate(length(min = 2, max = 150))]
    pub business_name: Option<String>,

    pub address: Option<String>,
    pub is_active: Option<bool>,
}

use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::customer::Customer;

use crate::utils::validation::{
    validate_non_negative_amount, validate_not_blank, validate_phone, validate_positive_amount,
    EMAIL_REGEX,
};

// Request para crear un cliente
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCustomerRequest {
    pub dealer_id: Uuid,

    #[validate(length(min = 2, max = 120))]
    pub name: String,

    #[validate(regex(path = "EMAIL_REGEX", message = "Please enter a valid email"))]
    pub email: String,

    #[validate(custom = "validate_phone")]
    pub phone: String,

    #[validate(custom = "validate_not_blank")]
    pub business_type: String,

    #[validate(custom = "validate_not_blank")]
    pub work_category: String,

    #[validate(custom = "validate_not_blank")]
    pub address: String,

    #[validate(custom = "validate_not_blank")]
    pub contact_person: String,

    #[validate(custom = "validate_phone")]
    pub emergency_contact: String,

    #[serde(default)]
    pub frequently_rented_machines: Vec<String>,

    #[validate(custom = "validate_non_negative_amount")]
    pub outstanding_dues: Option<Decimal>,
}

// Request para actualizar un cliente (parcial)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCustomerRequest {
    #[validate(length(min = 2, max = 120))]
    pub name: Option<String>,

    #[validate(regex(path = "EMAIL_REGEX", message = "Please enter a valid email"))]
    pub email: Option<String>,

    #[validate(custom = "validate_phone")]
    pub phone: Option<String>,

    pub business_type: Option<String>,
    pub work_category: Option<String>,
    pub address: Option<String>,
    pub contact_person: Option<String>,

    #[validate(custom = "validate_phone")]
    pub emergency_contact: Option<String>,

    pub frequently_rented_machines: Option<Vec<String>>,

    #[validate(custom = "validate_non_negative_amount")]
    pub outstanding_dues: Option<Decimal>,
}

impl UpdateCustomerRequest {
    /// Aplica los campos presentes sobre la fila bloqueada; los ausentes
    /// conservan el valor actual (deuda incluida)
    pub fn apply_to(self, customer: &mut Customer) {
        if let Some(name) = self.name {
            customer.name = name;
        }
        if let Some(email) = self.email {
            customer.email = email.trim().to_lowercase();
        }
        if let Some(phone) = self.phone {
            customer.phone = phone;
        }
        if let Some(business_type) = self.business_type {
            customer.business_type = business_type;
        }
        if let Some(work_category) = self.work_category {
            customer.work_category = work_category;
        }
        if let Some(address) = self.address {
            customer.address = address;
        }
        if let Some(contact_person) = self.contact_person {
            customer.contact_person = contact_person;
        }
        if let Some(emergency_contact) = self.emergency_contact {
            customer.emergency_contact = emergency_contact;
        }
        if let Some(machines) = self.frequently_rented_machines {
            customer.frequently_rented_machines = machines;
        }
        if let Some(dues) = self.outstanding_dues {
            customer.outstanding_dues = dues;
        }
    }
}

// Filtros de listado
#[derive(Debug, Default, Deserialize)]
pub struct CustomerQuery {
    pub dealer_id: Option<Uuid>,
    pub search: Option<String>,
}

// Registro de un pago contra la deuda pendiente
#[derive(Debug, Deserialize, Validate)]
pub struct RecordPaymentRequest {
    #[validate(custom = "validate_positive_amount")]
    pub amount: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn customer_with_dues(dues: i64) -> Customer {
        let now = Utc::now();
        Customer {
            id: Uuid::new_v4(),
            dealer_id: Uuid::new_v4(),
            name: "Sri Murugan Builders".to_string(),
            email: "ops@murugan.in".to_string(),
            phone: "+91 98400 12345".to_string(),
            business_type: "Construction".to_string(),
            work_category: "Residential".to_string(),
            address: "Katpadi, Vellore".to_string(),
            contact_person: "S. Kumar".to_string(),
            emergency_contact: "+91 98400 54321".to_string(),
            frequently_rented_machines: vec!["Excavator".to_string()],
            outstanding_dues: Decimal::from(dues),
            total_rentals: 3,
            total_spent: Decimal::from(4200),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_rename_keeps_current_dues() {
        // La fila ya refleja un checkout confirmado (+1500)
        let mut customer = customer_with_dues(1500);
        let request: UpdateCustomerRequest =
            serde_json::from_value(json!({ "name": "Murugan Infra" })).unwrap();

        request.apply_to(&mut customer);

        assert_eq!(customer.name, "Murugan Infra");
        assert_eq!(customer.outstanding_dues, Decimal::from(1500));
        assert_eq!(customer.email, "ops@murugan.in");
        assert_eq!(customer.total_rentals, 3);
    }

    #[test]
    fn test_explicit_fields_are_applied() {
        let mut customer = customer_with_dues(1500);
        let request: UpdateCustomerRequest = serde_json::from_value(json!({
            "email": "  Billing@Murugan.IN ",
            "outstanding_dues": "0",
            "frequently_rented_machines": ["Loader", "Roller"]
        }))
        .unwrap();

        request.apply_to(&mut customer);

        assert_eq!(customer.email, "billing@murugan.in");
        assert_eq!(customer.outstanding_dues, Decimal::ZERO);
        assert_eq!(customer.frequently_rented_machines, vec!["Loader", "Roller"]);
    }
}

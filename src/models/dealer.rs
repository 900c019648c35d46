//! Modelo de Dealer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};
use uuid::Uuid;

/// Rol dentro de la jerarquía de dealers - mapea al ENUM dealer_role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Type, PartialEq, Eq)]
#[sqlx(type_name = "dealer_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DealerRole {
    Dealer,
    Staff,
}

impl Default for DealerRole {
    fn default() -> Self {
        DealerRole::Dealer
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Dealer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub business_name: String,
    pub address: Option<String>,
    pub role: DealerRole,
    pub parent_dealer_id: Option<Uuid>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Dealer {
    /// Dealer efectivo: el staff opera con los datos de su dealer padre
    pub fn effective_dealer_id(&self) -> Uuid {
        match (self.role, self.parent_dealer_id) {
            (DealerRole::Staff, Some(parent)) => parent,
            _ => self.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dealer(role: DealerRole, parent: Option<Uuid>) -> Dealer {
        Dealer {
            id: Uuid::new_v4(),
            name: "Ravi".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "+91 98765 43210".to_string(),
            business_name: "Ravi Equipments".to_string(),
            address: None,
            role,
            parent_dealer_id: parent,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_effective_dealer_id() {
        let parent = Uuid::new_v4();
        let staff = dealer(DealerRole::Staff, Some(parent));
        assert_eq!(staff.effective_dealer_id(), parent);

        let owner = dealer(DealerRole::Dealer, None);
        assert_eq!(owner.effective_dealer_id(), owner.id);
    }
}

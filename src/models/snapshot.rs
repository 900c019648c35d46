//! Snapshots de entrada para el generador de alertas
//!
//! Son vistas reducidas de Customer y Vehicle con todos los campos opcionales:
//! un valor ausente, un enum desconocido o una fecha ilegible se convierten en
//! `None` y solo desactivan la regla que los necesita.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use tracing::warn;
use uuid::Uuid;

use super::customer::Customer;
use super::vehicle::{MaintenanceStatus, Vehicle, VehicleCondition, VehicleStatus};
use crate::utils::validation::parse_timestamp;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct CustomerSnapshot {
    #[serde(alias = "_id")]
    pub id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "outstandingDues", deserialize_with = "lenient_decimal")]
    pub outstanding_dues: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct VehicleSnapshot {
    #[serde(alias = "_id")]
    pub id: Uuid,
    #[serde(default, alias = "vehicleId")]
    pub vehicle_code: Option<String>,
    #[serde(default, alias = "type")]
    pub vehicle_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_parse")]
    pub status: Option<VehicleStatus>,
    #[serde(default, deserialize_with = "lenient_parse")]
    pub condition: Option<VehicleCondition>,
    #[serde(default, alias = "maintenanceStatus", deserialize_with = "lenient_parse")]
    pub maintenance_status: Option<MaintenanceStatus>,
    #[serde(default, alias = "expectedReturnDate", deserialize_with = "lenient_timestamp")]
    pub expected_return_date: Option<DateTime<Utc>>,
    #[serde(default, alias = "checkInTime", deserialize_with = "lenient_timestamp")]
    pub check_in_time: Option<DateTime<Utc>>,
    /// Cliente del alquiler actual o, si ya se devolvió, del último alquiler
    #[serde(default, alias = "renterId")]
    pub renter_id: Option<Uuid>,
}

impl VehicleSnapshot {
    /// Etiqueta legible: `EXC-001 (Excavator)`
    pub fn label(&self) -> String {
        let code = self.vehicle_code.as_deref().unwrap_or("Unknown vehicle");
        match self.vehicle_type.as_deref() {
            Some(kind) => format!("{} ({})", code, kind),
            None => code.to_string(),
        }
    }
}

impl From<&Customer> for CustomerSnapshot {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id,
            name: Some(customer.name.clone()),
            outstanding_dues: Some(customer.outstanding_dues),
        }
    }
}

impl From<&Vehicle> for VehicleSnapshot {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            id: vehicle.id,
            vehicle_code: Some(vehicle.vehicle_code.clone()),
            vehicle_type: Some(vehicle.vehicle_type.clone()),
            status: Some(vehicle.status),
            condition: Some(vehicle.condition),
            maintenance_status: Some(vehicle.maintenance_status),
            expected_return_date: vehicle.expected_return_date,
            check_in_time: vehicle.check_in_time,
            renter_id: None,
        }
    }
}

/// Deserializa un enum textual; cualquier valor inválido queda como `None`
fn lenient_parse<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => match s.parse::<T>() {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("⚠️ Valor ignorado en snapshot: {}", e);
                None
            }
        },
        Some(other) => {
            warn!("⚠️ Valor no textual ignorado en snapshot: {}", other);
            None
        }
    })
}

/// Lista de snapshots elemento a elemento: una entidad que no se puede
/// interpretar (sin id, id que no es UUID, ...) se descarta sin invalidar
/// el resto de la lista.
pub fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let items = match raw {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!("⚠️ Se esperaba una lista de entidades, ignorado: {}", other);
            return Ok(Vec::new());
        }
    };

    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<T>(item) {
            Ok(snapshot) => Some(snapshot),
            Err(e) => {
                warn!("⚠️ Entidad ignorada en snapshot: {}", e);
                None
            }
        })
        .collect())
}

/// Fechas como texto o como epoch en milisegundos (`Date.now()`)
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let parsed = parse_timestamp(&s);
            if parsed.is_none() {
                warn!("⚠️ Fecha ilegible ignorada en snapshot: '{}'", s);
            }
            parsed
        }
        Some(Value::Number(n)) => {
            let parsed = n.as_i64().and_then(DateTime::<Utc>::from_timestamp_millis);
            if parsed.is_none() {
                warn!("⚠️ Epoch fuera de rango ignorado en snapshot: {}", n);
            }
            parsed
        }
        Some(other) => {
            warn!("⚠️ Fecha no textual ignorada en snapshot: {}", other);
            None
        }
    })
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    let text = match raw {
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::String(s)) => s,
        _ => return Ok(None),
    };
    match Decimal::from_str(text.trim()).or_else(|_| Decimal::from_scientific(text.trim())) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!("⚠️ Importe ilegible ignorado en snapshot: '{}' ({})", text, e);
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vehicle_snapshot_accepts_frontend_shape() {
        let id = Uuid::new_v4();
        let snapshot: VehicleSnapshot = serde_json::from_value(json!({
            "_id": id,
            "vehicleId": "EXC-001",
            "type": "Excavator",
            "status": "rented",
            "maintenanceStatus": "maintenance due",
            "expectedReturnDate": "2025-02-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(snapshot.id, id);
        assert_eq!(snapshot.status, Some(VehicleStatus::Rented));
        assert_eq!(snapshot.maintenance_status, Some(MaintenanceStatus::MaintenanceDue));
        assert!(snapshot.expected_return_date.is_some());
        assert_eq!(snapshot.label(), "EXC-001 (Excavator)");
    }

    #[test]
    fn test_vehicle_snapshot_degrades_malformed_fields() {
        let snapshot: VehicleSnapshot = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "status": "teleporting",
            "condition": 42,
            "expected_return_date": "someday"
        }))
        .unwrap();

        assert_eq!(snapshot.status, None);
        assert_eq!(snapshot.condition, None);
        assert_eq!(snapshot.expected_return_date, None);
        assert_eq!(snapshot.label(), "Unknown vehicle");
    }

    #[test]
    fn test_customer_snapshot_dues_as_number_or_string() {
        let from_number: CustomerSnapshot =
            serde_json::from_value(json!({ "id": Uuid::new_v4(), "outstandingDues": 2500.5 })).unwrap();
        assert_eq!(from_number.outstanding_dues, Some(Decimal::new(25005, 1)));

        let from_string: CustomerSnapshot =
            serde_json::from_value(json!({ "id": Uuid::new_v4(), "outstanding_dues": "1800" })).unwrap();
        assert_eq!(from_string.outstanding_dues, Some(Decimal::new(1800, 0)));

        let missing: CustomerSnapshot =
            serde_json::from_value(json!({ "id": Uuid::new_v4(), "outstanding_dues": "lots" })).unwrap();
        assert_eq!(missing.outstanding_dues, None);
    }

    #[test]
    fn test_timestamp_as_epoch_millis() {
        let snapshot: VehicleSnapshot = serde_json::from_value(json!({
            "id": Uuid::new_v4(),
            "status": "rented",
            "expectedReturnDate": 1_740_787_200_000_i64,
            "checkInTime": true
        }))
        .unwrap();

        assert_eq!(
            snapshot.expected_return_date,
            parse_timestamp("2025-03-01T00:00:00Z")
        );
        assert_eq!(snapshot.check_in_time, None);
    }

    #[derive(Debug, Deserialize)]
    struct Batch {
        #[serde(default, deserialize_with = "lenient_list")]
        customers: Vec<CustomerSnapshot>,
    }

    #[test]
    fn test_lenient_list_drops_entities_without_uuid() {
        let id = Uuid::new_v4();
        let batch: Batch = serde_json::from_value(json!({
            "customers": [
                { "id": id, "outstandingDues": 2500 },
                { "_id": "64a1b2c3d4e5f6a7b8c9d0e1", "outstandingDues": 100 },
                { "name": "No id", "outstandingDues": 100 }
            ]
        }))
        .unwrap();

        assert_eq!(batch.customers.len(), 1);
        assert_eq!(batch.customers[0].id, id);

        let not_a_list: Batch = serde_json::from_value(json!({ "customers": "all" })).unwrap();
        assert!(not_a_list.customers.is_empty());
    }
}

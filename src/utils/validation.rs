//! Utilidades de validación
//!
//! Este módulo contiene las expresiones regulares compartidas por los DTOs,
//! funciones `custom` para `validator` y helpers de conversión de fechas.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use validator::ValidationError;

lazy_static! {
    /// Mismo patrón que aceptaba el esquema Mongoose original
    pub static ref EMAIL_REGEX: Regex =
        Regex::new(r"^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$").unwrap();
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[\d\s\-()]+$").unwrap();
    /// Código de equipo: `EXC-001`, `DT-12A`, ...
    pub static ref VEHICLE_CODE_REGEX: Regex = Regex::new(r"^[A-Z0-9]+(-[A-Z0-9]+)*$").unwrap();
}

/// Interpretar una marca de tiempo en los formatos que envían los clientes.
///
/// Acepta RFC3339, `YYYY-MM-DDTHH:MM:SS` (asumido UTC) y `YYYY-MM-DD`
/// (medianoche UTC). Devuelve `None` si no se puede interpretar.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Validar que un string no esté vacío
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Validar formato de teléfono: caracteres permitidos y entre 10 y 15 dígitos
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !PHONE_REGEX.is_match(value) || !(10..=15).contains(&digits) {
        let mut error = ValidationError::new("phone");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe sea estrictamente positivo
pub fn validate_positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que un importe no sea negativo
pub fn validate_non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        let mut error = ValidationError::new("non_negative");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar formato de coordenadas GPS
pub fn validate_coordinates(lat: f64, lng: f64) -> Result<(), ValidationError> {
    if !(-90.0..=90.0).contains(&lat) {
        let mut error = ValidationError::new("latitude");
        error.add_param("value".into(), &lat);
        error.add_param("range".into(), &"-90.0 to 90.0".to_string());
        return Err(error);
    }

    if !(-180.0..=180.0).contains(&lng) {
        let mut error = ValidationError::new("longitude");
        error.add_param("value".into(), &lng);
        error.add_param("range".into(), &"-180.0 to 180.0".to_string());
        return Err(error);
    }

    Ok(())
}

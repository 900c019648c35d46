//! Modelos del sistema
//!
//! Este módulo contiene todos los modelos de datos que mapean exactamente
//! al schema PostgreSQL (ver `migrations/`).

pub mod alert;
pub mod customer;
pub mod dealer;
pub mod rental;
pub mod snapshot;
pub mod vehicle;

/// Normaliza un valor enumerado recibido como texto libre:
/// "Under Maintenance", "under-maintenance" y "under_maintenance" son equivalentes.
pub(crate) fn normalize_token(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

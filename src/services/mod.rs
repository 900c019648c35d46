//! Services module
//!
//! Este módulo contiene la lógica de negocio de la aplicación: el generador
//! de alertas, los agregados del dashboard, los filtros de inventario y la
//! geocerca.

pub mod alert_service;
pub mod dashboard_service;
pub mod geofence_service;
pub mod inventory_filter;

pub use alert_service::{generate_alerts, AlertFilter, AlertService, AlertSummary};
pub use geofence_service::{GeoPoint, GeofenceService, GeofenceZone};

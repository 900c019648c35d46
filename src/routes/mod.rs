//! Routers por recurso
//!
//! Cada módulo expone `create_*_router()`; `crate::create_app` los anida
//! bajo `/api`.

pub mod alert_routes;
pub mod customer_routes;
pub mod dashboard_routes;
pub mod dealer_routes;
pub mod geofence_routes;
pub mod health_routes;
pub mod rental_routes;
pub mod vehicle_routes;

//! Controllers
//!
//! Validan la entrada, coordinan repositorios y servicios y arman la
//! respuesta. Los handlers de `routes` solo extraen y delegan.

pub mod alert_controller;
pub mod customer_controller;
pub mod dashboard_controller;
pub mod dealer_controller;
pub mod rental_controller;
pub mod vehicle_controller;

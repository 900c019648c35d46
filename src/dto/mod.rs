//! DTOs de la API
//!
//! Requests, queries y responses que cruzan la frontera HTTP.

pub mod alert_dto;
pub mod common_dto;
pub mod customer_dto;
pub mod dashboard_dto;
pub mod dealer_dto;
pub mod rental_dto;
pub mod vehicle_dto;

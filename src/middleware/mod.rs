//! Middleware del sistema
//!
//! CORS y rate limiting por IP.

pub mod cors;
pub mod rate_limit;

pub use cors::*;
pub use rate_limit::*;

//! Repositorios
//!
//! Acceso a PostgreSQL con consultas `sqlx` en tiempo de ejecución.

pub mod customer_repository;
pub mod dealer_repository;
pub mod rental_repository;
pub mod snapshot_repository;
pub mod vehicle_repository;

pub use customer_repository::CustomerRepository;
pub use dealer_repository::DealerRepository;
pub use rental_repository::RentalRepository;
pub use snapshot_repository::{InMemorySnapshotSource, PgSnapshotRepository, SnapshotSource};
pub use vehicle_repository::VehicleRepository;

//! Cache
//!
//! Registro de incidencias de geocerca ya notificadas. Con `REDIS_URL`
//! configurado se usa Redis (compartido entre instancias); si no, un
//! registro en memoria del proceso.

pub mod cache_config;
pub mod memory_ledger;
pub mod redis_client;

use async_trait::async_trait;
use uuid::Uuid;

use crate::utils::errors::AppResult;

pub use cache_config::CacheConfig;
pub use memory_ledger::MemoryBreachLedger;
pub use redis_client::RedisClient;

/// Registro de vehículos fuera de zona ya reportados
#[async_trait]
pub trait BreachLedger: Send + Sync {
    /// Marca el vehículo como fuera de zona. Devuelve `true` solo si la
    /// incidencia es nueva (hay que notificarla).
    async fn mark_breached(&self, vehicle_id: Uuid) -> AppResult<bool>;

    /// El vehículo volvió a la zona: la próxima salida se notifica de nuevo
    async fn clear(&self, vehicle_id: Uuid) -> AppResult<()>;
}

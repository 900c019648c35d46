use anyhow::Result;
use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, RedisResult};
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::{BreachLedger, CacheConfig};
use crate::utils::errors::{AppError, AppResult};

/// Cliente Redis con connection manager async
#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
    config: CacheConfig,
}

impl RedisClient {
    /// Crear nuevo cliente Redis
    pub async fn new(config: CacheConfig) -> Result<Self> {
        info!("🔗 Conectando a Redis: {}", config.redis_url);

        let client = redis::Client::open(config.redis_url.clone())?;
        let manager = ConnectionManager::new(client).await?;

        let mut conn = manager.clone();
        let _: () = redis::cmd("PING").query_async(&mut conn).await?;

        info!("✅ Redis conectado exitosamente");

        Ok(Self { manager, config })
    }
}

#[async_trait]
impl BreachLedger for RedisClient {
    async fn mark_breached(&self, vehicle_id: Uuid) -> AppResult<bool> {
        let mut conn = self.manager.clone();
        let key = self.config.breach_key(vehicle_id);

        // SET NX: solo el primer reporte fuera de zona crea la clave
        let result: RedisResult<Option<String>> = redis::cmd("SET")
            .arg(&key)
            .arg(chrono::Utc::now().to_rfc3339())
            .arg("NX")
            .arg("EX")
            .arg(self.config.breach_ttl)
            .query_async(&mut conn)
            .await;

        match result {
            Ok(created) => {
                debug!("💾 Incidencia {} (nueva: {})", key, created.is_some());
                Ok(created.is_some())
            }
            Err(e) => {
                warn!("⚠️ Error registrando incidencia {}: {}", key, e);
                Err(AppError::ServiceUnavailable(format!("Redis: {}", e)))
            }
        }
    }

    async fn clear(&self, vehicle_id: Uuid) -> AppResult<()> {
        let mut conn = self.manager.clone();
        let key = self.config.breach_key(vehicle_id);

        let result: RedisResult<i64> = conn.del(&key).await;
        match result {
            Ok(count) => {
                debug!("🗑️ Incidencia {} eliminada ({})", key, count);
                Ok(())
            }
            Err(e) => {
                warn!("⚠️ Error eliminando incidencia {}: {}", key, e);
                Err(AppError::ServiceUnavailable(format!("Redis: {}", e)))
            }
        }
    }
}

//! Configuración de cache

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Configuración del cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    pub redis_url: String,
    /// Vida de una incidencia registrada; pasado este tiempo se vuelve a notificar
    pub breach_ttl: u64,
    pub key_prefix: String,
}

impl CacheConfig {
    pub fn new(redis_url: impl Into<String>) -> Self {
        Self {
            redis_url: redis_url.into(),
            ..Default::default()
        }
    }

    /// Generar clave con prefijo
    fn make_key(&self, prefix: &str, identifier: &str) -> String {
        format!("{}:{}:{}", self.key_prefix, prefix, identifier)
    }

    pub fn breach_key(&self, vehicle_id: Uuid) -> String {
        self.make_key("geofence_breach", &vehicle_id.to_string())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: "redis://localhost:6379".to_string(),
            breach_ttl: 86_400, // 24 horas
            key_prefix: "ecotrack".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breach_key_uses_prefix() {
        let config = CacheConfig::new("redis://cache:6379");
        let id = Uuid::nil();

        assert_eq!(config.redis_url, "redis://cache:6379");
        assert_eq!(config.breach_ttl, 86_400);
        assert_eq!(
            config.breach_key(id),
            "ecotrack:geofence_breach:00000000-0000-0000-0000-000000000000"
        );
    }
}

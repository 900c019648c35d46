//! Configuración de variables de entorno
//!
//! Todas las variables tienen un valor por defecto salvo `DATABASE_URL`.
//! Un valor presente pero inválido es un error de configuración: el proceso
//! no arranca con una configuración a medias.

use std::env;
use std::fmt::Display;
use std::str::FromStr;

use thiserror::Error;

use crate::services::geofence_service::{GeoPoint, GeofenceZone};

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value '{value}': {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub redis_url: Option<String>,
    pub cors_origins: Vec<String>,
    pub rate_limit_requests: u32,
    /// Ventana del rate limit en segundos
    pub rate_limit_window: u64,
    pub request_timeout_secs: u64,
    pub geofence_center_lat: f64,
    pub geofence_center_lng: f64,
    pub geofence_radius_meters: f64,
    pub geofence_webhook_url: Option<String>,
}

impl EnvironmentConfig {
    /// Leer la configuración de las variables de entorno del proceso
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Construir la configuración a partir de una función de búsqueda de claves
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let config = Self {
            environment: get("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or("PORT", get("PORT"), 5000)?,
            database_url: get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,
            redis_url: get("REDIS_URL"),
            cors_origins: get("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_else(|| vec!["http://localhost:5173".to_string()]),
            rate_limit_requests: parse_or("RATE_LIMIT_REQUESTS", get("RATE_LIMIT_REQUESTS"), 100)?,
            rate_limit_window: parse_or("RATE_LIMIT_WINDOW", get("RATE_LIMIT_WINDOW"), 900)?,
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), 30)?,
            geofence_center_lat: parse_or("GEOFENCE_CENTER_LAT", get("GEOFENCE_CENTER_LAT"), 12.9165)?,
            geofence_center_lng: parse_or("GEOFENCE_CENTER_LNG", get("GEOFENCE_CENTER_LNG"), 79.1325)?,
            geofence_radius_meters: parse_or(
                "GEOFENCE_RADIUS_METERS",
                get("GEOFENCE_RADIUS_METERS"),
                22_000.0,
            )?,
            geofence_webhook_url: get("GEOFENCE_WEBHOOK_URL"),
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |key: &'static str, value: String, reason: &str| ConfigError::Invalid {
            key,
            value,
            reason: reason.to_string(),
        };

        if !(-90.0..=90.0).contains(&self.geofence_center_lat) {
            return Err(invalid(
                "GEOFENCE_CENTER_LAT",
                self.geofence_center_lat.to_string(),
                "latitude out of range",
            ));
        }
        if !(-180.0..=180.0).contains(&self.geofence_center_lng) {
            return Err(invalid(
                "GEOFENCE_CENTER_LNG",
                self.geofence_center_lng.to_string(),
                "longitude out of range",
            ));
        }
        if self.geofence_radius_meters <= 0.0 {
            return Err(invalid(
                "GEOFENCE_RADIUS_METERS",
                self.geofence_radius_meters.to_string(),
                "radius must be positive",
            ));
        }
        if self.rate_limit_window == 0 {
            return Err(invalid("RATE_LIMIT_WINDOW", "0".to_string(), "window must be positive"));
        }
        Ok(())
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn geofence_zone(&self) -> GeofenceZone {
        GeofenceZone {
            center: GeoPoint::new(self.geofence_center_lat, self.geofence_center_lng),
            radius_meters: self.geofence_radius_meters,
        }
    }
}

fn parse_or<T>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match raw {
        None => Ok(default),
        Some(value) => value.parse::<T>().map_err(|e| ConfigError::Invalid {
            key,
            reason: e.to_string(),
            value,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            EnvironmentConfig::from_lookup(lookup(&[("DATABASE_URL", "postgres://localhost/ecotrack")]))
                .unwrap();

        assert!(config.is_development());
        assert_eq!(config.port, 5000);
        assert_eq!(config.rate_limit_requests, 100);
        assert_eq!(config.rate_limit_window, 900);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.redis_url, None);
        assert_eq!(config.geofence_zone().radius_meters, 22_000.0);
        assert_eq!(config.geofence_zone().center, GeoPoint::new(12.9165, 79.1325));
        assert_eq!(config.server_url(), "0.0.0.0:5000");
    }

    #[test]
    fn test_missing_database_url() {
        let err = EnvironmentConfig::from_lookup(lookup(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("DATABASE_URL"));
    }

    #[test]
    fn test_invalid_number_is_an_error() {
        let err = EnvironmentConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/ecotrack"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "PORT", .. }));

        let err = EnvironmentConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/ecotrack"),
            ("GEOFENCE_CENTER_LAT", "123.0"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "GEOFENCE_CENTER_LAT", .. }));
    }

    #[test]
    fn test_cors_origins_and_webhook() {
        let config = EnvironmentConfig::from_lookup(lookup(&[
            ("DATABASE_URL", "postgres://localhost/ecotrack"),
            ("ENVIRONMENT", "production"),
            ("CORS_ORIGINS", "https://app.ecotrack.in, https://admin.ecotrack.in,"),
            ("GEOFENCE_WEBHOOK_URL", "https://hooks.ecotrack.in/geofence"),
        ]))
        .unwrap();

        assert!(config.is_production());
        assert_eq!(
            config.cors_origins,
            vec!["https://app.ecotrack.in", "https://admin.ecotrack.in"]
        );
        assert_eq!(
            config.geofence_webhook_url.as_deref(),
            Some("https://hooks.ecotrack.in/geofence")
        );
    }
}

//! Middleware de Rate Limiting
//!
//! Ventana fija por IP sobre `/api/*`. Por defecto 100 peticiones cada
//! 15 minutos.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tokio::sync::RwLock;
use tracing::warn;

use crate::config::EnvironmentConfig;
use crate::utils::errors::{AppError, AppResult};

/// Información de rate limiting por IP
#[derive(Debug, Clone)]
struct RateLimitInfo {
    requests: u32,
    window_start: Instant,
}

/// Estado global del rate limiting
#[derive(Clone)]
pub struct RateLimitState {
    requests: Arc<RwLock<HashMap<String, RateLimitInfo>>>,
    max_requests: u32,
    window_duration: Duration,
}

impl RateLimitState {
    pub fn new(max_requests: u32, window_duration: Duration) -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
            max_requests,
            window_duration,
        }
    }

    pub fn from_config(config: &EnvironmentConfig) -> Self {
        Self::new(
            config.rate_limit_requests,
            Duration::from_secs(config.rate_limit_window),
        )
    }

    /// Registra una petición de `ip`; devuelve las peticiones restantes en la ventana
    pub async fn check_rate_limit(&self, ip: &str) -> AppResult<u32> {
        let mut requests = self.requests.write().await;
        let now = Instant::now();

        // Limpiar entradas expiradas
        requests.retain(|_, info| now.duration_since(info.window_start) < self.window_duration);

        let info = requests.entry(ip.to_string()).or_insert(RateLimitInfo {
            requests: 0,
            window_start: now,
        });

        if info.requests >= self.max_requests {
            warn!("🚦 Límite alcanzado para {}", ip);
            return Err(AppError::RateLimitExceeded);
        }

        info.requests += 1;
        Ok(self.max_requests - info.requests)
    }
}

/// IP del cliente: primer salto de `x-forwarded-for`, `x-real-ip` o la conexión
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|v| v.split(',').next())
        .or_else(|| headers.get("x-real-ip").and_then(|h| h.to_str().ok()))
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty())
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}

/// Middleware de rate limiting
pub async fn rate_limit_middleware(
    State(rate_limit_state): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let ip = client_ip(request.headers(), peer);

    let remaining = rate_limit_state.check_rate_limit(&ip).await?;

    let mut response = next.run(request).await;
    let headers = response.headers_mut();
    headers.insert("ratelimit-limit", HeaderValue::from(rate_limit_state.max_requests));
    headers.insert("ratelimit-remaining", HeaderValue::from(remaining));
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_limit_per_ip() {
        let state = RateLimitState::new(2, Duration::from_secs(60));

        assert_eq!(state.check_rate_limit("10.0.0.1").await.unwrap(), 1);
        assert_eq!(state.check_rate_limit("10.0.0.1").await.unwrap(), 0);
        assert!(matches!(
            state.check_rate_limit("10.0.0.1").await,
            Err(AppError::RateLimitExceeded)
        ));
        // Otra IP tiene su propia ventana
        assert!(state.check_rate_limit("10.0.0.2").await.is_ok());
    }

    #[tokio::test]
    async fn test_window_resets() {
        let state = RateLimitState::new(1, Duration::from_millis(20));
        assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
        assert!(state.check_rate_limit("10.0.0.1").await.is_err());

        tokio::time::sleep(Duration::from_millis(40)).await;
        assert!(state.check_rate_limit("10.0.0.1").await.is_ok());
    }

    #[test]
    fn test_client_ip() {
        let mut headers = HeaderMap::new();
        let peer: SocketAddr = "192.168.1.20:5555".parse().unwrap();
        assert_eq!(client_ip(&headers, Some(peer)), "192.168.1.20");
        assert_eq!(client_ip(&headers, None), "unknown");

        headers.insert("x-real-ip", HeaderValue::from_static("172.16.0.9"));
        assert_eq!(client_ip(&headers, Some(peer)), "172.16.0.9");

        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        assert_eq!(client_ip(&headers, Some(peer)), "203.0.113.7");
    }
}

//! EcoTrack rental backend
//!
//! API de gestión de alquiler de maquinaria: dealers, clientes, flota,
//! alquileres, alertas operativas derivadas, dashboard y geocerca.

pub mod cache;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::{extract::DefaultBodyLimit, middleware::from_fn_with_state, Router};
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{compression::CompressionLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::middleware::{cors_layer, rate_limit_middleware, RateLimitState};
use crate::routes::{
    alert_routes, customer_routes, dashboard_routes, dealer_routes, geofence_routes, health_routes,
    rental_routes, vehicle_routes,
};
use crate::state::AppState;

/// Tamaño máximo del cuerpo de una petición
pub const MAX_BODY_BYTES: usize = 10 * 1024 * 1024;
/// Peticiones concurrentes atendidas antes de encolar
pub const MAX_CONCURRENT_REQUESTS: usize = 512;

/// Construir el router completo de la aplicación
pub fn create_app(state: AppState) -> Router {
    let rate_limit = RateLimitState::from_config(&state.config);

    let api = Router::new()
        .nest("/dealer", dealer_routes::create_dealer_router())
        .nest("/customer", customer_routes::create_customer_router())
        .nest("/vehicle", vehicle_routes::create_vehicle_router())
        .nest("/rental", rental_routes::create_rental_router())
        .nest("/alert", alert_routes::create_alert_router())
        .nest("/dashboard", dashboard_routes::create_dashboard_router())
        .nest("/geofence", geofence_routes::create_geofence_router())
        .layer(from_fn_with_state(rate_limit, rate_limit_middleware));

    Router::new()
        .merge(health_routes::create_health_router())
        .nest("/api", api)
        .fallback(health_routes::not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TimeoutLayer::new(Duration::from_secs(state.config.request_timeout_secs)))
        .layer(GlobalConcurrencyLimitLayer::new(MAX_CONCURRENT_REQUESTS))
        .layer(CompressionLayer::new())
        .layer(cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum.

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::cache::BreachLedger;
use crate::config::environment::EnvironmentConfig;
use crate::repositories::snapshot_repository::SnapshotSource;
use crate::services::alert_service::AlertService;
use crate::services::geofence_service::{BreachNotifier, GeofenceService, WebhookNotifier};
use crate::utils::errors::AppResult;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<EnvironmentConfig>,
    pub alerts: AlertService,
    pub geofence: GeofenceService,
}

impl AppState {
    /// Construir el estado con las fuentes de datos inyectadas
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        snapshots: Arc<dyn SnapshotSource>,
        ledger: Arc<dyn BreachLedger>,
    ) -> AppResult<Self> {
        let notifier: Option<Arc<dyn BreachNotifier>> = match &config.geofence_webhook_url {
            Some(url) => {
                info!("📧 Notificaciones de geocerca vía webhook habilitadas");
                Some(Arc::new(WebhookNotifier::new(url.clone())?))
            }
            None => {
                info!("📭 Sin GEOFENCE_WEBHOOK_URL: las salidas de zona solo se registran en el log");
                None
            }
        };

        let geofence = GeofenceService::new(config.geofence_zone(), ledger, notifier);

        Ok(Self {
            pool,
            config: Arc::new(config),
            alerts: AlertService::new(snapshots),
            geofence,
        })
    }
}

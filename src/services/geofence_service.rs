//! Servicio de geocerca
//!
//! Comprueba si la posición reportada por un equipo está dentro de la zona
//! de operación (círculo centro + radio). La primera salida de zona se
//! notifica por webhook; las siguientes no, hasta que el equipo vuelve a
//! entrar. El registro de incidencias ya notificadas vive en un
//! `BreachLedger` (Redis o memoria).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, warn};

use crate::cache::BreachLedger;
use crate::models::vehicle::{Vehicle, VehicleStatus};
use crate::utils::errors::{AppError, AppResult};

/// Radio medio de la Tierra en metros
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Distancia de gran círculo (haversine) en metros
pub fn haversine_distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let phi1 = a.latitude.to_radians();
    let phi2 = b.latitude.to_radians();
    let d_phi = (b.latitude - a.latitude).to_radians();
    let d_lambda = (b.longitude - a.longitude).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_METERS * c
}

/// Zona de operación permitida
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeofenceZone {
    pub center: GeoPoint,
    pub radius_meters: f64,
}

impl GeofenceZone {
    pub fn distance_from_center(&self, point: GeoPoint) -> f64 {
        haversine_distance_m(self.center, point)
    }

    /// El borde del círculo cuenta como dentro
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.distance_from_center(point) <= self.radius_meters
    }
}

/// Contenido de la notificación de salida de zona
#[derive(Debug, Clone, Serialize)]
pub struct GeofenceBreach {
    pub vehicle_id: String,
    pub vehicle_type: String,
    pub vehicle_model: String,
    pub vehicle_status: VehicleStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_km: String,
    pub description: String,
    pub detected_at: DateTime<Utc>,
}

/// Resultado de evaluar una posición
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeofenceCheck {
    pub inside_zone: bool,
    pub distance_meters: f64,
    pub notified: bool,
}

impl GeofenceCheck {
    /// Distancia en km con dos decimales
    pub fn distance_km(&self) -> String {
        format_km(self.distance_meters)
    }
}

fn format_km(meters: f64) -> String {
    format!("{:.2}", meters / 1000.0)
}

#[async_trait]
pub trait BreachNotifier: Send + Sync {
    async fn notify(&self, breach: &GeofenceBreach) -> AppResult<()>;
}

/// Envía la incidencia como JSON a un webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: impl Into<String>) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl BreachNotifier for WebhookNotifier {
    async fn notify(&self, breach: &GeofenceBreach) -> AppResult<()> {
        let response = self
            .client
            .post(&self.url)
            .json(breach)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("webhook request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::ExternalApi(format!("webhook responded with {}", status)));
        }
        Ok(())
    }
}

#[derive(Clone)]
pub struct GeofenceService {
    zone: GeofenceZone,
    ledger: Arc<dyn BreachLedger>,
    notifier: Option<Arc<dyn BreachNotifier>>,
}

impl GeofenceService {
    pub fn new(
        zone: GeofenceZone,
        ledger: Arc<dyn BreachLedger>,
        notifier: Option<Arc<dyn BreachNotifier>>,
    ) -> Self {
        Self { zone, ledger, notifier }
    }

    pub fn zone(&self) -> GeofenceZone {
        self.zone
    }

    /// Evalúa la posición del vehículo y notifica la salida de zona si es nueva.
    ///
    /// Los fallos del registro o del webhook se registran en el log y nunca
    /// se propagan: el reporte de posición ya está guardado.
    pub async fn check(&self, vehicle: &Vehicle, point: GeoPoint) -> GeofenceCheck {
        let distance_meters = self.zone.distance_from_center(point);
        let inside_zone = distance_meters <= self.zone.radius_meters;

        if inside_zone {
            if let Err(e) = self.ledger.clear(vehicle.id).await {
                warn!("⚠️ No se pudo limpiar la incidencia de {}: {}", vehicle.vehicle_code, e);
            }
            return GeofenceCheck {
                inside_zone,
                distance_meters,
                notified: false,
            };
        }

        let is_new = match self.ledger.mark_breached(vehicle.id).await {
            Ok(is_new) => is_new,
            Err(e) => {
                error!("❌ Registro de incidencias no disponible para {}: {}", vehicle.vehicle_code, e);
                false
            }
        };

        let notified = is_new && self.notify(vehicle, point, distance_meters).await;
        GeofenceCheck {
            inside_zone,
            distance_meters,
            notified,
        }
    }

    async fn notify(&self, vehicle: &Vehicle, point: GeoPoint, distance_meters: f64) -> bool {
        let distance_km = format_km(distance_meters);
        warn!(
            "🚨 {} fuera de la zona permitida: {} km del centro",
            vehicle.vehicle_code, distance_km
        );

        let Some(notifier) = &self.notifier else {
            return false;
        };

        let breach = GeofenceBreach {
            vehicle_id: vehicle.vehicle_code.clone(),
            vehicle_type: vehicle.vehicle_type.clone(),
            vehicle_model: vehicle.model.clone(),
            vehicle_status: vehicle.status,
            latitude: point.latitude,
            longitude: point.longitude,
            description: format!(
                "{} ({}) has exceeded the allowed perimeter",
                vehicle.vehicle_code, vehicle.vehicle_type
            ),
            distance_km,
            detected_at: Utc::now(),
        };

        match notifier.notify(&breach).await {
            Ok(()) => {
                info!("📧 Notificación de geocerca enviada para {}", vehicle.vehicle_code);
                true
            }
            Err(e) => {
                // Sin notificación entregada, el próximo reporte fuera de zona lo reintenta
                error!("❌ Error notificando incidencia de {}: {}", vehicle.vehicle_code, e);
                if let Err(e) = self.ledger.clear(vehicle.id).await {
                    warn!("⚠️ No se pudo limpiar la incidencia de {}: {}", vehicle.vehicle_code, e);
                }
                false
            }
        }
    }
}

use chrono::Utc;
use tracing::info;

use crate::dto::alert_dto::{AlertListResponse, AlertQuery, EvaluateAlertsRequest};
use crate::services::alert_service::{generate_alerts, AlertFilter, AlertService, AlertSummary};
use crate::utils::errors::AppResult;

pub struct AlertController {
    service: AlertService,
}

impl AlertController {
    pub fn new(service: AlertService) -> Self {
        Self { service }
    }

    /// Alertas actuales del dealer, filtradas a posteriori
    pub async fn list(&self, query: AlertQuery) -> AppResult<AlertListResponse> {
        let filter = AlertFilter::from_query(&query)?;
        let now = Utc::now();

        let alerts = self.service.alerts_at(query.dealer_id, now).await?;
        let summary = AlertSummary::from_alerts(&alerts);

        Ok(AlertListResponse {
            alerts: filter.apply(alerts),
            summary,
            generated_at: now,
        })
    }

    /// Alertas sobre snapshots enviados en la petición
    pub fn evaluate(&self, request: EvaluateAlertsRequest) -> AlertListResponse {
        let now = request.now.unwrap_or_else(Utc::now);
        let alerts = generate_alerts(&request.customers, &request.vehicles, now);
        info!(
            "🧮 Evaluación ad hoc: {} clientes, {} vehículos, {} alertas",
            request.customers.len(),
            request.vehicles.len(),
            alerts.len()
        );

        AlertListResponse {
            summary: AlertSummary::from_alerts(&alerts),
            alerts,
            generated_at: now,
        }
    }
}

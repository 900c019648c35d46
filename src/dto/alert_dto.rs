use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::alert::Alert;
use crate::models::snapshot::{lenient_list, CustomerSnapshot, VehicleSnapshot};
use crate::services::alert_service::AlertSummary;

// Filtros a posteriori; "all" o ausente = sin filtro
#[derive(Debug, Default, Deserialize)]
pub struct AlertQuery {
    pub dealer_id: Option<Uuid>,
    pub category: Option<String>,
    pub priority: Option<String>,
}

// Evaluación sobre snapshots enviados por el cliente
#[derive(Debug, Deserialize)]
pub struct EvaluateAlertsRequest {
    #[serde(default, deserialize_with = "lenient_list")]
    pub customers: Vec<CustomerSnapshot>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub vehicles: Vec<VehicleSnapshot>,
    /// Instante de evaluación; por defecto ahora
    pub now: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct AlertListResponse {
    pub alerts: Vec<Alert>,
    /// Conteos sobre el conjunto completo, antes de filtrar
    pub summary: AlertSummary,
    pub generated_at: DateTime<Utc>,
}

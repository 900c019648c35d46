use chrono::Utc;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::dto::dashboard_dto::{CustomerUsage, DashboardStats};
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::alert_service::AlertService;
use crate::services::dashboard_service::{customer_usage, dashboard_stats, decimal_to_f64};
use crate::utils::errors::{not_found_error, AppResult};

pub struct DashboardController {
    customers: CustomerRepository,
    vehicles: VehicleRepository,
    alerts: AlertService,
}

impl DashboardController {
    pub fn new(pool: PgPool, alerts: AlertService) -> Self {
        Self {
            customers: CustomerRepository::new(pool.clone()),
            vehicles: VehicleRepository::new(pool),
            alerts,
        }
    }

    pub async fn stats(&self, dealer_id: Option<Uuid>) -> AppResult<DashboardStats> {
        let now = Utc::now();
        let (customers, vehicles, alerts) = futures::try_join!(
            self.customers.list(dealer_id),
            self.vehicles.list(dealer_id),
            self.alerts.alerts_at(dealer_id, now),
        )?;

        let stats = dashboard_stats(&customers, &vehicles, &alerts, now);
        debug!(
            "📊 Dashboard: {} clientes, {} vehículos, deuda total {:.2}",
            stats.total_customers,
            stats.total_vehicles,
            decimal_to_f64(stats.total_outstanding_dues)
        );
        Ok(stats)
    }

    pub async fn customer_usage(&self, customer_id: Uuid) -> AppResult<CustomerUsage> {
        if self.customers.find_by_id(customer_id).await?.is_none() {
            return Err(not_found_error("Customer", customer_id));
        }

        let vehicles = self.vehicles.rented_by_customer(customer_id).await?;
        Ok(customer_usage(customer_id, &vehicles))
    }
}

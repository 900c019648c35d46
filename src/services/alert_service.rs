//! Generador de alertas
//!
//! Deriva una lista priorizada de alertas operativas a partir de snapshots de
//! clientes y vehículos. `generate_alerts` es una función pura: no guarda
//! estado, no hace I/O y nunca falla; una entidad mal formada simplemente no
//! dispara la regla que necesita el campo ausente.
//!
//! `AlertService` es la capa fina que obtiene los snapshots a través de un
//! `SnapshotSource` inyectado y llama al generador.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::models::alert::{Alert, AlertCategory, AlertPriority};
use crate::models::snapshot::{CustomerSnapshot, VehicleSnapshot};
use crate::models::vehicle::{MaintenanceStatus, VehicleCondition, VehicleStatus};
use crate::repositories::snapshot_repository::SnapshotSource;
use crate::utils::errors::AppResult;

/// Deuda a partir de la cual una alerta de pago es de prioridad alta
pub const HIGH_DUES_THRESHOLD: i64 = 2000;
/// Días de retraso a partir de los cuales un alquiler vencido es prioridad alta
pub const HIGH_OVERDUE_DAYS: i64 = 7;
/// Días de retraso a partir de los cuales un alquiler vencido es prioridad media
pub const MEDIUM_OVERDUE_DAYS: i64 = 3;

/// Calcular las alertas para el instante `now`.
///
/// El resultado queda ordenado por prioridad descendente (high, medium, low).
/// El orden es estable: a igual prioridad se conserva el orden de generación
/// (pagos, alquileres vencidos, mantenimiento, devoluciones dañadas, cada
/// grupo en el orden de entrada).
pub fn generate_alerts(
    customers: &[CustomerSnapshot],
    vehicles: &[VehicleSnapshot],
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = Vec::new();

    alerts.extend(customers.iter().filter_map(|c| overdue_payment_alert(c, now)));
    alerts.extend(vehicles.iter().filter_map(|v| overdue_rental_alert(v, now)));
    alerts.extend(vehicles.iter().filter_map(|v| maintenance_due_alert(v, now)));
    alerts.extend(vehicles.iter().filter_map(|v| damaged_return_alert(v, now)));

    // sort_by es estable
    alerts.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
    alerts
}

/// Prioridad de una deuda pendiente (> 0)
pub fn payment_priority(dues: Decimal) -> AlertPriority {
    if dues > Decimal::from(HIGH_DUES_THRESHOLD) {
        AlertPriority::High
    } else {
        AlertPriority::Medium
    }
}

/// Prioridad de un alquiler vencido según los días completos de retraso
pub fn overdue_rental_priority(days_overdue: i64) -> AlertPriority {
    if days_overdue > HIGH_OVERDUE_DAYS {
        AlertPriority::High
    } else if days_overdue > MEDIUM_OVERDUE_DAYS {
        AlertPriority::Medium
    } else {
        AlertPriority::Low
    }
}

/// Días completos transcurridos desde `expected` (redondeo hacia abajo)
pub fn days_overdue(expected: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - expected).num_days()
}

fn alert_id(category: AlertCategory, entity: Uuid) -> String {
    format!("{}:{}", category.as_str(), entity)
}

fn overdue_payment_alert(customer: &CustomerSnapshot, now: DateTime<Utc>) -> Option<Alert> {
    let dues = customer.outstanding_dues?;
    if dues <= Decimal::ZERO {
        return None;
    }

    let category = AlertCategory::OverduePayment;
    let name = customer
        .name
        .clone()
        .unwrap_or_else(|| format!("Customer {}", customer.id));

    Some(Alert {
        id: alert_id(category, customer.id),
        category,
        priority: payment_priority(dues),
        title: category.title().to_string(),
        description: format!("{} has outstanding dues of ${}", name, format_amount(dues)),
        customer_id: Some(customer.id),
        vehicle_id: None,
        vehicle_code: None,
        due_date: None,
        amount: Some(dues),
        created_at: now,
    })
}

fn overdue_rental_alert(vehicle: &VehicleSnapshot, now: DateTime<Utc>) -> Option<Alert> {
    if vehicle.status? != VehicleStatus::Rented {
        return None;
    }
    let expected = vehicle.expected_return_date?;
    if expected >= now {
        return None;
    }

    let days = days_overdue(expected, now);
    let category = AlertCategory::OverdueRental;

    Some(Alert {
        id: alert_id(category, vehicle.id),
        category,
        priority: overdue_rental_priority(days),
        title: category.title().to_string(),
        description: format!("{} is {} day(s) overdue", vehicle.label(), days),
        customer_id: vehicle.renter_id,
        vehicle_id: Some(vehicle.id),
        vehicle_code: vehicle.vehicle_code.clone(),
        due_date: Some(expected),
        amount: None,
        created_at: now,
    })
}

fn maintenance_due_alert(vehicle: &VehicleSnapshot, now: DateTime<Utc>) -> Option<Alert> {
    if vehicle.maintenance_status? != MaintenanceStatus::MaintenanceDue {
        return None;
    }

    let category = AlertCategory::MaintenanceDue;
    Some(Alert {
        id: alert_id(category, vehicle.id),
        category,
        priority: AlertPriority::Medium,
        title: category.title().to_string(),
        description: format!("{} requires maintenance", vehicle.label()),
        customer_id: None,
        vehicle_id: Some(vehicle.id),
        vehicle_code: vehicle.vehicle_code.clone(),
        due_date: None,
        amount: None,
        created_at: now,
    })
}

/// Devuelto dañado: condición `damaged`, tiene check-in y no volvió a salir
fn damaged_return_alert(vehicle: &VehicleSnapshot, now: DateTime<Utc>) -> Option<Alert> {
    if vehicle.condition? != VehicleCondition::Damaged {
        return None;
    }
    let returned_at = vehicle.check_in_time?;
    if vehicle.status? == VehicleStatus::Rented {
        return None;
    }

    let category = AlertCategory::DamagedReturn;
    Some(Alert {
        id: alert_id(category, vehicle.id),
        category,
        priority: AlertPriority::High,
        title: category.title().to_string(),
        description: format!(
            "{} returned with damage on {}",
            vehicle.label(),
            returned_at.format("%Y-%m-%d")
        ),
        customer_id: vehicle.renter_id,
        vehicle_id: Some(vehicle.id),
        vehicle_code: vehicle.vehicle_code.clone(),
        due_date: None,
        amount: None,
        created_at: now,
    })
}

/// `2500` -> `2,500.00`
fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let text = rounded.abs().to_string();
    let (digits, frac_part) = match text.split_once('.') {
        Some((int_part, frac)) => (int_part.to_string(), format!("{:0<2}", frac)),
        None => (text.clone(), "00".to_string()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}.{}", sign, grouped, frac_part)
}

/// Filtro a posteriori por categoría y/o prioridad
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlertFilter {
    pub category: Option<AlertCategory>,
    pub priority: Option<AlertPriority>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        self.category.map_or(true, |c| c == alert.category)
            && self.priority.map_or(true, |p| p == alert.priority)
    }

    pub fn apply(&self, alerts: Vec<Alert>) -> Vec<Alert> {
        alerts.into_iter().filter(|a| self.matches(a)).collect()
    }
}

/// Conteos por categoría y prioridad (tarjetas de la vista de alertas)
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct AlertSummary {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub overdue_rental: usize,
    pub overdue_payment: usize,
    pub damaged_return: usize,
    pub maintenance_due: usize,
}

impl AlertSummary {
    pub fn from_alerts(alerts: &[Alert]) -> Self {
        let mut summary = AlertSummary {
            total: alerts.len(),
            ..Default::default()
        };
        for alert in alerts {
            match alert.priority {
                AlertPriority::High => summary.high += 1,
                AlertPriority::Medium => summary.medium += 1,
                AlertPriority::Low => summary.low += 1,
            }
            match alert.category {
                AlertCategory::OverdueRental => summary.overdue_rental += 1,
                AlertCategory::OverduePayment => summary.overdue_payment += 1,
                AlertCategory::DamagedReturn => summary.damaged_return += 1,
                AlertCategory::MaintenanceDue => summary.maintenance_due += 1,
            }
        }
        summary
    }
}

/// Servicio de alertas sobre una fuente de datos inyectada
#[derive(Clone)]
pub struct AlertService {
    source: Arc<dyn SnapshotSource>,
}

impl AlertService {
    pub fn new(source: Arc<dyn SnapshotSource>) -> Self {
        Self { source }
    }

    /// Alertas actuales para un dealer (o para todos si `dealer_id` es `None`)
    pub async fn current_alerts(&self, dealer_id: Option<Uuid>) -> AppResult<Vec<Alert>> {
        self.alerts_at(dealer_id, Utc::now()).await
    }

    pub async fn alerts_at(&self, dealer_id: Option<Uuid>, now: DateTime<Utc>) -> AppResult<Vec<Alert>> {
        let (customers, vehicles) = futures::try_join!(
            self.source.customer_snapshots(dealer_id),
            self.source.vehicle_snapshots(dealer_id),
        )?;
        debug!(
            "🔍 Evaluando alertas: {} clientes, {} vehículos",
            customers.len(),
            vehicles.len()
        );

        let alerts = generate_alerts(&customers, &vehicles, now);
        info!("🚨 {} alertas generadas (dealer: {:?})", alerts.len(), dealer_id);
        Ok(alerts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::snapshot_repository::InMemorySnapshotSource;
    use chrono::Duration;

    fn customer(name: &str, dues: Option<i64>) -> CustomerSnapshot {
        CustomerSnapshot {
            id: Uuid::new_v4(),
            name: Some(name.to_string()),
            outstanding_dues: dues.map(Decimal::from),
        }
    }

    fn vehicle(status: Option<VehicleStatus>, expected: Option<DateTime<Utc>>) -> VehicleSnapshot {
        VehicleSnapshot {
            id: Uuid::new_v4(),
            vehicle_code: Some("EXC-001".to_string()),
            vehicle_type: Some("Excavator".to_string()),
            status,
            condition: Some(VehicleCondition::Good),
            maintenance_status: Some(MaintenanceStatus::Operational),
            expected_return_date: expected,
            check_in_time: None,
            renter_id: None,
        }
    }

    #[test]
    fn test_no_payment_alert_for_zero_dues() {
        let now = Utc::now();
        let alerts = generate_alerts(&[customer("Arun", Some(0))], &[], now);
        assert!(alerts.is_empty());
    }

    #[test]
    fn test_payment_priority_thresholds() {
        let now = Utc::now();
        let high = customer("Big Build Co", Some(2500));
        let edge = customer("Edge Works", Some(2000));
        let small = customer("Small Farm", Some(150));

        let alerts = generate_alerts(&[small.clone(), edge.clone(), high.clone()], &[], now);
        assert_eq!(alerts.len(), 3);

        let by_customer = |id: Uuid| alerts.iter().find(|a| a.customer_id == Some(id)).unwrap();
        assert_eq!(by_customer(high.id).priority, AlertPriority::High);
        assert_eq!(by_customer(edge.id).priority, AlertPriority::Medium);
        assert_eq!(by_customer(small.id).priority, AlertPriority::Medium);
        assert_eq!(by_customer(high.id).amount, Some(Decimal::from(2500)));
        assert_eq!(
            by_customer(high.id).description,
            "Big Build Co has outstanding dues of $2,500.00"
        );
    }

    #[test]
    fn test_overdue_rental_ten_days_is_high() {
        let now = Utc::now();
        let v = vehicle(Some(VehicleStatus::Rented), Some(now - Duration::days(10)));
        let alerts = generate_alerts(&[], &[v.clone()], now);

        assert_eq!(alerts.len(), 1);
        let alert = &alerts[0];
        assert_eq!(alert.category, AlertCategory::OverdueRental);
        assert_eq!(alert.priority, AlertPriority::High);
        assert_eq!(alert.vehicle_id, Some(v.id));
        assert_eq!(alert.description, "EXC-001 (Excavator) is 10 day(s) overdue");
        assert_eq!(days_overdue(now - Duration::days(10), now), 10);
    }

    #[test]
    fn test_overdue_rental_medium_and_low() {
        let now = Utc::now();
        let five = vehicle(Some(VehicleStatus::Rented), Some(now - Duration::days(5)));
        let one = vehicle(Some(VehicleStatus::Rented), Some(now - Duration::days(1)));
        let hours = vehicle(Some(VehicleStatus::Rented), Some(now - Duration::hours(5)));

        let alerts = generate_alerts(&[], &[five.clone(), one.clone(), hours.clone()], now);
        let priority_of = |id: Uuid| alerts.iter().find(|a| a.vehicle_id == Some(id)).unwrap().priority;

        assert_eq!(priority_of(five.id), AlertPriority::Medium);
        assert_eq!(priority_of(one.id), AlertPriority::Low);
        // Menos de un día de retraso: 0 días, sigue siendo una alerta baja
        assert_eq!(priority_of(hours.id), AlertPriority::Low);
    }

    #[test]
    fn test_overdue_boundaries() {
        assert_eq!(overdue_rental_priority(3), AlertPriority::Low);
        assert_eq!(overdue_rental_priority(4), AlertPriority::Medium);
        assert_eq!(overdue_rental_priority(7), AlertPriority::Medium);
        assert_eq!(overdue_rental_priority(8), AlertPriority::High);
    }

    #[test]
    fn test_available_vehicle_never_overdue() {
        let now = Utc::now();
        let v = vehicle(Some(VehicleStatus::Available), Some(now - Duration::days(30)));
        assert!(generate_alerts(&[], &[v], now).is_empty());
    }

    #[test]
    fn test_future_return_is_not_overdue() {
        let now = Utc::now();
        let v = vehicle(Some(VehicleStatus::Rented), Some(now + Duration::days(2)));
        assert!(generate_alerts(&[], &[v], now).is_empty());
    }

    #[test]
    fn test_maintenance_due_is_medium() {
        let now = Utc::now();
        let mut v = vehicle(Some(VehicleStatus::Available), None);
        v.maintenance_status = Some(MaintenanceStatus::MaintenanceDue);

        let alerts = generate_alerts(&[], &[v], now);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, AlertCategory::MaintenanceDue);
        assert_eq!(alerts[0].priority, AlertPriority::Medium);
    }

    #[test]
    fn test_under_repair_is_not_maintenance_due() {
        let now = Utc::now();
        let mut v = vehicle(Some(VehicleStatus::UnderMaintenance), None);
        v.maintenance_status = Some(MaintenanceStatus::UnderRepair);
        assert!(generate_alerts(&[], &[v], now).is_empty());
    }

    #[test]
    fn test_damaged_return_requires_check_in() {
        let now = Utc::now();
        let renter = Uuid::new_v4();

        let mut returned = vehicle(Some(VehicleStatus::UnderMaintenance), None);
        returned.condition = Some(VehicleCondition::Damaged);
        returned.check_in_time = Some(now - Duration::hours(2));
        returned.renter_id = Some(renter);

        let mut never_rented = vehicle(Some(VehicleStatus::Available), None);
        never_rented.condition = Some(VehicleCondition::Damaged);

        let alerts = generate_alerts(&[], &[returned.clone(), never_rented], now);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, AlertCategory::DamagedReturn);
        assert_eq!(alerts[0].priority, AlertPriority::High);
        assert_eq!(alerts[0].customer_id, Some(renter));
        assert_eq!(alerts[0].vehicle_id, Some(returned.id));
    }

    #[test]
    fn test_malformed_entities_are_skipped() {
        let now = Utc::now();
        let no_status = vehicle(None, Some(now - Duration::days(10)));
        let no_date = vehicle(Some(VehicleStatus::Rented), None);
        let no_dues = customer("Ghost", None);

        assert!(generate_alerts(&[no_dues], &[no_status, no_date], now).is_empty());
    }

    #[test]
    fn test_missing_status_still_allows_maintenance_rule() {
        let now = Utc::now();
        let mut v = vehicle(None, None);
        v.maintenance_status = Some(MaintenanceStatus::MaintenanceDue);
        let alerts = generate_alerts(&[], &[v], now);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, AlertCategory::MaintenanceDue);
    }

    #[test]
    fn test_sorted_by_priority_and_stable() {
        let now = Utc::now();
        let customers = vec![customer("Medium One", Some(100)), customer("High One", Some(5000))];
        let low = vehicle(Some(VehicleStatus::Rented), Some(now - Duration::days(1)));
        let high = vehicle(Some(VehicleStatus::Rented), Some(now - Duration::days(9)));
        let mut maint = vehicle(Some(VehicleStatus::Available), None);
        maint.maintenance_status = Some(MaintenanceStatus::MaintenanceDue);

        let alerts = generate_alerts(&customers, &[low, high, maint], now);
        let weights: Vec<u8> = alerts.iter().map(|a| a.priority.weight()).collect();
        assert!(weights.windows(2).all(|w| w[0] >= w[1]));

        let categories: Vec<AlertCategory> = alerts.iter().map(|a| a.category).collect();
        assert_eq!(
            categories,
            vec![
                AlertCategory::OverduePayment,
                AlertCategory::OverdueRental,
                AlertCategory::OverduePayment,
                AlertCategory::MaintenanceDue,
                AlertCategory::OverdueRental,
            ]
        );
    }

    #[test]
    fn test_mixed_fleet_example() {
        let now = Utc::now();
        let customers = vec![customer("Big Build Co", Some(2500))];
        let vehicles = vec![
            vehicle(Some(VehicleStatus::Rented), Some(now - Duration::days(5))),
            vehicle(Some(VehicleStatus::Available), None),
        ];

        let alerts = generate_alerts(&customers, &vehicles, now);
        assert_eq!(alerts.len(), 2);
        assert_eq!(
            (alerts[0].category, alerts[0].priority),
            (AlertCategory::OverduePayment, AlertPriority::High)
        );
        assert_eq!(
            (alerts[1].category, alerts[1].priority),
            (AlertCategory::OverdueRental, AlertPriority::Medium)
        );
    }

    #[test]
    fn test_filter_and_summary() {
        let now = Utc::now();
        let customers = vec![customer("A", Some(3000)), customer("B", Some(10))];
        let mut maint = vehicle(Some(VehicleStatus::Available), None);
        maint.maintenance_status = Some(MaintenanceStatus::MaintenanceDue);
        let alerts = generate_alerts(&customers, &[maint], now);

        let summary = AlertSummary::from_alerts(&alerts);
        assert_eq!(summary.total, 3);
        assert_eq!(summary.high, 1);
        assert_eq!(summary.medium, 2);
        assert_eq!(summary.overdue_payment, 2);
        assert_eq!(summary.maintenance_due, 1);

        let only_medium_payments = AlertFilter {
            category: Some(AlertCategory::OverduePayment),
            priority: Some(AlertPriority::Medium),
        }
        .apply(alerts.clone());
        assert_eq!(only_medium_payments.len(), 1);
        assert_eq!(AlertFilter::default().apply(alerts).len(), 3);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(Decimal::from(2500)), "2,500.00");
        assert_eq!(format_amount(Decimal::new(123456789, 2)), "1,234,567.89");
        assert_eq!(format_amount(Decimal::from(999)), "999.00");
    }

    #[tokio::test]
    async fn test_service_reads_injected_source() {
        let now = Utc::now();
        let source = InMemorySnapshotSource::new(
            vec![customer("Big Build Co", Some(2500))],
            vec![vehicle(Some(VehicleStatus::Rented), Some(now - Duration::days(10)))],
        );
        let service = AlertService::new(Arc::new(source));

        let alerts = service.alerts_at(None, now).await.unwrap();
        assert_eq!(alerts.len(), 2);
        assert!(alerts.iter().all(|a| a.priority == AlertPriority::High));
    }
}

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;
use validator::Validate;

use crate::dto::common_dto::ApiResponse;
use crate::dto::vehicle_dto::{
    CreateVehicleRequest, LocationReportRequest, LocationReportResponse, UpdateVehicleRequest,
    VehicleQuery,
};
use crate::models::vehicle::Vehicle;
use crate::repositories::vehicle_repository::VehicleRepository;
use crate::services::geofence_service::{GeoPoint, GeofenceService};
use crate::services::inventory_filter::VehicleFilter;
use crate::utils::errors::{not_found_error, AppError, AppResult};

pub struct VehicleController {
    repository: VehicleRepository,
}

impl VehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: VehicleRepository::new(pool),
        }
    }

    pub async fn create(&self, request: CreateVehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;
        if request.next_maintenance_date < request.last_maintenance_date {
            return Err(AppError::BadRequest(
                "next_maintenance_date cannot be before last_maintenance_date".to_string(),
            ));
        }

        let vehicle = self.repository.create(request).await?;
        info!("🚜 Vehículo creado: {} ({})", vehicle.vehicle_code, vehicle.id);

        Ok(ApiResponse::success_with_message(vehicle, "Vehicle created successfully"))
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Vehicle> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Vehicle", id))
    }

    pub async fn list(&self, query: VehicleQuery) -> AppResult<Vec<Vehicle>> {
        // Los filtros inválidos se rechazan antes de consultar la base
        let filter = VehicleFilter::from_query(&query)?;
        let vehicles = self.repository.list(query.dealer_id).await?;
        Ok(filter.apply(vehicles))
    }

    pub async fn update(&self, id: Uuid, request: UpdateVehicleRequest) -> AppResult<ApiResponse<Vehicle>> {
        request.validate()?;

        let vehicle = self.repository.update(id, request).await?;
        Ok(ApiResponse::success_with_message(vehicle, "Vehicle updated successfully"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        self.repository.delete(id).await?;
        info!("🗑️ Vehículo eliminado: {}", id);
        Ok(())
    }

    /// Guarda la posición y evalúa la geocerca
    pub async fn report_location(
        &self,
        id: Uuid,
        request: LocationReportRequest,
        geofence: &GeofenceService,
    ) -> AppResult<LocationReportResponse> {
        request.validate()?;

        let vehicle = self
            .repository
            .update_location(id, request.latitude, request.longitude)
            .await?;

        let point = GeoPoint::new(request.latitude, request.longitude);
        let check = geofence.check(&vehicle, point).await;

        Ok(LocationReportResponse {
            vehicle_id: vehicle.id,
            vehicle_code: vehicle.vehicle_code,
            latitude: point.latitude,
            longitude: point.longitude,
            inside_zone: check.inside_zone,
            distance_meters: check.distance_meters,
            distance_km: check.distance_km(),
            notified: check.notified,
        })
    }
}

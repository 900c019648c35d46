//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Código SQLSTATE de PostgreSQL para violación de unicidad
const UNIQUE_VIOLATION: &str = "23505";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("External API error: {0}")]
    ExternalApi(String),
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<String>,
}

impl ErrorResponse {
    fn new(error: &str, message: String, code: &str) -> Self {
        Self {
            error: error.to_string(),
            message,
            details: None,
            code: Some(code.to_string()),
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::ExternalApi(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_response = match self {
            AppError::Database(e) => {
                error!("❌ Database error: {}", e);
                ErrorResponse::new(
                    "Database Error",
                    "An error occurred while accessing the database".to_string(),
                    "DB_ERROR",
                )
            }

            AppError::Validation(e) => {
                warn!("⚠️ Validation error: {}", e);
                ErrorResponse::new(
                    "Validation Error",
                    "The provided data is invalid".to_string(),
                    "VALIDATION_ERROR",
                )
                .with_details(json!(e))
            }

            AppError::NotFound(msg) => {
                warn!("🔍 Resource not found: {}", msg);
                ErrorResponse::new("Not Found", msg, "NOT_FOUND")
            }

            AppError::Conflict(msg) => {
                warn!("⚠️ Conflict: {}", msg);
                ErrorResponse::new("Conflict", msg, "CONFLICT")
            }

            AppError::BadRequest(msg) => {
                warn!("⚠️ Bad request: {}", msg);
                ErrorResponse::new("Bad Request", msg, "BAD_REQUEST")
            }

            AppError::Internal(msg) => {
                error!("❌ Internal error: {}", msg);
                ErrorResponse::new(
                    "Internal Server Error",
                    "An unexpected error occurred".to_string(),
                    "INTERNAL_ERROR",
                )
            }

            AppError::RateLimitExceeded => {
                warn!("🚦 Rate limit exceeded");
                ErrorResponse::new(
                    "Rate Limit Exceeded",
                    "Too many requests from this IP, please try again later.".to_string(),
                    "RATE_LIMIT_EXCEEDED",
                )
            }

            AppError::ServiceUnavailable(msg) => {
                error!("❌ Service unavailable: {}", msg);
                ErrorResponse::new("Service Unavailable", msg, "SERVICE_UNAVAILABLE")
            }

            AppError::ExternalApi(msg) => {
                error!("❌ External API error: {}", msg);
                ErrorResponse::new(
                    "External API Error",
                    "An error occurred while communicating with external service".to_string(),
                    "EXTERNAL_API_ERROR",
                )
                .with_details(json!({ "external_api_error": msg }))
            }
        };

        (status, Json(error_response)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Convierte un error de sqlx añadiendo contexto; las violaciones de unicidad
/// se devuelven como `Conflict`.
pub fn db_error(context: &str, e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error() {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return AppError::Conflict(format!("{}: {}", context, db.message()));
        }
    }
    log::error!("❌ Error {}: {}", context, e);
    AppError::Database(e)
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(resource: &str, id: impl std::fmt::Display) -> AppError {
    AppError::NotFound(format!("{} with id '{}' not found", resource, id))
}

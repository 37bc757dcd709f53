//! Response envelope and error mapping shared by all handlers

pub mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Стандартная обёртка ответа API
///
/// При успехе: `{"success": true, "data": {...}}`,
/// при ошибке: `{"success": false, "error": "описание"}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// `true` если запрос выполнен успешно
    pub success: bool,
    /// Полезная нагрузка. `null` при ошибке
    pub data: Option<T>,
    /// Описание ошибки. `null` при успехе
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler's `Result`
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(ApiResponse::error(message)))
}

/// Map a domain failure onto an HTTP status.
pub fn domain_error(err: DomainError) -> ApiError {
    let status = match err {
        DomainError::FacilityNotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidSession(_)
        | DomainError::InvalidInterval { .. }
        | DomainError::InvalidSchedule(_)
        | DomainError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
    };
    api_error(status, err.to_string())
}

//! Health check endpoint

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::ApiState;

/// Состояние сервиса
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Статус: `ok`, сервис работает нормально
    pub status: String,
    /// Версия из Cargo.toml
    pub version: String,
    /// Время работы в секундах с момента создания роутера
    pub uptime_seconds: u64,
}

/// Проверка состояния сервиса
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Сервис работает нормально", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
    })
}

//! Parking session handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::api::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::api::dto::{CreateSessionRequest, CreatedSessionResponse, SessionResponse};
use crate::api::ApiState;
use crate::domain::{DomainError, Session};

async fn ensure_facility(state: &ApiState, facility_id: &str) -> Result<(), ApiError> {
    match state.repos.profiles().find_by_facility(facility_id).await {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(domain_error(DomainError::FacilityNotFound(
            facility_id.to_string(),
        ))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/{facility_id}/sessions",
    tag = "Sessions",
    params(("facility_id" = String, Path, description = "Parking facility ID")),
    responses(
        (status = 200, description = "Sessions in recording order", body = ApiResponse<Vec<SessionResponse>>),
        (status = 404, description = "Unknown facility")
    )
)]
pub async fn list_sessions(
    State(state): State<ApiState>,
    Path(facility_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<SessionResponse>>>, ApiError> {
    ensure_facility(&state, &facility_id).await?;

    let sessions = state
        .repos
        .sessions()
        .find_by_facility(&facility_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        sessions.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "Sessions",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Recorded", body = ApiResponse<CreatedSessionResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 404, description = "Unknown facility"),
        (status = 422, description = "Blank id or end not after start")
    )
)]
pub async fn create_session(
    State(state): State<ApiState>,
    ValidatedJson(req): ValidatedJson<CreateSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedSessionResponse>>), ApiError> {
    let session = Session::from(req);
    session.validate().map_err(domain_error)?;
    ensure_facility(&state, &session.facility_id).await?;

    let id = state
        .repos
        .sessions()
        .save(session.clone())
        .await
        .map_err(domain_error)?;

    info!(
        session_id = id,
        facility_id = %session.facility_id,
        customer_id = %session.customer_id,
        "Session recorded"
    );

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CreatedSessionResponse {
            id,
            session: session.into(),
        })),
    ))
}

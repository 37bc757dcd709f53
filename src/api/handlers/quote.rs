//! Price preview handler

use axum::{
    extract::{Path, State},
    Json,
};

use crate::api::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::api::dto::{CostBreakdownResponse, QuoteRequest};
use crate::api::ApiState;

#[utoipa::path(
    post,
    path = "/api/v1/facilities/{facility_id}/quote",
    tag = "Invoices",
    params(("facility_id" = String, Path, description = "Parking facility ID")),
    request_body = QuoteRequest,
    responses(
        (status = 200, description = "Itemised price", body = ApiResponse<CostBreakdownResponse>),
        (status = 404, description = "Unknown facility"),
        (status = 422, description = "End not after start")
    )
)]
pub async fn quote_session(
    State(state): State<ApiState>,
    Path(facility_id): Path<String>,
    ValidatedJson(req): ValidatedJson<QuoteRequest>,
) -> Result<Json<ApiResponse<CostBreakdownResponse>>, ApiError> {
    let breakdown = state
        .invoices
        .quote(&facility_id, req.customer_id.as_deref(), req.start, req.end)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(breakdown.into())))
}

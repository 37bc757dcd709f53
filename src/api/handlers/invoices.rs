//! Invoice handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::common::{api_error, domain_error, ApiError, ApiResponse};
use crate::api::dto::InvoiceResponse;
use crate::api::ApiState;

#[utoipa::path(
    get,
    path = "/api/v1/facilities/{facility_id}/invoices",
    tag = "Invoices",
    params(("facility_id" = String, Path, description = "Parking facility ID")),
    responses(
        (status = 200, description = "One invoice per customer", body = ApiResponse<Vec<InvoiceResponse>>),
        (status = 404, description = "Unknown facility"),
        (status = 422, description = "A stored session is invalid")
    )
)]
pub async fn list_invoices(
    State(state): State<ApiState>,
    Path(facility_id): Path<String>,
) -> Result<Json<ApiResponse<Vec<InvoiceResponse>>>, ApiError> {
    let invoices = state
        .invoices
        .invoices_for(&facility_id)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(
        invoices.into_iter().map(Into::into).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/facilities/{facility_id}/invoices/{customer_id}",
    tag = "Invoices",
    params(
        ("facility_id" = String, Path, description = "Parking facility ID"),
        ("customer_id" = String, Path, description = "Customer ID")
    ),
    responses(
        (status = 200, description = "Invoice", body = ApiResponse<InvoiceResponse>),
        (status = 404, description = "Unknown facility or no sessions for the customer")
    )
)]
pub async fn get_invoice(
    State(state): State<ApiState>,
    Path((facility_id, customer_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<InvoiceResponse>>, ApiError> {
    match state.invoices.invoice_for(&facility_id, &customer_id).await {
        Ok(Some(invoice)) => Ok(Json(ApiResponse::success(invoice.into()))),
        Ok(None) => Err(api_error(
            StatusCode::NOT_FOUND,
            format!(
                "No sessions for customer '{}' at facility '{}'",
                customer_id, facility_id
            ),
        )),
        Err(e) => Err(domain_error(e)),
    }
}

//! API router and OpenAPI document

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::api::common::ApiResponse;
use crate::api::dto::*;
use crate::api::handlers::metrics::{prometheus_metrics, MetricsState};
use crate::api::handlers::{health, invoices, quote, sessions};
use crate::api::middleware::http_metrics_middleware;
use crate::application::InvoiceService;
use crate::domain::RepositoryProvider;

/// State shared by every API handler
#[derive(Clone)]
pub struct ApiState {
    pub repos: Arc<dyn RepositoryProvider>,
    pub invoices: Arc<InvoiceService>,
    pub started_at: Instant,
}

impl ApiState {
    pub fn new(repos: Arc<dyn RepositoryProvider>, invoices: Arc<InvoiceService>) -> Self {
        Self {
            repos,
            invoices,
            started_at: Instant::now(),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        invoices::list_invoices,
        invoices::get_invoice,
        quote::quote_session,
        sessions::list_sessions,
        sessions::create_session,
    ),
    components(
        schemas(
            ApiResponse<String>,
            health::HealthResponse,
            InvoiceResponse,
            SessionResponse,
            CreateSessionRequest,
            CreatedSessionResponse,
            QuoteRequest,
            TimeslotLineResponse,
            CostBreakdownResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness probe"),
        (name = "Invoices", description = "Per-customer invoices and price previews. Amounts are exact decimals serialized as strings."),
        (name = "Sessions", description = "Parking sessions. Times are local wall-clock times without a zone."),
    ),
    info(
        title = "Parking Billing API",
        version = "1.0.0",
        description = "Invoices for parking sessions priced by hourly tiers.

All responses use the envelope `{\"success\": bool, \"data\": ..., \"error\": string}`."
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the REST router. `/metrics` is mounted only when a recorder handle
/// is given.
pub fn create_api_router(state: ApiState, prometheus: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/health", get(health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route(
            "/api/v1/facilities/{facility_id}/invoices",
            get(invoices::list_invoices),
        )
        .route(
            "/api/v1/facilities/{facility_id}/invoices/{customer_id}",
            get(invoices::get_invoice),
        )
        .route(
            "/api/v1/facilities/{facility_id}/sessions",
            get(sessions::list_sessions),
        )
        .route(
            "/api/v1/facilities/{facility_id}/quote",
            post(quote::quote_session),
        )
        .route("/api/v1/sessions", post(sessions::create_session))
        .with_state(state);

    if let Some(handle) = prometheus {
        let metrics_routes = Router::new()
            .route("/metrics", get(prometheus_metrics))
            .with_state(MetricsState { handle });
        router = router.merge(metrics_routes);
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{NaiveDate, TimeDelta};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use serde_json::{json, Value};

    use crate::application::InvalidSessionPolicy;
    use crate::domain::Session;
    use crate::infrastructure::{InMemoryRepositoryProvider, SeedData};

    async fn state() -> (Arc<InMemoryRepositoryProvider>, ApiState) {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        SeedData::demo().apply(repos.as_ref()).await.unwrap();
        let invoices = Arc::new(InvoiceService::new(repos.clone(), InvalidSessionPolicy::Reject));
        (repos.clone(), ApiState::new(repos, invoices))
    }

    async fn send(router: Router, req: Request<Body>) -> (StatusCode, Value) {
        use tower::Service;
        let mut svc = router.into_service();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_req(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap()
    }

    fn decimal(value: &Value) -> Decimal {
        value.as_str().unwrap().parse().unwrap()
    }

    async fn record(repos: &InMemoryRepositoryProvider, customer: &str, facility: &str) {
        let start = NaiveDate::from_ymd_opt(2018, 12, 15)
            .unwrap()
            .and_hms_opt(12, 25, 0)
            .unwrap();
        repos
            .sessions()
            .save(Session::new(customer, facility, start, start + TimeDelta::hours(1)))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn health_reports_version() {
        let (_, state) = state().await;
        let (status, json) = send(create_api_router(state, None), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn lists_invoices_for_a_facility() {
        let (repos, state) = state().await;
        record(&repos, "c001", "pf001").await;
        record(&repos, "c004", "pf001").await;
        record(&repos, "c001", "pf002").await;

        let (status, json) = send(
            create_api_router(state, None),
            get_req("/api/v1/facilities/pf001/invoices"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["success"], true);
        let data = json["data"].as_array().unwrap();
        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["customer_id"], "c001");
        assert_eq!(decimal(&data[0]["amount"]), dec!(2.8));
        assert_eq!(data[1]["customer_id"], "c004");
        assert_eq!(decimal(&data[1]["amount"]), dec!(3.8));
    }

    #[tokio::test]
    async fn unknown_facility_is_404() {
        let (_, state) = state().await;
        let (status, json) = send(
            create_api_router(state, None),
            get_req("/api/v1/facilities/nonExistingParkingFacilityId/invoices"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["success"], false);
        assert_eq!(
            json["error"],
            "Invalid parking facility id 'nonExistingParkingFacilityId'"
        );
    }

    #[tokio::test]
    async fn single_invoice_lookup() {
        let (repos, state) = state().await;
        record(&repos, "c002", "pf001").await;
        let router = create_api_router(state, None);

        let (status, json) = send(
            router.clone(),
            get_req("/api/v1/facilities/pf001/invoices/c002"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["data"]["session_count"], 1);

        let (status, _) = send(router, get_req("/api/v1/facilities/pf001/invoices/c003")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn stored_invalid_session_is_422_under_reject() {
        let (repos, state) = state().await;
        record(&repos, "", "pf001").await;

        let (status, json) = send(
            create_api_router(state, None),
            get_req("/api/v1/facilities/pf001/invoices"),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn posted_session_shows_up_in_invoices() {
        let (_, state) = state().await;
        let router = create_api_router(state, None);

        let (status, json) = send(
            router.clone(),
            post_req(
                "/api/v1/sessions",
                json!({
                    "customer_id": "c002",
                    "facility_id": "pf001",
                    "start": "2018-12-13T06:30:00",
                    "end": "2018-12-13T18:30:00",
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["id"], 1);
        assert_eq!(json["data"]["duration_minutes"], 720);

        let (_, json) = send(router.clone(), get_req("/api/v1/facilities/pf001/sessions")).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);

        let (_, json) = send(router, get_req("/api/v1/facilities/pf001/invoices/c002")).await;
        assert_eq!(decimal(&json["data"]["amount"]), dec!(28.5));
    }

    #[tokio::test]
    async fn session_intake_rejects_bad_input() {
        let (_, state) = state().await;
        let router = create_api_router(state, None);

        let reversed = json!({
            "customer_id": "c001",
            "facility_id": "pf001",
            "start": "2018-12-13T18:30:00",
            "end": "2018-12-13T06:30:00",
        });
        let (status, _) = send(router.clone(), post_req("/api/v1/sessions", reversed)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let blank = json!({
            "customer_id": "",
            "facility_id": "pf001",
            "start": "2018-12-13T06:30:00",
            "end": "2018-12-13T18:30:00",
        });
        let (status, _) = send(router.clone(), post_req("/api/v1/sessions", blank)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let unknown = json!({
            "customer_id": "c001",
            "facility_id": "pf404",
            "start": "2018-12-13T06:30:00",
            "end": "2018-12-13T18:30:00",
        });
        let (status, _) = send(router.clone(), post_req("/api/v1/sessions", unknown)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let req = Request::builder()
            .method("POST")
            .uri("/api/v1/sessions")
            .header("content-type", "application/json")
            .body(Body::from("{"))
            .unwrap();
        let (status, _) = send(router, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn quote_itemises_the_price() {
        let (_, state) = state().await;
        let (status, json) = send(
            create_api_router(state, None),
            post_req(
                "/api/v1/facilities/pf001/quote",
                json!({
                    "customer_id": "c001",
                    "start": "2018-12-13T06:30:00",
                    "end": "2018-12-13T18:30:00",
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&json["data"]["amount"]), dec!(28.5));
        assert_eq!(json["data"]["total_minutes"], 720);
        let lines = json["data"]["lines"].as_array().unwrap();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0]["minutes"], 30);
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (_, state) = state().await;
        let (status, json) = send(
            create_api_router(state, None),
            get_req("/api-docs/openapi.json"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["paths"]["/api/v1/facilities/{facility_id}/invoices"].is_object());
        assert!(json["paths"]["/api/v1/sessions"]["post"].is_object());
    }

    #[tokio::test]
    async fn metrics_route_needs_a_handle() {
        let (_, state) = state().await;
        let (status, _) = send(create_api_router(state.clone(), None), get_req("/metrics")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let router = create_api_router(state, Some(handle));
        use tower::Service;
        let resp = router.into_service().call(get_req("/metrics")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()["content-type"]
            .to_str()
            .unwrap()
            .starts_with("text/plain"));
    }
}

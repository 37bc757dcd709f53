//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value.
//! Malformed JSON is a 400, a failed validation a 422.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// async fn handler(ValidatedJson(body): ValidatedJson<CreateSessionRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let body = ApiResponse::<()>::error(format!("Invalid JSON: {}", rejection));
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let mut messages: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            // struct-level checks are reported under `__all__`
                            if *field == "__all__" {
                                msg
                            } else {
                                format!("{}: {}", field, msg)
                            }
                        })
                    })
                    .collect();
                messages.sort();

                let message = if messages.is_empty() {
                    "Validation failed".to_string()
                } else {
                    messages.join("; ")
                };

                let body = ApiResponse::<()>::error(message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(
        req: axum::extract::Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;

    use crate::api::dto::CreateSessionRequest;

    async fn handler(ValidatedJson(_body): ValidatedJson<CreateSessionRequest>) -> &'static str {
        "ok"
    }

    async fn send(body: Body) -> (StatusCode, serde_json::Value) {
        use tower::Service;
        let mut svc = Router::new().route("/test", post(handler)).into_service();
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(body)
            .unwrap();
        let resp = svc.call(req).await.unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    fn session(customer: &str, start: &str, end: &str) -> Body {
        let body = serde_json::json!({
            "customer_id": customer,
            "facility_id": "pf001",
            "start": start,
            "end": end,
        });
        Body::from(serde_json::to_vec(&body).unwrap())
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        let (status, _) = send(session("c001", "2018-12-15T12:25:00", "2018-12-15T13:25:00")).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        let (status, json) = send(Body::from("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }

    #[tokio::test]
    async fn blank_id_returns_422() {
        let (status, json) = send(session("  ", "2018-12-15T12:25:00", "2018-12-15T13:25:00")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "customer_id: must not be blank");
    }

    #[tokio::test]
    async fn reversed_interval_returns_422() {
        let (status, json) = send(session("c001", "2018-12-15T13:25:00", "2018-12-15T13:25:00")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "end must be at least one whole minute after start");
    }

    #[tokio::test]
    async fn interval_inside_one_minute_returns_422() {
        let (status, _) = send(session("c001", "2018-12-15T12:00:10", "2018-12-15T12:00:50")).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::{not_blank, ordered_interval};
use crate::domain::{Session, SessionId};

/// New parking session. Times are local wall-clock times of the facility.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_interval"))]
pub struct CreateSessionRequest {
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "c001")]
    pub customer_id: String,
    #[validate(custom(function = "not_blank"))]
    #[schema(example = "pf001")]
    pub facility_id: String,
    #[schema(value_type = String, example = "2018-12-13T06:30:00")]
    pub start: NaiveDateTime,
    #[schema(value_type = String, example = "2018-12-13T18:30:00")]
    pub end: NaiveDateTime,
}

fn validate_interval(req: &CreateSessionRequest) -> Result<(), ValidationError> {
    ordered_interval(req.start, req.end)
}

impl From<CreateSessionRequest> for Session {
    fn from(req: CreateSessionRequest) -> Self {
        Session::new(req.customer_id, req.facility_id, req.start, req.end)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub customer_id: String,
    pub facility_id: String,
    #[schema(value_type = String)]
    pub start: NaiveDateTime,
    #[schema(value_type = String)]
    pub end: NaiveDateTime,
    pub duration_minutes: i64,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        let duration_minutes = session.duration().num_minutes();
        Self {
            customer_id: session.customer_id,
            facility_id: session.facility_id,
            start: session.start,
            end: session.end,
            duration_minutes,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatedSessionResponse {
    pub id: SessionId,
    #[serde(flatten)]
    pub session: SessionResponse,
}

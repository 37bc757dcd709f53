//! Request and response bodies for the REST API

pub mod invoice;
pub mod quote;
pub mod session;

use chrono::NaiveDateTime;
use validator::ValidationError;

use crate::domain::truncate_to_minute;

pub use invoice::InvoiceResponse;
pub use quote::{CostBreakdownResponse, QuoteRequest, TimeslotLineResponse};
pub use session::{CreateSessionRequest, CreatedSessionResponse, SessionResponse};

pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

pub(crate) fn ordered_interval(
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<(), ValidationError> {
    if truncate_to_minute(end) <= truncate_to_minute(start) {
        return Err(ValidationError::new("interval")
            .with_message("end must be at least one whole minute after start".into()));
    }
    Ok(())
}

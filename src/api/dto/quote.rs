use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use super::ordered_interval;
use crate::application::{ActualTimeslot, CostBreakdown};

/// Price preview for a session that has not been recorded
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "validate_interval"))]
pub struct QuoteRequest {
    /// Omit to quote at overrun prices
    pub customer_id: Option<String>,
    #[schema(value_type = String, example = "2018-12-13T06:30:00")]
    pub start: NaiveDateTime,
    #[schema(value_type = String, example = "2018-12-13T18:30:00")]
    pub end: NaiveDateTime,
}

fn validate_interval(req: &QuoteRequest) -> Result<(), ValidationError> {
    ordered_interval(req.start, req.end)
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TimeslotLineResponse {
    #[schema(value_type = String)]
    pub start: NaiveDateTime,
    #[schema(value_type = String)]
    pub end: NaiveDateTime,
    #[schema(value_type = String)]
    pub price_per_hour: Decimal,
    pub minutes: i64,
    #[schema(value_type = String)]
    pub amount: Decimal,
}

impl From<&ActualTimeslot> for TimeslotLineResponse {
    fn from(line: &ActualTimeslot) -> Self {
        Self {
            start: line.start,
            end: line.end,
            price_per_hour: line.price_per_hour,
            minutes: line.minutes(),
            amount: line.amount(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CostBreakdownResponse {
    pub lines: Vec<TimeslotLineResponse>,
    pub total_minutes: i64,
    #[schema(value_type = String, example = "28.5")]
    pub amount: Decimal,
}

impl From<CostBreakdown> for CostBreakdownResponse {
    fn from(breakdown: CostBreakdown) -> Self {
        Self {
            lines: breakdown.lines.iter().map(Into::into).collect(),
            total_minutes: breakdown.total_minutes,
            amount: breakdown.amount,
        }
    }
}

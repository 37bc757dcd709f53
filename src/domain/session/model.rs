//! Parking session entity

use chrono::{NaiveDateTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Sequence number assigned by the session store
pub type SessionId = u64;

/// Drops seconds and sub-second precision; only whole minutes are billed.
pub fn truncate_to_minute(instant: NaiveDateTime) -> NaiveDateTime {
    instant
        .with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(instant)
}

/// One parking occupancy interval of one customer at one facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub customer_id: String,
    pub facility_id: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Session {
    pub fn new(
        customer_id: impl Into<String>,
        facility_id: impl Into<String>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            customer_id: customer_id.into(),
            facility_id: facility_id.into(),
            start,
            end,
        }
    }

    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// A billable session names both parties and ends at least one whole
    /// minute after it starts, counted on minute-truncated instants.
    pub fn validate(&self) -> DomainResult<()> {
        if self.customer_id.trim().is_empty() {
            return Err(DomainError::InvalidSession(format!(
                "session at '{}' starting {} has no customer id",
                self.facility_id, self.start
            )));
        }
        if self.facility_id.trim().is_empty() {
            return Err(DomainError::InvalidSession(format!(
                "session of '{}' starting {} has no parking facility id",
                self.customer_id, self.start
            )));
        }
        if truncate_to_minute(self.end) <= truncate_to_minute(self.start) {
            return Err(DomainError::InvalidInterval {
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 12, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn well_formed_session_is_valid() {
        let s = Session::new("c001", "pf001", at(12, 25), at(13, 25));
        assert!(s.validate().is_ok());
        assert_eq!(s.duration(), TimeDelta::hours(1));
    }

    #[test]
    fn blank_ids_are_invalid() {
        let s = Session::new(" ", "pf001", at(12, 0), at(13, 0));
        assert!(matches!(s.validate(), Err(DomainError::InvalidSession(_))));

        let s = Session::new("c001", "", at(12, 0), at(13, 0));
        assert!(matches!(s.validate(), Err(DomainError::InvalidSession(_))));
    }

    #[test]
    fn empty_or_reversed_interval_is_invalid() {
        let s = Session::new("c001", "pf001", at(12, 0), at(12, 0));
        assert!(matches!(s.validate(), Err(DomainError::InvalidInterval { .. })));

        let s = Session::new("c001", "pf001", at(13, 0), at(12, 0));
        assert!(matches!(s.validate(), Err(DomainError::InvalidInterval { .. })));
    }

    #[test]
    fn sub_minute_session_within_one_minute_is_invalid() {
        let start = at(12, 0) + TimeDelta::seconds(10);
        let end = at(12, 0) + TimeDelta::seconds(50);
        let s = Session::new("c001", "pf001", start, end);
        assert!(matches!(s.validate(), Err(DomainError::InvalidInterval { .. })));
    }

    #[test]
    fn short_session_crossing_a_minute_is_valid() {
        // 12:00:50 to 12:01:10 bills the minute 12:00..12:01
        let start = at(12, 0) + TimeDelta::seconds(50);
        let end = at(12, 1) + TimeDelta::seconds(10);
        assert!(Session::new("c001", "pf001", start, end).validate().is_ok());
        assert_eq!(truncate_to_minute(start), at(12, 0));
    }
}

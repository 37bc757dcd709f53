//! Facility pricing profile: hourly tiers grouped into day schedules.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, DomainResult};

/// Last hour boundary of a day. Hour 24 is midnight of the following day.
pub const HOURS_PER_DAY: u8 = 24;

pub const MINUTES_PER_HOUR: i64 = 60;

/// One pricing tier: a contiguous hour range of a day with a fixed hourly price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeslotPrice {
    pub start_hour: u8,
    pub end_hour: u8,
    pub price_per_hour: Decimal,
}

impl TimeslotPrice {
    pub fn new(start_hour: u8, end_hour: u8, price_per_hour: Decimal) -> Self {
        Self {
            start_hour,
            end_hour,
            price_per_hour,
        }
    }

    /// Absolute start of this tier on `date`.
    pub fn starts_at(&self, date: NaiveDate) -> NaiveDateTime {
        anchor(date, self.start_hour)
    }

    /// Absolute end of this tier on `date`; an end hour of 24 lands on
    /// 00:00 of the next day.
    pub fn ends_at(&self, date: NaiveDate) -> NaiveDateTime {
        anchor(date, self.end_hour)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.start_hour > HOURS_PER_DAY || self.end_hour > HOURS_PER_DAY {
            return Err(DomainError::InvalidSchedule(format!(
                "tier {}-{} has an hour outside 0..=24",
                self.start_hour, self.end_hour
            )));
        }
        if self.start_hour >= self.end_hour {
            return Err(DomainError::InvalidSchedule(format!(
                "tier {}-{} does not end after it starts",
                self.start_hour, self.end_hour
            )));
        }
        if self.price_per_hour.is_sign_negative() {
            return Err(DomainError::InvalidSchedule(format!(
                "tier {}-{} has a negative price {}",
                self.start_hour, self.end_hour, self.price_per_hour
            )));
        }
        Ok(())
    }
}

fn anchor(date: NaiveDate, hour: u8) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN) + TimeDelta::hours(i64::from(hour))
}

/// Ordered tiers applicable to one day type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule(Vec<TimeslotPrice>);

impl Schedule {
    pub fn new(tiers: Vec<TimeslotPrice>) -> Self {
        Self(tiers)
    }

    pub fn tiers(&self) -> &[TimeslotPrice] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeslotPrice> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks that the tiers, in order, tile `[0, 24)` with no gap or overlap.
    pub fn validate(&self) -> DomainResult<()> {
        let mut expected_start = 0;
        for tier in &self.0 {
            tier.validate()?;
            if tier.start_hour != expected_start {
                return Err(DomainError::InvalidSchedule(format!(
                    "tier {}-{} should start at hour {}",
                    tier.start_hour, tier.end_hour, expected_start
                )));
            }
            expected_start = tier.end_hour;
        }
        if expected_start != HOURS_PER_DAY {
            return Err(DomainError::InvalidSchedule(format!(
                "tiers stop at hour {} instead of 24",
                expected_start
            )));
        }
        Ok(())
    }
}

impl FromIterator<TimeslotPrice> for Schedule {
    fn from_iter<I: IntoIterator<Item = TimeslotPrice>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a TimeslotPrice;
    type IntoIter = std::slice::Iter<'a, TimeslotPrice>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Weekday / weekend classification of a calendar date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayType {
    Weekday,
    Weekend,
}

impl DayType {
    pub fn of(date: NaiveDate) -> Self {
        match date.weekday() {
            Weekday::Sat | Weekday::Sun => Self::Weekend,
            _ => Self::Weekday,
        }
    }
}

impl std::fmt::Display for DayType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weekday => write!(f, "Weekday"),
            Self::Weekend => write!(f, "Weekend"),
        }
    }
}

/// Which family of schedules applies to a customer at a facility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PricingPlan {
    /// Customer holds a standing contract for the facility
    Contracted,
    /// No contract: overrun prices apply
    Overrun,
}

impl PricingPlan {
    pub fn from_contracted(is_contracted: bool) -> Self {
        if is_contracted {
            Self::Contracted
        } else {
            Self::Overrun
        }
    }
}

impl std::fmt::Display for PricingPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Contracted => write!(f, "Contracted"),
            Self::Overrun => write!(f, "Overrun"),
        }
    }
}

/// Pricing profile of one parking facility
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceProfile {
    pub facility_id: String,
    /// Contracted, Monday to Friday
    pub weekday_prices: Schedule,
    /// Contracted, Saturday and Sunday
    pub weekend_prices: Schedule,
    pub overrun_weekday_prices: Schedule,
    pub overrun_weekend_prices: Schedule,
}

impl ServiceProfile {
    /// Validates all four schedules, naming the failing one.
    pub fn validate(&self) -> DomainResult<()> {
        if self.facility_id.trim().is_empty() {
            return Err(DomainError::Validation(
                "service profile has an empty facility id".to_string(),
            ));
        }

        let schedules = [
            ("weekday_prices", &self.weekday_prices),
            ("weekend_prices", &self.weekend_prices),
            ("overrun_weekday_prices", &self.overrun_weekday_prices),
            ("overrun_weekend_prices", &self.overrun_weekend_prices),
        ];
        for (name, schedule) in schedules {
            schedule.validate().map_err(|e| {
                DomainError::InvalidSchedule(format!("{} of {}: {}", name, self.facility_id, e))
            })?;
        }
        Ok(())
    }
}

// ── Tests ──────────────────────────────────────────────────────

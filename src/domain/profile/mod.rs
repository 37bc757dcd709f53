//! Service profile aggregate
//!
//! Hourly pricing tiers, day schedules and the four-schedule profile of a facility.

pub mod model;
pub mod repository;

pub use model::{
    DayType, PricingPlan, Schedule, ServiceProfile, TimeslotPrice, HOURS_PER_DAY,
    MINUTES_PER_HOUR,
};
pub use repository::ServiceProfileRepository;

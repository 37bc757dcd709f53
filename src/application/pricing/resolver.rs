//! Schedule selection by calendar date and contract status

use chrono::NaiveDate;

use crate::domain::{DayType, PricingPlan, Schedule, ServiceProfile};

/// Picks the ordered tier list that prices `date` for a customer who is
/// (or is not) contracted at the profile's facility.
pub fn resolve_schedule(profile: &ServiceProfile, date: NaiveDate, is_contracted: bool) -> &Schedule {
    match (DayType::of(date), PricingPlan::from_contracted(is_contracted)) {
        (DayType::Weekday, PricingPlan::Contracted) => &profile.weekday_prices,
        (DayType::Weekend, PricingPlan::Contracted) => &profile.weekend_prices,
        (DayType::Weekday, PricingPlan::Overrun) => &profile.overrun_weekday_prices,
        (DayType::Weekend, PricingPlan::Overrun) => &profile.overrun_weekend_prices,
    }
}

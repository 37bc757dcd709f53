//! Session cost calculator
//!
//! Splits a session into sub-intervals aligned to calendar days and pricing
//! tiers, prices each one at its tier rate and sums the result exactly.
//!
//! Sub-interval lengths are whole minutes. Each line contributes
//! `minutes × price_per_hour` (the minute price), which is always exact.
//! Minute prices are additive over split points and across sessions; the
//! division by 60 happens once, on the final sum.

use chrono::{Days, NaiveDateTime};
use rust_decimal::Decimal;
use serde::Serialize;

use super::resolver::resolve_schedule;
use crate::domain::{truncate_to_minute, ServiceProfile, MINUTES_PER_HOUR};

const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;

/// Clipped intersection of a session with one tier on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActualTimeslot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub price_per_hour: Decimal,
}

impl ActualTimeslot {
    pub fn minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Cost of this line alone. Totals are computed from
    /// [`minute_price`](Self::minute_price), not by adding these.
    pub fn amount(&self) -> Decimal {
        self.minute_price() / Decimal::from(MINUTES_PER_HOUR)
    }

    /// `minutes × price_per_hour`, sixty times the amount.
    pub fn minute_price(&self) -> Decimal {
        Decimal::from(self.minutes()) * self.price_per_hour
    }
}

/// Itemised cost of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub lines: Vec<ActualTimeslot>,
    pub total_minutes: i64,
    pub amount: Decimal,
}

/// Upper bound on the calendar days a session of this length can touch.
pub fn max_days(start: NaiveDateTime, end: NaiveDateTime) -> u64 {
    let minutes = (end - start).num_minutes();
    if minutes <= 0 {
        return 0;
    }
    let days = (minutes + MINUTES_PER_DAY - 1) / MINUTES_PER_DAY + 1;
    days as u64
}

/// Walks the calendar days of the session and returns one line per
/// (day, tier) overlap, in chronological order for tiling schedules.
///
/// An instant equal to a tier boundary belongs to the later tier.
pub fn decompose_session(
    profile: &ServiceProfile,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_contracted: bool,
) -> Vec<ActualTimeslot> {
    let start = truncate_to_minute(start);
    let end = truncate_to_minute(end);
    let base_date = start.date();
    let mut lines = Vec::new();

    for offset in 0..max_days(start, end) {
        let Some(date) = base_date.checked_add_days(Days::new(offset)) else {
            break;
        };

        let mut overlapped = false;
        for tier in resolve_schedule(profile, date, is_contracted) {
            let tier_start = tier.starts_at(date);
            let tier_end = tier.ends_at(date);
            // inverted or empty tiers cover nothing
            if tier_end <= tier_start {
                continue;
            }

            if tier_start < end && start < tier_end {
                overlapped = true;
                lines.push(ActualTimeslot {
                    start: start.max(tier_start),
                    end: end.min(tier_end),
                    price_per_hour: tier.price_per_hour,
                });
            }
        }

        if !overlapped {
            break;
        }
    }

    lines
}

/// Itemised cost of a session. Sessions that do not end after they start
/// cost nothing.
pub fn cost_breakdown(
    profile: &ServiceProfile,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_contracted: bool,
) -> CostBreakdown {
    let lines = decompose_session(profile, start, end, is_contracted);
    let total_minutes = lines.iter().map(ActualTimeslot::minutes).sum();
    let minute_price: Decimal = lines.iter().map(ActualTimeslot::minute_price).sum();

    CostBreakdown {
        lines,
        total_minutes,
        amount: minute_price / Decimal::from(MINUTES_PER_HOUR),
    }
}

/// Exact `Σ minutes × price_per_hour` of a session. This is what invoices
/// accumulate.
pub fn session_minute_price(
    profile: &ServiceProfile,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_contracted: bool,
) -> Decimal {
    decompose_session(profile, start, end, is_contracted)
        .iter()
        .map(ActualTimeslot::minute_price)
        .sum()
}

/// Total cost of a single session.
pub fn session_cost(
    profile: &ServiceProfile,
    start: NaiveDateTime,
    end: NaiveDateTime,
    is_contracted: bool,
) -> Decimal {
    cost_breakdown(profile, start, end, is_contracted).amount
}

// ── Tests ──────────────────────────────────────────────────────

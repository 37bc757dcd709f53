//! Pricing engine: schedule resolution and session cost decomposition.

pub mod calculator;
pub mod resolver;

pub use calculator::{
    cost_breakdown, decompose_session, session_cost, session_minute_price, ActualTimeslot,
    CostBreakdown,
};
pub use resolver::resolve_schedule;

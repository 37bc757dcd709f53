//! Application layer: the pricing engine and the services built on it.

pub mod pricing;
pub mod services;

pub use pricing::{
    cost_breakdown, resolve_schedule, session_cost, session_minute_price, ActualTimeslot,
    CostBreakdown,
};
pub use services::{InvalidSessionPolicy, InvoiceService};

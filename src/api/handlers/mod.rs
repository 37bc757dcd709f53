//! REST API handlers

pub mod health;
pub mod invoices;
pub mod metrics;
pub mod quote;
pub mod sessions;

//! REST API: invoices, sessions and price previews over HTTP

pub mod common;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};

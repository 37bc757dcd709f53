//! # Parking Billing
//!
//! Invoices for parking sessions priced by hourly tiers.
//!
//! ## Architecture
//!
//! - **domain**: service profiles, sessions, customers, invoices and the
//!   repository traits
//! - **application**: the pricing engine (schedule resolution, session
//!   decomposition) and the invoice service
//! - **infrastructure**: in-memory stores and seed data
//! - **api**: REST API with an OpenAPI document
//! - **server**: runtime shared by the CLI commands

pub mod api;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use api::{create_api_router, ApiState};
pub use application::{InvalidSessionPolicy, InvoiceService};
pub use infrastructure::{InMemoryRepositoryProvider, SeedData};
pub use shared::errors::{AppError, DomainError, InfraError};

//! Parking billing domain: facilities' pricing profiles, customers,
//! sessions and invoices, plus the repository interfaces that serve them.

pub mod customer;
pub mod invoice;
pub mod profile;
pub mod repositories;
pub mod session;

pub use customer::{Customer, CustomerRepository};
pub use invoice::Invoice;
pub use profile::{
    DayType, PricingPlan, Schedule, ServiceProfile, ServiceProfileRepository, TimeslotPrice,
    MINUTES_PER_HOUR,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use session::{truncate_to_minute, Session, SessionId, SessionRepository};

pub use crate::shared::errors::DomainError;

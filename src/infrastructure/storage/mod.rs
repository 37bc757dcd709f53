//! Storage implementations and seed data

mod memory;
pub mod seed;

pub use memory::{
    InMemoryCustomerRepository, InMemoryProfileRepository, InMemoryRepositoryProvider,
    InMemorySessionRepository,
};
pub use seed::{demo_profiles, SeedData, SeedSummary};

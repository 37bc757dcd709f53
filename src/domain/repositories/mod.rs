//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::customer::CustomerRepository;
use super::profile::ServiceProfileRepository;
use super::session::SessionRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let profile = repos.profiles().find_by_facility("pf001").await?;
///     let sessions = repos.sessions().find_by_facility("pf001").await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn profiles(&self) -> &dyn ServiceProfileRepository;
    fn sessions(&self) -> &dyn SessionRepository;
    fn customers(&self) -> &dyn CustomerRepository;
}

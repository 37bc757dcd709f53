//! Session repository interface

use async_trait::async_trait;

use super::model::{Session, SessionId};
use crate::domain::DomainResult;

#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Sessions recorded at `facility_id`, in insertion order.
    async fn find_by_facility(&self, facility_id: &str) -> DomainResult<Vec<Session>>;
    async fn save(&self, session: Session) -> DomainResult<SessionId>;
}

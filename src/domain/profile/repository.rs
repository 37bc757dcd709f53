//! Service profile repository interface

use async_trait::async_trait;

use super::model::ServiceProfile;
use crate::domain::DomainResult;

#[async_trait]
pub trait ServiceProfileRepository: Send + Sync {
    async fn find_by_facility(&self, facility_id: &str) -> DomainResult<Option<ServiceProfile>>;
    async fn find_all(&self) -> DomainResult<Vec<ServiceProfile>>;
    async fn save(&self, profile: ServiceProfile) -> DomainResult<()>;
}

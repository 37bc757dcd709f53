//! Customer repository interface

use async_trait::async_trait;

use super::model::Customer;
use crate::domain::DomainResult;

#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Customer>>;
    async fn save(&self, customer: Customer) -> DomainResult<()>;
}

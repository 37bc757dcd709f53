//! In-memory storage implementation

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::{
    Customer, CustomerRepository, DomainResult, RepositoryProvider, ServiceProfile,
    ServiceProfileRepository, Session, SessionId, SessionRepository,
};

/// Service profiles keyed by facility id
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: DashMap<String, ServiceProfile>,
}

#[async_trait]
impl ServiceProfileRepository for InMemoryProfileRepository {
    async fn find_by_facility(&self, facility_id: &str) -> DomainResult<Option<ServiceProfile>> {
        Ok(self.profiles.get(facility_id).map(|p| p.clone()))
    }

    async fn find_all(&self) -> DomainResult<Vec<ServiceProfile>> {
        let mut profiles: Vec<ServiceProfile> =
            self.profiles.iter().map(|e| e.value().clone()).collect();
        profiles.sort_by(|a, b| a.facility_id.cmp(&b.facility_id));
        Ok(profiles)
    }

    async fn save(&self, profile: ServiceProfile) -> DomainResult<()> {
        self.profiles.insert(profile.facility_id.clone(), profile);
        Ok(())
    }
}

/// Sessions keyed by an insertion sequence number
pub struct InMemorySessionRepository {
    sessions: DashMap<SessionId, Session>,
    session_counter: AtomicU64,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
            session_counter: AtomicU64::new(1),
        }
    }
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_facility(&self, facility_id: &str) -> DomainResult<Vec<Session>> {
        let mut matching: Vec<(SessionId, Session)> = self
            .sessions
            .iter()
            .filter(|e| e.value().facility_id == facility_id)
            .map(|e| (*e.key(), e.value().clone()))
            .collect();
        matching.sort_by_key(|(id, _)| *id);
        Ok(matching.into_iter().map(|(_, s)| s).collect())
    }

    async fn save(&self, session: Session) -> DomainResult<SessionId> {
        let id = self.session_counter.fetch_add(1, Ordering::SeqCst);
        self.sessions.insert(id, session);
        Ok(id)
    }
}

/// Customers keyed by id
#[derive(Default)]
pub struct InMemoryCustomerRepository {
    customers: DashMap<String, Customer>,
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: &str) -> DomainResult<Option<Customer>> {
        Ok(self.customers.get(id).map(|c| c.clone()))
    }

    async fn save(&self, customer: Customer) -> DomainResult<()> {
        self.customers.insert(customer.id.clone(), customer);
        Ok(())
    }
}

/// In-memory storage for development and testing
#[derive(Default)]
pub struct InMemoryRepositoryProvider {
    profiles: InMemoryProfileRepository,
    sessions: InMemorySessionRepository,
    customers: InMemoryCustomerRepository,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn profiles(&self) -> &dyn ServiceProfileRepository {
        &self.profiles
    }

    fn sessions(&self) -> &dyn SessionRepository {
        &self.sessions
    }

    fn customers(&self) -> &dyn CustomerRepository {
        &self.customers
    }
}

//! Invoice service: per-customer invoices for one parking facility

use std::collections::HashMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::application::pricing::{cost_breakdown, session_minute_price, CostBreakdown};
use crate::domain::{
    truncate_to_minute, DomainError, DomainResult, Invoice, RepositoryProvider, ServiceProfile,
    Session,
};

/// What aggregation does with a stored session that fails validation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidSessionPolicy {
    /// Fail the whole request with [`DomainError::InvalidSession`]
    #[default]
    Reject,
    /// Log, count and leave the session out of every invoice
    Skip,
}

impl std::fmt::Display for InvalidSessionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Reject => write!(f, "reject"),
            Self::Skip => write!(f, "skip"),
        }
    }
}

/// Service for invoicing operations
pub struct InvoiceService {
    repos: Arc<dyn RepositoryProvider>,
    policy: InvalidSessionPolicy,
}

impl InvoiceService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, policy: InvalidSessionPolicy) -> Self {
        Self { repos, policy }
    }

    pub fn policy(&self) -> InvalidSessionPolicy {
        self.policy
    }

    /// One invoice per customer with at least one session at the facility,
    /// in order of each customer's first session.
    pub async fn invoices_for(&self, facility_id: &str) -> DomainResult<Vec<Invoice>> {
        let profile = self.load_profile(facility_id).await?;
        let sessions = self.repos.sessions().find_by_facility(facility_id).await?;

        let invoices = self.aggregate(&profile, sessions).await?;

        metrics::counter!("invoices_computed_total").increment(invoices.len() as u64);
        info!(facility_id, invoices = invoices.len(), "Invoices computed");

        Ok(invoices)
    }

    /// The customer's invoice at the facility, or `None` without sessions there.
    pub async fn invoice_for(
        &self,
        facility_id: &str,
        customer_id: &str,
    ) -> DomainResult<Option<Invoice>> {
        let profile = self.load_profile(facility_id).await?;
        let sessions: Vec<Session> = self
            .repos
            .sessions()
            .find_by_facility(facility_id)
            .await?
            .into_iter()
            .filter(|s| s.customer_id == customer_id)
            .collect();

        let invoice = self.aggregate(&profile, sessions).await?.into_iter().next();

        if let Some(ref invoice) = invoice {
            metrics::counter!("invoices_computed_total").increment(1);
            info!(
                facility_id,
                customer_id,
                amount = %invoice.amount,
                sessions = invoice.session_count,
                "Invoice computed"
            );
        }

        Ok(invoice)
    }

    /// Itemised price of a prospective session. Without a customer id the
    /// overrun schedules apply.
    pub async fn quote(
        &self,
        facility_id: &str,
        customer_id: Option<&str>,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> DomainResult<CostBreakdown> {
        if truncate_to_minute(end) <= truncate_to_minute(start) {
            return Err(DomainError::InvalidInterval { start, end });
        }

        let profile = self.load_profile(facility_id).await?;
        let is_contracted = match customer_id {
            Some(customer_id) => self.is_contracted(customer_id, facility_id).await?,
            None => false,
        };

        Ok(cost_breakdown(&profile, start, end, is_contracted))
    }

    async fn load_profile(&self, facility_id: &str) -> DomainResult<ServiceProfile> {
        self.repos
            .profiles()
            .find_by_facility(facility_id)
            .await?
            .ok_or_else(|| DomainError::FacilityNotFound(facility_id.to_string()))
    }

    async fn is_contracted(&self, customer_id: &str, facility_id: &str) -> DomainResult<bool> {
        match self.repos.customers().find_by_id(customer_id).await? {
            Some(customer) => Ok(customer.is_contracted_for(facility_id)),
            None => {
                debug!(customer_id, facility_id, "Unknown customer, pricing as overrun");
                Ok(false)
            }
        }
    }

    async fn aggregate(
        &self,
        profile: &ServiceProfile,
        sessions: Vec<Session>,
    ) -> DomainResult<Vec<Invoice>> {
        let mut invoices: Vec<Invoice> = Vec::new();
        let mut by_customer: HashMap<String, usize> = HashMap::new();
        let mut contracts: HashMap<(String, String), bool> = HashMap::new();

        for session in sessions {
            if let Err(e) = session.validate() {
                match self.policy {
                    InvalidSessionPolicy::Reject => {
                        return Err(match e {
                            DomainError::InvalidSession(_) => e,
                            other => DomainError::InvalidSession(other.to_string()),
                        });
                    }
                    InvalidSessionPolicy::Skip => {
                        warn!(
                            facility_id = %profile.facility_id,
                            customer_id = %session.customer_id,
                            error = %e,
                            "Skipping invalid session"
                        );
                        metrics::counter!("invalid_sessions_skipped_total").increment(1);
                        continue;
                    }
                }
            }

            let key = (session.customer_id.clone(), session.facility_id.clone());
            let is_contracted = match contracts.get(&key) {
                Some(&known) => known,
                None => {
                    let found = self
                        .is_contracted(&session.customer_id, &session.facility_id)
                        .await?;
                    contracts.insert(key, found);
                    found
                }
            };

            let minute_price =
                session_minute_price(profile, session.start, session.end, is_contracted);
            metrics::counter!("sessions_priced_total").increment(1);

            let slot = *by_customer
                .entry(session.customer_id.clone())
                .or_insert_with(|| {
                    invoices.push(Invoice::empty(
                        profile.facility_id.clone(),
                        session.customer_id.clone(),
                    ));
                    invoices.len() - 1
                });
            invoices[slot].add_session(minute_price);
        }

        Ok(invoices)
    }
}

// ── Tests ──────────────────────────────────────────────────────

//! Seed data for the in-memory stores
//!
//! Loaded from a JSON file and/or the built-in demo data set.

use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::{
    Customer, DomainResult, RepositoryProvider, Schedule, ServiceProfile, Session, TimeslotPrice,
};
use crate::shared::errors::InfraError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub profiles: Vec<ServiceProfile>,
    #[serde(default)]
    pub customers: Vec<Customer>,
    #[serde(default)]
    pub sessions: Vec<Session>,
}

/// Counts of the records written by [`SeedData::apply`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub profiles: usize,
    pub customers: usize,
    pub sessions: usize,
}

impl SeedData {
    pub fn load(path: &Path) -> Result<Self, InfraError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Facilities `pf001`/`pf002` and customers `c001`..`c004`, no sessions.
    pub fn demo() -> Self {
        Self {
            profiles: demo_profiles(),
            customers: vec![
                Customer::new("c001", ["pf001"]),
                Customer::new("c002", ["pf001", "pf002"]),
                Customer::new("c003", ["pf002"]),
                Customer::new("c004", Vec::<String>::new()),
            ],
            sessions: Vec::new(),
        }
    }

    pub fn merge(mut self, other: SeedData) -> Self {
        self.profiles.extend(other.profiles);
        self.customers.extend(other.customers);
        self.sessions.extend(other.sessions);
        self
    }

    /// Checks every profile and session without touching any store.
    pub fn validate(&self) -> DomainResult<()> {
        for profile in &self.profiles {
            profile.validate()?;
        }
        for session in &self.sessions {
            session.validate()?;
        }
        Ok(())
    }

    /// Validates, then writes everything into `repos`. Nothing is written
    /// when validation fails.
    pub async fn apply(&self, repos: &dyn RepositoryProvider) -> DomainResult<SeedSummary> {
        self.validate()?;

        for profile in &self.profiles {
            repos.profiles().save(profile.clone()).await?;
        }
        for customer in &self.customers {
            repos.customers().save(customer.clone()).await?;
        }
        for session in &self.sessions {
            repos.sessions().save(session.clone()).await?;
        }

        let summary = SeedSummary {
            profiles: self.profiles.len(),
            customers: self.customers.len(),
            sessions: self.sessions.len(),
        };
        info!(
            profiles = summary.profiles,
            customers = summary.customers,
            sessions = summary.sessions,
            "Seed data applied"
        );
        Ok(summary)
    }
}

/// Demo pricing: contracted weekday 0.5 / 2.5 / 1.5, contracted weekend
/// 0.8 / 2.8 / 1.8, overrun one unit more per hour.
pub fn demo_profiles() -> Vec<ServiceProfile> {
    vec![demo_profile("pf001", 7, 18), demo_profile("pf002", 8, 17)]
}

fn demo_profile(facility_id: &str, day_starts: u8, evening_starts: u8) -> ServiceProfile {
    // prices in tenths
    let schedule = |night: i64, day: i64, evening: i64| {
        Schedule::new(vec![
            TimeslotPrice::new(0, day_starts, Decimal::new(night, 1)),
            TimeslotPrice::new(day_starts, evening_starts, Decimal::new(day, 1)),
            TimeslotPrice::new(evening_starts, 24, Decimal::new(evening, 1)),
        ])
    };

    ServiceProfile {
        facility_id: facility_id.to_string(),
        weekday_prices: schedule(5, 25, 15),
        weekend_prices: schedule(8, 28, 18),
        overrun_weekday_prices: schedule(15, 35, 25),
        overrun_weekend_prices: schedule(18, 38, 28),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;
    use rust_decimal_macros::dec;

    #[test]
    fn demo_profiles_tile_the_day() {
        for profile in demo_profiles() {
            assert!(profile.validate().is_ok(), "{}", profile.facility_id);
        }
    }

    #[test]
    fn overrun_is_one_unit_above_contracted() {
        let pf001 = &demo_profiles()[0];
        for (contracted, overrun) in pf001.weekend_prices.iter().zip(&pf001.overrun_weekend_prices) {
            assert_eq!(overrun.price_per_hour - contracted.price_per_hour, dec!(1));
        }
    }

    #[tokio::test]
    async fn demo_seed_fills_the_stores() {
        let repos = InMemoryRepositoryProvider::new();
        let summary = SeedData::demo().apply(&repos).await.unwrap();
        assert_eq!(summary, SeedSummary { profiles: 2, customers: 4, sessions: 0 });

        let c002 = repos.customers().find_by_id("c002").await.unwrap().unwrap();
        assert!(c002.is_contracted_for("pf001") && c002.is_contracted_for("pf002"));
        assert!(repos.profiles().find_by_facility("pf002").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn invalid_profile_aborts_the_seed() {
        let mut broken = demo_profiles().remove(0);
        broken.weekday_prices = Schedule::new(vec![TimeslotPrice::new(0, 12, dec!(1))]);
        let seed = SeedData {
            profiles: vec![broken],
            ..SeedData::default()
        };

        let repos = InMemoryRepositoryProvider::new();
        assert!(seed.apply(&repos).await.is_err());
        assert!(repos.profiles().find_all().await.unwrap().is_empty());
    }

    #[test]
    fn seed_file_format() {
        let json = r#"{
            "customers": [{"id": "c010", "contracted_facility_ids": ["pf001"]}],
            "sessions": [{
                "customer_id": "c010",
                "facility_id": "pf001",
                "start": "2018-12-14T12:00:00",
                "end": "2018-12-14T13:30:00"
            }]
        }"#;

        let dir = std::env::temp_dir().join(format!("parking-billing-seed-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("seed.json");
        std::fs::write(&path, json).unwrap();

        let seed = SeedData::load(&path).unwrap();
        assert!(seed.profiles.is_empty());
        assert_eq!(seed.customers[0].id, "c010");
        assert_eq!(seed.sessions[0].duration(), chrono::TimeDelta::minutes(90));

        let merged = SeedData::demo().merge(seed);
        assert_eq!(merged.customers.len(), 5);
        assert!(merged.validate().is_ok());

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn profile_prices_accept_strings_in_json() {
        let json = r#"{"start_hour": 0, "end_hour": 24, "price_per_hour": "0.5"}"#;
        let tier: TimeslotPrice = serde_json::from_str(json).unwrap();
        assert_eq!(tier.price_per_hour, dec!(0.5));
    }
}

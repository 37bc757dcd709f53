//! Customer domain entity

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    /// Facilities where this customer holds a standing contract
    #[serde(default)]
    pub contracted_facility_ids: BTreeSet<String>,
}

impl Customer {
    pub fn new<I, S>(id: impl Into<String>, contracted_facility_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            contracted_facility_ids: contracted_facility_ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_contracted_for(&self, facility_id: &str) -> bool {
        self.contracted_facility_ids.contains(facility_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_is_per_facility() {
        let c = Customer::new("c001", ["pf001"]);
        assert!(c.is_contracted_for("pf001"));
        assert!(!c.is_contracted_for("pf002"));
    }

    #[test]
    fn missing_contract_list_deserializes_empty() {
        let c: Customer = serde_json::from_str(r#"{"id":"c004"}"#).unwrap();
        assert!(c.contracted_facility_ids.is_empty());
    }
}

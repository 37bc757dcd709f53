//! Invoice output artifact

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::MINUTES_PER_HOUR;

/// Aggregated charge for all sessions of one customer at one facility
///
/// Sessions are accumulated as exact `minutes × price_per_hour` sums and
/// `amount` is derived from the running total with a single division, so an
/// invoice never carries per-session rounding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub facility_id: String,
    pub customer_id: String,
    pub amount: Decimal,
    pub session_count: usize,
    #[serde(skip)]
    minute_price: Decimal,
}

impl Invoice {
    pub fn empty(facility_id: impl Into<String>, customer_id: impl Into<String>) -> Self {
        Self {
            facility_id: facility_id.into(),
            customer_id: customer_id.into(),
            amount: Decimal::ZERO,
            session_count: 0,
            minute_price: Decimal::ZERO,
        }
    }

    /// Add one session, given as its exact `Σ minutes × price_per_hour`.
    pub fn add_session(&mut self, minute_price: Decimal) {
        self.minute_price += minute_price;
        self.amount = self.minute_price / Decimal::from(MINUTES_PER_HOUR);
        self.session_count += 1;
    }

    pub fn minute_price(&self) -> Decimal {
        self.minute_price
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn one_minute_sessions_sum_without_drift() {
        // one minute at 0.5/h is 0.0083..., three of them are exactly 0.025
        let mut invoice = Invoice::empty("pf001", "c001");
        for _ in 0..3 {
            invoice.add_session(dec!(0.5));
        }
        assert_eq!(invoice.session_count, 3);
        assert_eq!(invoice.minute_price(), dec!(1.5));
        assert_eq!(invoice.amount, dec!(0.025));
    }

    #[test]
    fn seven_minute_sessions_sum_without_drift() {
        // 7 min at 2.5/h = 17.5 minute-price; six sessions = 105 / 60 = 1.75
        let mut invoice = Invoice::empty("pf001", "c001");
        for _ in 0..6 {
            invoice.add_session(dec!(17.5));
        }
        assert_eq!(invoice.amount, dec!(1.75));
    }

    #[test]
    fn empty_invoice_owes_nothing() {
        let invoice = Invoice::empty("pf001", "c001");
        assert_eq!(invoice.amount, Decimal::ZERO);
        assert_eq!(invoice.session_count, 0);
    }
}

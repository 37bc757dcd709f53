use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Invoice;

/// Amount owed by one customer at one facility
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InvoiceResponse {
    pub facility_id: String,
    pub customer_id: String,
    /// Exact decimal, serialized as a string
    #[schema(value_type = String, example = "28.5")]
    pub amount: Decimal,
    pub session_count: usize,
}

impl From<Invoice> for InvoiceResponse {
    fn from(invoice: Invoice) -> Self {
        Self {
            facility_id: invoice.facility_id,
            customer_id: invoice.customer_id,
            amount: invoice.amount,
            session_count: invoice.session_count,
        }
    }
}

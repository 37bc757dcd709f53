//! Application services

mod invoice;

pub use invoice::{InvalidSessionPolicy, InvoiceService};

//! Parking session aggregate

pub mod model;
pub mod repository;

pub use model::{truncate_to_minute, Session, SessionId};
pub use repository::SessionRepository;

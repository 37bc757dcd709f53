use chrono::NaiveDateTime;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid parking facility id '{0}'")]
    FacilityNotFound(String),

    #[error("Invalid session: {0}")]
    InvalidSession(String),

    #[error("Invalid interval: end {end} is not after start {start}")]
    InvalidInterval {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },

    #[error("Invalid schedule: {0}")]
    InvalidSchedule(String),

    #[error("Validation: {0}")]
    Validation(String),
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Server error: {0}")]
    Server(String),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Infra(#[from] InfraError),
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        Self::Infra(InfraError::Io(e))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Infra(InfraError::Json(e))
    }
}

use crate::backend::BackendError;
use crate::config::ConfigError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FlowError {
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{step} failed: {message}")]
    Setup { step: &'static str, message: String },
    #[error("{target} stayed stale after {attempts} attempts")]
    StaleRetriesExhausted { target: String, attempts: u32 },
    #[error("Could not interact with {field}")]
    FieldUnusable { field: String },
    #[error("{0}")]
    Assertion(String),
}

impl FlowError {
    pub fn setup(step: &'static str, err: impl std::fmt::Display) -> Self {
        FlowError::Setup {
            step,
            message: err.to_string(),
        }
    }
}

use thiserror::Error;

/// Errors surfaced by a browser backend.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Backend not ready")]
    NotReady,
    #[error("Navigation failed: {0}")]
    Navigation(String),
    #[error("Stale element reference: {0}")]
    StaleElement(String),
    #[error("No such element: {0}")]
    NoSuchElement(String),
    #[error("Timed out waiting for {0}")]
    Timeout(String),
    #[error("Script error: {0}")]
    Script(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Backend error: {0}")]
    Other(String),
}

impl BackendError {
    /// The element reference no longer reflects the live page (re-render).
    pub fn is_stale(&self) -> bool {
        matches!(self, BackendError::StaleElement(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, BackendError::NoSuchElement(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(BackendError::StaleElement("x".into()).is_stale());
        assert!(!BackendError::StaleElement("x".into()).is_missing());
        assert!(BackendError::NoSuchElement("x".into()).is_missing());
        assert!(BackendError::Timeout("x".into()).is_timeout());
        assert!(!BackendError::NotReady.is_stale());
    }

    #[test]
    fn test_display() {
        let err = BackendError::Timeout("xpath://button".into());
        assert_eq!(err.to_string(), "Timed out waiting for xpath://button");
    }
}

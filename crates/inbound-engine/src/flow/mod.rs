//! The receipt-form flow: session bootstrap, navigation, form interaction,
//! and the checks run after submitting or uploading.

mod form;
mod navigation;
mod session;
mod upload;
mod validation;

pub use form::{FieldEntry, TAB_KEY};

use crate::artifacts::Artifacts;
use crate::backend::Backend;
use crate::config::FlowConfig;
use crate::wait::Waiter;
use std::path::PathBuf;
use tracing::warn;

/// One browser session positioned somewhere in the receipt flow.
pub struct InboundFlow<'a, B: Backend> {
    backend: &'a mut B,
    config: &'a FlowConfig,
    artifacts: &'a mut Artifacts,
    waiter: Waiter,
}

impl<'a, B: Backend> InboundFlow<'a, B> {
    pub fn new(backend: &'a mut B, config: &'a FlowConfig, artifacts: &'a mut Artifacts) -> Self {
        Self {
            backend,
            config,
            artifacts,
            waiter: Waiter::from_config(&config.timeouts),
        }
    }

    pub fn config(&self) -> &'a FlowConfig {
        self.config
    }

    pub fn backend(&mut self) -> &mut B {
        &mut *self.backend
    }

    pub fn waiter(&self) -> Waiter {
        self.waiter
    }

    /// Best-effort screenshot tagged for the current case.
    pub async fn screenshot(&mut self, tag: &str) -> Option<PathBuf> {
        self.artifacts.capture(&mut *self.backend, tag).await
    }

    /// Current URL, or `"unknown"` when the browser cannot answer.
    pub async fn safe_current_url(&mut self) -> String {
        match self.backend.current_url().await {
            Ok(url) => url,
            Err(e) => {
                warn!("Could not get current URL (browser may be unreachable): {}", e);
                "unknown".to_string()
            }
        }
    }
}

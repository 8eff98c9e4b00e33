use super::InboundFlow;
use crate::backend::{Backend, BackendError};
use crate::selectors;
use inbound_common::locator::Locator;
use inbound_common::validation::{FieldErrorState, ValidationErrors};
use std::time::Duration;
use tracing::debug;

impl<B: Backend> InboundFlow<'_, B> {
    /// Poll for any validation region after submitting, bounded by the
    /// post-submit delay.
    pub async fn await_validation_feedback(&mut self) {
        let ceiling = Duration::from_millis(self.config.delays.after_next_ms);
        let regions = selectors::all(selectors::VALIDATION_ERRORS);
        if let Err(e) = self
            .waiter
            .with_timeout(ceiling)
            .any_present(&mut *self.backend, &regions)
            .await
        {
            debug!("No validation region appeared: {}", e);
        }
    }

    /// Visible, non-empty messages from every candidate error region, in
    /// selector order and without duplicates.
    pub async fn collect_validation_errors(&mut self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for locator in selectors::all(selectors::VALIDATION_ERRORS) {
            let elements = match self.backend.find_all(&locator).await {
                Ok(elements) => elements,
                Err(e) => {
                    debug!(selector = %locator, "Error region lookup failed: {}", e);
                    continue;
                }
            };
            for element in &elements {
                if let Some(text) = self.visible_text(element).await {
                    errors.insert(&text);
                }
            }
        }
        errors
    }

    async fn visible_text(&mut self, element: &B::Element) -> Option<String> {
        if !self.backend.is_displayed(element).await.ok()? {
            return None;
        }
        let text = self.backend.text(element).await.ok()?;
        (!text.trim().is_empty()).then_some(text)
    }

    /// Error state of a single field; any lookup failure reads as "no error".
    pub async fn field_error_state(&mut self, locator: &Locator) -> FieldErrorState {
        match self.read_field_state(locator).await {
            Ok(state) => state,
            Err(e) => {
                debug!(selector = %locator, "Could not inspect field state: {}", e);
                FieldErrorState::default()
            }
        }
    }

    async fn read_field_state(&mut self, locator: &Locator) -> Result<FieldErrorState, BackendError> {
        let field = self.backend.find(locator).await?;
        let class = self.backend.attribute(&field, "class").await?;
        let aria_invalid = self.backend.attribute(&field, "aria-invalid").await?;
        let parent = self.backend.parent(&field).await?;
        let parent_class = self.backend.attribute(&parent, "class").await?;
        Ok(FieldErrorState::from_attributes(
            class.as_deref(),
            aria_invalid.as_deref(),
            parent_class.as_deref(),
        ))
    }
}

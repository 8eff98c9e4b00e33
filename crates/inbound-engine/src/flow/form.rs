use super::InboundFlow;
use crate::backend::{Backend, BackendError};
use crate::error::FlowError;
use crate::selectors::{self, xpath};
use crate::wait::settle;
use inbound_common::locator::Locator;
use tracing::{error, info, warn};

/// WebDriver key code for TAB.
pub const TAB_KEY: &str = "\u{E004}";

/// How a value ended up in a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEntry {
    Typed,
    TypedAfterRetry { attempts: u32 },
    ScriptFallback,
}

impl<B: Backend> InboundFlow<'_, B> {
    /// Type `text` into the field at `locator`.
    ///
    /// Stale references are retried up to the configured ceiling. Any other
    /// failure, or running out of retries, falls back to assigning the value
    /// through a script; if that fails too the field is unusable.
    pub async fn enter_text(
        &mut self,
        locator: &Locator,
        text: &str,
        field: &str,
    ) -> Result<FieldEntry, FlowError> {
        let max_attempts = self.config.retries.enter_text_attempts.max(1);
        let mut stale = 0;

        loop {
            match self.type_into(locator, text).await {
                Ok(()) => {
                    info!(field, value = text, "Entered text");
                    return Ok(if stale == 0 {
                        FieldEntry::Typed
                    } else {
                        FieldEntry::TypedAfterRetry { attempts: stale }
                    });
                }
                Err(e) if e.is_stale() => {
                    stale += 1;
                    if stale >= max_attempts {
                        warn!(field, attempts = stale, "Field stayed stale");
                        return self.script_entry(locator, text, field).await;
                    }
                    warn!(field, attempt = stale + 1, "Field went stale, retrying");
                }
                Err(e) => {
                    warn!(field, "Failed to enter text: {}", e);
                    return self.script_entry(locator, text, field).await;
                }
            }
        }
    }

    async fn type_into(&mut self, locator: &Locator, text: &str) -> Result<(), BackendError> {
        let element = self.waiter.clickable(&mut *self.backend, locator).await?;
        self.backend.scroll_into_view(&element).await?;
        settle(self.config.delays.field_scroll_settle_ms).await;
        self.backend.click(&element).await?;
        settle(self.config.delays.focus_settle_ms).await;
        self.backend.clear(&element).await?;
        self.backend.send_keys(&element, text).await
    }

    async fn script_entry(
        &mut self,
        locator: &Locator,
        text: &str,
        field: &str,
    ) -> Result<FieldEntry, FlowError> {
        warn!(field, "Attempting script fallback");
        match self.assign_value(locator, text).await {
            Ok(()) => {
                info!(field, value = text, "Entered text via script");
                Ok(FieldEntry::ScriptFallback)
            }
            Err(e) => {
                error!(field, "Script fallback also failed: {}", e);
                Err(FlowError::FieldUnusable {
                    field: field.to_string(),
                })
            }
        }
    }

    async fn assign_value(&mut self, locator: &Locator, text: &str) -> Result<(), BackendError> {
        let element = self.backend.find(locator).await?;
        self.backend.scroll_into_view(&element).await?;
        settle(self.config.delays.field_scroll_settle_ms).await;
        self.backend.set_value(&element, text).await
    }

    /// Empty a field. A missing field is reported as `false`, never as an error.
    pub async fn clear_field(&mut self, locator: &Locator, field: &str) -> bool {
        let element = match self.backend.find(locator).await {
            Ok(element) => element,
            Err(e) => {
                warn!(field, "Field not found: {}", e);
                return false;
            }
        };
        match self.backend.clear(&element).await {
            Ok(()) => {
                info!(field, "Left empty");
                true
            }
            Err(e) => {
                warn!(field, "Could not clear field: {}", e);
                false
            }
        }
    }

    /// Fill a date picker input and TAB out of it. Failure is logged only.
    pub async fn enter_date(&mut self, locator: &Locator, value: &str, field: &str) -> bool {
        match self.type_date(locator, value).await {
            Ok(()) => {
                info!(field, value, "Entered date");
                settle(self.config.delays.date_settle_ms).await;
                true
            }
            Err(e) => {
                warn!(field, "Failed to enter date: {}", e);
                false
            }
        }
    }

    async fn type_date(&mut self, locator: &Locator, value: &str) -> Result<(), BackendError> {
        let element = self.waiter.clickable(&mut *self.backend, locator).await?;
        self.backend.click(&element).await?;
        self.backend.clear(&element).await?;
        self.backend.send_keys(&element, value).await?;
        self.backend.send_keys(&element, TAB_KEY).await
    }

    /// Live `value` of a field.
    pub async fn field_value(&mut self, locator: &Locator) -> Result<Option<String>, BackendError> {
        let element = self.backend.find(locator).await?;
        self.backend.property(&element, "value").await
    }

    /// Click "Next" once it becomes clickable.
    pub async fn submit_next(&mut self) -> Result<(), BackendError> {
        let button = self
            .waiter
            .clickable(&mut *self.backend, &xpath(selectors::NEXT_BUTTON))
            .await?;
        self.backend.click(&button).await?;
        info!("Clicked Next button");
        Ok(())
    }
}

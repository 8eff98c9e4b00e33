use super::InboundFlow;
use crate::backend::{Backend, BackendError};
use crate::error::FlowError;
use crate::selectors::{self, xpath};
use crate::wait::settle;
use inbound_common::locator::Locator;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const NEW_RECEIPT: &str = "New Unplanned Receipt";

impl<B: Backend> InboundFlow<'_, B> {
    /// Open the receipt-creation modal, re-locating the trigger when it goes stale.
    pub async fn click_new_receipt(&mut self) -> Result<(), FlowError> {
        let locator = xpath(selectors::NEW_UNPLANNED_RECEIPT_BUTTON);
        let max_attempts = self.config.retries.new_receipt_attempts.max(1);
        let mut attempts = 0;

        loop {
            match self.activate(&locator).await {
                Ok(()) => {
                    info!(step = "new_receipt", "Clicked '{}'", NEW_RECEIPT);
                    self.await_mode_options().await;
                    return Ok(());
                }
                Err(e) if e.is_stale() => {
                    attempts += 1;
                    if attempts >= max_attempts {
                        error!(step = "new_receipt", attempts, "Element stayed stale");
                        return Err(FlowError::StaleRetriesExhausted {
                            target: NEW_RECEIPT.to_string(),
                            attempts,
                        });
                    }
                    warn!(step = "new_receipt", attempt = attempts + 1, "Element stale, retrying");
                }
                Err(e) => {
                    error!(step = "new_receipt", "Failed to click button: {}", e);
                    self.screenshot("error_new_receipt").await;
                    return Err(FlowError::setup("new unplanned receipt", e));
                }
            }
        }
    }

    /// Try each External PO Reference strategy in order until one both clicks
    /// and brings up the PO number field. Returns `false` when none does.
    pub async fn select_external_po(&mut self) -> bool {
        let strategies = selectors::all(selectors::EXTERNAL_PO_OPTIONS);
        let po_field = xpath(selectors::EXTERNAL_PO_NUMBER);
        let verify = self.waiter.with_timeout(self.config.timeouts.form_verify());

        for (i, strategy) in strategies.iter().enumerate() {
            let selector = i + 1;
            match self.activate(strategy).await {
                Ok(()) => {
                    info!(step = "external_po", selector, "Selected External PO Reference");
                    match verify.present(&mut *self.backend, &po_field).await {
                        Ok(_) => {
                            info!(step = "external_po", "Form loaded and ready");
                            return true;
                        }
                        Err(e) => {
                            warn!(step = "external_po", selector, "Form did not load after clicking option: {}", e);
                        }
                    }
                }
                Err(e) if selector == strategies.len() => {
                    warn!(
                        step = "external_po",
                        "Could not select External PO option with any selector: {}", e
                    );
                    self.screenshot("error_external_po").await;
                }
                Err(e) => {
                    debug!(step = "external_po", selector, "Strategy missed: {}", e);
                }
            }
        }
        false
    }

    /// Wait until clickable, scroll into view, settle, click.
    pub(crate) async fn activate(&mut self, locator: &Locator) -> Result<(), BackendError> {
        let element = self.waiter.clickable(&mut *self.backend, locator).await?;
        self.backend.scroll_into_view(&element).await?;
        settle(self.config.delays.scroll_settle_ms).await;
        self.backend.click(&element).await
    }

    /// The mode modal animates in; poll for its options with the modal delay
    /// as the ceiling and carry on either way.
    async fn await_mode_options(&mut self) {
        let ceiling = Duration::from_millis(self.config.delays.modal_settle_ms);
        let options = selectors::all(selectors::EXTERNAL_PO_OPTIONS);
        if let Err(e) = self
            .waiter
            .with_timeout(ceiling)
            .any_present(&mut *self.backend, &options)
            .await
        {
            debug!(step = "new_receipt", "Mode options not visible yet: {}", e);
        }
    }
}

use super::InboundFlow;
use crate::backend::Backend;
use crate::config::ConfigError;
use crate::error::FlowError;
use crate::selectors::{self, xpath};
use tracing::{error, info};

impl<B: Backend> InboundFlow<'_, B> {
    /// Log in, open the Inbound page and reach the External PO Reference form.
    pub async fn bootstrap(&mut self) -> Result<(), FlowError> {
        self.login().await?;
        self.open_inbound().await?;
        self.click_new_receipt().await?;

        if !self.select_external_po().await {
            self.screenshot("fatal_external_po_not_found").await;
            return Err(FlowError::setup(
                "external PO reference",
                "Could not select External PO Reference option. Test cannot proceed.",
            ));
        }
        Ok(())
    }

    pub async fn login(&mut self) -> Result<(), FlowError> {
        match self.try_login().await {
            Ok(()) => {
                info!(step = "login", "Login successful");
                Ok(())
            }
            Err(e) => {
                error!(step = "login", "Login failed: {}", e);
                self.screenshot("error_login").await;
                Err(FlowError::setup("login", e))
            }
        }
    }

    async fn try_login(&mut self) -> Result<(), FlowError> {
        let url = self.config.target.login_url().map_err(ConfigError::from)?;
        let credentials = &self.config.credentials;

        self.backend.navigate(url.as_str()).await?;
        info!(step = "login", url = %url, "Navigated to login page");

        let username = self
            .waiter
            .present(&mut *self.backend, &xpath(selectors::USERNAME_FIELD))
            .await?;
        self.backend.clear(&username).await?;
        self.backend.send_keys(&username, &credentials.username).await?;
        info!(step = "login", username = %credentials.username, "Entered username");

        let password = self
            .waiter
            .present(&mut *self.backend, &xpath(selectors::PASSWORD_FIELD))
            .await?;
        self.backend.clear(&password).await?;
        self.backend.send_keys(&password, &credentials.password).await?;

        let button = self
            .waiter
            .clickable(&mut *self.backend, &xpath(selectors::LOGIN_BUTTON))
            .await?;
        self.backend.click(&button).await?;

        let marker = self.config.target.login_marker.clone();
        self.waiter
            .url_matches(&mut *self.backend, "navigation away from login", move |url| {
                !url.contains(&marker)
            })
            .await?;
        Ok(())
    }

    pub async fn open_inbound(&mut self) -> Result<(), FlowError> {
        match self.try_open_inbound().await {
            Ok(()) => {
                info!(step = "inbound", "Inbound page loaded");
                Ok(())
            }
            Err(e) => {
                error!(step = "inbound", "Navigation failed: {}", e);
                self.screenshot("error_navigation").await;
                Err(FlowError::setup("inbound navigation", e))
            }
        }
    }

    async fn try_open_inbound(&mut self) -> Result<(), FlowError> {
        let url = self.config.target.inbound_url().map_err(ConfigError::from)?;
        self.backend.navigate(url.as_str()).await?;
        self.waiter
            .present(
                &mut *self.backend,
                &xpath(selectors::NEW_UNPLANNED_RECEIPT_BUTTON),
            )
            .await?;
        Ok(())
    }
}

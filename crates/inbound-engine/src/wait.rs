//! Explicit waits: bounded polling of a DOM predicate.

use crate::backend::{Backend, BackendError};
use crate::config::TimeoutConfig;
use inbound_common::locator::Locator;
use std::time::Duration;
use tokio::time::{Instant, sleep};

#[derive(Debug, Clone, Copy)]
pub struct Waiter {
    timeout: Duration,
    poll: Duration,
}

impl Waiter {
    pub fn new(timeout: Duration, poll: Duration) -> Self {
        Self { timeout, poll }
    }

    pub fn from_config(config: &TimeoutConfig) -> Self {
        Self::new(config.explicit_wait(), config.poll_interval())
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Wait until `locator` matches an element.
    pub async fn present<B: Backend>(
        &self,
        backend: &mut B,
        locator: &Locator,
    ) -> Result<B::Element, BackendError> {
        self.poll_element(backend, locator, false).await
    }

    /// Wait until `locator` matches an element that is displayed and enabled.
    pub async fn clickable<B: Backend>(
        &self,
        backend: &mut B,
        locator: &Locator,
    ) -> Result<B::Element, BackendError> {
        self.poll_element(backend, locator, true).await
    }

    /// Wait until `locator` matches at least one element.
    pub async fn all_present<B: Backend>(
        &self,
        backend: &mut B,
        locator: &Locator,
    ) -> Result<Vec<B::Element>, BackendError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match backend.find_all(locator).await {
                Ok(elements) if !elements.is_empty() => return Ok(elements),
                Ok(_) => {}
                Err(e) if retryable(&e) => {}
                Err(e) => return Err(e),
            }
            self.tick(deadline, locator).await?;
        }
    }

    /// Wait until any of `locators` matches; returns the index of the first hit.
    pub async fn any_present<B: Backend>(
        &self,
        backend: &mut B,
        locators: &[Locator],
    ) -> Result<usize, BackendError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            for (i, locator) in locators.iter().enumerate() {
                match backend.find(locator).await {
                    Ok(_) => return Ok(i),
                    Err(e) if retryable(&e) => {}
                    Err(e) => return Err(e),
                }
            }
            if Instant::now() >= deadline {
                return Err(BackendError::Timeout(format!(
                    "any of {} locators",
                    locators.len()
                )));
            }
            sleep(self.poll).await;
        }
    }

    /// Wait until the current URL satisfies `predicate`.
    pub async fn url_matches<B, F>(
        &self,
        backend: &mut B,
        description: &str,
        predicate: F,
    ) -> Result<String, BackendError>
    where
        B: Backend,
        F: Fn(&str) -> bool + Send,
    {
        let deadline = Instant::now() + self.timeout;
        loop {
            let url = backend.current_url().await?;
            if predicate(&url) {
                return Ok(url);
            }
            if Instant::now() >= deadline {
                return Err(BackendError::Timeout(format!("{} (at {})", description, url)));
            }
            sleep(self.poll).await;
        }
    }

    async fn poll_element<B: Backend>(
        &self,
        backend: &mut B,
        locator: &Locator,
        clickable: bool,
    ) -> Result<B::Element, BackendError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match backend.find(locator).await {
                Ok(element) if !clickable => return Ok(element),
                Ok(element) => match is_clickable(backend, &element).await {
                    Ok(true) => return Ok(element),
                    Ok(false) => {}
                    Err(e) if retryable(&e) => {}
                    Err(e) => return Err(e),
                },
                Err(e) if retryable(&e) => {}
                Err(e) => return Err(e),
            }
            self.tick(deadline, locator).await?;
        }
    }

    async fn tick(&self, deadline: Instant, locator: &Locator) -> Result<(), BackendError> {
        if Instant::now() >= deadline {
            return Err(BackendError::Timeout(locator.to_string()));
        }
        sleep(self.poll).await;
        Ok(())
    }
}

async fn is_clickable<B: Backend>(
    backend: &mut B,
    element: &B::Element,
) -> Result<bool, BackendError> {
    Ok(backend.is_displayed(element).await? && backend.is_enabled(element).await?)
}

fn retryable(err: &BackendError) -> bool {
    err.is_missing() || err.is_stale()
}

/// Unconditional pause for transitions with no observable completion signal.
pub async fn settle(millis: u64) {
    if millis > 0 {
        sleep(Duration::from_millis(millis)).await;
    }
}

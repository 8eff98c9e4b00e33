use async_trait::async_trait;
pub use inbound_common::error::BackendError;
use inbound_common::locator::Locator;

#[derive(Debug, Clone)]
pub struct NavigationResult {
    pub url: String,
    pub title: String,
}

/// The browser seam every flow step goes through.
///
/// Element handles are opaque to the engine; a handle may go stale when the
/// page re-renders, which backends report as [`BackendError::StaleElement`].
#[async_trait]
pub trait Backend: Send + Sync {
    type Element: Clone + Send + Sync;

    /// Launch the backend (start or connect to the browser session).
    async fn launch(&mut self) -> Result<(), BackendError>;

    /// Close the session. Closing an already-closed backend is a no-op.
    async fn close(&mut self) -> Result<(), BackendError>;

    /// Check if the backend is ready to accept commands.
    async fn is_ready(&self) -> bool;

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError>;

    async fn current_url(&mut self) -> Result<String, BackendError>;

    async fn page_source(&mut self) -> Result<String, BackendError>;

    /// Capture a PNG screenshot of the current viewport.
    async fn screenshot(&mut self) -> Result<Vec<u8>, BackendError>;

    async fn find(&mut self, locator: &Locator) -> Result<Self::Element, BackendError>;

    /// All matches; an empty vector when nothing matches.
    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<Self::Element>, BackendError>;

    async fn parent(&mut self, element: &Self::Element) -> Result<Self::Element, BackendError>;

    async fn is_displayed(&mut self, element: &Self::Element) -> Result<bool, BackendError>;

    async fn is_enabled(&mut self, element: &Self::Element) -> Result<bool, BackendError>;

    async fn text(&mut self, element: &Self::Element) -> Result<String, BackendError>;

    /// Read an HTML attribute such as `class` or `aria-invalid`.
    async fn attribute(
        &mut self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, BackendError>;

    /// Read a live DOM property such as `value`.
    async fn property(
        &mut self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, BackendError>;

    async fn click(&mut self, element: &Self::Element) -> Result<(), BackendError>;

    async fn clear(&mut self, element: &Self::Element) -> Result<(), BackendError>;

    async fn send_keys(&mut self, element: &Self::Element, text: &str) -> Result<(), BackendError>;

    async fn scroll_into_view(&mut self, element: &Self::Element) -> Result<(), BackendError>;

    /// Assign `value` directly through a script, bypassing simulated keystrokes.
    async fn set_value(
        &mut self,
        element: &Self::Element,
        value: &str,
    ) -> Result<(), BackendError>;
}

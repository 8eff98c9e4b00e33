use crate::chromedriver::{self, ChromeDriverProcess};
use crate::webdriver::{self, WebDriverClient};
use async_trait::async_trait;
use fantoccini::Client;
use fantoccini::elements::Element;
use fantoccini::error::CmdError;
use inbound_engine::backend::{Backend, BackendError, NavigationResult};
use inbound_engine::config::BrowserConfig;
use inbound_engine::locator::Locator;
use tracing::info;

const SCROLL_INTO_VIEW: &str = "arguments[0].scrollIntoView(true);";
const SET_VALUE: &str = r#"
    const el = arguments[0];
    el.value = arguments[1];
    el.dispatchEvent(new Event('input', { bubbles: true }));
    el.dispatchEvent(new Event('change', { bubbles: true }));
"#;

/// Chrome driven through chromedriver, either launched on demand or reached
/// at an existing WebDriver URL.
pub struct WebDriverBackend {
    client: Option<WebDriverClient>,
    webdriver_url: Option<String>,
    driver_process: Option<ChromeDriverProcess>,
    browser: BrowserConfig,
    port: u16,
}

impl WebDriverBackend {
    /// Launch a local chromedriver on the default port.
    pub fn new(browser: BrowserConfig) -> Self {
        Self {
            client: None,
            webdriver_url: None,
            driver_process: None,
            browser,
            port: chromedriver::DEFAULT_CHROMEDRIVER_PORT,
        }
    }

    /// Launch a local chromedriver on a specific port.
    pub fn on_port(browser: BrowserConfig, port: u16) -> Self {
        Self {
            port,
            ..Self::new(browser)
        }
    }

    /// Connect to an existing WebDriver server.
    pub fn with_url(webdriver_url: String, browser: BrowserConfig) -> Self {
        Self {
            webdriver_url: Some(webdriver_url),
            ..Self::new(browser)
        }
    }

    fn client(&self) -> Result<&Client, BackendError> {
        self.client
            .as_ref()
            .map(|c| &c.client)
            .ok_or(BackendError::NotReady)
    }

    async fn run_script(
        &self,
        script: &str,
        element: &Element,
        extra: Option<&str>,
    ) -> Result<(), BackendError> {
        let client = self.client()?;
        let mut args = vec![serde_json::to_value(element)?];
        if let Some(extra) = extra {
            args.push(serde_json::Value::String(extra.to_string()));
        }
        client
            .execute(script, args)
            .await
            .map_err(|e| BackendError::Script(e.to_string()))?;
        Ok(())
    }
}

fn to_wd(locator: &Locator) -> fantoccini::Locator<'_> {
    match locator {
        Locator::XPath(q) => fantoccini::Locator::XPath(q),
        Locator::Css(q) => fantoccini::Locator::Css(q),
        Locator::Id(q) => fantoccini::Locator::Id(q),
    }
}

/// Map a WebDriver command error onto the engine's retry classes.
pub fn classify(err: CmdError) -> BackendError {
    classify_message(err.to_string())
}

pub fn classify_message(message: String) -> BackendError {
    let lower = message.to_lowercase();
    if lower.contains("stale element reference") {
        BackendError::StaleElement(message)
    } else if lower.contains("no such element") {
        BackendError::NoSuchElement(message)
    } else if lower.contains("javascript error") {
        BackendError::Script(message)
    } else if lower.contains("timeout") {
        BackendError::Timeout(message)
    } else {
        BackendError::Other(message)
    }
}

#[async_trait]
impl Backend for WebDriverBackend {
    type Element = Element;

    async fn launch(&mut self) -> Result<(), BackendError> {
        let webdriver_url = if let Some(url) = &self.webdriver_url {
            info!("Connecting to external WebDriver at {}...", url);
            url.clone()
        } else {
            info!("Launching chromedriver on port {}...", self.port);
            let process = chromedriver::launch_chromedriver(self.port)
                .await
                .map_err(BackendError::Other)?;
            let url = process.webdriver_url();
            self.driver_process = Some(process);
            url
        };

        let capabilities = webdriver::chrome_capabilities(&self.browser);
        let client = WebDriverClient::connect(&webdriver_url, Some(capabilities))
            .await
            .map_err(|e| BackendError::Other(e.to_string()))?;
        client
            .configure(&self.browser)
            .await
            .map_err(|e| BackendError::Other(e.to_string()))?;
        self.client = Some(client);
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BackendError> {
        let result = match self.client.take() {
            Some(client) => client
                .close()
                .await
                .map_err(|e| BackendError::Other(e.to_string())),
            None => Ok(()),
        };
        self.driver_process = None;
        result
    }

    async fn is_ready(&self) -> bool {
        self.client.is_some()
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        let client = self.client()?;
        info!("Navigating to: {}", url);
        client
            .goto(url)
            .await
            .map_err(|e| BackendError::Navigation(e.to_string()))?;

        let title = client.title().await.unwrap_or_default();
        let url = client
            .current_url()
            .await
            .map(|u| u.to_string())
            .unwrap_or_default();
        Ok(NavigationResult { url, title })
    }

    async fn current_url(&mut self) -> Result<String, BackendError> {
        let url = self.client()?.current_url().await.map_err(classify)?;
        Ok(url.to_string())
    }

    async fn page_source(&mut self) -> Result<String, BackendError> {
        self.client()?.source().await.map_err(classify)
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, BackendError> {
        self.client()?
            .screenshot()
            .await
            .map_err(|e| BackendError::Other(format!("Screenshot failed: {}", e)))
    }

    async fn find(&mut self, locator: &Locator) -> Result<Element, BackendError> {
        self.client()?.find(to_wd(locator)).await.map_err(classify)
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<Element>, BackendError> {
        self.client()?
            .find_all(to_wd(locator))
            .await
            .map_err(classify)
    }

    async fn parent(&mut self, element: &Element) -> Result<Element, BackendError> {
        self.client()?;
        element
            .find(fantoccini::Locator::XPath("./parent::*"))
            .await
            .map_err(classify)
    }

    async fn is_displayed(&mut self, element: &Element) -> Result<bool, BackendError> {
        self.client()?;
        element.is_displayed().await.map_err(classify)
    }

    async fn is_enabled(&mut self, element: &Element) -> Result<bool, BackendError> {
        self.client()?;
        element.is_enabled().await.map_err(classify)
    }

    async fn text(&mut self, element: &Element) -> Result<String, BackendError> {
        self.client()?;
        element.text().await.map_err(classify)
    }

    async fn attribute(
        &mut self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, BackendError> {
        self.client()?;
        element.attr(name).await.map_err(classify)
    }

    async fn property(
        &mut self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, BackendError> {
        self.client()?;
        element.prop(name).await.map_err(classify)
    }

    async fn click(&mut self, element: &Element) -> Result<(), BackendError> {
        self.client()?;
        element.click().await.map_err(classify)
    }

    async fn clear(&mut self, element: &Element) -> Result<(), BackendError> {
        self.client()?;
        element.clear().await.map_err(classify)
    }

    async fn send_keys(&mut self, element: &Element, text: &str) -> Result<(), BackendError> {
        self.client()?;
        element.send_keys(text).await.map_err(classify)
    }

    async fn scroll_into_view(&mut self, element: &Element) -> Result<(), BackendError> {
        self.run_script(SCROLL_INTO_VIEW, element, None).await
    }

    async fn set_value(&mut self, element: &Element, value: &str) -> Result<(), BackendError> {
        self.run_script(SET_VALUE, element, Some(value)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_stale_and_missing() {
        let stale = classify_message(
            "stale element reference: stale element not found in the current frame".into(),
        );
        assert!(stale.is_stale());

        let missing = classify_message("no such element: Unable to locate element".into());
        assert!(missing.is_missing());

        assert!(matches!(
            classify_message("javascript error: x is not defined".into()),
            BackendError::Script(_)
        ));
        assert!(matches!(
            classify_message("invalid session id".into()),
            BackendError::Other(_)
        ));
    }

    #[test]
    fn test_locator_mapping() {
        let xpath = Locator::xpath("//input[@id='po-number']");
        assert!(matches!(to_wd(&xpath), fantoccini::Locator::XPath("//input[@id='po-number']")));
        let css = Locator::css("#po-number");
        assert!(matches!(to_wd(&css), fantoccini::Locator::Css("#po-number")));
    }

    #[tokio::test]
    async fn test_unlaunched_backend_is_not_ready() {
        let mut backend = WebDriverBackend::with_url(
            "http://localhost:4444".to_string(),
            BrowserConfig::default(),
        );
        assert!(!backend.is_ready().await);
        assert!(matches!(
            backend.navigate("http://localhost").await,
            Err(BackendError::NotReady)
        ));
        assert!(matches!(
            backend.find(&Locator::id("po-number")).await,
            Err(BackendError::NotReady)
        ));
        // Closing a session that never started is a no-op.
        assert!(backend.close().await.is_ok());
        assert!(backend.close().await.is_ok());
    }
}

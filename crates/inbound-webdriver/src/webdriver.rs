use fantoccini::wd::TimeoutConfiguration;
use fantoccini::{Client, ClientBuilder};
use inbound_engine::config::BrowserConfig;
use serde_json::{Map, Value, json};
use std::time::Duration;

pub struct WebDriverClient {
    pub client: Client,
}

impl WebDriverClient {
    pub async fn connect(
        url: &str,
        capabilities: Option<Map<String, Value>>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut caps = Map::new();

        if let Some(user_caps) = capabilities {
            for (k, v) in user_caps {
                caps.insert(k, v);
            }
        }

        let client = ClientBuilder::native()
            .capabilities(caps)
            .connect(url)
            .await
            .map_err(|e| format!("Failed to connect to WebDriver at {}: {}", url, e))?;

        Ok(Self { client })
    }

    /// Apply window size and page-load timeout to a fresh session.
    pub async fn configure(
        &self,
        browser: &BrowserConfig,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .set_window_size(browser.window_width, browser.window_height)
            .await
            .map_err(|e| format!("Failed to size window: {}", e))?;

        let timeouts = TimeoutConfiguration::new(
            None,
            Some(Duration::from_millis(browser.page_load_timeout_ms)),
            None,
        );
        self.client
            .update_timeouts(timeouts)
            .await
            .map_err(|e| format!("Failed to set timeouts: {}", e))?;
        Ok(())
    }

    pub async fn close(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.client
            .close()
            .await
            .map_err(|e| format!("Failed to close session: {}", e))?;
        Ok(())
    }
}

/// W3C capabilities for a Chrome session built from the browser section.
pub fn chrome_capabilities(browser: &BrowserConfig) -> Map<String, Value> {
    let mut args = browser.args.clone();
    if browser.headless && !args.iter().any(|a| a.starts_with("--headless")) {
        args.push("--headless=new".to_string());
    }
    args.push(format!(
        "--window-size={},{}",
        browser.window_width, browser.window_height
    ));

    let mut caps = Map::new();
    caps.insert("browserName".to_string(), json!("chrome"));
    caps.insert("goog:chromeOptions".to_string(), json!({ "args": args }));
    caps
}

#![allow(dead_code)]

use async_trait::async_trait;
use inbound_engine::backend::{Backend, BackendError, NavigationResult};
use inbound_engine::config::{DelayConfig, FlowConfig};
use inbound_engine::locator::Locator;
use inbound_engine::selectors;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "http://app.test";

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Defaults with tiny timeouts, no settle delays, and artifacts under `dir`.
pub fn fast_config(dir: &Path) -> FlowConfig {
    let mut config = FlowConfig::default();
    config.target.base_url = BASE_URL.to_string();
    config.timeouts.explicit_wait_ms = 150;
    config.timeouts.poll_interval_ms = 5;
    config.timeouts.form_verify_ms = 60;
    config.timeouts.upload_wait_ms = 40;
    config.delays = DelayConfig {
        scroll_settle_ms: 0,
        field_scroll_settle_ms: 0,
        focus_settle_ms: 0,
        modal_settle_ms: 0,
        date_settle_ms: 0,
        after_next_ms: 0,
        upload_settle_ms: 0,
        upload_trigger_settle_ms: 0,
    };
    config.artifacts.screenshots_dir = dir.join("screenshots");
    config.artifacts.test_files_dir = dir.join("test-files");
    config
}

#[derive(Debug, Clone)]
pub enum Effect {
    Navigate(String),
    Attach(usize),
    Detach(usize),
    SetAttr(usize, String, String),
    AppendSource(String),
}

#[derive(Debug, Clone)]
pub struct MockElement {
    pub matches: Vec<String>,
    pub attached: bool,
    pub displayed: bool,
    pub enabled: bool,
    pub text: String,
    pub value: String,
    pub attrs: HashMap<String, String>,
    pub parent: Option<usize>,
    /// Remaining clicks that fail with a stale reference.
    pub stale_clicks: u32,
    pub fail_typing: bool,
    pub fail_script: bool,
    pub on_click: Vec<Effect>,
    pub on_keys: Vec<Effect>,
    pub received_keys: Vec<String>,
    pub clicks: u32,
}

impl MockElement {
    pub fn matching(xpath: &str) -> Self {
        Self {
            matches: vec![Locator::xpath(xpath).to_string()],
            attached: true,
            displayed: true,
            enabled: true,
            text: String::new(),
            value: String::new(),
            attrs: HashMap::new(),
            parent: None,
            stale_clicks: 0,
            fail_typing: false,
            fail_script: false,
            on_click: Vec::new(),
            on_keys: Vec::new(),
            received_keys: Vec::new(),
            clicks: 0,
        }
    }

    pub fn also(mut self, xpath: &str) -> Self {
        self.matches.push(Locator::xpath(xpath).to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn parent(mut self, id: usize) -> Self {
        self.parent = Some(id);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn detached(mut self) -> Self {
        self.attached = false;
        self
    }

    pub fn stale_clicks(mut self, n: u32) -> Self {
        self.stale_clicks = n;
        self
    }

    pub fn on_click(mut self, effect: Effect) -> Self {
        self.on_click.push(effect);
        self
    }

    pub fn on_keys(mut self, effect: Effect) -> Self {
        self.on_keys.push(effect);
        self
    }
}

/// Scripted in-memory page.
#[derive(Debug, Default)]
pub struct MockBackend {
    pub elements: Vec<MockElement>,
    pub url: String,
    pub source: String,
    pub launched: bool,
    pub closed: bool,
    pub unreachable: bool,
    pub fail_launch: bool,
    pub fail_screenshot: bool,
    pub close_calls: usize,
    pub visited: Vec<String>,
    /// Lifecycle events, shared so they outlive backends a runner owns.
    pub lifecycle: Arc<Mutex<Vec<&'static str>>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, element: MockElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn element(&self, id: usize) -> &MockElement {
        &self.elements[id]
    }

    pub fn element_mut(&mut self, id: usize) -> &mut MockElement {
        &mut self.elements[id]
    }

    fn check(&self) -> Result<(), BackendError> {
        if self.unreachable {
            return Err(BackendError::Other("session unreachable".into()));
        }
        if !self.launched || self.closed {
            return Err(BackendError::NotReady);
        }
        Ok(())
    }

    fn attached(&self, id: usize) -> Result<&MockElement, BackendError> {
        self.check()?;
        let element = &self.elements[id];
        if !element.attached {
            return Err(BackendError::StaleElement(format!("element {}", id)));
        }
        Ok(element)
    }

    fn apply(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Navigate(url) => self.url = url,
                Effect::Attach(id) => self.elements[id].attached = true,
                Effect::Detach(id) => self.elements[id].attached = false,
                Effect::SetAttr(id, name, value) => {
                    self.elements[id].attrs.insert(name, value);
                }
                Effect::AppendSource(text) => self.source.push_str(&text),
            }
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    type Element = usize;

    async fn launch(&mut self) -> Result<(), BackendError> {
        self.lifecycle.lock().unwrap().push("launch");
        if self.fail_launch {
            return Err(BackendError::Other("no browser".into()));
        }
        self.launched = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<(), BackendError> {
        self.close_calls += 1;
        self.lifecycle.lock().unwrap().push("close");
        if self.unreachable {
            return Err(BackendError::Other("session unreachable".into()));
        }
        self.closed = true;
        Ok(())
    }

    async fn is_ready(&self) -> bool {
        self.launched && !self.closed
    }

    async fn navigate(&mut self, url: &str) -> Result<NavigationResult, BackendError> {
        self.check()?;
        self.url = url.to_string();
        self.visited.push(url.to_string());
        Ok(NavigationResult {
            url: url.to_string(),
            title: String::new(),
        })
    }

    async fn current_url(&mut self) -> Result<String, BackendError> {
        self.check()?;
        Ok(self.url.clone())
    }

    async fn page_source(&mut self) -> Result<String, BackendError> {
        self.check()?;
        Ok(self.source.clone())
    }

    async fn screenshot(&mut self) -> Result<Vec<u8>, BackendError> {
        self.check()?;
        if self.fail_screenshot {
            return Err(BackendError::Other("screenshot unsupported".into()));
        }
        Ok(b"\x89PNG\r\n".to_vec())
    }

    async fn find(&mut self, locator: &Locator) -> Result<usize, BackendError> {
        self.check()?;
        let key = locator.to_string();
        self.elements
            .iter()
            .position(|e| e.attached && e.matches.contains(&key))
            .ok_or(BackendError::NoSuchElement(key))
    }

    async fn find_all(&mut self, locator: &Locator) -> Result<Vec<usize>, BackendError> {
        self.check()?;
        let key = locator.to_string();
        Ok(self
            .elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.attached && e.matches.contains(&key))
            .map(|(i, _)| i)
            .collect())
    }

    async fn parent(&mut self, element: &usize) -> Result<usize, BackendError> {
        self.attached(*element)?
            .parent
            .ok_or_else(|| BackendError::NoSuchElement("parent".into()))
    }

    async fn is_displayed(&mut self, element: &usize) -> Result<bool, BackendError> {
        Ok(self.attached(*element)?.displayed)
    }

    async fn is_enabled(&mut self, element: &usize) -> Result<bool, BackendError> {
        Ok(self.attached(*element)?.enabled)
    }

    async fn text(&mut self, element: &usize) -> Result<String, BackendError> {
        Ok(self.attached(*element)?.text.clone())
    }

    async fn attribute(&mut self, element: &usize, name: &str) -> Result<Option<String>, BackendError> {
        Ok(self.attached(*element)?.attrs.get(name).cloned())
    }

    async fn property(&mut self, element: &usize, name: &str) -> Result<Option<String>, BackendError> {
        let element = self.attached(*element)?;
        Ok(match name {
            "value" => Some(element.value.clone()),
            _ => element.attrs.get(name).cloned(),
        })
    }

    async fn click(&mut self, element: &usize) -> Result<(), BackendError> {
        self.attached(*element)?;
        let el = &mut self.elements[*element];
        if el.stale_clicks > 0 {
            el.stale_clicks -= 1;
            return Err(BackendError::StaleElement(format!("element {}", element)));
        }
        el.clicks += 1;
        let effects = el.on_click.clone();
        self.apply(effects);
        Ok(())
    }

    async fn clear(&mut self, element: &usize) -> Result<(), BackendError> {
        self.attached(*element)?;
        self.elements[*element].value.clear();
        Ok(())
    }

    async fn send_keys(&mut self, element: &usize, text: &str) -> Result<(), BackendError> {
        self.attached(*element)?;
        let el = &mut self.elements[*element];
        if el.fail_typing {
            return Err(BackendError::Other("element not interactable".into()));
        }
        el.received_keys.push(text.to_string());
        // WebDriver special keys live in the private-use area and produce no text.
        el.value
            .extend(text.chars().filter(|c| !('\u{E000}'..='\u{F8FF}').contains(c)));
        let effects = el.on_keys.clone();
        self.apply(effects);
        Ok(())
    }

    async fn scroll_into_view(&mut self, element: &usize) -> Result<(), BackendError> {
        self.attached(*element)?;
        Ok(())
    }

    async fn set_value(&mut self, element: &usize, value: &str) -> Result<(), BackendError> {
        self.check()?;
        let el = &mut self.elements[*element];
        if el.fail_script {
            return Err(BackendError::Script("assignment rejected".into()));
        }
        el.value = value.to_string();
        Ok(())
    }
}

/// Ids of the interesting elements on [`receipt_app`].
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub username: usize,
    pub password: usize,
    pub login: usize,
    pub new_receipt: usize,
    pub po_option: usize,
    pub po_wrapper: usize,
    pub po_number: usize,
    pub supplier: usize,
    pub bol: usize,
    pub date: usize,
    pub next: usize,
    pub file_input: usize,
}

/// Login page, Inbound page and receipt form wired together. The PO form
/// appears once the first External PO strategy is clicked.
pub fn receipt_app() -> (MockBackend, Page) {
    let mut backend = MockBackend::new();
    let username = backend.add(MockElement::matching(selectors::USERNAME_FIELD));
    let password = backend.add(MockElement::matching(selectors::PASSWORD_FIELD));
    let login = backend.add(
        MockElement::matching(selectors::LOGIN_BUTTON)
            .on_click(Effect::Navigate(format!("{}/dashboard", BASE_URL))),
    );
    let new_receipt = backend.add(MockElement::matching(selectors::NEW_UNPLANNED_RECEIPT_BUTTON));
    let po_wrapper = backend.add(MockElement::matching("//div[@class='field']").attr("class", "field"));
    let po_number = backend.add(
        MockElement::matching(selectors::EXTERNAL_PO_NUMBER)
            .attr("class", "input")
            .parent(po_wrapper)
            .detached(),
    );
    let po_option = backend.add(
        MockElement::matching(selectors::EXTERNAL_PO_OPTIONS[0])
            .also(selectors::EXTERNAL_PO_OPTIONS[2])
            .on_click(Effect::Attach(po_number)),
    );
    let supplier = backend.add(MockElement::matching(selectors::SUPPLIER_NAME));
    let bol = backend.add(MockElement::matching(selectors::BOL_AWR_NUMBER));
    let date = backend.add(MockElement::matching(selectors::DELIVERY_DATE));
    let next = backend.add(MockElement::matching(selectors::NEXT_BUTTON));
    let file_input = backend.add(MockElement::matching(selectors::FILE_INPUT));

    let page = Page {
        username,
        password,
        login,
        new_receipt,
        po_option,
        po_wrapper,
        po_number,
        supplier,
        bol,
        date,
        next,
        file_input,
    };
    (backend, page)
}

/// [`receipt_app`] already launched and positioned on the PO form.
pub fn receipt_form() -> (MockBackend, Page) {
    let (mut backend, page) = receipt_app();
    backend.launched = true;
    backend.url = format!("{}/inventory/inbound", BASE_URL);
    backend.element_mut(page.po_number).attached = true;
    (backend, page)
}

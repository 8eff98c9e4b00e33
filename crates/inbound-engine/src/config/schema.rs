use inbound_common::upload::UploadFile;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FlowConfig {
    #[serde(default)]
    pub target: TargetConfig,
    #[serde(default)]
    pub credentials: Credentials,
    #[serde(default)]
    pub browser: BrowserConfig,
    #[serde(default)]
    pub timeouts: TimeoutConfig,
    #[serde(default)]
    pub delays: DelayConfig,
    #[serde(default)]
    pub retries: RetryConfig,
    #[serde(default)]
    pub artifacts: ArtifactConfig,
    #[serde(default)]
    pub tc004: ValidationCaseData,
    #[serde(default)]
    pub tc036: UploadCaseData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_inbound_path")]
    pub inbound_path: String,
    /// URL fragment that is only present while the login page is shown.
    #[serde(default = "default_login_path")]
    pub login_marker: String,
}

impl TargetConfig {
    pub fn login_url(&self) -> Result<Url, url::ParseError> {
        self.page_url(&self.login_path)
    }

    pub fn inbound_url(&self) -> Result<Url, url::ParseError> {
        self.page_url(&self.inbound_path)
    }

    /// `path` appended below the base URL's own path, so an app served under
    /// `https://host/wms` logs in at `https://host/wms/login`.
    fn page_url(&self, path: &str) -> Result<Url, url::ParseError> {
        let mut base = Url::parse(&self.base_url)?;
        if !base.path().ends_with('/') {
            let dir = format!("{}/", base.path());
            base.set_path(&dir);
        }
        base.join(path.trim_start_matches('/'))
    }
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            login_path: default_login_path(),
            inbound_path: default_inbound_path(),
            login_marker: default_login_path(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:5274".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_inbound_path() -> String {
    "/inventory/inbound".to_string()
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: "testing@example.com".to_string(),
            password: "password123".to_string(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub headless: bool,
    pub args: Vec<String>,
    pub window_width: u32,
    pub window_height: u32,
    pub page_load_timeout_ms: u64,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: false,
            args: vec![
                "--disable-dev-shm-usage".to_string(),
                "--no-sandbox".to_string(),
                "--disable-gpu".to_string(),
                "--remote-allow-origins=*".to_string(),
            ],
            window_width: 1920,
            window_height: 1080,
            page_load_timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    pub explicit_wait_ms: u64,
    pub poll_interval_ms: u64,
    /// Ceiling for confirming the receipt form after picking a mode option.
    pub form_verify_ms: u64,
    pub upload_wait_ms: u64,
}

impl TimeoutConfig {
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_millis(self.explicit_wait_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn form_verify(&self) -> Duration {
        Duration::from_millis(self.form_verify_ms)
    }

    pub fn upload_wait(&self) -> Duration {
        Duration::from_millis(self.upload_wait_ms)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            explicit_wait_ms: 8_000,
            poll_interval_ms: 100,
            form_verify_ms: 8_000,
            upload_wait_ms: 8_000,
        }
    }
}

/// Fixed pauses for transitions that expose no observable completion signal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayConfig {
    pub scroll_settle_ms: u64,
    pub field_scroll_settle_ms: u64,
    pub focus_settle_ms: u64,
    pub modal_settle_ms: u64,
    pub date_settle_ms: u64,
    pub after_next_ms: u64,
    pub upload_settle_ms: u64,
    pub upload_trigger_settle_ms: u64,
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            scroll_settle_ms: 300,
            field_scroll_settle_ms: 200,
            focus_settle_ms: 100,
            modal_settle_ms: 1_500,
            date_settle_ms: 500,
            after_next_ms: 1_000,
            upload_settle_ms: 1_000,
            upload_trigger_settle_ms: 800,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_new_receipt_attempts")]
    pub new_receipt_attempts: u32,
    #[serde(default = "default_enter_text_attempts")]
    pub enter_text_attempts: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            new_receipt_attempts: default_new_receipt_attempts(),
            enter_text_attempts: default_enter_text_attempts(),
        }
    }
}

fn default_new_receipt_attempts() -> u32 {
    3
}

fn default_enter_text_attempts() -> u32 {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactConfig {
    pub screenshots_dir: PathBuf,
    pub test_files_dir: PathBuf,
    /// Written inside `screenshots_dir` when relative.
    pub report_file: PathBuf,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            screenshots_dir: PathBuf::from("screenshots"),
            test_files_dir: PathBuf::from("test-files"),
            report_file: PathBuf::from("report.json"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationCaseData {
    pub supplier_name: String,
    pub bol_awr_number: String,
    pub delivery_date: String,
}

impl Default for ValidationCaseData {
    fn default() -> Self {
        Self {
            supplier_name: "12122".to_string(),
            bol_awr_number: "BOL-TEST-67890".to_string(),
            delivery_date: "12/15/2025".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadCaseData {
    pub external_po_number: String,
    pub supplier_name: String,
    pub bol_awr_number: String,
    pub delivery_date: String,
    pub files: Vec<UploadFile>,
}

impl Default for UploadCaseData {
    fn default() -> Self {
        let form = ValidationCaseData::default();
        Self {
            external_po_number: "PO-2025-101".to_string(),
            supplier_name: form.supplier_name,
            bol_awr_number: form.bol_awr_number,
            delivery_date: form.delivery_date,
            files: vec![
                UploadFile::new("test-document.pdf", "Test PDF content for upload testing"),
                UploadFile::new("test-image.png", "Test PNG content for upload testing"),
                UploadFile::new("test-photo.jpg", "Test JPG content for upload testing"),
            ],
        }
    }
}

use crate::backend::Backend;
use crate::config::ArtifactConfig;
use inbound_common::outcome::{Screenshot, SuiteReport};
use inbound_common::upload::{CreatedFile, UploadFile};
use std::path::PathBuf;
use tracing::{info, warn};

/// Screenshots, upload fixtures and the JSON report for one run.
#[derive(Debug)]
pub struct Artifacts {
    screenshots_dir: PathBuf,
    test_files_dir: PathBuf,
    report_file: PathBuf,
    captured: Vec<Screenshot>,
}

impl Artifacts {
    pub fn new(config: &ArtifactConfig) -> Self {
        Self {
            screenshots_dir: config.screenshots_dir.clone(),
            test_files_dir: config.test_files_dir.clone(),
            report_file: config.report_file.clone(),
            captured: Vec::new(),
        }
    }

    /// Create the working directories if they are missing.
    pub async fn prepare(&self) -> std::io::Result<()> {
        for dir in [&self.screenshots_dir, &self.test_files_dir] {
            if !dir.exists() {
                tokio::fs::create_dir_all(dir).await?;
                info!(dir = %dir.display(), "Created artifact directory");
            }
        }
        Ok(())
    }

    /// Best-effort screenshot. Failures are logged and never propagated.
    pub async fn capture<B: Backend>(&mut self, backend: &mut B, tag: &str) -> Option<PathBuf> {
        let bytes = match backend.screenshot().await {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(tag, "Screenshot failed: {}", e);
                return None;
            }
        };
        let path = self.screenshots_dir.join(format!("{}.png", tag));
        if let Err(e) = tokio::fs::write(&path, bytes).await {
            warn!(tag, "Screenshot could not be written: {}", e);
            return None;
        }
        info!(tag, path = %path.display(), "Screenshot saved");
        self.captured.push(Screenshot {
            tag: tag.to_string(),
            path: path.clone(),
        });
        Some(path)
    }

    /// Screenshots captured since the last call.
    pub fn take_screenshots(&mut self) -> Vec<Screenshot> {
        std::mem::take(&mut self.captured)
    }

    /// Write a placeholder upload file and return its absolute path.
    pub async fn create_test_file(&self, file: &UploadFile) -> Option<CreatedFile> {
        let path = self.test_files_dir.join(&file.name);
        if let Err(e) = tokio::fs::write(&path, file.content.as_bytes()).await {
            warn!(file = %file.name, "Failed to create test file: {}", e);
            return None;
        }
        match tokio::fs::canonicalize(&path).await {
            Ok(path) => Some(CreatedFile {
                name: file.name.clone(),
                path,
            }),
            Err(e) => {
                warn!(file = %file.name, "File created but cannot be resolved: {}", e);
                None
            }
        }
    }

    pub fn report_path(&self) -> PathBuf {
        if self.report_file.is_absolute() {
            self.report_file.clone()
        } else {
            self.screenshots_dir.join(&self.report_file)
        }
    }

    pub async fn write_report(&self, report: &SuiteReport) -> std::io::Result<PathBuf> {
        let path = self.report_path();
        let json = serde_json::to_vec_pretty(report)?;
        tokio::fs::write(&path, json).await?;
        Ok(path)
    }
}

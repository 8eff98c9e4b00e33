use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A placeholder file written to disk and then pushed through the file input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadFile {
    pub name: String,
    pub content: String,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// File name without its extension, e.g. `test-document`.
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.name)
    }

    /// Extension including the dot, e.g. `.pdf`. Empty when there is none.
    pub fn extension(&self) -> &str {
        self.name
            .rfind('.')
            .map(|i| &self.name[i..])
            .unwrap_or("")
    }
}

/// A placeholder file that exists on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedFile {
    pub name: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMatch {
    pub name: String,
    pub found: bool,
}

/// Per-file detection of names or extensions in the page content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDetection {
    pub files: Vec<FileMatch>,
}

impl FileDetection {
    /// A file counts as detected when either its stem or its extension
    /// appears anywhere in `content`. Empty stems and a bare `.` never match.
    pub fn scan(files: &[UploadFile], content: &str) -> Self {
        let files = files
            .iter()
            .map(|file| {
                let stem = file.stem();
                let ext = file.extension();
                FileMatch {
                    name: file.name.clone(),
                    found: (!stem.is_empty() && content.contains(stem))
                        || (ext.len() > 1 && content.contains(ext)),
                }
            })
            .collect();
        Self { files }
    }

    pub fn found(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name && f.found)
    }

    pub fn any(&self) -> bool {
        self.files.iter().any(|f| f.found)
    }
}

/// Observations after pushing files through the upload control.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadVerdict {
    pub files_created: usize,
    pub files_sent: usize,
    pub ui_elements: usize,
    pub displayed: Vec<String>,
    pub detection: FileDetection,
}

impl UploadVerdict {
    pub fn passed(&self) -> bool {
        self.ui_elements >= 1 || self.detection.any()
    }

    /// Failure framing for the case where automation completed every step but
    /// the application never reflected the uploads.
    pub fn failure_message(&self) -> String {
        [
            "TC036: FAILED - APPLICATION BUG DETECTED".to_string(),
            "Root Cause: File upload functionality is not working in the application".to_string(),
            "Evidence:".to_string(),
            "  - Manual upload attempt: FAILED (files not accepted)".to_string(),
            "  - Automated upload: Files sent but not displayed".to_string(),
            format!("  - Files sent to input: {}", self.files_sent),
            format!("  - Files visible in UI: {}", self.ui_elements),
            "  - Expected: Uploaded files should appear in the upload area".to_string(),
            "  - Actual: Upload area remains empty after file selection".to_string(),
            "Status: BUG REPORTED - Waiting for development fix".to_string(),
        ]
        .join("\n")
    }
}

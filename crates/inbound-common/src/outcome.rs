use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CaseId {
    Tc004,
    Tc036,
}

impl CaseId {
    pub const ALL: [CaseId; 2] = [CaseId::Tc004, CaseId::Tc036];

    /// Lower runs first.
    pub fn priority(&self) -> u8 {
        match self {
            CaseId::Tc004 => 1,
            CaseId::Tc036 => 2,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CaseId::Tc004 => "Verify validation error when External PO Number is empty",
            CaseId::Tc036 => "Verify multiple files can be uploaded",
        }
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseId::Tc004 => write!(f, "TC004"),
            CaseId::Tc036 => write!(f, "TC036"),
        }
    }
}

/// A screenshot written for a case, keyed by its tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screenshot {
    pub tag: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub case: CaseId,
    pub title: String,
    pub passed: bool,
    pub message: String,
    pub screenshots: Vec<Screenshot>,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl Outcome {
    pub fn pass(case: CaseId, message: impl Into<String>) -> Self {
        Self::new(case, true, message)
    }

    pub fn fail(case: CaseId, message: impl Into<String>) -> Self {
        Self::new(case, false, message)
    }

    fn new(case: CaseId, passed: bool, message: impl Into<String>) -> Self {
        Self {
            case,
            title: case.title().to_string(),
            passed,
            message: message.into(),
            screenshots: Vec::new(),
            details: serde_json::Value::Null,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = details;
        self
    }

    pub fn with_screenshots(mut self, screenshots: Vec<Screenshot>) -> Self {
        self.screenshots = screenshots;
        self
    }

    pub fn screenshot(&self, tag: &str) -> Option<&Screenshot> {
        self.screenshots.iter().find(|s| s.tag == tag)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuiteReport {
    pub outcomes: Vec<Outcome>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }

    /// Human-readable summary, one block per case.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for outcome in &self.outcomes {
            let status = if outcome.passed { "PASSED" } else { "FAILED" };
            out.push_str(&format!("{} {}: {}\n", outcome.case, status, outcome.title));
            for line in outcome.message.lines() {
                out.push_str(&format!("  | {}\n", line));
            }
            for shot in &outcome.screenshots {
                out.push_str(&format!("  | screenshot {}: {}\n", shot.tag, shot.path.display()));
            }
        }
        out.push_str(&format!(
            "{} passed, {} failed, {} total\n",
            self.passed(),
            self.failed(),
            self.outcomes.len()
        ));
        out
    }
}

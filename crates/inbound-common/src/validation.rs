//! Validation-error scraping model for the empty External PO Number check.

use serde::{Deserialize, Serialize};

/// Class markers that flag a field (or its wrapper) as invalid.
pub const ERROR_CLASS_MARKERS: &[&str] = &["error", "invalid", "border-red"];

/// Keywords tying an error message to the External PO Number field.
pub const PO_ERROR_KEYWORDS: &[&str] = &["external", "po", "required"];

/// Ordered, de-duplicated collection of visible validation messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a trimmed message. Blank or already-seen messages are ignored.
    pub fn insert(&mut self, message: &str) -> bool {
        let message = message.trim();
        if message.is_empty() || self.0.iter().any(|m| m == message) {
            return false;
        }
        self.0.push(message.to_string());
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// First message mentioning any keyword, compared case-insensitively.
    pub fn find_related(&self, keywords: &[&str]) -> Option<&str> {
        self.iter().find(|message| {
            let lower = message.to_lowercase();
            keywords.iter().any(|k| lower.contains(&k.to_lowercase()))
        })
    }
}

impl<'a> FromIterator<&'a str> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut errors = ValidationErrors::new();
        for message in iter {
            errors.insert(message);
        }
        errors
    }
}

/// Three independent signals that a single field is in an error state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldErrorState {
    pub class_marker: bool,
    pub aria_invalid: bool,
    pub parent_class_marker: bool,
}

impl FieldErrorState {
    pub fn from_attributes(
        class: Option<&str>,
        aria_invalid: Option<&str>,
        parent_class: Option<&str>,
    ) -> Self {
        Self {
            class_marker: class.is_some_and(has_error_marker),
            aria_invalid: aria_invalid == Some("true"),
            parent_class_marker: parent_class.is_some_and(has_error_marker),
        }
    }

    pub fn any(&self) -> bool {
        self.class_marker || self.aria_invalid || self.parent_class_marker
    }
}

pub fn has_error_marker(class: &str) -> bool {
    ERROR_CLASS_MARKERS.iter().any(|m| class.contains(m))
}

/// Secondary signal: the form did not move on to a later wizard step.
pub fn still_on_form(url: &str) -> bool {
    url.contains("inbound") || (!url.contains("verify") && !url.contains("inspect"))
}

/// Everything observed after submitting with the PO number left empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationVerdict {
    pub field_state: FieldErrorState,
    pub related_error: Option<String>,
    pub errors: ValidationErrors,
    pub current_url: String,
    pub still_on_form: bool,
}

impl ValidationVerdict {
    pub fn new(field_state: FieldErrorState, errors: ValidationErrors, current_url: String) -> Self {
        let related_error = errors.find_related(PO_ERROR_KEYWORDS).map(str::to_string);
        let still_on_form = still_on_form(&current_url);
        Self {
            field_state,
            related_error,
            errors,
            current_url,
            still_on_form,
        }
    }

    /// Any one of the three signals is enough.
    pub fn passed(&self) -> bool {
        self.field_state.any() || self.related_error.is_some() || !self.errors.is_empty()
    }
}

//! Locators for the login page, the Inbound page and the receipt form.
//!
//! Lists are ordered by priority; callers take the first entry that works.

use inbound_common::locator::Locator;

pub const USERNAME_FIELD: &str = "//input[@type='email' or @name='email' or @placeholder='Email' or contains(@id, 'email')]";
pub const PASSWORD_FIELD: &str =
    "//input[@type='password' or @name='password' or @placeholder='Password']";
pub const LOGIN_BUTTON: &str =
    "//button[@type='submit' or contains(text(), 'Login') or contains(text(), 'Sign in')]";

pub const NEW_UNPLANNED_RECEIPT_BUTTON: &str =
    "(//button[normalize-space()='New Unplanned Receipt'])[1]";

/// The same "External PO Reference" option described through different attributes.
pub const EXTERNAL_PO_OPTIONS: &[&str] = &[
    "//div[contains(text(), 'External PO Reference')]",
    "//button[contains(text(), 'External PO Reference')]",
    "//*[contains(text(), 'External PO')]",
    "//div[@class='option' and contains(., 'External')]",
    "//*[@role='button' and contains(., 'External PO')]",
];

pub const EXTERNAL_PO_NUMBER: &str = "(//input[@id='po-number'])[1]";
pub const SUPPLIER_NAME: &str =
    "//input[@placeholder='Supplier Name' or contains(@name, 'supplier') or contains(@id, 'supplier')]";
pub const BOL_AWR_NUMBER: &str =
    "//input[contains(@placeholder, 'BOL') or contains(@name, 'bol') or contains(@id, 'bol')]";
pub const DELIVERY_DATE: &str =
    "//input[@placeholder='12 / 11 / yyyy' or contains(@name, 'date') or contains(@id, 'delivery')]";
pub const NEXT_BUTTON: &str = "//button[contains(text(), 'Next')]";

pub const UPLOAD_FILES_BUTTON: &str = "//button[contains(text(), 'Upload files')]";
pub const FILE_INPUT: &str = "//input[@type='file']";
pub const UPLOADED_FILES_LIST: &str = "//div[contains(@class, 'file')] | //*[contains(@class, 'uploaded')] | //*[contains(text(), '.pdf') or contains(text(), '.png') or contains(text(), '.jpg')]";

/// Tried in order once the primary uploaded-files wait times out.
pub const UPLOADED_FILES_ALTERNATIVES: &[&str] = &[
    "//div[contains(@class, 'uploaded-file')]",
    "//li[contains(@class, 'file-item')]",
    "//*[contains(@class, 'attachment')]",
    "//span[contains(text(), 'test-document') or contains(text(), 'test-image') or contains(text(), 'test-photo')]",
    "//*[contains(@class, 'file-name')]",
];

/// Candidate regions that display validation feedback.
pub const VALIDATION_ERRORS: &[&str] = &[
    "//div[contains(@class, 'error') and not(contains(@class, 'hidden'))]",
    "//span[contains(@class, 'error') and not(contains(@class, 'hidden'))]",
    "//p[contains(@class, 'error')]",
    "//*[contains(text(), 'required')]",
    "//*[contains(text(), 'Required')]",
    "//*[contains(@class, 'invalid')]",
    "//*[@role='alert']",
    "//span[contains(@class, 'text-red')]",
    "//*[contains(@class, 'error-message')]",
];

pub fn xpath(query: &str) -> Locator {
    Locator::xpath(query)
}

pub fn all(queries: &[&str]) -> Vec<Locator> {
    queries.iter().map(|q| Locator::xpath(*q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_are_xpath_and_distinct() {
        for list in [EXTERNAL_PO_OPTIONS, UPLOADED_FILES_ALTERNATIVES, VALIDATION_ERRORS] {
            let locators = all(list);
            assert_eq!(locators.len(), list.len());
            for (i, loc) in locators.iter().enumerate() {
                assert_eq!(loc.strategy(), "xpath");
                assert!(!locators[..i].contains(loc), "duplicate selector {}", loc);
            }
        }
    }
}

pub mod error;
pub mod locator;
pub mod outcome;
pub mod upload;
pub mod validation;

pub use error::BackendError;
pub use locator::Locator;

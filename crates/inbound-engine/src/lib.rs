pub mod artifacts;
pub mod backend;
pub mod cases;
pub mod config;
pub mod error;
pub mod flow;
pub mod selectors;
pub mod suite;
pub mod wait;

pub use inbound_common::{locator, outcome, upload, validation};

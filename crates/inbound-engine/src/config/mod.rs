mod loader;
mod schema;

pub use loader::{ConfigError, ConfigLoader};
pub use schema::*;

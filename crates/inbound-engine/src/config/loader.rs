use super::schema::FlowConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from default locations:
    /// 1. ./inbound-e2e.yaml
    /// 2. ~/.inbound-e2e/config.yaml
    /// 3. Default configuration
    pub async fn load_default() -> Result<FlowConfig, ConfigError> {
        let local_config = PathBuf::from("./inbound-e2e.yaml");
        if local_config.exists() {
            return Self::load_from(&local_config).await;
        }

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".inbound-e2e").join("config.yaml");
            if home_config.exists() {
                return Self::load_from(&home_config).await;
            }
        }

        Ok(FlowConfig::default())
    }

    pub async fn load_from(path: &Path) -> Result<FlowConfig, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<FlowConfig, ConfigError> {
        let config: FlowConfig = serde_yaml::from_str(content)?;
        // Fail early on unusable URLs rather than at the first navigation.
        config.target.login_url()?;
        config.target.inbound_url()?;
        Ok(config)
    }
}

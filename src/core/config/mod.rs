use crate::core::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Queue settings, usually loaded from a JSON file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    pub name: String,
    /// `None` means unbounded
    pub capacity: Option<usize>,
    /// Record every operation in a [`Journal`](crate::core::log::Journal)
    pub journal: bool,
    pub journal_limit: Option<usize>,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            name: "queue".to_string(),
            capacity: None,
            journal: false,
            journal_limit: None,
        }
    }
}

impl QueueConfig {
    pub fn from_json_str(content: &str) -> Result<Self, ConfigError> {
        let config: QueueConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == Some(0) {
            return Err(ConfigError::InvalidCapacity { field: "capacity" });
        }
        if self.journal_limit == Some(0) {
            return Err(ConfigError::InvalidCapacity { field: "journal_limit" });
        }
        Ok(())
    }
}

use common::config::Validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct WindowConfig {
    pub title: String,
    #[serde(default)]
    pub always_on_top: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Snake".to_string(),
            always_on_top: false,
        }
    }
}

impl Validate for WindowConfig {
    fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("window title must not be empty".to_string());
        }
        Ok(())
    }
}

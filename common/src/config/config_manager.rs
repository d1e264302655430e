use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::path::PathBuf;

use super::{
    ConfigContentProvider, ConfigSerializer, FileContentConfigProvider, Validate,
    YamlConfigSerializer,
};

/// Loads a config once through a content provider and keeps it cached.
/// The game loop is single-threaded, so the cache is a plain `RefCell`.
pub struct ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer = YamlConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    config_serializer: TConfigSerializer,
    config_content_provider: TConfigContentProvider,
    config: RefCell<Option<TConfig>>,
}

impl<TConfig> ConfigManager<FileContentConfigProvider, TConfig, YamlConfigSerializer>
where
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
{
    pub fn from_yaml_file(file_path: impl Into<PathBuf>) -> Self {
        Self::new(
            FileContentConfigProvider::new(file_path),
            YamlConfigSerializer::new(),
        )
    }
}

impl<TConfigContentProvider, TConfig, TConfigSerializer>
    ConfigManager<TConfigContentProvider, TConfig, TConfigSerializer>
where
    TConfigContentProvider: ConfigContentProvider,
    TConfig: Clone + for<'de> Deserialize<'de> + Serialize + Validate + Default,
    TConfigSerializer: ConfigSerializer<TConfig>,
{
    pub fn new(
        config_content_provider: TConfigContentProvider,
        config_serializer: TConfigSerializer,
    ) -> Self {
        Self {
            config: RefCell::new(None),
            config_content_provider,
            config_serializer,
        }
    }

    pub fn content_provider(&self) -> &TConfigContentProvider {
        &self.config_content_provider
    }

    /// Missing content yields `TConfig::default()` without caching it, so a
    /// file written later is still picked up.
    pub fn get_config(&self) -> Result<TConfig, String> {
        if let Some(config) = self.config.borrow().as_ref() {
            return Ok(config.clone());
        }

        let Some(config_data) = self.config_content_provider.get_config_content()? else {
            return Ok(TConfig::default());
        };

        let config = self.config_serializer.deserialize(&config_data)?;
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        *self.config.borrow_mut() = Some(config.clone());
        Ok(config)
    }

    pub fn set_config(&self, config: &TConfig) -> Result<(), String> {
        config
            .validate()
            .map_err(|e| format!("Config validation error: {}", e))?;

        let serialized_config = self.config_serializer.serialize(config)?;
        self.config_content_provider
            .set_config_content(&serialized_config)?;

        *self.config.borrow_mut() = Some(config.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Board {
        width: u32,
    }

    impl Default for Board {
        fn default() -> Self {
            Self { width: 640 }
        }
    }

    impl Validate for Board {
        fn validate(&self) -> Result<(), String> {
            if self.width == 0 {
                return Err("width must be greater than 0".to_string());
            }
            Ok(())
        }
    }

    struct MemoryProvider {
        content: RefCell<Option<String>>,
        reads: Cell<u32>,
    }

    impl MemoryProvider {
        fn new(content: Option<&str>) -> Self {
            Self {
                content: RefCell::new(content.map(str::to_string)),
                reads: Cell::new(0),
            }
        }
    }

    impl ConfigContentProvider for MemoryProvider {
        fn get_config_content(&self) -> Result<Option<String>, String> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.content.borrow().clone())
        }

        fn set_config_content(&self, content: &str) -> Result<(), String> {
            *self.content.borrow_mut() = Some(content.to_string());
            Ok(())
        }
    }

    #[test]
    fn test_missing_content_returns_default() {
        let manager: ConfigManager<_, Board, _> =
            ConfigManager::new(MemoryProvider::new(None), YamlConfigSerializer::new());
        assert_eq!(manager.get_config().unwrap(), Board::default());
    }

    #[test]
    fn test_loaded_config_is_cached() {
        let manager: ConfigManager<_, Board, _> = ConfigManager::new(
            MemoryProvider::new(Some("width: 320\n")),
            YamlConfigSerializer::new(),
        );
        assert_eq!(manager.get_config().unwrap(), Board { width: 320 });
        assert_eq!(manager.get_config().unwrap(), Board { width: 320 });
        assert_eq!(manager.content_provider().reads.get(), 1);
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        let manager: ConfigManager<_, Board, _> = ConfigManager::new(
            MemoryProvider::new(Some("width: 0\n")),
            YamlConfigSerializer::new(),
        );
        let result = manager.get_config();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("validation"));
    }

    #[test]
    fn test_set_config_refuses_invalid_config() {
        let manager: ConfigManager<_, Board, _> =
            ConfigManager::new(MemoryProvider::new(None), YamlConfigSerializer::new());
        assert!(manager.set_config(&Board { width: 0 }).is_err());
        assert!(manager.content_provider().content.borrow().is_none());
    }

    #[test]
    fn test_set_config_then_get_config() {
        let manager: ConfigManager<_, Board, _> =
            ConfigManager::new(MemoryProvider::new(None), YamlConfigSerializer::new());
        manager.set_config(&Board { width: 800 }).unwrap();
        assert_eq!(manager.get_config().unwrap(), Board { width: 800 });
    }
}

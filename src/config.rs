use crate::error::{PlantIdError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_KEY_ENV: &str = "PLANTNET_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: String,
    pub project: String,
    pub lang: String,
    pub timeout_seconds: u64,
    pub knowledge_base_path: Option<PathBuf>,
    pub concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://my-api.plantnet.org".into(),
            project: "all".into(),
            lang: "en".into(),
            timeout_seconds: 30,
            knowledge_base_path: None,
            concurrency: 4,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PlantIdError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("plant-id").join("config.json"))
    }

    /// APIキーを取得（環境変数を優先、空文字は未設定扱い）
    pub fn resolve_api_key(&self) -> Option<String> {
        std::env::var(API_KEY_ENV)
            .ok()
            .into_iter()
            .chain(self.api_key.clone())
            .map(|k| k.trim().to_string())
            .find(|k| !k.is_empty())
    }

    pub fn set_api_key(&mut self, key: String) -> Result<()> {
        if key.trim().is_empty() {
            return Err(PlantIdError::Config("APIキーが空です".into()));
        }
        self.api_key = Some(key.trim().to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.project, "all");
        assert_eq!(config.lang, "en");
        assert_eq!(config.base_url, "https://my-api.plantnet.org");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{"project": "weurope"}"#).unwrap();
        assert_eq!(config.project, "weurope");
        assert_eq!(config.lang, "en");
        assert_eq!(config.concurrency, 4);
    }

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = Config {
            api_key: Some("   ".into()),
            ..Config::default()
        };
        if std::env::var(API_KEY_ENV).is_err() {
            assert!(config.resolve_api_key().is_none());
        }
    }
}

// Configuration management

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::models::AppConfig;

pub fn get_config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join("draftmaster");

    fs::create_dir_all(&config_dir).context("Failed to create config directory")?;

    Ok(config_dir)
}

pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.toml"))
}

pub fn load_config() -> Result<AppConfig> {
    let config_path = get_config_path()?;

    if !config_path.exists() {
        let default_config = AppConfig::default();
        save_config(&default_config)?;
        return Ok(default_config);
    }

    let contents = fs::read_to_string(&config_path).context("Failed to read config file")?;

    let config: AppConfig = toml::from_str(&contents).context("Failed to parse config file")?;

    Ok(config)
}

pub fn save_config(config: &AppConfig) -> Result<()> {
    let config_path = get_config_path()?;

    let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

    fs::write(&config_path, contents).context("Failed to write config file")?;

    Ok(())
}

/// Optional default key from the environment. It pre-fills the key field at
/// startup; whatever the user types wins for the session. The key is never
/// written back to disk.
pub fn default_api_key() -> Option<String> {
    std::env::var("OPENAI_API_KEY")
        .ok()
        .filter(|key| !key.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use tempfile::TempDir;

    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    fn with_temp_home<T>(body: impl FnOnce() -> T) -> T {
        let temp_dir = TempDir::new().unwrap();

        let original_home = std::env::var("HOME").ok();
        let original_xdg = std::env::var("XDG_CONFIG_HOME").ok();
        std::env::set_var("HOME", temp_dir.path());
        std::env::remove_var("XDG_CONFIG_HOME");

        let result = body();

        if let Some(home) = original_home {
            std::env::set_var("HOME", home);
        } else {
            std::env::remove_var("HOME");
        }
        if let Some(xdg) = original_xdg {
            std::env::set_var("XDG_CONFIG_HOME", xdg);
        }

        result
    }

    #[test]
    fn test_load_config_creates_default() {
        let _lock = ENV_MUTEX.lock().unwrap();

        let config = with_temp_home(load_config);

        assert!(
            config.is_ok(),
            "Config loading failed: {:?}",
            config.as_ref().err()
        );
        let config = config.unwrap();
        assert_eq!(config.api_base_url, "https://api.openai.com");
        assert_eq!(config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let config = AppConfig {
            api_base_url: "http://localhost:8080".to_string(),
            ..Default::default()
        };

        let contents = toml::to_string(&config).unwrap();
        fs::write(&config_path, contents).unwrap();

        let loaded_contents = fs::read_to_string(&config_path).unwrap();
        let loaded_config: AppConfig = toml::from_str(&loaded_contents).unwrap();

        assert_eq!(loaded_config.api_base_url, "http://localhost:8080");
        assert_eq!(loaded_config.model, "gpt-4o-mini");
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config);
        assert!(serialized.is_ok());

        let deserialized: Result<AppConfig, _> = toml::from_str(&serialized.unwrap());
        assert!(deserialized.is_ok());
    }

    #[test]
    fn test_default_api_key_reads_environment() {
        let _lock = ENV_MUTEX.lock().unwrap();

        let original = std::env::var("OPENAI_API_KEY").ok();

        std::env::set_var("OPENAI_API_KEY", "sk-from-env");
        assert_eq!(default_api_key(), Some("sk-from-env".to_string()));

        std::env::set_var("OPENAI_API_KEY", "");
        assert_eq!(default_api_key(), None);

        std::env::remove_var("OPENAI_API_KEY");
        assert_eq!(default_api_key(), None);

        if let Some(key) = original {
            std::env::set_var("OPENAI_API_KEY", key);
        }
    }
}

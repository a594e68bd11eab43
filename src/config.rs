use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const APP_DIR: &str = "gradebook-tui";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// API base URL, every endpoint path is appended to it
    pub base_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a notice banner stays on screen
    pub notice_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { notice_secs: 3 }
    }
}

impl Config {
    /// Directory holding the config and the log file
    pub fn app_dir() -> Result<PathBuf> {
        // Use ~/.config instead of platform-specific directory
        let home_dir = dirs::home_dir()
            .ok_or_else(|| color_eyre::eyre::eyre!("Could not find home directory"))?;

        let app_dir = home_dir.join(".config").join(APP_DIR);

        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }

        Ok(app_dir)
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.toml"))
    }

    /// Load config from file, or return default if file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(&config_path, toml_string)?;
        Ok(())
    }

    /// Set the API base URL and save
    pub fn set_base_url(&mut self, base_url: String) -> Result<()> {
        self.server.base_url = base_url.trim_end_matches('/').to_string();
        self.save()
    }
}

/// Simple URL validation
pub fn validate_url(url: &str) -> Result<(), String> {
    if url.is_empty() {
        return Err("URL cannot be empty".to_string());
    }

    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err("URL must start with http:// or https://".to_string());
    }

    if url::Url::parse(url).is_err() {
        return Err("Invalid URL format".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.base_url, "http://localhost:5000/api");
        assert_eq!(config.ui.notice_secs, 3);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = Config::from_toml(
            r#"
            [server]
            base_url = "http://escola.local:8080/api"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.base_url, "http://escola.local:8080/api");
        assert_eq!(config.ui, UiConfig::default());

        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());

        let config = Config::from_toml("[ui]\n").unwrap();
        assert_eq!(config.ui.notice_secs, 3);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.ui.notice_secs = 5;

        let text = toml::to_string_pretty(&config).unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_validate_url() {
        assert!(validate_url("http://localhost:5000/api").is_ok());
        assert!(validate_url("https://escola.example.com/api").is_ok());
        assert_eq!(validate_url(""), Err("URL cannot be empty".to_string()));
        assert_eq!(
            validate_url("localhost:5000"),
            Err("URL must start with http:// or https://".to_string())
        );
        assert_eq!(
            validate_url("http://"),
            Err("Invalid URL format".to_string())
        );
    }
}

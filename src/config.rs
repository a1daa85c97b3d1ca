use crate::constants::{DEFAULT_ENDPOINT, DEFAULT_GREETING, ENDPOINT_ENV_VAR};
use crate::errors::{ChatError, ChatResult};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{
    env, fs,
    path::{Path, PathBuf},
    sync::RwLock,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the server hosting `/api/chat`.
    pub endpoint: String,
    pub greeting: String,
    pub prompts: Vec<String>,
    pub log_level: String,
    /// Unset leaves the HTTP client's own behavior in place.
    pub request_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            greeting: DEFAULT_GREETING.to_string(),
            prompts: vec![
                "Summarize the latest news in technology".to_string(),
                "Help me write a professional email".to_string(),
                "Explain a complex topic in simple terms".to_string(),
                "Give me ideas for a weekend project".to_string(),
            ],
            log_level: "info".to_string(),
            request_timeout_secs: None,
        }
    }
}

static CONFIG: Lazy<RwLock<Config>> = Lazy::new(|| RwLock::new(Config::default()));

/// Loads the user config (creating it with defaults on first run), applies
/// environment overrides and installs it as the process-wide config.
pub fn initialize_config() -> ChatResult<()> {
    let config_path = get_config_path()?;
    let mut config = load_or_create(&config_path)?;

    if let Ok(endpoint) = env::var(ENDPOINT_ENV_VAR) {
        config.endpoint = endpoint;
    }
    validate_config(&config)?;

    *CONFIG
        .write()
        .map_err(|_| ChatError::config_error("Config lock poisoned"))? = config;

    Ok(())
}

pub fn load_or_create(config_path: &Path) -> ChatResult<Config> {
    if config_path.exists() {
        let config_str = fs::read_to_string(config_path).map_err(|e| {
            ChatError::config_error(format!("Failed to read config file: {}", e))
        })?;

        let config: Config = serde_json::from_str(&config_str)
            .map_err(|e| ChatError::config_error(format!("Failed to parse config: {}", e)))?;

        return Ok(config);
    }

    let config = Config::default();

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ChatError::config_error(format!("Failed to create config directory: {}", e))
        })?;
    }

    let config_str = serde_json::to_string_pretty(&config)
        .map_err(|e| ChatError::config_error(format!("Failed to serialize config: {}", e)))?;

    fs::write(config_path, config_str)
        .map_err(|e| ChatError::config_error(format!("Failed to write config file: {}", e)))?;

    log::info!("Wrote default config to {}", config_path.display());

    Ok(config)
}

fn get_config_path() -> ChatResult<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| ChatError::config_error("Could not determine home directory"))?;

    Ok(home_dir.join(".config").join("chatdesk").join("config.json"))
}

pub fn validate_config(config: &Config) -> ChatResult<()> {
    let url = reqwest::Url::parse(&config.endpoint)
        .map_err(|e| ChatError::config_error(format!("Invalid endpoint '{}': {}", config.endpoint, e)))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ChatError::config_error(format!(
            "Endpoint must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if config.greeting.trim().is_empty() {
        return Err(ChatError::config_error("Greeting must not be empty"));
    }

    if config.request_timeout_secs == Some(0) {
        return Err(ChatError::config_error(
            "request_timeout_secs must be greater than 0",
        ));
    }

    Ok(())
}

pub fn get_config() -> Config {
    match CONFIG.read() {
        Ok(config) => config.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    }
}

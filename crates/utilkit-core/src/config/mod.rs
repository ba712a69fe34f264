use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::util::env::{get_env, get_env_as_bool};
use crate::util::sanitize::DEFAULT_REPO_DIR_NAME;
use crate::util::text::parse_comma_separated_list;

/// Root configuration for utilkit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[derive(Default)]
pub struct Config {
    pub repo: RepoConfig,
    pub text: TextConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RepoConfig {
    /// Subdirectory of the OS temp dir holding repository checkouts.
    pub dir_name: String,
}

impl Default for RepoConfig {
    fn default() -> Self {
        Self {
            dir_name: DEFAULT_REPO_DIR_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextConfig {
    pub truncate_suffix: String,
    /// 0 disables truncation.
    pub max_len: usize,
    pub strip_emojis: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            truncate_suffix: "...".to_string(),
            max_len: 0,
            strip_emojis: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
#[derive(Default)]
pub struct SecurityConfig {
    /// Hostnames allowed over plain HTTP in addition to the built-in list.
    pub local_dev_hosts: Vec<String>,
}

// ====== Config loading/saving ======

/// Load configuration from environment variables.
///
/// Priority:
/// 1. `UTILKIT_CONFIG` env var: full JSON config
/// 2. Individual `UTILKIT_*` env vars, merged on top of the file config
/// 3. File fallback (`~/.utilkit/config.json`)
pub fn load_config_from_env() -> Config {
    if let Ok(json) = std::env::var("UTILKIT_CONFIG") {
        match serde_json::from_str::<Config>(&json) {
            Ok(config) => return config,
            Err(e) => {
                tracing::warn!("Failed to parse UTILKIT_CONFIG: {}", e);
            }
        }
    }

    let mut cfg = load_config(None);

    cfg.repo.dir_name = get_env("UTILKIT_REPO_DIR_NAME", &cfg.repo.dir_name);
    cfg.text.truncate_suffix = get_env("UTILKIT_TRUNCATE_SUFFIX", &cfg.text.truncate_suffix);
    cfg.text.strip_emojis = get_env_as_bool("UTILKIT_STRIP_EMOJIS", cfg.text.strip_emojis);

    if let Ok(v) = std::env::var("UTILKIT_MAX_LEN") {
        match v.trim().parse::<usize>() {
            Ok(n) => cfg.text.max_len = n,
            Err(e) => tracing::warn!("Ignoring invalid UTILKIT_MAX_LEN {:?}: {}", v, e),
        }
    }

    if let Ok(v) = std::env::var("UTILKIT_LOCAL_DEV_HOSTS") {
        cfg.security.local_dev_hosts = parse_comma_separated_list(&v);
    }

    cfg
}

/// Get the config file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.json")
}

/// Get the utilkit data directory.
pub fn get_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".utilkit")
}

/// Load configuration from file or fall back to defaults.
pub fn load_config(config_path: Option<&Path>) -> Config {
    let path = config_path
        .map(|p| p.to_path_buf())
        .unwrap_or_else(get_config_path);

    match read_config(&path) {
        Ok(config) => config,
        Err(ConfigError::NotFound(_)) => Config::default(),
        Err(e) => {
            tracing::warn!("Failed to load config from {}: {}", path.display(), e);
            tracing::warn!("Using default configuration.");
            Config::default()
        }
    }
}

/// Read and parse a config file, reporting why it could not be used.
pub fn read_config(path: &Path) -> std::result::Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Invalid(e.to_string()))?;
    Ok(serde_json::from_str::<Config>(&content)?)
}

/// Write `config` as pretty JSON to `config_path` (default
/// `~/.utilkit/config.json`), creating the parent directory first.
/// Returns the path written.
pub fn save_config(config: &Config, config_path: Option<&Path>) -> std::result::Result<PathBuf, ConfigError> {
    let path = config_path.map_or_else(get_config_path, Path::to_path_buf);
    let write_err = |source| ConfigError::Write {
        path: path.clone(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut json = serde_json::to_string_pretty(config)?;
    json.push('\n');
    std::fs::write(&path, json).map_err(write_err)?;
    tracing::debug!(path = %path.display(), "Saved utilkit config");
    Ok(path)
}

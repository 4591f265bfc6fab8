// Configuration Storage Service
// Loads the JSON config file and applies environment overrides

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::text_processor::SegmentationMode;

pub const DEFAULT_API_URL: &str = "https://api.zerogpt.com/api/detect/detectText";
pub const DEFAULT_MAX_CHARS: usize = 10_000;
pub const API_URL_ENV: &str = "RECYCLEME_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub segmentation: SegmentationConfig,
}

/// Everything the detection client needs to talk to the service.
///
/// The header values imitate a browser session on the detector's own site;
/// the service rejects requests that look scripted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DetectorConfig {
    pub endpoint: String,
    pub user_agent: String,
    pub accept: String,
    pub accept_language: String,
    pub origin: String,
    pub referer: String,
    pub sec_fetch_dest: String,
    pub sec_fetch_mode: String,
    pub sec_fetch_site: String,
    /// No timeout unless set; the transport default applies.
    pub timeout_secs: Option<u64>,
    /// Explicit proxy for every request, e.g. `http://127.0.0.1:8080`.
    pub proxy: Option<String>,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` when no explicit proxy is set.
    pub use_system_proxy: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_API_URL.to_string(),
            user_agent: "Mozilla/5.0 (X11; Linux x86_64; rv:123.0) Gecko/20100101 Firefox/123.0"
                .to_string(),
            accept: "application/json, text/plain, */*".to_string(),
            accept_language: "en-US,en;q=0.5".to_string(),
            origin: "https://www.zerogpt.com".to_string(),
            referer: "https://www.zerogpt.com/".to_string(),
            sec_fetch_dest: "empty".to_string(),
            sec_fetch_mode: "cors".to_string(),
            sec_fetch_site: "same-site".to_string(),
            timeout_secs: None,
            proxy: None,
            use_system_proxy: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SegmentationConfig {
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
    #[serde(default)]
    pub mode: SegmentationMode,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            max_chars: DEFAULT_MAX_CHARS,
            mode: SegmentationMode::default(),
        }
    }
}

fn default_max_chars() -> usize { DEFAULT_MAX_CHARS }

impl AppConfig {
    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| env::var(key).ok());
    }

    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV) {
            let url = url.trim();
            if !url.is_empty() {
                self.detector.endpoint = url.to_string();
            }
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.detector.endpoint.trim().is_empty() {
            return Err("detector.endpoint must not be empty".to_string());
        }
        if self.segmentation.max_chars == 0 {
            return Err("segmentation.maxChars must be at least 1".to_string());
        }
        Ok(())
    }
}

pub struct ConfigStore {
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_file }
    }

    pub fn from_file(config_file: PathBuf) -> Self {
        Self { config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("recycleme"))
    }

    /// Load configuration from file, falling back to defaults when it is absent
    pub fn load(&self) -> Result<AppConfig, String> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file)
            .map_err(|e| format!("Failed to read config {}: {}", self.config_file.display(), e))?;

        serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config {}: {}", self.config_file.display(), e))
    }
}

/// Resolve the effective configuration for a run.
///
/// An explicit path must exist; the default location is optional.
pub fn resolve_config(explicit: Option<&Path>) -> Result<AppConfig, String> {
    let mut config = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(format!("Config file not found: {}", path.display()));
            }
            ConfigStore::from_file(path.to_path_buf()).load()?
        }
        None => match ConfigStore::default_config_dir() {
            Some(dir) => ConfigStore::new(dir).load()?,
            None => AppConfig::default(),
        },
    };

    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

/// Runtime settings for the gallery
///
/// Settings are layered: built-in defaults, then an optional TOML file,
/// then environment variables. Later layers win.
///
/// Config file location:
/// - `$DOG_GALLERY_CONFIG` if set
/// - otherwise `<config dir>/dog-gallery/config.toml`
///   (e.g. ~/.config/dog-gallery/config.toml on Linux)

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Public TheDogAPI origin
pub const DEFAULT_API_BASE: &str = "https://api.thedogapi.com/v1";

/// Default per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

pub const ENV_CONFIG_PATH: &str = "DOG_GALLERY_CONFIG";
pub const ENV_API_BASE: &str = "DOG_GALLERY_API_BASE";
pub const ENV_API_KEY: &str = "DOG_GALLERY_API_KEY";
pub const ENV_TIMEOUT_SECS: &str = "DOG_GALLERY_TIMEOUT_SECS";

#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base URL of the API, without a trailing slash
    pub api_base: String,
    /// Sent as `x-api-key` when present
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.into(),
            api_key: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

// Keep the key out of logs
impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Shape of the optional TOML config file
#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_base: Option<String>,
    api_key: Option<String>,
    request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Overlay values from a TOML document.
    /// A malformed document is logged and leaves the settings unchanged.
    pub fn apply_file(&mut self, raw: &str) {
        let file_cfg = match toml::from_str::<FileSettings>(raw) {
            Ok(cfg) => cfg,
            Err(e) => {
                warn!(error = %e, "ignoring malformed config file");
                return;
            }
        };

        if let Some(v) = file_cfg.api_base {
            self.set_api_base(&v);
        }
        if let Some(v) = file_cfg.api_key {
            self.set_api_key(&v);
        }
        if let Some(v) = file_cfg.request_timeout_secs {
            self.set_timeout(v);
        }
    }

    /// Overlay values from environment variables, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup(ENV_API_BASE) {
            self.set_api_base(&v);
        }
        if let Some(v) = lookup(ENV_API_KEY) {
            self.set_api_key(&v);
        }
        if let Some(v) = lookup(ENV_TIMEOUT_SECS) {
            match v.trim().parse::<u64>() {
                Ok(parsed) => self.set_timeout(parsed),
                Err(_) => warn!(value = %v, "ignoring invalid {}", ENV_TIMEOUT_SECS),
            }
        }
    }

    // A zero timeout would fail every request immediately
    fn set_timeout(&mut self, secs: u64) {
        if secs == 0 {
            warn!("ignoring request timeout of 0 seconds");
            return;
        }
        self.request_timeout_secs = secs;
    }

    fn set_api_base(&mut self, raw: &str) {
        let trimmed = raw.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            warn!("ignoring empty api_base");
            return;
        }
        self.api_base = trimmed.to_string();
    }

    fn set_api_key(&mut self, raw: &str) {
        let trimmed = raw.trim();
        self.api_key = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }
}

/// Where the config file is expected, if a location can be determined
pub fn config_file_path() -> Option<PathBuf> {
    if let Ok(explicit) = std::env::var(ENV_CONFIG_PATH) {
        return Some(PathBuf::from(explicit));
    }

    let mut path = dirs::config_dir()?;
    path.push("dog-gallery");
    path.push("config.toml");
    Some(path)
}

/// Load settings from defaults, the config file and the environment
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Some(path) = config_file_path() {
        if let Ok(raw) = fs::read_to_string(&path) {
            info!("📁 Reading config from {}", path.display());
            settings.apply_file(&raw);
        }
    }

    settings.apply_env(|key| std::env::var(key).ok());
    settings
}

//! Launcher configuration.
//!
//! Read once at startup from a JSON file:
//!
//! - `$FINDER_CONFIG`, if set (the file must exist)
//! - otherwise `config.json` in the user config directory:
//!   - macOS: ~/Library/Application Support/finder/config.json
//!   - Linux: ~/.config/finder/config.json
//!
//! Every field is optional. A missing default file yields the defaults.
//!
//! ```json
//! {
//!   "recognition": { "endpoint": "http://localhost:8080/recognize", "debounce_ms": 300 },
//!   "catalog": { "excluded_prefixes": ["com.apple.print"] },
//!   "logging": { "filter": "info,finder=debug" }
//! }
//! ```

mod error;

pub use error::{ConfigError, Result};

use finder_catalog::CatalogConfig;
use finder_recognition::{HttpRecognizerConfig, DEFAULT_LANGUAGE_TAG};
use finder_session::{SessionConfig, DEFAULT_DEBOUNCE, DEFAULT_RECOGNITION_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FINDER_CONFIG";

/// Log filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "info,finder=debug";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    pub recognition: RecognitionSection,
    pub catalog: CatalogSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSection {
    /// Recognition service URL. Without one, every recognition fails.
    pub endpoint: Option<String>,
    pub language_tag: String,
    pub debounce_ms: u64,
    pub timeout_ms: u64,
}

impl Default for RecognitionSection {
    fn default() -> Self {
        Self {
            endpoint: None,
            language_tag: DEFAULT_LANGUAGE_TAG.to_string(),
            debounce_ms: DEFAULT_DEBOUNCE.as_millis() as u64,
            timeout_ms: DEFAULT_RECOGNITION_TIMEOUT.as_millis() as u64,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSection {
    /// Identifier prefixes of system or vendor apps to hide.
    pub excluded_prefixes: Vec<String>,
    /// Extra directories to scan for applications.
    pub extra_dirs: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `tracing_subscriber::EnvFilter` directives.
    pub filter: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Default config file location.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join("finder").join("config.json"))
}

/// File [`FinderConfig::load`] reads: `$FINDER_CONFIG` if set, otherwise the
/// default location.
pub fn config_path() -> Option<PathBuf> {
    resolve_path(std::env::var_os(CONFIG_ENV), default_config_path())
}

fn explicit_path(explicit: Option<OsString>) -> Option<PathBuf> {
    explicit.filter(|p| !p.is_empty()).map(PathBuf::from)
}

fn resolve_path(explicit: Option<OsString>, default_path: Option<PathBuf>) -> Option<PathBuf> {
    explicit_path(explicit).or(default_path)
}

impl FinderConfig {
    /// Load from `$FINDER_CONFIG` or the default location.
    pub fn load() -> Result<Self> {
        Self::load_with(std::env::var_os(CONFIG_ENV), default_config_path())
    }

    /// An explicit path must exist; a missing default file yields defaults.
    fn load_with(explicit: Option<OsString>, default_path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = explicit_path(explicit) {
            return Self::load_from(&path)?.ok_or(ConfigError::NotFound(path));
        }

        match default_path {
            Some(path) => Ok(Self::load_from(&path)?.unwrap_or_default()),
            None => {
                tracing::debug!("no config directory on this platform, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate one file. `Ok(None)` when it does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "config file not found");
                return Ok(None);
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config: Self = serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;

        tracing::info!(path = %path.display(), "loaded config");
        Ok(Some(config))
    }

    fn validate(&self) -> Result<()> {
        if self.recognition.debounce_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "recognition.debounce_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.recognition.timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "recognition.timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            debounce: Duration::from_millis(self.recognition.debounce_ms),
            recognition_timeout: Duration::from_millis(self.recognition.timeout_ms),
        }
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig {
            excluded_prefixes: self.catalog.excluded_prefixes.clone(),
            extra_dirs: self.catalog.extra_dirs.clone(),
        }
    }

    /// `None` when no endpoint is configured.
    pub fn recognizer_config(&self) -> Option<HttpRecognizerConfig> {
        let endpoint = self.recognition.endpoint.as_deref()?.trim();
        if endpoint.is_empty() {
            return None;
        }
        Some(HttpRecognizerConfig {
            endpoint: endpoint.to_string(),
            language_tag: self.recognition.language_tag.clone(),
        })
    }
}

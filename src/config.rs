use derivative::Derivative;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://excel-joiner-backend.onrender.com/join";

const LOCAL_CONFIG: &str = "excel-joiner.toml";

/// On-disk TOML configuration. Every field is optional so partial files
/// layer cleanly over each other.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub endpoint: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub request_timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// `overlay` wins wherever it has a value.
    pub fn merge(self, overlay: ConfigFile) -> ConfigFile {
        ConfigFile {
            endpoint: overlay.endpoint.or(self.endpoint),
            output_dir: overlay.output_dir.or(self.output_dir),
            request_timeout_secs: overlay.request_timeout_secs.or(self.request_timeout_secs),
        }
    }

    /// Reads `EXCEL_JOINER_*` overrides through `lookup`.
    pub fn from_env(lookup: impl Fn(&str) -> Option<String>) -> ConfigFile {
        let timeout = lookup("EXCEL_JOINER_TIMEOUT_SECS").and_then(|raw| match raw.trim().parse() {
            Ok(secs) => Some(secs),
            Err(_) => {
                tracing::warn!("Ignoring EXCEL_JOINER_TIMEOUT_SECS={:?}: not a number", raw);
                None
            }
        });

        ConfigFile {
            endpoint: lookup("EXCEL_JOINER_ENDPOINT").filter(|v| !v.trim().is_empty()),
            output_dir: lookup("EXCEL_JOINER_OUTPUT_DIR")
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            request_timeout_secs: timeout,
        }
    }
}

/// Resolved settings the app runs with.
#[derive(Derivative, Clone, PartialEq)]
#[derivative(Debug, Default)]
pub struct Settings {
    #[derivative(Default(value = "DEFAULT_ENDPOINT.to_string()"))]
    pub endpoint: String,
    #[derivative(Default(value = "default_output_dir()"))]
    pub output_dir: PathBuf,
    pub request_timeout: Option<Duration>,
}

impl Settings {
    pub fn from_file(file: ConfigFile) -> Self {
        let defaults = Settings::default();
        Settings {
            endpoint: file.endpoint.unwrap_or(defaults.endpoint),
            output_dir: file.output_dir.unwrap_or(defaults.output_dir),
            request_timeout: file
                .request_timeout_secs
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
        }
    }
}

pub fn default_output_dir() -> PathBuf {
    dirs::download_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Platform config path: `<config_dir>/excel-joiner/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("excel-joiner").join("config.toml"))
}

/// Returns `None` when the file is absent or unreadable as TOML.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(file) => {
            tracing::debug!("Loaded config from {}", path.display());
            Some(file)
        }
        Err(e) => {
            tracing::warn!("Skipping unparseable config {}: {}", path.display(), e);
            None
        }
    }
}

/// Cascades platform config, then the local (or explicit) file, then the
/// process environment. Command-line flags are applied by the caller.
pub fn load_config(explicit: Option<&Path>) -> ConfigFile {
    let platform = config_path()
        .and_then(|p| load_from_path(&p))
        .unwrap_or_default();
    let local = match explicit {
        Some(path) => load_from_path(path).unwrap_or_default(),
        None => load_from_path(Path::new(LOCAL_CONFIG)).unwrap_or_default(),
    };
    let env = ConfigFile::from_env(|key| std::env::var(key).ok());

    platform.merge(local).merge(env)
}

//! Configuration provider using Figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use inline_editor_common::Pretty;
use tracing::{debug, trace, warn};

use crate::{error::ConfigError, types::EditorConfig, ConfigResult};

/// Prefix for environment variables read by [`ConfigProvider`].
pub const ENV_PREFIX: &str = "INLINE_EDITOR_";

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format (.toml extension)
    Toml,
    /// YAML format (.yaml or .yml extensions)
    Yaml,
    /// JSON format (.json extension)
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from a path's extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }
}

/// Loads [`EditorConfig`] from defaults, an optional file and the environment.
///
/// Nothing is cached; every call to [`load`](Self::load) reads the sources
/// again.
#[derive(Debug, Clone)]
pub struct ConfigProvider {
    file: Option<PathBuf>,
    env_prefix: String,
}

impl ConfigProvider {
    /// Create a provider reading defaults and `INLINE_EDITOR_*` variables
    pub fn new() -> Self {
        Self {
            file: None,
            env_prefix: ENV_PREFIX.to_string(),
        }
    }

    /// Also read this configuration file. It must exist.
    pub fn with_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Read environment variables with a different prefix
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// Load and validate the configuration
    pub fn load(&self) -> ConfigResult<EditorConfig> {
        debug!("Loading editor configuration");

        let config: EditorConfig = self.build_figment()?.extract()?;

        if let Err(e) = config.date_format() {
            warn!(format = %config.date_time_format, "Rejected configured date-time format");
            return Err(e);
        }

        debug!(config = %Pretty(&config), "Loaded editor configuration");
        Ok(config)
    }

    /// Build the figment with all sources in precedence order
    ///
    /// Later sources override earlier ones:
    /// 1. Default values
    /// 2. The configuration file, if one was given
    /// 3. Environment variables
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(EditorConfig::default()));

        if let Some(path) = &self.file {
            figment = figment.merge(self.load_config_file(path)?);
        }

        Ok(figment.merge(self.load_env_vars()))
    }

    /// Load a single configuration file based on its extension
    fn load_config_file(&self, path: &Path) -> ConfigResult<Figment> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            format: path
                .extension()
                .map(|ext| ext.to_string_lossy().into_owned())
                .unwrap_or_default(),
        })?;

        trace!("Loading config file: {} ({:?})", path.display(), format);

        Ok(match format {
            ConfigFormat::Toml => Figment::from(Toml::file(path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(path)),
            ConfigFormat::Json => Figment::from(Json::file(path)),
        })
    }

    /// Environment variables as flat lowercase keys, e.g.
    /// `INLINE_EDITOR_DATE_TIME_FORMAT` becomes `date_time_format`
    fn load_env_vars(&self) -> Figment {
        Figment::from(
            Env::prefixed(&self.env_prefix).map(|key| key.as_str().to_lowercase().into()),
        )
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

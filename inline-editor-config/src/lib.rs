//! Configuration for inline editor inputs, loaded with Figment.
//!
//! Settings are merged in precedence order, later sources overriding
//! earlier ones:
//!
//! 1. Built-in defaults
//! 2. An optional configuration file (TOML, YAML or JSON, chosen by extension)
//! 3. Environment variables prefixed with `INLINE_EDITOR_`
//!
//! ```no_run
//! use inline_editor_config::ConfigProvider;
//! use inline_editor_fields::{TypeTag, ValueKind};
//!
//! let config = ConfigProvider::new().with_file("editor.toml").load()?;
//! let birthday = config
//!     .input_builder("Birthday", TypeTag::new(ValueKind::DateTime))
//!     .build()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! The loaded date-time format is compiled before it is handed out, so a bad
//! format surfaces as a configuration error rather than at the first parse.

pub mod error;
pub mod provider;
pub mod types;

pub use error::ConfigError;
pub use provider::{ConfigFormat, ConfigProvider, ENV_PREFIX};
pub use types::EditorConfig;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Load the configuration from defaults and environment variables only.
pub fn load_configuration() -> ConfigResult<EditorConfig> {
    ConfigProvider::new().load()
}

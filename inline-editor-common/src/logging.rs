//! Logging utilities for the inline editor crates

use serde::Serialize;
use std::fmt::Debug;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Wrapper for pretty-printing types in logs as YAML
///
/// Use this in tracing statements to render validation reports or configs
/// as YAML with a newline before the content:
///
/// ```ignore
/// use inline_editor_common::Pretty;
/// use tracing::debug;
///
/// debug!("validation report: {}", Pretty(&report));
/// ```
///
/// Debug is used as a fallback if YAML serialization fails.
pub struct Pretty<T>(pub T);

impl<T: Serialize + Debug> std::fmt::Display for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_yaml_ng::to_string(&self.0) {
            Ok(yaml) => write!(f, "\n{}", yaml),
            Err(_) => write!(f, "\n{:#?}", self.0),
        }
    }
}

impl<T: Serialize + Debug> std::fmt::Debug for Pretty<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// Install a stderr `fmt` subscriber for hosts that do not bring their own.
///
/// Honors `RUST_LOG`; falls back to `warn`. Returns `false` when a global
/// subscriber was already installed.
pub fn init_logging() -> bool {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok();
    if !installed {
        debug!("global tracing subscriber already installed, keeping it");
    }
    installed
}

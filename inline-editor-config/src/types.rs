//! Configuration values for inline editor inputs

use inline_editor_fields::{
    DateFormat, InlineEditor, InputAdapter, InputAdapterBuilder, InputValue, TypeTag, TypedInput,
    DEFAULT_DATE_TIME_FORMAT,
};
use serde::{Deserialize, Serialize};

use crate::{ConfigError, ConfigResult};

/// Display options shared by every input of an editor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Custom date-time format, e.g. `yyyy-MM-ddTHH:mm`.
    pub date_time_format: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            date_time_format: DEFAULT_DATE_TIME_FORMAT.to_string(),
        }
    }
}

impl EditorConfig {
    /// Compile the configured date-time format.
    pub fn date_format(&self) -> ConfigResult<DateFormat> {
        DateFormat::new(self.date_time_format.as_str()).map_err(|e| ConfigError::InvalidValue {
            key: "date_time_format".to_string(),
            message: e.to_string(),
        })
    }

    /// Start building an adapter that uses these options.
    pub fn input_builder(
        &self,
        field_name: impl Into<String>,
        type_tag: TypeTag,
    ) -> InputAdapterBuilder<'static> {
        InputAdapter::builder(field_name, type_tag).date_time_format(self.date_time_format.as_str())
    }

    /// Bind a typed input with these options, optionally registering it.
    pub fn typed_input<T: InputValue>(
        &self,
        field_name: impl Into<String>,
        value: T,
        coordinator: Option<&mut InlineEditor>,
    ) -> inline_editor_fields::Result<TypedInput<T>> {
        TypedInput::with_options(
            field_name,
            value,
            Some(self.date_time_format.as_str()),
            coordinator,
        )
    }
}

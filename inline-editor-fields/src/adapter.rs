//! InputAdapter: converts between what a user types and a bound field's value.
//!
//! An adapter is bound to one field of one type. It parses text into that
//! type, formats values back into text, and remembers the value it was
//! created with so the field can be reset after any number of edits.
//!
//! ```rust
//! use inline_editor_fields::{InputAdapter, TypeTag, Value, ValueKind};
//!
//! let mut height = InputAdapter::builder("HeightInCentimeters", TypeTag::new(ValueKind::Integer))
//!     .value(Value::Integer(170))
//!     .build()?;
//!
//! height.set_text("182")?;
//! assert_eq!(height.value(), &Value::Integer(182));
//!
//! height.reset();
//! assert_eq!(height.text(), "170");
//! # Ok::<(), inline_editor_fields::FieldsError>(())
//! ```

use tracing::{debug, trace};

use crate::convert::{format_value, parse_value};
use crate::date_format::DateFormat;
use crate::editor::{InlineEditor, InputId};
use crate::error::{FieldsError, Result};
use crate::types::{TypeTag, Value, ValueKind};

type Observer = Box<dyn FnMut(&Value)>;

/// Builder for [`InputAdapter`]. Created by [`InputAdapter::builder`].
#[derive(Debug)]
pub struct InputAdapterBuilder<'a> {
    field_name: String,
    type_tag: TypeTag,
    value: Option<Value>,
    date_time_format: Option<String>,
    coordinator: Option<&'a mut InlineEditor>,
}

impl<'a> InputAdapterBuilder<'a> {
    /// The field's current value. Defaults to the type's zero value.
    pub fn value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }

    /// Date-time display format. Defaults to `yyyy-MM-ddTHH:mm`.
    pub fn date_time_format(mut self, format: impl Into<String>) -> Self {
        self.date_time_format = Some(format.into());
        self
    }

    /// Register the adapter with an enclosing editor.
    pub fn coordinator<'b>(self, editor: &'b mut InlineEditor) -> InputAdapterBuilder<'b> {
        InputAdapterBuilder {
            field_name: self.field_name,
            type_tag: self.type_tag,
            value: self.value,
            date_time_format: self.date_time_format,
            coordinator: Some(editor),
        }
    }

    /// Validate the configuration, register, and capture the reset snapshot.
    pub fn build(self) -> Result<InputAdapter> {
        let date_format = match self.date_time_format {
            Some(pattern) => DateFormat::new(pattern)?,
            None => DateFormat::default(),
        };

        let value = self
            .value
            .unwrap_or_else(|| self.type_tag.default_value());
        if !self.type_tag.accepts(&value) {
            return Err(FieldsError::ValueMismatch {
                field: self.field_name,
                expected: self.type_tag.to_string(),
                found: value.shape().to_string(),
            });
        }

        let input_id = self
            .coordinator
            .map(|editor| editor.register(&self.field_name, &self.type_tag));

        debug!(
            field = %self.field_name,
            type_tag = %self.type_tag,
            date_format = %date_format,
            registered = input_id.is_some(),
            "input adapter initialized"
        );

        Ok(InputAdapter {
            field_name: self.field_name,
            type_tag: self.type_tag,
            date_format,
            snapshot: value.clone(),
            value,
            pending_text: None,
            validation_message: None,
            observers: Vec::new(),
            render_requests: 0,
            input_id,
        })
    }
}

/// A text input bound to one typed field.
pub struct InputAdapter {
    field_name: String,
    type_tag: TypeTag,
    date_format: DateFormat,
    value: Value,
    snapshot: Value,
    pending_text: Option<String>,
    validation_message: Option<String>,
    observers: Vec<Observer>,
    render_requests: usize,
    input_id: Option<InputId>,
}

impl InputAdapter {
    /// Start building an adapter for `field_name` with the given type tag.
    pub fn builder(field_name: impl Into<String>, type_tag: TypeTag) -> InputAdapterBuilder<'static> {
        InputAdapterBuilder {
            field_name: field_name.into(),
            type_tag,
            value: None,
            date_time_format: None,
            coordinator: None,
        }
    }

    /// Start building an adapter from a type name such as `"int?"`.
    ///
    /// Fails immediately with [`FieldsError::UnsupportedType`] when the name
    /// does not resolve, before any parse or format is possible.
    pub fn for_type_name(
        field_name: impl Into<String>,
        type_name: &str,
        enums: &[ValueKind],
    ) -> Result<InputAdapterBuilder<'static>> {
        let type_tag = TypeTag::resolve(type_name, enums)?;
        Ok(Self::builder(field_name, type_tag))
    }

    // --- Conversion ---

    /// Convert user text into a value of this adapter's type.
    ///
    /// Every failure yields the same [`FieldsError::ParseFailed`] for this
    /// field. Empty text on a nullable non-text field parses to `Value::Null`.
    pub fn parse(&self, text: &str) -> Result<Value> {
        if self.type_tag.nullable && text.is_empty() && self.type_tag.kind != ValueKind::Text {
            return Ok(Value::Null);
        }
        match parse_value(&self.type_tag.kind, text, &self.date_format) {
            Some(value) => {
                trace!(field = %self.field_name, text, "parsed input");
                Ok(value)
            }
            None => {
                trace!(field = %self.field_name, text, "input could not be parsed");
                Err(FieldsError::ParseFailed {
                    field: self.field_name.clone(),
                })
            }
        }
    }

    /// Render a value as text. Null and foreign values render as `""`.
    pub fn format(&self, value: &Value) -> String {
        format_value(&self.type_tag.kind, value, &self.date_format)
    }

    // --- Editing ---

    /// Apply user text. On success the value changes and observers hear
    /// about it; on failure the value is kept, the raw text is remembered,
    /// and the parse message becomes the field's validation message.
    pub fn set_text(&mut self, text: &str) -> Result<()> {
        match self.parse(text) {
            Ok(value) => {
                self.pending_text = None;
                self.validation_message = None;
                self.assign(value);
                Ok(())
            }
            Err(err) => {
                self.pending_text = Some(text.to_string());
                self.validation_message = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Set the value programmatically. It must fit the type tag.
    pub fn set_value(&mut self, value: Value) -> Result<()> {
        if !self.type_tag.accepts(&value) {
            return Err(FieldsError::ValueMismatch {
                field: self.field_name.clone(),
                expected: self.type_tag.to_string(),
                found: value.shape().to_string(),
            });
        }
        self.pending_text = None;
        self.validation_message = None;
        self.assign(value);
        Ok(())
    }

    /// Restore the value captured at construction, notify observers and
    /// request a re-render. Repeated calls leave the value unchanged.
    pub fn reset(&mut self) {
        self.value = self.snapshot.clone();
        self.pending_text = None;
        self.validation_message = None;
        self.notify();
        self.render_requests += 1;
        debug!(field = %self.field_name, "input reset to initial value");
    }

    /// Register a callback invoked with the new value on every change.
    pub fn on_value_changed(&mut self, observer: impl FnMut(&Value) + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Re-render requests since the last call.
    pub fn take_render_requests(&mut self) -> usize {
        std::mem::take(&mut self.render_requests)
    }

    // --- State ---

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn type_tag(&self) -> &TypeTag {
        &self.type_tag
    }

    pub fn date_format(&self) -> &DateFormat {
        &self.date_format
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The value captured at construction.
    pub fn snapshot(&self) -> &Value {
        &self.snapshot
    }

    /// What the input box shows: the rejected text after a failed parse,
    /// otherwise the formatted value.
    pub fn text(&self) -> String {
        match &self.pending_text {
            Some(text) => text.clone(),
            None => self.format(&self.value),
        }
    }

    /// The parse message from the last failed edit, if any.
    pub fn validation_message(&self) -> Option<&str> {
        self.validation_message.as_deref()
    }

    /// Whether the value differs from the snapshot.
    pub fn is_modified(&self) -> bool {
        self.value != self.snapshot
    }

    /// Handle issued by the enclosing editor, if one was given.
    pub fn input_id(&self) -> Option<InputId> {
        self.input_id
    }

    // --- Internal ---

    fn assign(&mut self, value: Value) {
        if value != self.value {
            self.value = value;
            self.notify();
        }
    }

    fn notify(&mut self) {
        for observer in &mut self.observers {
            observer(&self.value);
        }
    }
}

impl std::fmt::Debug for InputAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputAdapter")
            .field("field_name", &self.field_name)
            .field("type_tag", &self.type_tag)
            .field("date_format", &self.date_format.pattern())
            .field("value", &self.value)
            .field("snapshot", &self.snapshot)
            .field("pending_text", &self.pending_text)
            .field("observers", &self.observers.len())
            .field("input_id", &self.input_id)
            .finish()
    }
}

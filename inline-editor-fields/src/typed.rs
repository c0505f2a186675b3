//! Statically typed inputs.
//!
//! [`TypedInput<T>`] wraps an [`InputAdapter`] for a Rust type that
//! implements [`InputValue`]. Only the supported kinds implement the trait,
//! so wiring an input to any other type is a compile error rather than a
//! runtime one.

use std::marker::PhantomData;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use uuid::Uuid;

use crate::adapter::InputAdapter;
use crate::editor::InlineEditor;
use crate::error::{FieldsError, Result};
use crate::types::{EnumMember, TypeTag, Value, ValueKind};

/// A Rust type an input can be bound to.
pub trait InputValue: Clone + PartialEq + Sized {
    /// The tag adapters for this type are built with.
    fn type_tag() -> TypeTag;

    fn into_value(self) -> Value;

    /// Convert back; `None` if the value has another shape.
    fn from_value(value: Value) -> Option<Self>;
}

/// A fieldless enum usable as an input value.
///
/// Implement this and invoke [`enum_input_value!`](crate::enum_input_value)
/// to get the matching [`InputValue`] implementation.
pub trait EnumValue: Copy + PartialEq + 'static {
    /// Type name used to resolve the enum from a type name.
    const TYPE_NAME: &'static str;

    /// Every member, in declaration order.
    fn variants() -> &'static [Self];

    /// The member's declared name.
    fn name(self) -> &'static str;

    /// The member's display label, if it has one.
    fn label(self) -> Option<&'static str> {
        None
    }

    fn kind() -> ValueKind {
        let members = Self::variants()
            .iter()
            .map(|&variant| EnumMember {
                name: variant.name().to_string(),
                label: variant.label().map(str::to_string),
            })
            .collect();
        ValueKind::enumeration(Self::TYPE_NAME, members)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.name() == name)
    }
}

/// Implement [`InputValue`] for a type that implements [`EnumValue`].
#[macro_export]
macro_rules! enum_input_value {
    ($ty:ty) => {
        impl $crate::InputValue for $ty {
            fn type_tag() -> $crate::TypeTag {
                $crate::TypeTag::new(<$ty as $crate::EnumValue>::kind())
            }

            fn into_value(self) -> $crate::Value {
                $crate::Value::Enum(<$ty as $crate::EnumValue>::name(self).to_string())
            }

            fn from_value(value: $crate::Value) -> Option<Self> {
                match value {
                    $crate::Value::Enum(name) => <$ty as $crate::EnumValue>::from_name(&name),
                    _ => None,
                }
            }
        }
    };
}

macro_rules! primitive_input_value {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl InputValue for $ty {
            fn type_tag() -> TypeTag {
                TypeTag::new(ValueKind::$kind)
            }

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

primitive_input_value!(String, Text, Text);
primitive_input_value!(i32, Integer, Integer);
primitive_input_value!(f32, Float, Float);
primitive_input_value!(f64, Double, Double);
primitive_input_value!(Uuid, Uuid, Uuid);
primitive_input_value!(NaiveDateTime, DateTime, DateTime);
primitive_input_value!(DateTime<FixedOffset>, DateTimeOffset, DateTimeOffset);

impl<T: InputValue> InputValue for Option<T> {
    fn type_tag() -> TypeTag {
        T::type_tag().nullable()
    }

    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Null => Some(None),
            other => T::from_value(other).map(Some),
        }
    }
}

/// An input bound to a field of Rust type `T`.
#[derive(Debug)]
pub struct TypedInput<T: InputValue> {
    inner: InputAdapter,
    _marker: PhantomData<T>,
}

impl<T: InputValue> TypedInput<T> {
    /// Bind to `field_name` with the default date-time format.
    pub fn new(field_name: impl Into<String>, value: T) -> Result<Self> {
        Self::with_options(field_name, value, None, None)
    }

    /// Bind with an explicit date-time format and/or enclosing editor.
    pub fn with_options(
        field_name: impl Into<String>,
        value: T,
        date_time_format: Option<&str>,
        coordinator: Option<&mut InlineEditor>,
    ) -> Result<Self> {
        let mut builder = InputAdapter::builder(field_name, T::type_tag()).value(value.into_value());
        if let Some(format) = date_time_format {
            builder = builder.date_time_format(format);
        }
        let inner = match coordinator {
            Some(editor) => builder.coordinator(editor).build()?,
            None => builder.build()?,
        };
        Ok(Self {
            inner,
            _marker: PhantomData,
        })
    }

    pub fn parse(&self, text: &str) -> Result<T> {
        let value = self.inner.parse(text)?;
        self.typed(value)
    }

    pub fn format(&self, value: &T) -> String {
        self.inner.format(&value.clone().into_value())
    }

    /// The current value.
    ///
    /// Fails with [`FieldsError::ValueMismatch`] only if `T`'s
    /// [`InputValue`] impl cannot convert back a value it accepted.
    pub fn value(&self) -> Result<T> {
        self.typed(self.inner.value().clone())
    }

    /// The value captured at construction.
    pub fn snapshot(&self) -> Result<T> {
        self.typed(self.inner.snapshot().clone())
    }

    pub fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text)
    }

    pub fn set_value(&mut self, value: T) -> Result<()> {
        self.inner.set_value(value.into_value())
    }

    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn text(&self) -> String {
        self.inner.text()
    }

    pub fn on_value_changed(&mut self, mut observer: impl FnMut(&T) + 'static)
    where
        T: 'static,
    {
        self.inner.on_value_changed(move |value| {
            if let Some(typed) = T::from_value(value.clone()) {
                observer(&typed);
            }
        });
    }

    /// The untyped adapter underneath.
    pub fn adapter(&self) -> &InputAdapter {
        &self.inner
    }

    /// Re-render requests since the last call.
    pub fn take_render_requests(&mut self) -> usize {
        self.inner.take_render_requests()
    }

    fn typed(&self, value: Value) -> Result<T> {
        let found = value.shape();
        T::from_value(value).ok_or_else(|| FieldsError::ValueMismatch {
            field: self.inner.field_name().to_string(),
            expected: T::type_tag().to_string(),
            found: found.to_string(),
        })
    }
}

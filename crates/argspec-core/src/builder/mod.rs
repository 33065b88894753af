//! Typed argument builders.
//!
//! Each builder accumulates refinements and is frozen by exactly one
//! terminal call. Builders decode the raw value into `Ok(None)` when the
//! key is absent, `Ok(Some(_))` when present and valid, or an error; the
//! shared [`Decoded`] terminal turns that into required/optional/default
//! semantics.

pub mod boolean;
pub mod enumeration;
pub mod integer;
pub mod path;
pub mod string;
pub mod string_array;

use std::sync::Arc;

use serde_json::Value;

use crate::arg::{Arg, SchemaType};
use crate::error::{ArgError, ExpectedType};
use crate::validated::Validated;
use crate::Arguments;

type Decoder<T> = Arc<dyn Fn(&Arguments) -> Result<Option<T>, ArgError> + Send + Sync>;

/// Value under `key`, with JSON `null` treated as absent.
pub(crate) fn lookup<'a>(arguments: &'a Arguments, key: &str) -> Option<&'a Value> {
    arguments.get(key).filter(|value| !value.is_null())
}

/// Non-blank string under `key`. Blank strings count as absent.
pub(crate) fn lookup_str<'a>(
    arguments: &'a Arguments,
    key: &str,
) -> Result<Option<&'a str>, ArgError> {
    match lookup(arguments, key) {
        None => Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ArgError::TypeMismatch {
            key: key.to_string(),
            expected: ExpectedType::String,
        }),
    }
}

/// A fully refined decoder waiting for its terminal call.
pub(crate) struct Decoded<T> {
    key: String,
    description: String,
    schema_type: SchemaType,
    decode: Decoder<T>,
}

impl<T: 'static> Decoded<T> {
    pub(crate) fn new(
        key: String,
        description: String,
        schema_type: SchemaType,
        decode: impl Fn(&Arguments) -> Result<Option<T>, ArgError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            description,
            schema_type,
            decode: Arc::new(decode),
        }
    }

    pub(crate) fn required(self) -> Arg<T> {
        let key = self.key.clone();
        let decode = self.decode;
        Arg::new(
            self.key,
            self.description,
            true,
            None,
            self.schema_type,
            move |arguments| match decode(arguments) {
                Ok(Some(value)) => Validated::Valid(value),
                Ok(None) => Validated::Invalid(ArgError::MissingRequired { key: key.clone() }),
                Err(error) => Validated::Invalid(error),
            },
        )
    }

    pub(crate) fn optional(self) -> Arg<Option<T>> {
        let decode = self.decode;
        Arg::new(
            self.key,
            self.description,
            false,
            None,
            self.schema_type,
            move |arguments| decode(arguments).into(),
        )
    }

    /// Optional with a fallback. `described` is the description already
    /// carrying the default annotation; `wire_default` is the default as
    /// advertised in the schema metadata.
    pub(crate) fn optional_or(self, default: T, wire_default: Value, described: String) -> Arg<T>
    where
        T: Clone + Send + Sync,
    {
        let decode = self.decode;
        Arg::new(
            self.key,
            described,
            false,
            Some(wire_default),
            self.schema_type,
            move |arguments| match decode(arguments) {
                Ok(value) => Validated::Valid(value.unwrap_or_else(|| default.clone())),
                Err(error) => Validated::Invalid(error),
            },
        )
    }
}

/// Appends `" (parts)"` to a description when there is anything to say.
pub(crate) fn annotate(description: &str, parts: &[String]) -> String {
    if parts.is_empty() {
        description.to_string()
    } else {
        format!("{description} ({})", parts.join(", "))
    }
}

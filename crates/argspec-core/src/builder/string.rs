//! String arguments with optional full-match pattern refinements.

use regex::Regex;
use serde_json::Value;

use super::{lookup_str, Decoded};
use crate::arg::{Arg, SchemaType};
use crate::error::ArgError;

#[derive(Debug, Clone)]
struct Pattern {
    regex: Regex,
    message: String,
}

/// Builder for a string argument. A blank string counts as absent.
#[must_use]
#[derive(Debug, Clone)]
pub struct StringArgBuilder {
    key: String,
    description: String,
    patterns: Vec<Pattern>,
}

impl StringArgBuilder {
    pub(crate) fn new(key: String, description: String) -> Self {
        Self {
            key,
            description,
            patterns: Vec::new(),
        }
    }

    /// Require the whole value to match `pattern`; on mismatch the
    /// argument is rejected with `message` verbatim.
    ///
    /// # Errors
    ///
    /// Returns the regex compile error if `pattern` is not a valid regex.
    pub fn pattern(mut self, pattern: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))?;
        self.patterns.push(Pattern {
            regex,
            message: message.into(),
        });
        Ok(self)
    }

    pub fn required(self) -> Arg<String> {
        self.decoded().required()
    }

    pub fn optional(self) -> Arg<Option<String>> {
        self.decoded().optional()
    }

    pub fn optional_or(self, default: impl Into<String>) -> Arg<String> {
        let default = default.into();
        let described = format!("{} (default: {default})", self.description);
        let wire_default = Value::String(default.clone());
        self.decoded().optional_or(default, wire_default, described)
    }

    fn decoded(self) -> Decoded<String> {
        let key = self.key.clone();
        let patterns = self.patterns;
        Decoded::new(self.key, self.description, SchemaType::String, move |arguments| {
            let Some(value) = lookup_str(arguments, &key)? else {
                return Ok(None);
            };
            for pattern in &patterns {
                if !pattern.regex.is_match(value) {
                    return Err(ArgError::PatternViolation {
                        key: key.clone(),
                        message: pattern.message.clone(),
                    });
                }
            }
            Ok(Some(value.to_string()))
        })
    }
}

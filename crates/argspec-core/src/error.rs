//! # Argument Errors
//!
//! One error per rejected argument, and the ordered collection the
//! applicative combinators hand to the failure branch.
//!
//! The `Display` text of every [`ArgError`] is the message shown to the
//! remote caller, so its wording is part of the wire contract.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use thiserror::Error;

/// Wire type an argument was expected to carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpectedType {
    String,
    Integer,
    Boolean,
    StringArray,
}

impl ExpectedType {
    /// Noun phrase used in mismatch messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "a string",
            Self::Integer => "an integer",
            Self::Boolean => "a boolean",
            Self::StringArray => "an array of strings",
        }
    }
}

impl fmt::Display for ExpectedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive numeric bound that a value failed to satisfy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeBound {
    AtLeast(i64),
    AtMost(i64),
}

impl fmt::Display for RangeBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AtLeast(min) => write!(f, "at least {min}"),
            Self::AtMost(max) => write!(f, "at most {max}"),
        }
    }
}

/// Why a single argument was rejected.
///
/// Every variant carries the argument key so the error can be placed in an
/// [`ArgErrors`] map without extra bookkeeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    /// A required key was absent, `null`, or a blank string.
    #[error("{key} is required")]
    MissingRequired { key: String },

    /// The key was present with the wrong JSON type.
    #[error("{key} must be {expected}")]
    TypeMismatch { key: String, expected: ExpectedType },

    /// An integer fell outside an inclusive `min`/`max` refinement.
    #[error("{key} must be {bound}")]
    RangeViolation { key: String, bound: RangeBound },

    /// A string did not fully match a declared pattern. The message is
    /// supplied by the declaration.
    #[error("{message}")]
    PatternViolation { key: String, message: String },

    /// An enum name was not one of the declared variants.
    #[error("{key} must be one of: {}", .allowed.join(", "))]
    EnumViolation { key: String, allowed: Vec<String> },

    /// A project-relative path normalized to a location above its base.
    #[error("Path is outside the project directory")]
    TraversalViolation { key: String },

    /// A path that must be absolute was relative.
    #[error("{key} is not absolute")]
    NotAbsolute { key: String },

    /// No open project lives at the given location.
    #[error("Project not found at path: {path}")]
    ProjectNotFound { key: String, path: String },
}

impl ArgError {
    /// The argument key this error belongs to.
    pub fn key(&self) -> &str {
        match self {
            Self::MissingRequired { key }
            | Self::TypeMismatch { key, .. }
            | Self::RangeViolation { key, .. }
            | Self::PatternViolation { key, .. }
            | Self::EnumViolation { key, .. }
            | Self::TraversalViolation { key }
            | Self::NotAbsolute { key }
            | Self::ProjectNotFound { key, .. } => key,
        }
    }

    /// Caller-facing message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Ordered map from argument key to its error.
///
/// Iteration follows insertion order, which the combinators guarantee is
/// declaration order. Inserting a key that is already present replaces the
/// error in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgErrors {
    errors: Vec<ArgError>,
}

impl ArgErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an error, replacing any earlier error for the same key.
    pub fn insert(&mut self, error: ArgError) {
        match self.errors.iter_mut().find(|e| e.key() == error.key()) {
            Some(slot) => *slot = error,
            None => self.errors.push(error),
        }
    }

    /// Returns the number of rejected arguments.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no argument was rejected.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ArgError> {
        self.errors.iter().find(|e| e.key() == key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Rejected keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(ArgError::key)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ArgError> {
        self.errors.iter()
    }

    /// All messages joined with `", "`, the form sent back to the caller.
    pub fn joined(&self) -> String {
        self.errors
            .iter()
            .map(ArgError::message)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<ArgError> {
        self.errors
    }
}

impl fmt::Display for ArgErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.joined())
    }
}

impl Extend<ArgError> for ArgErrors {
    fn extend<I: IntoIterator<Item = ArgError>>(&mut self, iter: I) {
        for error in iter {
            self.insert(error);
        }
    }
}

impl FromIterator<ArgError> for ArgErrors {
    fn from_iter<I: IntoIterator<Item = ArgError>>(iter: I) -> Self {
        let mut errors = Self::new();
        errors.extend(iter);
        errors
    }
}

impl IntoIterator for ArgErrors {
    type Item = ArgError;
    type IntoIter = std::vec::IntoIter<ArgError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ArgErrors {
    type Item = &'a ArgError;
    type IntoIter = std::slice::Iter<'a, ArgError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Serializes as a JSON object `{key: message}` in declaration order.
impl Serialize for ArgErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for error in &self.errors {
            map.serialize_entry(error.key(), &error.message())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missing(key: &str) -> ArgError {
        ArgError::MissingRequired { key: key.to_string() }
    }

    #[test]
    fn test_messages_match_wire_wording() {
        assert_eq!(missing("query").to_string(), "query is required");
        assert_eq!(
            ArgError::TypeMismatch {
                key: "limit".into(),
                expected: ExpectedType::Integer
            }
            .to_string(),
            "limit must be an integer"
        );
        assert_eq!(
            ArgError::RangeViolation {
                key: "limit".into(),
                bound: RangeBound::AtLeast(1)
            }
            .to_string(),
            "limit must be at least 1"
        );
        assert_eq!(
            ArgError::EnumViolation {
                key: "color".into(),
                allowed: vec!["RED".into(), "GREEN".into(), "BLUE".into()]
            }
            .to_string(),
            "color must be one of: RED, GREEN, BLUE"
        );
        assert_eq!(
            ArgError::TraversalViolation { key: "filePath".into() }.to_string(),
            "Path is outside the project directory"
        );
        assert_eq!(
            ArgError::TypeMismatch {
                key: "names".into(),
                expected: ExpectedType::StringArray
            }
            .to_string(),
            "names must be an array of strings"
        );
    }

    #[test]
    fn test_pattern_violation_uses_declared_message() {
        let err = ArgError::PatternViolation {
            key: "id".into(),
            message: "id must be lowercase".into(),
        };
        assert_eq!(err.key(), "id");
        assert_eq!(err.to_string(), "id must be lowercase");
    }

    #[test]
    fn test_errors_keep_insertion_order() {
        let errors: ArgErrors = [missing("b"), missing("a"), missing("c")]
            .into_iter()
            .collect();
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(errors.joined(), "b is required, a is required, c is required");
    }

    #[test]
    fn test_insert_same_key_replaces_in_place() {
        let mut errors = ArgErrors::new();
        errors.insert(missing("a"));
        errors.insert(missing("b"));
        errors.insert(ArgError::NotAbsolute { key: "a".into() });
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(errors.get("a").map(ArgError::message).as_deref(), Some("a is not absolute"));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let errors: ArgErrors = [missing("z"), missing("a")].into_iter().collect();
        let json = serde_json::to_string(&errors).unwrap();
        assert_eq!(json, r#"{"z":"z is required","a":"a is required"}"#);
    }

    #[test]
    fn test_empty_errors() {
        let errors = ArgErrors::new();
        assert!(errors.is_empty());
        assert_eq!(errors.joined(), "");
        assert!(!errors.contains_key("a"));
    }
}

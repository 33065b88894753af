//! # Schema Conformance
//!
//! Checks raw arguments against a derived [`InputSchema`] with a real JSON
//! Schema validator (Draft 2020-12). Tool validation does not depend on
//! this; it is a second opinion used by strict callers and by tests that
//! keep the schema and the extractors honest with each other.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use argspec_core::Arguments;

use crate::schema::InputSchema;

/// A single schema violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON Pointer path to the violating field in the instance.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the error.
    pub schema_path: String,
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// All violations found in one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaViolations {
    violations: Vec<SchemaViolation>,
}

impl SchemaViolations {
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }

    pub fn into_inner(self) -> Vec<SchemaViolation> {
        self.violations
    }
}

impl fmt::Display for SchemaViolations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConformanceError {
    /// The derived schema was rejected by the JSON Schema compiler.
    #[error("input schema does not compile: {0}")]
    InvalidSchema(String),

    #[error("arguments do not conform to the input schema:\n{0}")]
    Violations(SchemaViolations),
}

/// A compiled input schema, reusable across calls.
pub struct SchemaChecker {
    validator: jsonschema::Validator,
}

impl SchemaChecker {
    /// Compile `schema` as a Draft 2020-12 JSON Schema.
    ///
    /// # Errors
    ///
    /// [`ConformanceError::InvalidSchema`] if the schema does not compile.
    pub fn new(schema: &InputSchema) -> Result<Self, ConformanceError> {
        let mut opts = jsonschema::options();
        opts.with_draft(jsonschema::Draft::Draft202012);
        let validator = opts
            .build(&schema.to_value())
            .map_err(|e| ConformanceError::InvalidSchema(e.to_string()))?;
        Ok(Self { validator })
    }

    /// Every violation of the schema by `arguments`; empty when conforming.
    pub fn violations(&self, arguments: &Arguments) -> SchemaViolations {
        let instance = Value::Object(arguments.clone());
        let violations = self
            .validator
            .iter_errors(&instance)
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();
        SchemaViolations { violations }
    }

    /// # Errors
    ///
    /// [`ConformanceError::Violations`] listing every violation.
    pub fn check(&self, arguments: &Arguments) -> Result<(), ConformanceError> {
        let violations = self.violations(arguments);
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConformanceError::Violations(violations))
        }
    }
}

impl fmt::Debug for SchemaChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaChecker").finish_non_exhaustive()
    }
}

/// Compile `schema` and check `arguments` against it in one step.
pub fn check_arguments(schema: &InputSchema, arguments: &Arguments) -> Result<(), ConformanceError> {
    SchemaChecker::new(schema)?.check(arguments)
}

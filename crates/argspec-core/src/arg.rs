//! # Argument Declarations
//!
//! An [`Arg`] pairs the metadata advertised in a tool's input schema with
//! the function that extracts and validates the same argument at call
//! time. Both come from one declaration, so the advertised contract and the
//! enforced one cannot drift apart.
//!
//! Args are only produced by the terminal call of a typed builder:
//!
//! ```
//! use argspec_core::arg;
//!
//! let query = arg::string("query", "Text to search for").required();
//! let limit = arg::integer("limit", "Maximum results").min(1).optional_or(100);
//! # let _ = (query, limit);
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use crate::validated::Validated;
use crate::Arguments;

pub use crate::builder::boolean::BooleanArgBuilder;
pub use crate::builder::enumeration::{ArgEnum, EnumArgBuilder};
pub use crate::builder::integer::IntegerArgBuilder;
pub use crate::builder::path::{
    absolute_path, optional_project_relative_path, project_location, project_relative_path,
};
pub use crate::builder::string::StringArgBuilder;
pub use crate::builder::string_array::StringArrayArgBuilder;
pub use crate::project::project;

/// Wire type of an argument as advertised in the input schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Integer,
    Boolean,
    #[serde(rename = "array")]
    StringArray,
}

impl SchemaType {
    /// JSON Schema `type` keyword value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::StringArray => "array",
        }
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Extractor<T> = Arc<dyn Fn(&Arguments) -> Validated<T> + Send + Sync>;

/// A frozen argument declaration producing values of type `T`.
///
/// Cloning is cheap: the extractor is shared.
pub struct Arg<T> {
    key: String,
    description: String,
    required: bool,
    default_value: Option<Value>,
    schema_type: SchemaType,
    extractor: Extractor<T>,
}

impl<T: 'static> Arg<T> {
    pub(crate) fn new(
        key: String,
        description: String,
        required: bool,
        default_value: Option<Value>,
        schema_type: SchemaType,
        extractor: impl Fn(&Arguments) -> Validated<T> + Send + Sync + 'static,
    ) -> Self {
        Self {
            key,
            description,
            required,
            default_value,
            schema_type,
            extractor: Arc::new(extractor),
        }
    }

    /// Derive a new argument that applies a further refinement to every
    /// valid value. Schema metadata is carried over unchanged.
    pub fn and_then<U: 'static>(
        self,
        refine: impl Fn(T) -> Validated<U> + Send + Sync + 'static,
    ) -> Arg<U> {
        let inner = self.extractor;
        Arg {
            key: self.key,
            description: self.description,
            required: self.required,
            default_value: self.default_value,
            schema_type: self.schema_type,
            extractor: Arc::new(move |arguments: &Arguments| inner(arguments).and_then(&refine)),
        }
    }

    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + Send + Sync + 'static) -> Arg<U> {
        self.and_then(move |value| Validated::Valid(f(value)))
    }
}

impl<T> Arg<T> {
    /// Extract and validate this argument from a raw argument map.
    ///
    /// Never panics; always returns exactly one of the two cases.
    pub fn extract(&self, arguments: &Arguments) -> Validated<T> {
        (self.extractor)(arguments)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default_value.as_ref()
    }

    pub fn schema_type(&self) -> SchemaType {
        self.schema_type
    }
}

impl<T> Clone for Arg<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            description: self.description.clone(),
            required: self.required,
            default_value: self.default_value.clone(),
            schema_type: self.schema_type,
            extractor: Arc::clone(&self.extractor),
        }
    }
}

impl<T> fmt::Debug for Arg<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arg")
            .field("key", &self.key)
            .field("description", &self.description)
            .field("required", &self.required)
            .field("default_value", &self.default_value)
            .field("schema_type", &self.schema_type)
            .finish_non_exhaustive()
    }
}

/// Type-erased view of an argument's schema metadata.
///
/// Lets heterogeneous `Arg<T>` values be listed together when deriving an
/// input schema.
pub trait ArgSpec {
    fn key(&self) -> &str;
    fn description(&self) -> &str;
    fn is_required(&self) -> bool;
    fn default_value(&self) -> Option<&Value>;
    fn schema_type(&self) -> SchemaType;
}

impl<T> ArgSpec for Arg<T> {
    fn key(&self) -> &str {
        Arg::key(self)
    }

    fn description(&self) -> &str {
        Arg::description(self)
    }

    fn is_required(&self) -> bool {
        Arg::is_required(self)
    }

    fn default_value(&self) -> Option<&Value> {
        Arg::default_value(self)
    }

    fn schema_type(&self) -> SchemaType {
        Arg::schema_type(self)
    }
}

/// Start declaring a string argument.
pub fn string(key: impl Into<String>, description: impl Into<String>) -> StringArgBuilder {
    StringArgBuilder::new(key.into(), description.into())
}

/// Start declaring an integer argument.
pub fn integer(key: impl Into<String>, description: impl Into<String>) -> IntegerArgBuilder {
    IntegerArgBuilder::new(key.into(), description.into())
}

/// Start declaring a boolean argument.
pub fn boolean(key: impl Into<String>, description: impl Into<String>) -> BooleanArgBuilder {
    BooleanArgBuilder::new(key.into(), description.into())
}

/// Start declaring an argument naming one variant of `E`.
pub fn enumeration<E: ArgEnum>(
    key: impl Into<String>,
    description: impl Into<String>,
) -> EnumArgBuilder<E> {
    EnumArgBuilder::new(key.into(), description.into())
}

/// Start declaring an array-of-strings argument.
pub fn string_array(
    key: impl Into<String>,
    description: impl Into<String>,
) -> StringArrayArgBuilder {
    StringArrayArgBuilder::new(key.into(), description.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ArgError;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_schema_type_wire_names() {
        assert_eq!(SchemaType::String.as_str(), "string");
        assert_eq!(SchemaType::StringArray.as_str(), "array");
        assert_eq!(serde_json::to_value(SchemaType::StringArray).unwrap(), json!("array"));
        assert_eq!(serde_json::to_value(SchemaType::Integer).unwrap(), json!("integer"));
    }

    #[test]
    fn test_and_then_keeps_metadata() {
        let even = integer("n", "An even number").required().and_then(|n| {
            if n % 2 == 0 {
                Validated::Valid(n)
            } else {
                Validated::Invalid(ArgError::PatternViolation {
                    key: "n".into(),
                    message: "n must be even".into(),
                })
            }
        });
        assert_eq!(even.key(), "n");
        assert!(even.is_required());
        assert_eq!(even.schema_type(), SchemaType::Integer);
        assert_eq!(even.extract(&args(json!({"n": 4}))), Validated::Valid(4));
        assert_eq!(
            even.extract(&args(json!({"n": 3}))).error().map(ArgError::message).as_deref(),
            Some("n must be even")
        );
        assert_eq!(
            even.extract(&args(json!({}))).error().map(ArgError::message).as_deref(),
            Some("n is required")
        );
    }

    #[test]
    fn test_map_transforms_value() {
        let upper = string("s", "Some text").required().map(|s| s.to_uppercase());
        assert_eq!(upper.extract(&args(json!({"s": "abc"}))), Validated::Valid("ABC".to_string()));
    }

    #[test]
    fn test_clone_shares_extractor() {
        let a = boolean("flag", "A flag").optional_or(true);
        let b = a.clone();
        assert_eq!(b.extract(&Arguments::new()), Validated::Valid(true));
        assert!(format!("{a:?}").contains("flag"));
    }

    #[test]
    fn test_arg_spec_is_object_safe() {
        let a = string("a", "A").required();
        let b = integer("b", "B").optional();
        let specs: Vec<&dyn ArgSpec> = vec![&a, &b];
        assert_eq!(specs.iter().map(|s| s.key()).collect::<Vec<_>>(), vec!["a", "b"]);
        assert!(specs[0].is_required());
        assert!(!specs[1].is_required());
    }
}

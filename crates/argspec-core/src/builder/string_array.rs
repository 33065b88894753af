//! Array-of-strings arguments.

use serde_json::Value;

use super::{lookup, Decoded};
use crate::arg::{Arg, SchemaType};
use crate::error::{ArgError, ExpectedType};

/// Builder for an array-of-strings argument.
///
/// Non-string elements are dropped rather than rejected; only a value that
/// is not an array at all is a type mismatch.
#[must_use]
#[derive(Debug, Clone)]
pub struct StringArrayArgBuilder {
    key: String,
    description: String,
}

impl StringArrayArgBuilder {
    pub(crate) fn new(key: String, description: String) -> Self {
        Self { key, description }
    }

    /// An absent key yields an empty list.
    pub fn optional(self) -> Arg<Vec<String>> {
        let described = self.description.clone();
        self.decoded()
            .optional_or(Vec::new(), Value::Array(Vec::new()), described)
    }

    /// An absent key is rejected; an empty array is accepted.
    pub fn required(self) -> Arg<Vec<String>> {
        self.decoded().required()
    }

    fn decoded(self) -> Decoded<Vec<String>> {
        let key = self.key.clone();
        Decoded::new(self.key, self.description, SchemaType::StringArray, move |arguments| {
            match lookup(arguments, &key) {
                None => Ok(None),
                Some(Value::Array(items)) => Ok(Some(
                    items
                        .iter()
                        .filter_map(|item| item.as_str().map(str::to_string))
                        .collect(),
                )),
                Some(_) => Err(ArgError::TypeMismatch {
                    key: key.clone(),
                    expected: ExpectedType::StringArray,
                }),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arg;
    use crate::validated::Validated;
    use crate::Arguments;
    use serde_json::json;

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_optional_defaults_to_empty() {
        let a = arg::string_array("names", "Names").optional();
        assert_eq!(a.extract(&Arguments::new()), Validated::Valid(Vec::new()));
        assert_eq!(a.schema_type(), SchemaType::StringArray);
        assert!(!a.is_required());
    }

    #[test]
    fn test_non_string_items_are_dropped() {
        let a = arg::string_array("names", "Names").optional();
        assert_eq!(
            a.extract(&args(json!({"names": ["a", 1, null, "b", {"c": 2}]}))),
            Validated::Valid(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_non_array_is_rejected() {
        let a = arg::string_array("names", "Names").optional();
        assert_eq!(
            a.extract(&args(json!({"names": "a,b"}))).error().map(ToString::to_string).as_deref(),
            Some("names must be an array of strings")
        );
    }

    #[test]
    fn test_required_array() {
        let a = arg::string_array("names", "Names").required();
        assert!(a.is_required());
        assert!(!a.extract(&Arguments::new()).is_valid());
        assert_eq!(a.extract(&args(json!({"names": []}))), Validated::Valid(Vec::new()));
    }
}

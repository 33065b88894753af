//! Boolean arguments.

use serde_json::Value;

use super::{lookup, Decoded};
use crate::arg::{Arg, SchemaType};
use crate::error::{ArgError, ExpectedType};

/// Builder for a boolean argument. Only JSON `true`/`false` are accepted.
#[must_use]
#[derive(Debug, Clone)]
pub struct BooleanArgBuilder {
    key: String,
    description: String,
}

impl BooleanArgBuilder {
    pub(crate) fn new(key: String, description: String) -> Self {
        Self { key, description }
    }

    pub fn required(self) -> Arg<bool> {
        self.decoded().required()
    }

    pub fn optional(self) -> Arg<Option<bool>> {
        self.decoded().optional()
    }

    pub fn optional_or(self, default: bool) -> Arg<bool> {
        let described = format!("{} (default: {default})", self.description);
        self.decoded()
            .optional_or(default, Value::Bool(default), described)
    }

    fn decoded(self) -> Decoded<bool> {
        let key = self.key.clone();
        Decoded::new(self.key, self.description, SchemaType::Boolean, move |arguments| {
            match lookup(arguments, &key) {
                None => Ok(None),
                Some(Value::Bool(b)) => Ok(Some(*b)),
                Some(_) => Err(ArgError::TypeMismatch {
                    key: key.clone(),
                    expected: ExpectedType::Boolean,
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
    fn test_required_boolean() {
        let a = arg::boolean("flag", "Flag").required();
        assert_eq!(a.extract(&args(json!({"flag": false}))), Validated::Valid(false));
        assert_eq!(
            a.extract(&Arguments::new()).error().map(ToString::to_string).as_deref(),
            Some("flag is required")
        );
    }

    #[test]
    fn test_rejects_stringly_booleans() {
        let a = arg::boolean("flag", "Flag").optional();
        assert_eq!(
            a.extract(&args(json!({"flag": "true"}))).error().map(ToString::to_string).as_deref(),
            Some("flag must be a boolean")
        );
        assert!(!a.extract(&args(json!({"flag": 1}))).is_valid());
    }

    #[test]
    fn test_optional_or_default() {
        let a = arg::boolean("useRegex", "Treat the query as a regex").optional_or(false);
        assert_eq!(a.extract(&Arguments::new()), Validated::Valid(false));
        assert_eq!(a.extract(&args(json!({"useRegex": true}))), Validated::Valid(true));
        assert_eq!(a.description(), "Treat the query as a regex (default: false)");
        assert_eq!(a.default_value(), Some(&json!(false)));
    }
}

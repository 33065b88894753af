//! The parameter façade: one tool's full argument list, its validator and
//! its advertised schema, all from a single declaration.

use argspec_core::{ArgList, Arguments, Validations};

use crate::schema::{schema_for, InputSchema};

/// A tool's declared parameters.
///
/// The schema is derived once, at construction, from the same declarations
/// that [`Params::validate`] runs.
///
/// ```
/// use argspec_core::arg;
/// use argspec_schema::Params;
/// use serde_json::json;
///
/// let params = Params::new((
///     arg::string("searchText", "Text to search for").required(),
///     arg::boolean("caseSensitive", "Match case").optional_or(false),
/// ));
/// assert_eq!(params.schema().required(), Some(&["searchText".to_string()][..]));
///
/// let raw = json!({"searchText": "todo"}).as_object().cloned().unwrap_or_default();
/// let summary = params
///     .validate(&raw)
///     .map_n(|text, case| format!("{text}:{case}"))
///     .or_else_errors(|errors| errors.joined());
/// assert_eq!(summary, "todo:false");
/// ```
#[derive(Debug, Clone)]
pub struct Params<L> {
    args: L,
    schema: InputSchema,
}

impl<L: ArgList> Params<L> {
    pub fn new(args: L) -> Self {
        let schema = schema_for(&args.specs());
        Self { args, schema }
    }

    pub fn schema(&self) -> &InputSchema {
        &self.schema
    }

    pub fn args(&self) -> &L {
        &self.args
    }

    /// Run every declared extractor against `arguments`.
    pub fn validate(&self, arguments: &Arguments) -> Validations<L::Results> {
        self.args.validate(arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argspec_core::{arg, ArgError};
    use serde_json::{json, Value};

    fn args(value: Value) -> Arguments {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    #[test]
    fn test_zero_params() {
        let params = Params::new(());
        assert_eq!(params.schema().to_value(), json!({"type": "object"}));
        let out = params.validate(&Arguments::new()).map_n(|| "ok").or_else_errors(|_| "err");
        assert_eq!(out, "ok");
    }

    #[test]
    fn test_schema_and_validation_share_declarations() {
        let params = Params::new((
            arg::string("filePath", "Path of the file").required(),
            arg::integer("startLine", "First line").min(1).optional(),
        ));
        let schema = params.schema();
        assert_eq!(schema.required(), Some(&["filePath".to_string()][..]));
        assert_eq!(
            schema.properties().and_then(|p| p.get("startLine")).map(|p| p.description.as_str()),
            Some("First line (min: 1)")
        );

        let errors = params
            .validate(&args(json!({"startLine": 0})))
            .map_n(|_, _| ())
            .into_result()
            .errors()
            .cloned()
            .unwrap();
        assert_eq!(
            errors.iter().map(ArgError::message).collect::<Vec<_>>(),
            vec!["filePath is required", "startLine must be at least 1"]
        );
    }

    #[test]
    fn test_args_accessor() {
        let params = Params::new((arg::boolean("flag", "Flag").optional_or(true),));
        assert_eq!(params.args().0.key(), "flag");
    }
}

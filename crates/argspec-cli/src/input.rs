//! Loading raw tool arguments from the command line.
//!
//! Arguments are always an object. Files ending in `.yaml` or `.yml` are
//! read as YAML, anything else as JSON.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde_json::Value;

use argspec_core::Arguments;

/// Parse an inline JSON argument object.
pub fn parse_json(raw: &str) -> Result<Arguments> {
    let value: Value = serde_json::from_str(raw).context("--args is not valid JSON")?;
    into_arguments(value)
}

/// Read an argument object from a `.json`, `.yaml` or `.yml` file.
pub fn load_file(path: &Path) -> Result<Arguments> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML: {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON: {}", path.display()))?
    };
    into_arguments(value)
}

fn into_arguments(value: Value) -> Result<Arguments> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Arguments::new()),
        other => bail!("tool arguments must be an object, got {}", kind(&other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_inline_json_object() {
        let args = parse_json(r#"{"searchText": "todo", "maxResults": 5}"#).unwrap();
        assert_eq!(args["searchText"], "todo");
        assert_eq!(args["maxResults"], 5);
    }

    #[test]
    fn test_inline_json_must_be_an_object() {
        let err = parse_json("[1, 2]").unwrap_err();
        assert_eq!(err.to_string(), "tool arguments must be an object, got an array");
        assert!(parse_json("{not json").is_err());
    }

    #[test]
    fn test_yaml_file_becomes_json_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("args.yml");
        std::fs::write(
            &path,
            "searchText: todo\ncaseSensitive: true\nmaxResults: 3\nexcludeDirectories:\n  - vendor\n",
        )
        .unwrap();
        let args = load_file(&path).unwrap();
        assert_eq!(
            Value::Object(args),
            json!({
                "searchText": "todo",
                "caseSensitive": true,
                "maxResults": 3,
                "excludeDirectories": ["vendor"],
            })
        );
    }

    #[test]
    fn test_json_file_and_null_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("args.json");
        std::fs::write(&json_path, r#"{"filePath": "a.txt"}"#).unwrap();
        assert_eq!(load_file(&json_path).unwrap()["filePath"], "a.txt");

        let yaml_path = dir.path().join("null.yaml");
        std::fs::write(&yaml_path, "~\n").unwrap();
        assert!(load_file(&yaml_path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = load_file(Path::new("/no/such/args.json")).unwrap_err();
        assert!(err.to_string().starts_with("failed to read "));
    }
}

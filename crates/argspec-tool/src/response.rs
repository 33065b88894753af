//! Call results and response serialization.

use std::fmt;

use serde::Serialize;
use serde_json::json;

use argspec_core::ArgErrors;

/// A failed tool call, as reported to the caller.
///
/// Messages always start with `"Error: "`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    message: String,
}

impl ErrorResponse {
    pub fn new(detail: impl fmt::Display) -> Self {
        Self {
            message: format!("Error: {detail}"),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Rejected arguments become one message listing every problem.
impl From<ArgErrors> for ErrorResponse {
    fn from(errors: ArgErrors) -> Self {
        Self::new(errors.joined())
    }
}

/// One block of text content in a call result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextContent {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
}

impl TextContent {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            kind: "text",
            text: text.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// Wire form of a finished tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CallToolResult {
    content: Vec<TextContent>,
    is_error: bool,
}

impl CallToolResult {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
            is_error: false,
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            content: vec![TextContent::new(text)],
            is_error: true,
        }
    }

    pub fn content(&self) -> &[TextContent] {
        &self.content
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// All text blocks concatenated.
    pub fn text(&self) -> String {
        self.content.iter().map(TextContent::text).collect()
    }
}

/// Render a tool response as call-result text.
///
/// String responses pass through verbatim; anything else becomes compact
/// JSON. A response that cannot be serialized yields an `{"error": ...}`
/// document instead of failing the call.
pub fn serialize_response<T: Serialize + ?Sized>(response: &T) -> String {
    match serde_json::to_string(response) {
        Ok(json) if json.starts_with('"') => serde_json::from_str::<String>(&json).unwrap_or(json),
        Ok(json) => json,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize tool response");
            json!({ "error": format!("Failed to serialize response: {e}") }).to_string()
        }
    }
}

/// An inclusive, 1-based range of lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineRange {
    pub start_line: usize,
    pub end_line: usize,
    pub line_count: usize,
}

impl LineRange {
    /// `None` if `end_line < start_line` or `start_line` is zero.
    pub fn new(start_line: usize, end_line: usize) -> Option<Self> {
        (start_line >= 1 && end_line >= start_line).then(|| Self {
            start_line,
            end_line,
            line_count: end_line - start_line + 1,
        })
    }
}

//! # Tools
//!
//! A [`Tool`] is a named operation with declared parameters. The registry
//! stores tools behind the object-safe [`DynTool`], which every `Tool`
//! implements automatically.

use serde::Serialize;

use argspec_core::Arguments;
use argspec_schema::InputSchema;

use crate::response::{serialize_response, CallToolResult, ErrorResponse};

/// An externally callable operation.
pub trait Tool: Send + Sync {
    type Response: Serialize;

    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// Schema advertised once at registration.
    fn input_schema(&self) -> &InputSchema;

    /// Validate `arguments` and run the operation.
    fn execute(&self, arguments: &Arguments) -> Result<Self::Response, ErrorResponse>;
}

/// What a transport needs to advertise a tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolSpecification {
    pub name: String,
    pub description: String,
    pub input_schema: InputSchema,
}

/// Object-safe view of a [`Tool`].
pub trait DynTool: Send + Sync {
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    fn input_schema(&self) -> &InputSchema;

    fn specification(&self) -> ToolSpecification {
        ToolSpecification {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema().clone(),
        }
    }

    /// Execute and render the outcome as a call result.
    fn call(&self, arguments: &Arguments) -> CallToolResult;
}

impl<T: Tool> DynTool for T {
    fn name(&self) -> &str {
        Tool::name(self)
    }

    fn description(&self) -> &str {
        Tool::description(self)
    }

    fn input_schema(&self) -> &InputSchema {
        Tool::input_schema(self)
    }

    fn call(&self, arguments: &Arguments) -> CallToolResult {
        match self.execute(arguments) {
            Ok(response) => CallToolResult::success(serialize_response(&response)),
            Err(error) => {
                tracing::debug!(tool = Tool::name(self), error = %error, "tool call failed");
                CallToolResult::error(error.message())
            }
        }
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

/// Failure of a single request against an external API.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{api} API returned status {status}")]
    Status {
        api: String,
        status: u16,
        details: Option<Value>,
    },

    #[error("An unexpected error occurred while calling {api}: {message}")]
    Transport { api: String, message: String },

    #[error("{api} API returned a body that is not valid JSON: {message}")]
    Decode { api: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Status code of the response, when one was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Render the error as the JSON object handed back to the caller of a tool.
    pub fn to_value(&self) -> Value {
        let mut value = json!({ "error": self.to_string() });
        if let ApiError::Status {
            status, details, ..
        } = self
        {
            value["status"] = json!(status);
            if let Some(details) = details {
                value["details"] = details.clone();
            }
        }
        value
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[non_exhaustive]
#[derive(Error, Debug, Clone, Deserialize, Serialize, PartialEq)]
pub enum ToolError {
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

pub type ToolResult<T> = Result<T, ToolError>;

/// Errors raised while assembling the tool registry and agent descriptors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Unknown tool referenced by agent {agent}: {tool}")]
    UnknownTool { agent: String, tool: String },

    #[error("Invalid agent definition: {0}")]
    InvalidAgent(String),
}

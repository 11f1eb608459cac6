use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::errors::{ToolError, ToolResult};
use crate::tool::{Tool, ToolCall};

pub mod chat;
pub mod market;
pub mod scryfall;
pub mod terminal;
pub mod timer;

pub use chat::ChatSystem;
pub use market::MarketSystem;
pub use scryfall::ScryfallSystem;
pub use terminal::TerminalSystem;
pub use timer::TimerSystem;

/// A named group of tools backed by one client.
///
/// `call` returns `Err` only when the call itself is malformed (unknown tool,
/// bad arguments). Failures of the external service come back as `Ok` values
/// describing the error, so a tool never brings down the agent that used it.
#[async_trait]
pub trait System: Send + Sync {
    /// Get the name of the system
    fn name(&self) -> &str;

    /// Get the system description
    fn description(&self) -> &str;

    /// Get available tools
    fn tools(&self) -> &[Tool];

    /// Call a tool with the given arguments
    async fn call(&self, tool_call: ToolCall) -> ToolResult<Value>;
}

/// Decode tool arguments into their typed form. A missing argument object is
/// treated as empty.
pub(crate) fn parse_args<T: DeserializeOwned>(arguments: Value) -> ToolResult<T> {
    let arguments = match arguments {
        Value::Null => Value::Object(Default::default()),
        other => other,
    };
    serde_json::from_value(arguments).map_err(|e| ToolError::InvalidParameters(e.to_string()))
}

/// Accept either a JSON string or a JSON number and keep its textual form.
pub(crate) fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or a number, got {}",
            other
        ))),
    }
}

use async_trait::async_trait;
use serde_json::{json, Value};
use std::time::Duration;

use super::System;
use crate::errors::{ToolError, ToolResult};
use crate::tool::{Tool, ToolCall};

/// Blocks the caller for a requested number of seconds.
///
/// Waiting for a condition is done by the orchestration runtime alternating
/// `wait` with whatever tool checks the condition; this system never polls.
#[derive(Clone)]
pub struct TimerSystem {
    tools: Vec<Tool>,
}

impl Default for TimerSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TimerSystem {
    pub fn new() -> Self {
        Self {
            tools: vec![Tool::new(
                "wait",
                "Waits for a specified number of seconds.",
                json!({
                    "type": "object",
                    "required": ["seconds"],
                    "properties": {
                        "seconds": {
                            "type": "integer",
                            "minimum": 0,
                            "description": "The number of seconds to wait."
                        }
                    }
                }),
            )],
        }
    }

    async fn wait(&self, arguments: Value) -> ToolResult<Value> {
        let seconds = arguments
            .get("seconds")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                ToolError::InvalidParameters("'seconds' must be a non-negative integer".into())
            })?;

        tracing::debug!(seconds, "waiting");
        tokio::time::sleep(Duration::from_secs(seconds)).await;
        Ok(Value::String(format!("Waited for {} seconds.", seconds)))
    }
}

#[async_trait]
impl System for TimerSystem {
    fn name(&self) -> &str {
        "timer"
    }

    fn description(&self) -> &str {
        "Pauses for a fixed amount of time"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> ToolResult<Value> {
        match tool_call.name.as_str() {
            "wait" => self.wait(tool_call.arguments).await,
            _ => Err(ToolError::ToolNotFound(tool_call.name)),
        }
    }
}

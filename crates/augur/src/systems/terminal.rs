use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};

use super::{parse_args, System};
use crate::errors::{ToolError, ToolResult};
use crate::tool::{Tool, ToolCall};

pub const PRINTED: &str = "Message printed to terminal.";

type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

#[derive(Deserialize)]
struct MessageArgs {
    message: String,
}

/// Prints agent messages on the console
#[derive(Clone)]
pub struct TerminalSystem {
    out: SharedWriter,
    tools: Vec<Tool>,
}

impl Default for TerminalSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalSystem {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        let print = Tool::new(
            "print_to_terminal",
            "Prints a message to the terminal.",
            json!({
                "type": "object",
                "required": ["message"],
                "properties": {
                    "message": {"type": "string", "description": "The message to print."}
                }
            }),
        );

        Self {
            out: Arc::new(Mutex::new(out)),
            tools: vec![print],
        }
    }

    fn print(&self, message: &str) {
        // Printing is best effort: a closed stdout must not fail the tool.
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(e) = writeln!(out, "Message from agent: {}", message).and_then(|_| out.flush()) {
            tracing::warn!(error = %e, "failed to print message");
        }
    }
}

#[async_trait]
impl System for TerminalSystem {
    fn name(&self) -> &str {
        "terminal"
    }

    fn description(&self) -> &str {
        "Prints messages from the agent on the local console"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> ToolResult<Value> {
        match tool_call.name.as_str() {
            "print_to_terminal" => {
                let args: MessageArgs = parse_args(tool_call.arguments)?;
                self.print(&args.message);
                Ok(Value::String(PRINTED.to_string()))
            }
            _ => Err(ToolError::ToolNotFound(tool_call.name)),
        }
    }
}

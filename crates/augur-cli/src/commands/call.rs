use anyhow::{Context, Result};
use serde_json::Value;

use augur::registry::ToolRegistry;

pub async fn execute(registry: &ToolRegistry, tool: &str, args: &str) -> Result<()> {
    let arguments = parse_args(args)?;
    tracing::debug!(tool, "invoking tool from the command line");

    let result = registry
        .invoke(tool, arguments)
        .await
        .with_context(|| format!("Failed to call tool '{}'", tool))?;

    println!("{}", render(&result)?);
    Ok(())
}

fn parse_args(args: &str) -> Result<Value> {
    serde_json::from_str(args).context("--args must be valid JSON")
}

/// Strings print raw, anything else as pretty JSON
fn render(result: &Value) -> Result<String> {
    match result {
        Value::String(text) => Ok(text.clone()),
        other => Ok(serde_json::to_string_pretty(other)?),
    }
}

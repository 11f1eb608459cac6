use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::{RegistryError, ToolError, ToolResult};
use crate::systems::System;
use crate::tool::{Tool, ToolCall};

/// A registered tool together with the system that executes it
pub struct ToolDescriptor {
    tool: Tool,
    system: Arc<dyn System>,
}

impl ToolDescriptor {
    pub fn name(&self) -> &str {
        &self.tool.name
    }

    pub fn description(&self) -> &str {
        &self.tool.description
    }

    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    /// Name of the system that owns this tool
    pub fn system_name(&self) -> &str {
        self.system.name()
    }

    pub async fn invoke(&self, arguments: Value) -> ToolResult<Value> {
        tracing::debug!(tool = %self.tool.name, system = self.system.name(), "invoking tool");
        if let Err(e) = self.tool.check_arguments(&arguments) {
            tracing::warn!(tool = %self.tool.name, error = %e, "tool call rejected");
            return Err(e);
        }
        let result = self
            .system
            .call(ToolCall::new(self.tool.name.clone(), arguments))
            .await;
        if let Err(e) = &result {
            tracing::warn!(tool = %self.tool.name, error = %e, "tool call rejected");
        }
        result
    }
}

impl std::fmt::Debug for ToolDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDescriptor")
            .field("name", &self.tool.name)
            .field("system", &self.system.name())
            .finish()
    }
}

/// Tools by name, built once at start-up and shared read-only afterwards.
///
/// Tool names are global: two systems may not register the same name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<ToolDescriptor>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every tool of a system. Nothing is registered if any name clashes.
    pub fn register_system(&mut self, system: Arc<dyn System>) -> Result<(), RegistryError> {
        let mut seen = std::collections::HashSet::new();
        for tool in system.tools() {
            if self.index.contains_key(&tool.name) || !seen.insert(tool.name.as_str()) {
                return Err(RegistryError::DuplicateTool(tool.name.clone()));
            }
        }

        for tool in system.tools() {
            self.index.insert(tool.name.clone(), self.tools.len());
            self.tools.push(Arc::new(ToolDescriptor {
                tool: tool.clone(),
                system: Arc::clone(&system),
            }));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<Arc<ToolDescriptor>> {
        self.index.get(name).map(|&i| Arc::clone(&self.tools[i]))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Registered tools in registration order
    pub fn tools(&self) -> impl Iterator<Item = &Arc<ToolDescriptor>> {
        self.tools.iter()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub async fn invoke(&self, name: &str, arguments: Value) -> ToolResult<Value> {
        let descriptor = self
            .get(name)
            .ok_or_else(|| ToolError::ToolNotFound(name.to_string()))?;
        descriptor.invoke(arguments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::{TerminalSystem, TimerSystem};
    use serde_json::json;

    fn registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry
            .register_system(Arc::new(TimerSystem::new()))
            .unwrap();
        registry
            .register_system(Arc::new(TerminalSystem::with_writer(Box::new(std::io::sink()))))
            .unwrap();
        registry
    }

    #[test]
    fn test_lookup_in_registration_order() {
        let registry = registry();
        let names: Vec<_> = registry.tools().map(|t| t.name().to_string()).collect();
        assert_eq!(names, vec!["wait", "print_to_terminal"]);
        assert_eq!(registry.len(), 2);

        let wait = registry.get("wait").unwrap();
        assert_eq!(wait.system_name(), "timer");
        assert_eq!(wait.description(), "Waits for a specified number of seconds.");
        assert!(registry.get("sleep").is_none());
    }

    #[test]
    fn test_duplicate_system_is_rejected() {
        let mut registry = registry();
        let error = registry
            .register_system(Arc::new(TimerSystem::new()))
            .unwrap_err();
        assert_eq!(error, RegistryError::DuplicateTool("wait".to_string()));
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_invoke_by_name() {
        let registry = registry();

        let result = registry
            .invoke("print_to_terminal", json!({"message": "hi"}))
            .await
            .unwrap();
        assert_eq!(result, json!("Message printed to terminal."));

        let error = registry.invoke("missing", json!({})).await.unwrap_err();
        assert_eq!(error, ToolError::ToolNotFound("missing".to_string()));
    }

    #[tokio::test]
    async fn test_missing_required_argument_stops_before_the_system() {
        let registry = registry();
        let error = registry.invoke("wait", json!({})).await.unwrap_err();
        assert_eq!(
            error,
            ToolError::InvalidParameters("'wait' is missing required arguments: seconds".into())
        );
    }
}

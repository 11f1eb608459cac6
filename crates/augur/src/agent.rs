use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::RegistryError;
use crate::registry::{ToolDescriptor, ToolRegistry};
use crate::tool::Tool;

/// Something an agent may call: a registered tool or another agent.
#[derive(Debug, Clone)]
pub enum AgentTool {
    Tool(Arc<ToolDescriptor>),
    Agent(Arc<AgentDescriptor>),
}

impl AgentTool {
    pub fn name(&self) -> &str {
        match self {
            AgentTool::Tool(tool) => tool.name(),
            AgentTool::Agent(agent) => &agent.name,
        }
    }

    /// The tool as offered to a model. A nested agent takes a single `request`.
    pub fn spec(&self) -> Tool {
        match self {
            AgentTool::Tool(tool) => tool.tool().clone(),
            AgentTool::Agent(agent) => Tool::new(
                agent.name.clone(),
                agent.description.clone(),
                json!({
                    "type": "object",
                    "required": ["request"],
                    "properties": {
                        "request": {
                            "type": "string",
                            "description": "The request to hand to the agent."
                        }
                    }
                }),
            ),
        }
    }
}

/// Declarative agent definition consumed by the orchestration runtime.
///
/// Instruction and description are opaque text; nothing here interprets them.
#[derive(Debug, Clone)]
pub struct AgentDescriptor {
    pub name: String,
    pub model: String,
    pub description: String,
    pub instruction: String,
    pub tools: Vec<AgentTool>,
}

impl AgentDescriptor {
    pub fn builder<N, M>(name: N, model: M) -> AgentBuilder
    where
        N: Into<String>,
        M: Into<String>,
    {
        AgentBuilder::new(name, model)
    }

    pub fn tool_specs(&self) -> Vec<Tool> {
        self.tools.iter().map(AgentTool::spec).collect()
    }

    /// Resolve one of this agent's registered tools by name
    pub fn find_tool(&self, name: &str) -> Option<&Arc<ToolDescriptor>> {
        self.tools.iter().find_map(|entry| match entry {
            AgentTool::Tool(tool) if tool.name() == name => Some(tool),
            _ => None,
        })
    }

    /// Resolve one of this agent's nested agents by name
    pub fn find_agent(&self, name: &str) -> Option<&Arc<AgentDescriptor>> {
        self.tools.iter().find_map(|entry| match entry {
            AgentTool::Agent(agent) if agent.name == name => Some(agent),
            _ => None,
        })
    }
}

pub struct AgentBuilder {
    name: String,
    model: String,
    description: String,
    instruction: String,
    tools: Vec<AgentTool>,
    error: Option<RegistryError>,
}

impl AgentBuilder {
    pub fn new<N, M>(name: N, model: M) -> Self
    where
        N: Into<String>,
        M: Into<String>,
    {
        Self {
            name: name.into(),
            model: model.into(),
            description: String::new(),
            instruction: String::new(),
            tools: Vec::new(),
            error: None,
        }
    }

    pub fn description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn instruction<S: Into<String>>(mut self, instruction: S) -> Self {
        self.instruction = instruction.into();
        self
    }

    /// Reference a tool that must already be in the registry
    pub fn tool(mut self, registry: &ToolRegistry, name: &str) -> Self {
        match registry.get(name) {
            Some(tool) => self.tools.push(AgentTool::Tool(tool)),
            None => {
                self.error.get_or_insert(RegistryError::UnknownTool {
                    agent: self.name.clone(),
                    tool: name.to_string(),
                });
            }
        }
        self
    }

    /// Reference several registered tools at once
    pub fn tools<'a, I>(self, registry: &ToolRegistry, names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .fold(self, |builder, name| builder.tool(registry, name))
    }

    /// Expose an already built agent as a tool of this one
    pub fn agent(mut self, agent: Arc<AgentDescriptor>) -> Self {
        self.tools.push(AgentTool::Agent(agent));
        self
    }

    pub fn build(self) -> Result<AgentDescriptor, RegistryError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        if self.name.trim().is_empty() {
            return Err(RegistryError::InvalidAgent("agent name must not be empty".into()));
        }
        if self.model.trim().is_empty() {
            return Err(RegistryError::InvalidAgent(format!(
                "agent {} has no model",
                self.name
            )));
        }

        let mut seen = HashSet::new();
        for tool in &self.tools {
            if tool.name() == self.name {
                return Err(RegistryError::InvalidAgent(format!(
                    "agent {} cannot call itself",
                    self.name
                )));
            }
            if !seen.insert(tool.name()) {
                return Err(RegistryError::InvalidAgent(format!(
                    "agent {} lists tool {} more than once",
                    self.name,
                    tool.name()
                )));
            }
        }

        Ok(AgentDescriptor {
            name: self.name,
            model: self.model,
            description: self.description,
            instruction: self.instruction,
            tools: self.tools,
        })
    }
}

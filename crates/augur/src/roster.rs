use anyhow::Result;
use std::sync::Arc;

use crate::agent::AgentDescriptor;
use crate::clients::{AlphaVantageClient, GoogleChatClient, ScryfallClient};
use crate::configs::Settings;
use crate::instructions;
use crate::registry::ToolRegistry;
use crate::systems::{ChatSystem, MarketSystem, ScryfallSystem, TerminalSystem, TimerSystem};

/// Build the registry holding every tool, with clients configured from `settings`.
pub fn standard_registry(settings: &Settings) -> Result<ToolRegistry> {
    let scryfall = ScryfallClient::new(&settings.scryfall, &settings.http)?;
    let market = AlphaVantageClient::new(&settings.alpha_vantage, &settings.http)?;
    let chat = GoogleChatClient::new(&settings.google_chat, &settings.http)?;

    let mut registry = ToolRegistry::new();
    registry.register_system(Arc::new(ScryfallSystem::new(scryfall)))?;
    registry.register_system(Arc::new(MarketSystem::new(market)))?;
    registry.register_system(Arc::new(ChatSystem::new(chat)))?;
    registry.register_system(Arc::new(TimerSystem::new()))?;
    registry.register_system(Arc::new(TerminalSystem::new()))?;
    Ok(registry)
}

/// The four standard agents. `coordination` is the root handed to the runtime.
#[derive(Debug, Clone)]
pub struct Roster {
    pub coordination: Arc<AgentDescriptor>,
    pub background: Arc<AgentDescriptor>,
    pub magic: Arc<AgentDescriptor>,
    pub stock: Arc<AgentDescriptor>,
}

impl Roster {
    pub fn root(&self) -> &Arc<AgentDescriptor> {
        &self.coordination
    }

    /// Every agent, specialists first
    pub fn agents(&self) -> [&Arc<AgentDescriptor>; 4] {
        [&self.background, &self.magic, &self.stock, &self.coordination]
    }

    pub fn get(&self, name: &str) -> Option<&Arc<AgentDescriptor>> {
        self.agents().into_iter().find(|agent| agent.name == name)
    }
}

pub fn standard_agents(model: &str, registry: &ToolRegistry) -> Result<Roster> {
    let magic_tools: Vec<String> = registry
        .tools()
        .filter(|tool| tool.system_name() == "scryfall")
        .map(|tool| tool.name().to_string())
        .collect();

    let magic = AgentDescriptor::builder("magic_agent", model)
        .description(instructions::MAGIC_DESCRIPTION)
        .instruction(instructions::MAGIC_INSTRUCTION)
        .tools(registry, magic_tools.iter().map(String::as_str))
        .build()?;

    let stock = AgentDescriptor::builder("stock_agent", model)
        .description(instructions::STOCK_DESCRIPTION)
        .instruction(instructions::STOCK_INSTRUCTION)
        .tool(registry, "get_stock_data")
        .build()?;

    let background = AgentDescriptor::builder("background_agent", model)
        .description(instructions::BACKGROUND_DESCRIPTION)
        .instruction(instructions::BACKGROUND_INSTRUCTION)
        .tools(
            registry,
            ["send_google_chat_message", "wait", "print_to_terminal"],
        )
        .build()?;

    let magic = Arc::new(magic);
    let stock = Arc::new(stock);
    let background = Arc::new(background);

    let coordination = AgentDescriptor::builder("coordination_agent", model)
        .description(instructions::COORDINATION_DESCRIPTION)
        .instruction(instructions::COORDINATION_INSTRUCTION)
        .agent(Arc::clone(&background))
        .agent(Arc::clone(&magic))
        .agent(Arc::clone(&stock))
        .tool(registry, "print_to_terminal")
        .build()?;

    tracing::debug!(
        tools = registry.len(),
        root = %coordination.name,
        "agent roster assembled"
    );

    Ok(Roster {
        coordination: Arc::new(coordination),
        background,
        magic,
        stock,
    })
}

use anyhow::Result;
use console::style;

use augur::agent::{AgentDescriptor, AgentTool};

pub fn execute(root: &AgentDescriptor) -> Result<()> {
    print!("{}", render(root));
    Ok(())
}

/// Draw the agent tree rooted at `root`.
pub fn render(root: &AgentDescriptor) -> String {
    let mut out = format!(
        "{} {}\n",
        style(&root.name).bold().green(),
        style(format!("[{}]", root.model)).dim()
    );
    render_children(root, "", &mut out);
    out
}

fn render_children(agent: &AgentDescriptor, prefix: &str, out: &mut String) {
    let count = agent.tools.len();
    for (i, entry) in agent.tools.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        match entry {
            AgentTool::Tool(tool) => {
                out.push_str(&format!("{}{}{}\n", prefix, branch, tool.name()));
            }
            AgentTool::Agent(nested) => {
                out.push_str(&format!(
                    "{}{}{} {}\n",
                    prefix,
                    branch,
                    style(&nested.name).bold().green(),
                    style(format!("[{}]", nested.model)).dim()
                ));
                let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
                render_children(nested, &next, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur::configs::Settings;
    use augur::roster::{standard_agents, standard_registry};

    #[test]
    fn test_tree_contains_every_agent_and_tool() {
        let settings = Settings::default();
        let registry = standard_registry(&settings).unwrap();
        let roster = standard_agents(&settings.model, &registry).unwrap();

        let tree = render(roster.root());
        let lines: Vec<&str> = tree.lines().collect();

        assert!(lines[0].contains("coordination_agent"));
        for agent in roster.agents() {
            assert!(tree.contains(&agent.name));
        }
        assert!(tree.contains("get_stock_data"));
        assert!(tree.contains("send_google_chat_message"));
        // root, three specialists, their tools, then the root's own tool
        assert_eq!(lines.len(), 1 + 3 + (3 + 16 + 1) + 1);
        assert!(lines.last().unwrap().contains("└── print_to_terminal"));
    }
}

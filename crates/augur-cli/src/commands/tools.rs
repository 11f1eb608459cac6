use anyhow::Result;
use console::style;

use augur::registry::ToolRegistry;

pub fn execute(registry: &ToolRegistry) -> Result<()> {
    print!("{}", render(registry));
    Ok(())
}

/// One entry per tool in registration order, description indented underneath
pub fn render(registry: &ToolRegistry) -> String {
    let mut out = String::new();
    for tool in registry.tools() {
        out.push_str(&format!(
            "{} {}\n",
            style(tool.name()).bold(),
            style(format!("({})", tool.system_name())).dim()
        ));
        for line in tool.description().lines() {
            out.push_str(&format!("    {}\n", line));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use augur::configs::Settings;
    use augur::roster::standard_registry;

    #[test]
    fn test_lists_every_tool() {
        let registry = standard_registry(&Settings::default()).unwrap();
        let listing = render(&registry);

        for tool in registry.tools() {
            assert!(listing.contains(tool.name()));
        }
        assert!(listing.contains("get_card_by_name"));
        assert!(listing.contains("print_to_terminal"));
    }
}

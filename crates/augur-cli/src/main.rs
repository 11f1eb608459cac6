use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use tracing_subscriber::EnvFilter;

use augur::configs::{ClientConfig, Settings};
use augur::roster::{standard_agents, standard_registry};

mod commands;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level regardless of RUST_LOG
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List every registered tool
    Tools,

    /// Print the agent tree, starting at the coordination agent
    Agents,

    /// Invoke a single tool and print its result
    Call {
        /// Name of the tool to invoke
        tool: String,

        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },

    /// Display the current version
    Version,
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::Version = cli.command {
        return commands::version::execute();
    }

    let settings = Settings::from_env()?;
    let registry = standard_registry(&settings)?;
    tracing::debug!(tools = registry.len(), model = %settings.model, "registry ready");

    match cli.command {
        Command::Tools => commands::tools::execute(&registry),
        Command::Agents => {
            let roster = standard_agents(&settings.model, &registry)?;
            commands::agents::execute(roster.root())
        }
        Command::Call { tool, args } => commands::call::execute(&registry, &tool, &args).await,
        Command::Version => commands::version::execute(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_call() {
        let cli = Cli::try_parse_from([
            "augur",
            "call",
            "get_card_by_name",
            "--args",
            r#"{"name": "Black Lotus"}"#,
            "--verbose",
        ])
        .unwrap();

        assert!(cli.verbose);
        match cli.command {
            Command::Call { tool, args } => {
                assert_eq!(tool, "get_card_by_name");
                assert_eq!(args, r#"{"name": "Black Lotus"}"#);
            }
            _ => panic!("expected the call command"),
        }
    }

    #[test]
    fn test_call_args_default_to_empty_object() {
        let cli = Cli::try_parse_from(["augur", "call", "get_random_card"]).unwrap();
        match cli.command {
            Command::Call { args, .. } => assert_eq!(args, "{}"),
            _ => panic!("expected the call command"),
        }
    }

    #[test]
    fn test_subcommand_is_required() {
        assert!(Cli::try_parse_from(["augur"]).is_err());
    }
}

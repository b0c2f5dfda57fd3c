use std::io;

use clap::{Parser, Subcommand};

use nutriplan::config::{AppConfig, OutputFormat};
use nutriplan::shell::{Reply, Shell, ShellCommand};
use nutriplan::state::AppState;

/// nutriplan - plan three meals and sum their nutrients
#[derive(Parser)]
#[command(name = "nutriplan")]
#[command(about = "Plan daily meals from a fixed food catalog", long_about = None)]
struct Cli {
    /// Print JSON instead of text (overrides NUTRIPLAN_OUTPUT)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the food catalog
    Catalog,
    /// Read planner commands from stdin
    Shell,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = AppConfig::from_env()?;
    if cli.json {
        config.output = OutputFormat::Json;
    }

    if config.json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(config.log_filter.as_str())
            .with_writer(io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(config.log_filter.as_str())
            .with_writer(io::stderr)
            .init();
    }

    let state = AppState::init(config);
    let mut shell = Shell::new(state);

    match cli.command {
        Commands::Catalog => {
            if let Reply::Output(text) = shell.execute(ShellCommand::Catalog)? {
                println!("{text}");
            }
            Ok(())
        }
        Commands::Shell => {
            tracing::info!("reading commands from stdin");
            shell.run(io::stdin().lock(), io::stdout().lock())
        }
    }
}

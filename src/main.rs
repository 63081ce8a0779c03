// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging; stdout carries command output
    let default_level = if cli.quiet { "warn" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .init();

    let progress = commands::progress_mode(cli.quiet);

    match cli.command {
        Commands::Graph {
            recipes,
            built,
            format,
            output,
            simple,
            edge_kinds,
            scan,
        } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            recipes.apply(&mut config);
            scan.apply(&mut config);
            if built.is_some() {
                config.built.root = built;
            }
            if let Some(format) = format {
                config.output.format = format;
            }
            if output.is_some() {
                config.output.path = output;
            }
            if simple {
                config.output.simple = true;
            }
            if !edge_kinds.is_empty() {
                config.output.edge_kinds = edge_kinds;
            }
            commands::cmd_graph(config, progress)
        }
        Commands::Built { built, scan } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            scan.apply(&mut config);
            if built.is_some() {
                config.built.root = built;
            }
            commands::cmd_built(config, progress)
        }
        Commands::Records { recipes, scan } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            recipes.apply(&mut config);
            scan.apply(&mut config);
            commands::cmd_records(config, progress)
        }
        Commands::Show {
            identity,
            recipes,
            built,
            scan,
        } => {
            let mut config = commands::load_config(cli.config.as_deref())?;
            recipes.apply(&mut config);
            scan.apply(&mut config);
            if built.is_some() {
                config.built.root = built;
            }
            commands::cmd_show(&identity, config, progress)
        }
        Commands::Completions { shell } => commands::cmd_completions(shell),
    }
}

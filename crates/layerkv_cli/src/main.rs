//! LayerKV CLI
//!
//! Command-line front end for the LayerKV store.
//!
//! # Commands
//!
//! - `exec` - Run a script of store commands from a file or stdin
//! - `shell` - Interactive shell
//! - `version` - Show version information

mod commands;
mod error;
mod output;
mod script;

use clap::{Parser, Subcommand};
use layerkv_server::{KvServer, ServerConfig};
use output::OutputFormat;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// LayerKV in-memory transactional key-value store.
#[derive(Parser)]
#[command(name = "layerkv")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    /// Output format
    #[arg(global = true, short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Maximum transaction nesting depth (0 = unlimited)
    #[arg(global = true, long, default_value = "64")]
    max_depth: usize,

    /// Reject deletes of keys that do not exist
    #[arg(global = true, long)]
    strict_delete: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a script of commands, one per line
    Exec {
        /// Script file (reads stdin if omitted)
        file: Option<PathBuf>,

        /// Stop at the first failing command
        #[arg(long)]
        fail_fast: bool,
    },

    /// Start an interactive shell
    Shell,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = ServerConfig::new()
        .with_max_depth((cli.max_depth > 0).then_some(cli.max_depth))
        .with_strict_delete(cli.strict_delete)
        .with_allow_clear(true);
    let server = KvServer::new(config);

    match cli.command {
        Commands::Exec { file, fail_fast } => {
            commands::exec::run(&server, file.as_deref(), cli.format, fail_fast)?;
        }
        Commands::Shell => {
            commands::shell::run(&server, cli.format)?;
        }
        Commands::Version => {
            println!("LayerKV CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("LayerKV Core v{}", layerkv_core::VERSION);
        }
    }

    Ok(())
}

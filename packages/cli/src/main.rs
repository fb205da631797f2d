#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Command-line toolchain for SBTE results.
//!
//! ```text
//! sbte-results scrape [--config <path>] [--college 121] [--branch 18] [--semester 1]
//! sbte-results parse <sheet.pdf|sheet.txt> [--compact]
//! sbte-results export --format full|compact|embedded [--out <path>]
//! sbte-results serve [--port 5500] [--offline]
//! sbte-results rolls [--college 121] [--branch 18]
//! ```
//!
//! Running with no subcommand enters an interactive menu.
//!
//! Uses `indicatif-log-bridge` (via [`sbte_results_cli_utils::init_logger`])
//! so that log lines and progress bars never fight for the terminal.

mod commands;
mod interactive;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use sbte_results_codec::payload::PayloadFormat;
use sbte_results_server::ServerConfig;

use crate::commands::{ExportFormat, TargetFilter};

#[derive(Parser)]
#[command(
    name = "sbte-results",
    about = "Scrape, parse and export SBTE semester results"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Cohort selection shared by `scrape` and `rolls`.
#[derive(Args, Clone)]
struct TargetArgs {
    /// Scrape config file (defaults to the built-in config)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only these college codes (repeatable)
    #[arg(long = "college")]
    colleges: Vec<u32>,
    /// Only these branch codes (repeatable)
    #[arg(long = "branch")]
    branches: Vec<u32>,
    /// Only these semesters (repeatable)
    #[arg(long = "semester")]
    semesters: Vec<u8>,
}

impl TargetArgs {
    fn filter(&self) -> TargetFilter {
        TargetFilter {
            colleges: self.colleges.clone(),
            branches: self.branches.clone(),
            semesters: self.semesters.clone(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and cache results for every configured cohort
    Scrape {
        #[command(flatten)]
        targets: TargetArgs,
        /// Concurrent fetches per batch
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Parse a single result sheet (PDF or .txt transcript) and print it
    Parse {
        file: PathBuf,
        /// Print the compact tuple form
        #[arg(long)]
        compact: bool,
    },
    /// Export cached results
    Export {
        #[arg(long, value_enum, default_value = "full")]
        format: ExportFormat,
        /// Output file (defaults to a file in the store directory)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Constant name for the embedded format
        #[arg(long, default_value = "STUDENTS_DATA")]
        constant: String,
        /// Scrape config file (for the store directory)
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Start the HTTP server
    Serve {
        #[arg(long)]
        bind_addr: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Default payload format of /students-data
        #[arg(long)]
        format: Option<PayloadFormat>,
        /// Scrape config file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Serve cached results only
        #[arg(long)]
        offline: bool,
    },
    /// Print the roll numbers each configured cohort would try
    Rolls {
        #[command(flatten)]
        targets: TargetArgs,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let multi = sbte_results_cli_utils::init_logger();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        return interactive::run(&multi).await;
    };

    match command {
        Commands::Scrape {
            targets,
            batch_size,
        } => {
            let config =
                commands::load_config(targets.config.as_deref(), &targets.filter(), batch_size)?;
            commands::scrape(&multi, &config).await?;
        }
        Commands::Parse { file, compact } => commands::parse(&file, compact).await?,
        Commands::Export {
            format,
            out,
            constant,
            config,
        } => {
            let config = commands::load_config(config.as_deref(), &TargetFilter::default(), None)?;
            let out = out.unwrap_or_else(|| commands::default_export_path(&config, format));
            commands::export(&config, format, &out, &constant)?;
        }
        Commands::Serve {
            bind_addr,
            port,
            format,
            config,
            offline,
        } => {
            let defaults = ServerConfig::from_env();
            commands::serve(ServerConfig {
                bind_addr: bind_addr.unwrap_or(defaults.bind_addr),
                port: port.unwrap_or(defaults.port),
                payload_format: format.unwrap_or(defaults.payload_format),
                scrape_config: config.or(defaults.scrape_config),
                offline: offline || defaults.offline,
            })
            .await?;
        }
        Commands::Rolls { targets } => {
            let config = commands::load_config(targets.config.as_deref(), &targets.filter(), None)?;
            commands::rolls(&config);
        }
    }

    Ok(())
}

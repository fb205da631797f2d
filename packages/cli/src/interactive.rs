//! Interactive menu shown when no subcommand is given.

use std::path::PathBuf;

use dialoguer::{Confirm, Input, Select};
use sbte_results_cli_utils::MultiProgress;

use crate::commands::{self, ExportFormat, TargetFilter};

/// Top-level actions.
enum Tool {
    Scrape,
    Parse,
    Export,
    Serve,
    Rolls,
}

impl Tool {
    const ALL: &[Self] = &[
        Self::Scrape,
        Self::Parse,
        Self::Export,
        Self::Serve,
        Self::Rolls,
    ];

    #[must_use]
    const fn label(&self) -> &'static str {
        match self {
            Self::Scrape => "Scrape results",
            Self::Parse => "Parse a result sheet",
            Self::Export => "Export cached results",
            Self::Serve => "Start server",
            Self::Rolls => "List roll numbers",
        }
    }
}

/// Runs the menu.
///
/// # Errors
///
/// Returns an error if a prompt fails or the chosen action fails.
pub async fn run(multi: &MultiProgress) -> Result<(), Box<dyn std::error::Error>> {
    println!("SBTE Results Toolchain");
    println!();

    let labels: Vec<&str> = Tool::ALL.iter().map(Tool::label).collect();

    let idx = Select::new()
        .with_prompt("What would you like to do?")
        .items(&labels)
        .default(0)
        .interact()?;

    match Tool::ALL[idx] {
        Tool::Scrape => {
            let filter = prompt_filter()?;
            let batch_size: usize = Input::new()
                .with_prompt("Concurrent fetches per batch")
                .default(50)
                .interact_text()?;
            let config = commands::load_config(None, &filter, Some(batch_size))?;
            let cohorts = config.targets(&sbte_results_models::CodeTables::standard()).len();

            if Confirm::new()
                .with_prompt(format!("Scrape {cohorts} cohort(s)?"))
                .default(true)
                .interact()?
            {
                commands::scrape(multi, &config).await?;
            }
        }
        Tool::Parse => {
            let file: String = Input::new()
                .with_prompt("Path to PDF or .txt transcript")
                .interact_text()?;
            let compact = Confirm::new()
                .with_prompt("Print compact form?")
                .default(false)
                .interact()?;
            commands::parse(&PathBuf::from(file), compact).await?;
        }
        Tool::Export => {
            let labels: Vec<&str> = ExportFormat::ALL.iter().map(|f| f.label()).collect();
            let format = ExportFormat::ALL[Select::new()
                .with_prompt("Format")
                .items(&labels)
                .default(0)
                .interact()?];
            let config = commands::load_config(None, &TargetFilter::default(), None)?;
            let out: String = Input::new()
                .with_prompt("Output file")
                .default(
                    commands::default_export_path(&config, format)
                        .display()
                        .to_string(),
                )
                .interact_text()?;
            commands::export(&config, format, &PathBuf::from(out), "STUDENTS_DATA")?;
        }
        Tool::Serve => {
            // The server uses actix-web's runtime, so we need to run it
            // in a blocking task to avoid nesting tokio runtimes.
            tokio::task::spawn_blocking(|| {
                actix_web::rt::System::new().block_on(sbte_results_server::interactive::run())
            })
            .await??;
        }
        Tool::Rolls => {
            let filter = prompt_filter()?;
            commands::rolls(&commands::load_config(None, &filter, None)?);
        }
    }

    Ok(())
}

/// Asks for optional comma-separated code filters.
fn prompt_filter() -> Result<TargetFilter, Box<dyn std::error::Error>> {
    let ask = |prompt: &str| -> Result<String, dialoguer::Error> {
        Input::new()
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()
    };

    Ok(TargetFilter {
        colleges: parse_codes(&ask("College codes (comma-separated, empty for all)")?),
        branches: parse_codes(&ask("Branch codes (comma-separated, empty for all)")?),
        semesters: parse_codes(&ask("Semesters (comma-separated, empty for all)")?),
    })
}

fn parse_codes<T: std::str::FromStr>(input: &str) -> Vec<T> {
    input
        .split(',')
        .filter_map(|c| c.trim().parse().ok())
        .collect()
}

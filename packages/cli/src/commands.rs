//! Implementations behind each CLI subcommand.
//!
//! Shared by the clap entry point and the interactive menu.

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use sbte_results_cli_utils::{IndicatifProgress, MultiProgress};
use sbte_results_codec::embed::{embed_dataset, script_constant};
use sbte_results_codec::payload::{PayloadFormat, render_payload};
use sbte_results_models::{CodeTables, ParsedResult};
use sbte_results_parser::{parse_pdf, parse_transcript};
use sbte_results_scraper::{Orchestrator, ResultStore, ScrapeConfig};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Output shape of `export`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Array of keyed result objects
    Full,
    /// Array of positional tuples
    Compact,
    /// Compact payload, gzip + base64, as a script constant
    Embedded,
}

impl ExportFormat {
    pub const ALL: &[Self] = &[Self::Full, Self::Compact, Self::Embedded];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Full => "Full JSON",
            Self::Compact => "Compact JSON",
            Self::Embedded => "Embedded script constant",
        }
    }
}

/// Filters applied on top of the scrape config.
#[derive(Debug, Clone, Default)]
pub struct TargetFilter {
    pub colleges: Vec<u32>,
    pub branches: Vec<u32>,
    pub semesters: Vec<u8>,
}

impl TargetFilter {
    /// Narrows `config` in place. Empty lists leave the config unchanged.
    pub fn apply(&self, config: &mut ScrapeConfig) {
        if !self.colleges.is_empty() {
            config.colleges = Some(self.colleges.clone());
        }
        if !self.branches.is_empty() {
            config.branches = Some(self.branches.clone());
        }
        if !self.semesters.is_empty() {
            config
                .semesters
                .retain(|cohort| self.semesters.contains(&cohort.semester));
        }
    }
}

/// Loads the scrape config and applies CLI overrides.
///
/// # Errors
///
/// Returns an error if the config file cannot be read or parsed.
pub fn load_config(
    path: Option<&Path>,
    filter: &TargetFilter,
    batch_size: Option<usize>,
) -> CliResult<ScrapeConfig> {
    let mut config = ScrapeConfig::load(path)?;
    filter.apply(&mut config);
    if let Some(batch_size) = batch_size {
        config.batch_size = batch_size.max(1);
    }
    Ok(config)
}

/// `scrape`: collects every configured cohort into the cache.
///
/// # Errors
///
/// Returns an error if the cache cannot be read or written.
pub async fn scrape(multi: &MultiProgress, config: &ScrapeConfig) -> CliResult<()> {
    let tables = CodeTables::standard();
    let targets = config.targets(&tables);
    if targets.is_empty() {
        println!("No cohorts match the configured filters.");
        return Ok(());
    }

    log::info!(
        "Scraping {} cohort(s) into {}",
        targets.len(),
        config.store_dir.display()
    );

    let orchestrator = Orchestrator::from_config(config, tables)?
        .with_target_progress(IndicatifProgress::steps_bar(
            multi,
            "Cohorts",
            targets.len() as u64,
        ))
        .with_progress(IndicatifProgress::rolls_bar(multi, "Fetching results"));

    let results = orchestrator.collect_all(&targets).await?;

    println!(
        "Collected {} result(s) across {} cohort(s)",
        results.len(),
        targets.len()
    );
    Ok(())
}

/// Parses a result sheet from a `.txt` transcript or a PDF.
///
/// # Errors
///
/// Returns an error if the file cannot be read or holds no usable result,
/// including when PDF extraction panics on a malformed file.
pub async fn read_result(path: &Path, tables: &CodeTables) -> CliResult<ParsedResult> {
    let is_text = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("txt"));

    if is_text {
        let text = std::fs::read_to_string(path)?;
        Ok(parse_transcript(&text, tables)?)
    } else {
        let bytes = std::fs::read(path)?;
        let tables = tables.clone();
        // pdf-extract may panic on malformed input; a panic surfaces here
        // as a JoinError.
        let result = tokio::task::spawn_blocking(move || parse_pdf(&bytes, &tables)).await?;
        Ok(result?)
    }
}

/// `parse`: prints one sheet as JSON.
///
/// # Errors
///
/// Returns an error if the sheet cannot be read or parsed.
pub async fn parse(path: &Path, compact: bool) -> CliResult<()> {
    let result = read_result(path, &CodeTables::standard()).await?;
    let format = if compact {
        PayloadFormat::Compact
    } else {
        PayloadFormat::Full
    };
    let payload = render_payload(std::slice::from_ref(&result), format)?;
    println!("{}", serde_json::to_string_pretty(&payload[0])?);
    Ok(())
}

/// Renders cached results in an export format.
///
/// # Errors
///
/// Returns an error if serialization or compression fails.
pub fn render_export(
    results: &[ParsedResult],
    format: ExportFormat,
    constant: &str,
) -> CliResult<String> {
    Ok(match format {
        ExportFormat::Full => serde_json::to_string(&render_payload(results, PayloadFormat::Full)?)?,
        ExportFormat::Compact => {
            serde_json::to_string(&render_payload(results, PayloadFormat::Compact)?)?
        }
        ExportFormat::Embedded => script_constant(constant, &embed_dataset(results)?),
    })
}

/// `export`: writes every cached result to `out`.
///
/// # Errors
///
/// Returns an error if the cache cannot be read or the output written.
pub fn export(
    config: &ScrapeConfig,
    format: ExportFormat,
    out: &Path,
    constant: &str,
) -> CliResult<()> {
    let tables = CodeTables::standard();
    let results = ResultStore::new(&config.store_dir)
        .load_results(&tables)?
        .into_values()
        .collect::<Vec<_>>();

    let rendered = render_export(&results, format, constant)?;
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        sbte_results_scraper::store::ensure_dir(parent)?;
    }
    std::fs::write(out, &rendered)?;

    println!(
        "Exported {} result(s) to {} ({} bytes)",
        results.len(),
        out.display(),
        rendered.len()
    );
    Ok(())
}

/// `rolls`: prints the roll numbers each configured cohort would try.
pub fn rolls(config: &ScrapeConfig) {
    let targets = config.targets(&CodeTables::standard());
    for target in &targets {
        println!("# {}", target.label());
        for roll in target.roll_numbers() {
            println!("{roll}");
        }
    }
    log::debug!("Listed {} cohort(s)", targets.len());
}

/// `serve`: runs the HTTP server until interrupted.
///
/// The server uses actix-web's runtime, so it runs in a blocking task to
/// avoid nesting tokio runtimes.
///
/// # Errors
///
/// Returns an error if the server fails to start.
pub async fn serve(config: sbte_results_server::ServerConfig) -> CliResult<()> {
    tokio::task::spawn_blocking(move || {
        actix_web::rt::System::new().block_on(sbte_results_server::run_server(config))
    })
    .await??;
    Ok(())
}

/// Default export path for a format.
#[must_use]
pub fn default_export_path(config: &ScrapeConfig, format: ExportFormat) -> PathBuf {
    let file = match format {
        ExportFormat::Full => "students-data.json",
        ExportFormat::Compact => "students-data.compact.json",
        ExportFormat::Embedded => "students-data.js",
    };
    config.store_dir.join(file)
}

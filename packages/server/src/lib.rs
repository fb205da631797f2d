#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web server for scraped SBTE results.
//!
//! On startup the server runs the orchestrator over every configured
//! cohort (or, in offline mode, reads the cache only) and keeps the
//! resulting dataset in memory. `/students-data` serves it whole in the
//! full or compact payload format; the `/api` scope serves filtered
//! listings and aggregates for the viewer.

mod handlers;
pub mod interactive;
pub mod query;

use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use sbte_results_codec::payload::PayloadFormat;
use sbte_results_models::{BranchTarget, CodeTables, ParsedResult};
use sbte_results_scraper::{Orchestrator, PortalSource, ScrapeConfig, ScrapeError};
use tokio::sync::{Mutex, RwLock};

/// Server settings, normally read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub port: u16,
    /// Format of `/students-data` when the request gives none.
    pub payload_format: PayloadFormat,
    /// Scrape config file. `None` uses the embedded default.
    pub scrape_config: Option<PathBuf>,
    /// Serve only cached results; never contact the portal.
    pub offline: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 5500,
            payload_format: PayloadFormat::Full,
            scrape_config: None,
            offline: false,
        }
    }
}

impl ServerConfig {
    /// Reads `BIND_ADDR`, `PORT`, `SBTE_PAYLOAD_FORMAT`, `SBTE_CONFIG` and
    /// `SBTE_SKIP_SCRAPE`. Unset or unparseable values keep their defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("BIND_ADDR").unwrap_or(defaults.bind_addr),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            payload_format: lookup("SBTE_PAYLOAD_FORMAT")
                .and_then(|f| f.parse().ok())
                .unwrap_or(defaults.payload_format),
            scrape_config: lookup("SBTE_CONFIG").map(PathBuf::from),
            offline: lookup("SBTE_SKIP_SCRAPE").is_some_and(|v| is_truthy(&v)),
        }
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

/// Shared application state.
pub struct AppState {
    /// The dataset currently being served.
    pub results: RwLock<Vec<ParsedResult>>,
    /// Fetches and caches results.
    pub orchestrator: Orchestrator<PortalSource>,
    /// Cohorts walked on every load.
    pub targets: Vec<BranchTarget>,
    pub default_format: PayloadFormat,
    pub offline: bool,
    /// Held while a refresh runs.
    refreshing: Mutex<()>,
}

impl AppState {
    /// Creates state with an empty dataset. Call [`Self::load_dataset`]
    /// to fill it.
    #[must_use]
    pub fn new(
        orchestrator: Orchestrator<PortalSource>,
        targets: Vec<BranchTarget>,
        default_format: PayloadFormat,
        offline: bool,
    ) -> Self {
        Self {
            results: RwLock::new(Vec::new()),
            orchestrator,
            targets,
            default_format,
            offline,
            refreshing: Mutex::new(()),
        }
    }

    /// Builds state from a [`ServerConfig`] and loads the initial dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the scrape config cannot be loaded, the
    /// HTTP client cannot be built, or the cache cannot be read.
    #[allow(clippy::future_not_send)]
    pub async fn from_config(config: &ServerConfig) -> Result<Self, ScrapeError> {
        let scrape = ScrapeConfig::load(config.scrape_config.as_deref())?;
        let tables = CodeTables::standard();
        let targets = scrape.targets(&tables);
        let orchestrator = Orchestrator::from_config(&scrape, tables)?;

        let state = Self::new(orchestrator, targets, config.payload_format, config.offline);
        let initial = state.load_dataset().await?;
        log::info!("Loaded {} students", initial.len());
        *state.results.write().await = initial;

        Ok(state)
    }

    /// Produces a fresh dataset: every target's results, or the whole
    /// cache when offline.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the cache cannot be read or written.
    #[allow(clippy::future_not_send)]
    pub async fn load_dataset(&self) -> Result<Vec<ParsedResult>, ScrapeError> {
        if self.offline {
            log::info!("Offline mode: serving cached results only");
            return self.orchestrator.cached_results();
        }
        log::info!("Collecting results for {} target(s)...", self.targets.len());
        self.orchestrator.collect_all(&self.targets).await
    }
}

/// Registers every route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/students-data", web::get().to(handlers::students_data))
        .service(
            web::scope("/api")
                .route("/health", web::get().to(handlers::health))
                .route("/students", web::get().to(handlers::students))
                .route("/options", web::get().to(handlers::options))
                .route("/summary", web::get().to(handlers::summary))
                .route("/refresh", web::post().to(handlers::refresh)),
        );
}

/// Loads the dataset and starts the HTTP server.
///
/// This is a regular async function; the caller provides the runtime
/// (e.g. via `#[actix_web::main]`) and initializes logging.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the initial load fails, or the
/// HTTP server fails to bind or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> std::io::Result<()> {
    let state = web::Data::new(
        AppState::from_config(&config)
            .await
            .map_err(std::io::Error::other)?,
    );

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr.as_str(), config.port))?
    .run()
    .await
}

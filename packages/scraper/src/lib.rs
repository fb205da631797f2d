#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Fetches, parses and caches SBTE result sheets.
//!
//! The [`Orchestrator`] walks [`BranchTarget`]s, skips rolls that are
//! already cached or known to be invalid, fetches the rest in fixed-size
//! concurrent batches through a [`TranscriptSource`], parses each
//! transcript, and persists the merged cache through a [`ResultStore`].

pub mod config;
pub mod progress;
pub mod retry;
pub mod source;
pub mod store;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use futures::StreamExt as _;
use sbte_results_codec::CodecError;
use sbte_results_models::{BranchTarget, CodeTables, ParsedResult};
use sbte_results_parser::{ExtractError, parse_transcript};

pub use config::ScrapeConfig;
pub use progress::{NullProgress, ProgressCallback, null_progress};
pub use source::{PortalSource, TranscriptSource};
pub use store::ResultStore;

/// Errors that can occur while scraping.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// An HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The portal kept answering with a retryable status.
    #[error("HTTP status {0}")]
    Status(u16),

    /// Every retry failed without a recorded cause.
    #[error("request failed after all retries")]
    RetriesExhausted,

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file is not valid TOML for [`ScrapeConfig`].
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// Encoding or decoding the cache failed.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The downloaded PDF had no extractable text.
    #[error(transparent)]
    Extract(#[from] ExtractError),

    /// A blocking extraction task panicked or was cancelled.
    #[error("Extraction task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Cached state for one run, loaded once and written after each target.
#[derive(Debug, Default)]
struct CacheState {
    results: BTreeMap<String, ParsedResult>,
    invalid: BTreeSet<String>,
}

/// Drives fetching, parsing and caching for a set of cohorts.
pub struct Orchestrator<S> {
    source: S,
    tables: CodeTables,
    store: ResultStore,
    batch_size: usize,
    progress: Arc<dyn ProgressCallback>,
    target_progress: Arc<dyn ProgressCallback>,
}

impl Orchestrator<PortalSource> {
    /// Builds an orchestrator that fetches from the portal described by
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the HTTP client cannot be built.
    pub fn from_config(config: &ScrapeConfig, tables: CodeTables) -> Result<Self, ScrapeError> {
        Ok(Self::new(
            PortalSource::new(config)?,
            tables,
            ResultStore::new(&config.store_dir),
            config.batch_size,
        ))
    }
}

impl<S: TranscriptSource> Orchestrator<S> {
    /// Creates an orchestrator. A `batch_size` of zero is treated as one.
    #[must_use]
    pub fn new(source: S, tables: CodeTables, store: ResultStore, batch_size: usize) -> Self {
        Self {
            source,
            tables,
            store,
            batch_size: batch_size.max(1),
            progress: null_progress(),
            target_progress: null_progress(),
        }
    }

    /// Reports per-roll progress to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.progress = progress;
        self
    }

    /// Reports per-cohort progress of [`Self::collect_all`] to `progress`.
    #[must_use]
    pub fn with_target_progress(mut self, progress: Arc<dyn ProgressCallback>) -> Self {
        self.target_progress = progress;
        self
    }

    #[must_use]
    pub const fn tables(&self) -> &CodeTables {
        &self.tables
    }

    #[must_use]
    pub const fn store(&self) -> &ResultStore {
        &self.store
    }

    /// Every cached result in roll order, without fetching.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Io`] if the cache cannot be read.
    pub fn cached_results(&self) -> Result<Vec<ParsedResult>, ScrapeError> {
        Ok(self.store.load_results(&self.tables)?.into_values().collect())
    }

    /// Collects the results for one cohort, fetching what is not cached.
    ///
    /// Returns the cohort's results in roll order.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the cache cannot be read or written.
    /// Fetch and parse failures only mark the roll invalid.
    pub async fn collect_target(
        &self,
        target: &BranchTarget,
    ) -> Result<Vec<ParsedResult>, ScrapeError> {
        let mut cache = self.load_cache()?;
        self.collect_into(&mut cache, target).await
    }

    /// Collects every target in order, loading the cache once.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the cache cannot be read or written.
    pub async fn collect_all(
        &self,
        targets: &[BranchTarget],
    ) -> Result<Vec<ParsedResult>, ScrapeError> {
        let mut cache = self.load_cache()?;
        let mut all = Vec::new();
        self.target_progress.set_total(targets.len() as u64);

        for (i, target) in targets.iter().enumerate() {
            log::debug!("Target {}/{}: {}", i + 1, targets.len(), target.label());
            self.target_progress.set_message(target.label());
            all.extend(self.collect_into(&mut cache, target).await?);
            self.target_progress.inc(1);
        }

        self.target_progress.finish(format!("{} result(s)", all.len()));

        log::info!(
            "Collected {} result(s) across {} target(s)",
            all.len(),
            targets.len()
        );
        Ok(all)
    }

    fn load_cache(&self) -> Result<CacheState, ScrapeError> {
        Ok(CacheState {
            results: self.store.load_results(&self.tables)?,
            invalid: self.store.load_invalid_rolls()?,
        })
    }

    async fn collect_into(
        &self,
        cache: &mut CacheState,
        target: &BranchTarget,
    ) -> Result<Vec<ParsedResult>, ScrapeError> {
        let rolls = target.roll_numbers();
        let pending = rolls
            .iter()
            .filter(|roll| !cache.invalid.contains(*roll) && !cache.results.contains_key(*roll))
            .map(String::as_str)
            .collect::<Vec<_>>();

        if !pending.is_empty() {
            let label = target.label();
            log::info!("Fetching results for {} students in {label}...", pending.len());
            self.progress.set_total(pending.len() as u64);
            self.progress.set_message(label.clone());

            let mut fetched = BTreeMap::new();
            let mut invalid = Vec::new();

            for batch in pending.chunks(self.batch_size) {
                let outcomes = futures::stream::iter(batch.iter().copied())
                    .map(|roll| async move { (roll, self.resolve_roll(roll).await) })
                    .buffer_unordered(self.batch_size)
                    .collect::<Vec<_>>()
                    .await;

                for (roll, outcome) in outcomes {
                    match outcome {
                        Some(result) => {
                            fetched.insert(roll.to_string(), result);
                        }
                        None => invalid.push(roll),
                    }
                }
                self.progress.inc(batch.len() as u64);
            }

            log::info!("Fetched {} results for {label}", fetched.len());
            self.progress
                .finish(format!("{label}: {} fetched, {} invalid", fetched.len(), invalid.len()));

            let recorded = self.store.append_invalid_rolls(invalid.iter().copied())?;
            if recorded > 0 {
                log::debug!("Recorded {recorded} new invalid roll(s)");
            }
            cache.invalid.extend(invalid.iter().map(|roll| (*roll).to_string()));

            if !fetched.is_empty() {
                cache.results.extend(fetched);
                self.store.save_results(&cache.results)?;
            }
        }

        Ok(rolls
            .iter()
            .filter_map(|roll| cache.results.get(roll).cloned())
            .collect())
    }

    /// Fetches and parses one roll. `None` means the roll is invalid.
    async fn resolve_roll(&self, roll: &str) -> Option<ParsedResult> {
        let text = match self.source.fetch_transcript(roll).await {
            Ok(Some(text)) => text,
            Ok(None) => {
                log::debug!("No result for roll number: {roll}");
                return None;
            }
            Err(e) => {
                log::warn!("Failed to fetch {roll} from {}: {e}", self.source.name());
                return None;
            }
        };

        match parse_transcript(&text, &self.tables) {
            Ok(result) if result.student.roll == roll => Some(result),
            Ok(result) => {
                log::warn!(
                    "Requested roll {roll} but sheet is for {}; treating as invalid",
                    result.student.roll
                );
                None
            }
            Err(rejection) => {
                log::debug!("Rejected transcript for {roll}: {rejection}");
                None
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use sbte_results_models::{BranchName, CollegeName};

    use super::*;

    pub fn transcript(roll: &str, name: &str) -> String {
        format!(
            "Roll No : {roll}\n\
             Following are the marks obtained by {name}\n\
             at Semester I of Diploma in Computer Science and Engineering\n\
             ------------------------------------------\n\
             THEORY PAPERS\n\
             INDIAN CONSTITUTION 1.0 25 - 025 - 10 24 - 24 A+\n\
             BASIC ENGG. MATHEMATICS 3.0 30 70 100 28 40 28 64 92 A+\n\
             ------------------------------------------\n\
             GRAND TOTAL 4 125 116\n\
             SGPA 9.30\n\
             REMARKS : First Class with Distinction\n"
        )
    }

    pub fn sample_result(roll: &str) -> ParsedResult {
        parse_transcript(&transcript(roll, "ABHINAV KUMAR"), &CodeTables::standard()).unwrap()
    }

    #[derive(Default)]
    struct FakeSource {
        transcripts: BTreeMap<String, String>,
        failing: BTreeSet<String>,
        requested: Mutex<Vec<String>>,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl FakeSource {
        fn with_rolls(rolls: &[&str]) -> Self {
            Self {
                transcripts: rolls
                    .iter()
                    .map(|roll| ((*roll).to_string(), transcript(roll, "ABHINAV KUMAR")))
                    .collect(),
                ..Self::default()
            }
        }

        fn requested(&self) -> Vec<String> {
            let mut requested = self.requested.lock().unwrap().clone();
            requested.sort();
            requested
        }
    }

    impl TranscriptSource for FakeSource {
        fn fetch_transcript(
            &self,
            roll: &str,
        ) -> impl std::future::Future<Output = Result<Option<String>, ScrapeError>> + Send
        {
            async move {
                self.requested.lock().unwrap().push(roll.to_string());
                let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                self.max_in_flight.fetch_max(now, Ordering::SeqCst);
                tokio::task::yield_now().await;
                self.in_flight.fetch_sub(1, Ordering::SeqCst);

                if self.failing.contains(roll) {
                    return Err(ScrapeError::Status(503));
                }
                Ok(self.transcripts.get(roll).cloned())
            }
        }

        fn name(&self) -> &'static str {
            "fake"
        }
    }

    fn target(class_rolls: Vec<u32>) -> BranchTarget {
        BranchTarget {
            branch: BranchName::Cse,
            college: CollegeName::NgpPatna13,
            semester: 1,
            college_code: 121,
            branch_code: 18,
            admission_year: 2025,
            class_rolls,
        }
    }

    fn orchestrator(
        source: FakeSource,
        dir: &std::path::Path,
        batch_size: usize,
    ) -> Orchestrator<FakeSource> {
        Orchestrator::new(
            source,
            CodeTables::standard(),
            ResultStore::new(dir),
            batch_size,
        )
    }

    #[tokio::test]
    async fn collects_results_and_records_invalid_rolls() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_rolls(&["111211825303", "111211825301"]);
        let orch = orchestrator(source, dir.path(), 50);

        let results = orch.collect_target(&target(vec![301, 302, 303])).await.unwrap();

        let rolls = results.iter().map(|r| r.student.roll.as_str()).collect::<Vec<_>>();
        assert_eq!(rolls, vec!["111211825301", "111211825303"]);
        assert_eq!(results[0].student.name, "Abhinav Kumar");
        assert_eq!(results[0].student.college, CollegeName::NgpPatna13);

        let invalid = orch.store().load_invalid_rolls().unwrap();
        assert_eq!(invalid.into_iter().collect::<Vec<_>>(), vec!["111211825302"]);
        assert_eq!(orch.cached_results().unwrap(), results);
    }

    #[tokio::test]
    async fn cached_and_invalid_rolls_are_not_refetched() {
        let dir = tempfile::tempdir().unwrap();
        let first = orchestrator(FakeSource::with_rolls(&["111211825301"]), dir.path(), 50);
        let expected = first.collect_target(&target(vec![301, 302])).await.unwrap();

        let second = orchestrator(FakeSource::default(), dir.path(), 50);
        let results = second.collect_target(&target(vec![301, 302, 303])).await.unwrap();

        assert_eq!(results, expected);
        assert_eq!(second.source.requested(), vec!["111211825303"]);
    }

    #[tokio::test]
    async fn failed_fetch_marks_roll_invalid_without_aborting() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::with_rolls(&["111211825301", "111211825302"]);
        source.failing.insert("111211825302".to_string());
        let orch = orchestrator(source, dir.path(), 50);

        let results = orch.collect_target(&target(vec![301, 302])).await.unwrap();

        assert_eq!(results.len(), 1);
        assert!(orch.store().load_invalid_rolls().unwrap().contains("111211825302"));
    }

    #[tokio::test]
    async fn rejected_and_mismatched_sheets_are_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let mut source = FakeSource::default();
        source
            .transcripts
            .insert("111211825301".to_string(), "Roll No : 111211825301\n".to_string());
        source.transcripts.insert(
            "111211825302".to_string(),
            transcript("111211825399", "SOMEONE ELSE"),
        );
        let orch = orchestrator(source, dir.path(), 50);

        let results = orch.collect_target(&target(vec![301, 302])).await.unwrap();

        assert!(results.is_empty());
        assert_eq!(orch.store().load_invalid_rolls().unwrap().len(), 2);
        assert!(!orch.store().saved_results_path().exists());
    }

    #[tokio::test]
    async fn batches_bound_concurrency() {
        let dir = tempfile::tempdir().unwrap();
        let rolls = (301..=307)
            .map(|class_roll| format!("1112118253{:02}", class_roll - 300))
            .collect::<Vec<_>>();
        let source = FakeSource::with_rolls(&rolls.iter().map(String::as_str).collect::<Vec<_>>());
        let orch = orchestrator(source, dir.path(), 3);

        let results = orch.collect_target(&target((301..=307).collect())).await.unwrap();

        assert_eq!(results.len(), 7);
        assert_eq!(orch.source.requested().len(), 7);
        assert!(orch.source.max_in_flight.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn collect_all_merges_targets_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let source = FakeSource::with_rolls(&["111211825301", "311211824301"]);
        let orch = orchestrator(source, dir.path(), 50);

        let mut third = target(vec![301]);
        third.semester = 3;
        third.admission_year = 2024;

        let results = orch.collect_all(&[target(vec![301]), third]).await.unwrap();
        let rolls = results.iter().map(|r| r.student.roll.as_str()).collect::<Vec<_>>();
        assert_eq!(rolls, vec!["111211825301", "311211824301"]);

        let cached = orch.cached_results().unwrap();
        assert_eq!(cached.len(), 2);
    }

    #[derive(Default)]
    struct RecordingProgress {
        total: AtomicUsize,
        done: AtomicUsize,
        finished: Mutex<Option<String>>,
    }

    impl ProgressCallback for RecordingProgress {
        fn set_total(&self, total: u64) {
            self.total.store(usize::try_from(total).unwrap(), Ordering::SeqCst);
        }

        fn inc(&self, delta: u64) {
            self.done
                .fetch_add(usize::try_from(delta).unwrap(), Ordering::SeqCst);
        }

        fn set_message(&self, _msg: String) {}

        fn finish(&self, msg: String) {
            *self.finished.lock().unwrap() = Some(msg);
        }
    }

    #[tokio::test]
    async fn reports_cohort_progress() {
        let dir = tempfile::tempdir().unwrap();
        let progress = Arc::new(RecordingProgress::default());
        let orch = orchestrator(FakeSource::with_rolls(&["111211825301"]), dir.path(), 50)
            .with_target_progress(progress.clone());

        orch.collect_all(&[target(vec![301]), target(vec![302])])
            .await
            .unwrap();

        assert_eq!(progress.total.load(Ordering::SeqCst), 2);
        assert_eq!(progress.done.load(Ordering::SeqCst), 2);
        assert_eq!(
            progress.finished.lock().unwrap().as_deref(),
            Some("1 result(s)")
        );
    }

    #[test]
    fn zero_batch_size_is_clamped() {
        let dir = tempfile::tempdir().unwrap();
        let orch = orchestrator(FakeSource::default(), dir.path(), 0);
        assert_eq!(orch.batch_size, 1);
    }
}

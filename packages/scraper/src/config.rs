//! Scrape configuration loaded from TOML.
//!
//! A default configuration is compiled into the binary from
//! `config/default.toml`. Callers may load a different file with
//! [`ScrapeConfig::from_path`].

use std::path::{Path, PathBuf};

use sbte_results_models::{BranchTarget, CodeTables};
use serde::{Deserialize, Serialize};

use crate::ScrapeError;

/// The compiled-in default configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../config/default.toml");

/// One semester cohort to scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemesterCohort {
    /// Semester number (1-6).
    pub semester: u8,
    /// Full admission year of the cohort sitting that semester.
    pub admission_year: u32,
}

/// Everything the orchestrator needs to know about the portal and the
/// cohorts to walk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeConfig {
    pub api_url: String,
    pub referer: String,
    pub origin: String,
    pub user_agent: String,
    /// Directory holding `saved-results.json` and `invalid-rolls.txt`.
    pub store_dir: PathBuf,
    /// Number of concurrent fetches per batch.
    pub batch_size: usize,
    pub request_timeout_secs: u64,
    /// Inclusive `[start, end]` class-roll ranges.
    pub class_rolls: Vec<[u32; 2]>,
    pub semesters: Vec<SemesterCohort>,
    /// College codes to scrape. `None` means every registered college.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colleges: Option<Vec<u32>>,
    /// Branch codes to scrape. `None` means every registered branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branches: Option<Vec<u32>>,
}

impl ScrapeConfig {
    /// Parses the compiled-in default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] if the embedded TOML is invalid.
    pub fn embedded() -> Result<Self, ScrapeError> {
        Self::from_toml_str(DEFAULT_CONFIG_TOML)
    }

    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] if the text is not a valid
    /// configuration.
    pub fn from_toml_str(text: &str) -> Result<Self, ScrapeError> {
        let config: Self = toml::from_str(text)?;
        if config.batch_size == 0 {
            return Err(ScrapeError::InvalidConfig(
                "batch_size must be at least 1".to_string(),
            ));
        }
        Ok(config)
    }

    /// Reads and parses a configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Io`] if the file cannot be read and
    /// [`ScrapeError::Config`] if it cannot be parsed.
    pub fn from_path(path: &Path) -> Result<Self, ScrapeError> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("Loaded scrape config from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Loads `path` if given, otherwise the embedded default.
    ///
    /// # Errors
    ///
    /// See [`Self::from_path`] and [`Self::embedded`].
    pub fn load(path: Option<&Path>) -> Result<Self, ScrapeError> {
        path.map_or_else(Self::embedded, Self::from_path)
    }

    /// Expands the inclusive ranges into a flat, ordered class-roll list.
    #[must_use]
    pub fn class_roll_list(&self) -> Vec<u32> {
        self.class_rolls
            .iter()
            .flat_map(|&[start, end]| start..=end)
            .collect()
    }

    /// Expands the configuration into one target per college, semester and
    /// branch, in that nesting order.
    ///
    /// Codes listed in the `colleges` / `branches` filters that are not
    /// registered in `tables` are skipped.
    #[must_use]
    pub fn targets(&self, tables: &CodeTables) -> Vec<BranchTarget> {
        let class_rolls = self.class_roll_list();
        let colleges = tables
            .colleges()
            .filter(|(_, code)| self.colleges.as_ref().is_none_or(|c| c.contains(code)))
            .collect::<Vec<_>>();
        let branches = tables
            .branches()
            .filter(|(_, code)| self.branches.as_ref().is_none_or(|b| b.contains(code)))
            .collect::<Vec<_>>();

        let mut targets = Vec::with_capacity(colleges.len() * self.semesters.len() * branches.len());
        for &(college, college_code) in &colleges {
            for cohort in &self.semesters {
                for &(branch, branch_code) in &branches {
                    targets.push(BranchTarget {
                        branch,
                        college,
                        semester: cohort.semester,
                        college_code,
                        branch_code,
                        admission_year: cohort.admission_year,
                        class_rolls: class_rolls.clone(),
                    });
                }
            }
        }
        targets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbte_results_models::{BranchName, CollegeName};

    #[test]
    fn embedded_config_parses() {
        let config = ScrapeConfig::embedded().unwrap();
        assert_eq!(config.batch_size, 50);
        assert_eq!(config.store_dir, PathBuf::from("generated"));
        assert_eq!(config.semesters.len(), 3);
        assert_eq!(
            config.semesters[0],
            SemesterCohort {
                semester: 1,
                admission_year: 2025
            }
        );
        assert!(config.colleges.is_none());
        assert!(config.api_url.ends_with("/downloadResult"));
    }

    #[test]
    fn class_roll_ranges_are_inclusive() {
        let config = ScrapeConfig::embedded().unwrap();
        let rolls = config.class_roll_list();
        assert_eq!(rolls.len(), 120 + 10 + 10);
        assert_eq!(rolls[0], 1);
        assert_eq!(rolls[119], 120);
        assert_eq!(rolls[120], 301);
        assert_eq!(rolls.last(), Some(&360));
    }

    #[test]
    fn targets_cover_every_registered_combination() {
        let config = ScrapeConfig::embedded().unwrap();
        let tables = CodeTables::standard();
        let targets = config.targets(&tables);
        assert_eq!(
            targets.len(),
            tables.colleges().count() * 3 * tables.branches().count()
        );
    }

    #[test]
    fn filters_restrict_targets() {
        let mut config = ScrapeConfig::embedded().unwrap();
        config.colleges = Some(vec![121]);
        config.branches = Some(vec![18, 99]);
        config.class_rolls = vec![[301, 302]];

        let targets = config.targets(&CodeTables::standard());
        assert_eq!(targets.len(), 3);
        assert!(targets.iter().all(|t| t.college == CollegeName::NgpPatna13));
        assert!(targets.iter().all(|t| t.branch == BranchName::Cse));
        assert_eq!(
            targets[0].roll_numbers(),
            vec!["111211825301".to_string(), "111211825302".to_string()]
        );
        assert_eq!(targets[2].semester, 5);
        assert_eq!(targets[2].roll_numbers()[0], "511211823301");
    }

    #[test]
    fn zero_batch_size_is_rejected() {
        let text = DEFAULT_CONFIG_TOML.replace("batch_size = 50", "batch_size = 0");
        assert!(matches!(
            ScrapeConfig::from_toml_str(&text),
            Err(ScrapeError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        assert!(matches!(
            ScrapeConfig::from_toml_str("batch_size = \"many\""),
            Err(ScrapeError::Config(_))
        ));
    }
}

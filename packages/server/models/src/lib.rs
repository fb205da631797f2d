#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the SBTE results server.
//!
//! Student records themselves are served as
//! [`ParsedResult`](sbte_results_models::ParsedResult) (full format) or
//! compact tuples; the types here wrap them with query parameters,
//! pagination, and aggregate views.

use sbte_results_codec::payload::PayloadFormat;
use sbte_results_models::{BranchName, CollegeName, GradeClass, ParsedResult};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
    /// Number of students currently loaded.
    pub students: usize,
}

/// Query parameters for `GET /students-data`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PayloadQueryParams {
    /// Payload shape. Falls back to the server default when absent.
    pub format: Option<PayloadFormat>,
}

/// Which field the `q` search string is matched against.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SearchField {
    /// Case-insensitive substring of the student's name.
    #[default]
    Name,
    /// Prefix of the roll number.
    Roll,
}

/// Sort key for the students listing.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortField {
    /// Grand total obtained marks.
    #[default]
    Marks,
    Sgpa,
    Name,
    Roll,
}

impl SortField {
    /// Order used when the request does not give one: highest first for
    /// scores, alphabetical for text.
    #[must_use]
    pub const fn default_order(self) -> SortOrder {
        match self {
            Self::Marks | Self::Sgpa => SortOrder::Desc,
            Self::Name | Self::Roll => SortOrder::Asc,
        }
    }
}

/// Sort direction.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Query parameters for `GET /api/students`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentQueryParams {
    pub branch: Option<BranchName>,
    /// Semester digit (first character of the roll number).
    pub semester: Option<u8>,
    pub college: Option<CollegeName>,
    /// Search string, matched according to `search_by`.
    pub q: Option<String>,
    pub search_by: Option<SearchField>,
    pub sort_by: Option<SortField>,
    pub order: Option<SortOrder>,
    /// Maximum number of students to return.
    pub limit: Option<usize>,
    /// Number of matching students to skip.
    pub offset: Option<usize>,
}

/// One page of the students listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiStudentPage {
    /// Number of students matching the filters, before pagination.
    pub total: usize,
    pub students: Vec<ParsedResult>,
}

/// Distinct filter values present in the loaded dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiOptions {
    pub semesters: Vec<u8>,
    pub branches: Vec<BranchName>,
    pub colleges: Vec<CollegeName>,
}

/// Number of entries in one grade band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiGradeCount {
    pub class: GradeClass,
    pub count: usize,
}

/// Aggregate view of the loaded dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSummary {
    pub students: usize,
    /// Mean SGPA, or `0.0` for an empty dataset.
    pub average_sgpa: f64,
    /// Students per SGPA band, one entry per [`GradeClass`], best first.
    pub grade_classes: Vec<ApiGradeCount>,
    /// Students per band of grand-total percentage.
    pub percentage_classes: Vec<ApiGradeCount>,
    /// Subject papers per band of printed letter grade, across every
    /// student.
    pub subject_grades: Vec<ApiGradeCount>,
}

/// Response of `POST /api/refresh`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApiRefresh {
    /// Students loaded after the refresh.
    pub students: usize,
    /// Change in the number of students.
    pub added: i64,
}

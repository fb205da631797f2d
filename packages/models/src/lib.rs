#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Result record types for polytechnic semester examinations.
//!
//! This crate defines the canonical shape of a parsed result sheet
//! ([`ParsedResult`]) shared by the parser, the compact codec, the scraper
//! cache, and the HTTP API. Branch and college identities are closed
//! enumerations with an explicit `Unknown` variant; the numeric codes that
//! appear inside roll numbers live in an injectable [`CodeTables`] value
//! rather than in global maps.

pub mod codes;
pub mod college;
pub mod grade;
pub mod roll;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

pub use codes::CodeTables;
pub use college::CollegeName;
pub use grade::GradeClass;
pub use roll::{BranchTarget, InvalidRollError, RollParts, format_roll_number};

/// Category of a paper as printed in the result sheet section headers.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PaperType {
    /// Written theory examination
    Theory,
    /// Laboratory practical examination
    Practical,
    /// Continuous term-work assessment
    TermWork,
}

impl PaperType {
    /// Returns all variants in result-sheet section order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Theory, Self::Practical, Self::TermWork]
    }
}

/// Diploma branch (discipline) of a student.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum BranchName {
    /// Civil Engineering
    Civil,
    /// Computer Science and Engineering
    #[serde(rename = "CSE")]
    #[strum(serialize = "CSE")]
    Cse,
    /// Electrical Engineering
    Electrical,
    /// Electronics Engineering
    Electronics,
    /// Mechanical Engineering
    Mechanical,
    /// Automobile Engineering
    Automobile,
    /// Electronics and Communication Engineering
    #[serde(rename = "ECE")]
    #[strum(serialize = "ECE")]
    Ece,
    /// Branch could not be determined
    Unknown,
}

impl BranchName {
    /// Returns every known branch (excluding [`BranchName::Unknown`]).
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Civil,
            Self::Cse,
            Self::Electrical,
            Self::Electronics,
            Self::Mechanical,
            Self::Automobile,
            Self::Ece,
        ]
    }
}

/// Marks with an independent passing threshold (external and total).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marks {
    /// Maximum marks for the component.
    pub max: u32,
    /// Minimum marks needed to pass the component.
    pub passing: u32,
    /// Marks the student obtained. May exceed `max` in malformed sheets.
    pub obtained: u32,
}

/// Internal assessment marks, which carry no passing threshold of their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalMarks {
    /// Maximum internal marks.
    pub max: u32,
    /// Internal marks obtained.
    pub obtained: u32,
}

/// Aggregate marks for the whole result sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrandTotal {
    /// Maximum aggregate marks, as printed.
    pub maximum: u32,
    /// Sum of every subject's total passing marks. Never read from the sheet.
    pub passing: u32,
    /// Aggregate marks obtained, as printed.
    pub obtained: u32,
}

impl GrandTotal {
    /// Sums the total passing marks across `subjects`, saturating at
    /// `u32::MAX`.
    #[must_use]
    pub fn passing_from(subjects: &[SubjectResult]) -> u32 {
        subjects
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.total.passing))
    }

    /// Obtained marks as a percentage of the maximum, or `0.0` when the
    /// maximum is zero.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.maximum == 0 {
            return 0.0;
        }
        f64::from(self.obtained) / f64::from(self.maximum) * 100.0
    }
}

/// Marks for a single paper.
///
/// Papers without an external component have `external.max == 0`; the
/// internal marks are then the de facto total and `external`/`total` hold
/// placeholder values copied from the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectResult {
    /// Title-cased subject name.
    pub name: String,
    /// Section the paper was listed under.
    #[serde(rename = "type")]
    pub paper_type: PaperType,
    /// Credit weight of the paper.
    pub credits: f64,
    /// Internal assessment marks.
    pub internal: InternalMarks,
    /// External (final examination) marks.
    pub external: Marks,
    /// Combined marks.
    pub total: Marks,
    /// Letter grade as printed (e.g. `"A+"`).
    pub grade: String,
}

/// Who the result belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentIdentity {
    /// Title-cased student name.
    pub name: String,
    /// 12-digit roll number.
    pub roll: String,
    /// Branch, derived from the roll number on every decode path.
    pub branch: BranchName,
    /// College, derived from the roll number on every decode path.
    pub college: CollegeName,
}

/// A fully parsed result sheet for one student.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResult {
    /// Student identity.
    pub student: StudentIdentity,
    /// Aggregate marks.
    pub grand_total: GrandTotal,
    /// Papers in sheet order (theory, practical, term work).
    pub subjects: Vec<SubjectResult>,
    /// Semester grade point average.
    pub sgpa: f64,
    /// Remarks line (e.g. `"First Class with Distinction"`).
    pub remarks: String,
}

impl ParsedResult {
    /// Semester digit, taken from the first character of the roll number.
    #[must_use]
    pub fn semester(&self) -> Option<char> {
        self.student.roll.chars().next()
    }

    /// Subjects of the given paper type, in sheet order.
    pub fn subjects_of(&self, paper_type: PaperType) -> impl Iterator<Item = &SubjectResult> {
        self.subjects
            .iter()
            .filter(move |s| s.paper_type == paper_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subject(passing: u32) -> SubjectResult {
        SubjectResult {
            name: "Ict Tools".to_string(),
            paper_type: PaperType::Practical,
            credits: 2.0,
            internal: InternalMarks {
                max: 20,
                obtained: 18,
            },
            external: Marks {
                max: 30,
                passing: 0,
                obtained: 27,
            },
            total: Marks {
                max: 50,
                passing,
                obtained: 45,
            },
            grade: "A+".to_string(),
        }
    }

    #[test]
    fn passing_from_sums_subject_totals() {
        let subjects = vec![subject(20), subject(40), subject(10)];
        assert_eq!(GrandTotal::passing_from(&subjects), 70);
        assert_eq!(GrandTotal::passing_from(&[]), 0);
    }

    #[test]
    fn passing_from_saturates_instead_of_overflowing() {
        let subjects = vec![subject(4_000_000_000), subject(4_000_000_000)];
        assert_eq!(GrandTotal::passing_from(&subjects), u32::MAX);
    }

    #[test]
    fn percentage_handles_zero_maximum() {
        let empty = GrandTotal::default();
        assert!(empty.percentage().abs() < f64::EPSILON);

        let total = GrandTotal {
            maximum: 1000,
            passing: 400,
            obtained: 875,
        };
        assert!((total.percentage() - 87.5).abs() < 1e-9);
    }

    #[test]
    fn branch_labels_match_wire_strings() {
        assert_eq!(BranchName::Cse.to_string(), "CSE");
        assert_eq!(BranchName::Civil.to_string(), "Civil");
        assert_eq!("ECE".parse::<BranchName>().unwrap(), BranchName::Ece);
        assert_eq!(
            serde_json::to_string(&BranchName::Cse).unwrap(),
            "\"CSE\""
        );
    }

    #[test]
    fn paper_type_serializes_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&PaperType::TermWork).unwrap(),
            "\"TERM_WORK\""
        );
        assert_eq!(PaperType::Theory.to_string(), "THEORY");
    }

    #[test]
    fn subject_json_uses_type_key() {
        let json = serde_json::to_value(subject(20)).unwrap();
        assert_eq!(json["type"], "PRACTICAL");
        assert_eq!(json["internal"]["max"], 20);
        assert!(json.get("paper_type").is_none());
    }

    #[test]
    fn parsed_result_json_is_camel_case() {
        let result = ParsedResult {
            student: StudentIdentity {
                name: "Abhinav Kumar".to_string(),
                roll: "111211825301".to_string(),
                branch: BranchName::Cse,
                college: CollegeName::NgpPatna13,
            },
            grand_total: GrandTotal {
                maximum: 1000,
                passing: 400,
                obtained: 875,
            },
            subjects: vec![subject(20)],
            sgpa: 9.3,
            remarks: "First Class with Distinction".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["grandTotal"]["obtained"], 875);
        assert_eq!(json["student"]["college"], "NGP Patna-13");
        assert_eq!(result.semester(), Some('1'));
        assert_eq!(result.subjects_of(PaperType::Practical).count(), 1);
        assert_eq!(result.subjects_of(PaperType::Theory).count(), 0);
    }
}

//! Roll-number layout.
//!
//! A roll number is 12 digits with no delimiters:
//!
//! ```text
//! <semester:1><"1"><college:3><branch:2><admission year % 100:2><class roll:3>
//! ```
//!
//! Field widths here must stay in step with the slicing done by
//! [`CodeTables`](crate::CodeTables); nothing else marks field boundaries.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::{BranchName, CollegeName};

/// Total length of a roll number.
pub const ROLL_NUMBER_LEN: usize = 12;
/// Position of the semester digit.
pub const SEMESTER_RANGE: Range<usize> = 0..1;
/// Position of the constant `"1"` marker.
pub const MARKER_RANGE: Range<usize> = 1..2;
/// Position of the three-digit college code.
pub const COLLEGE_CODE_RANGE: Range<usize> = 2..5;
/// Position of the two-digit branch code.
pub const BRANCH_CODE_RANGE: Range<usize> = 5..7;
/// Position of the two-digit admission year suffix.
pub const ADMISSION_YEAR_RANGE: Range<usize> = 7..9;
/// Position of the three-digit class roll.
pub const CLASS_ROLL_RANGE: Range<usize> = 9..12;

/// Builds a roll number from its fields, zero-padding each to its width.
///
/// Only the last two digits of `admission_year` are kept.
///
/// ```
/// use sbte_results_models::format_roll_number;
///
/// assert_eq!(format_roll_number(1, 121, 18, 2025, 301), "111211825301");
/// ```
#[must_use]
pub fn format_roll_number(
    semester: u8,
    college_code: u32,
    branch_code: u32,
    admission_year: u32,
    class_roll: u32,
) -> String {
    format!(
        "{semester}1{college_code:03}{branch_code:02}{:02}{class_roll:03}",
        admission_year % 100
    )
}

/// Error returned when a string is not a well-formed roll number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidRollError {
    /// The rejected input.
    pub roll: String,
}

impl std::fmt::Display for InvalidRollError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid roll number {:?}: expected {ROLL_NUMBER_LEN} digits",
            self.roll
        )
    }
}

impl std::error::Error for InvalidRollError {}

/// The numeric fields of a roll number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RollParts {
    /// Semester (1-6).
    pub semester: u8,
    /// Three-digit college code.
    pub college_code: u32,
    /// Two-digit branch code.
    pub branch_code: u32,
    /// Last two digits of the admission year.
    pub admission_year_suffix: u32,
    /// Class roll within the branch.
    pub class_roll: u32,
}

impl RollParts {
    /// Splits a roll number into its fields.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidRollError`] if `roll` is not exactly
    /// [`ROLL_NUMBER_LEN`] ASCII digits.
    pub fn parse(roll: &str) -> Result<Self, InvalidRollError> {
        let invalid = || InvalidRollError {
            roll: roll.to_string(),
        };

        if roll.len() != ROLL_NUMBER_LEN || !roll.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }

        let field = |range: Range<usize>| roll[range].parse::<u32>().map_err(|_| invalid());

        Ok(Self {
            semester: u8::try_from(field(SEMESTER_RANGE)?).map_err(|_| invalid())?,
            college_code: field(COLLEGE_CODE_RANGE)?,
            branch_code: field(BRANCH_CODE_RANGE)?,
            admission_year_suffix: field(ADMISSION_YEAR_RANGE)?,
            class_roll: field(CLASS_ROLL_RANGE)?,
        })
    }

    /// Reassembles the roll number.
    #[must_use]
    pub fn format(&self) -> String {
        format_roll_number(
            self.semester,
            self.college_code,
            self.branch_code,
            self.admission_year_suffix,
            self.class_roll,
        )
    }
}

/// One (college, semester, branch) cohort whose results should be fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTarget {
    /// Branch of the cohort.
    pub branch: BranchName,
    /// College of the cohort.
    pub college: CollegeName,
    /// Semester the results are for.
    pub semester: u8,
    /// Board code of the college.
    pub college_code: u32,
    /// Board code of the branch.
    pub branch_code: u32,
    /// Full admission year (e.g. `2025`).
    pub admission_year: u32,
    /// Class rolls to try, in order.
    pub class_rolls: Vec<u32>,
}

impl BranchTarget {
    /// Formats every class roll of the cohort into a full roll number.
    #[must_use]
    pub fn roll_numbers(&self) -> Vec<String> {
        self.class_rolls
            .iter()
            .map(|&class_roll| {
                format_roll_number(
                    self.semester,
                    self.college_code,
                    self.branch_code,
                    self.admission_year,
                    class_roll,
                )
            })
            .collect()
    }

    /// Short human-readable label for log lines.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} {} sem {}", self.college, self.branch, self.semester)
    }
}

//! Performance bands used to bucket SGPA, percentages, and letter grades.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Coarse performance band.
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
pub enum GradeClass {
    /// SGPA ≥ 8.5, ≥ 85 %, or an A-family grade
    Excellent,
    /// SGPA ≥ 7.0, ≥ 70 %, or a B-family grade
    Good,
    /// SGPA ≥ 5.5, ≥ 55 %, or a C-family grade
    Average,
    /// SGPA ≥ 4.0, ≥ 40 %, or a D grade
    Pass,
    /// Everything below the pass band
    Fail,
}

impl GradeClass {
    /// Band for a semester grade point average.
    #[must_use]
    pub fn from_sgpa(sgpa: f64) -> Self {
        if sgpa >= 8.5 {
            Self::Excellent
        } else if sgpa >= 7.0 {
            Self::Good
        } else if sgpa >= 5.5 {
            Self::Average
        } else if sgpa >= 4.0 {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    /// Band for `obtained` out of `total` marks. A zero total is a fail.
    #[must_use]
    pub fn from_percentage(obtained: u32, total: u32) -> Self {
        if total == 0 {
            return Self::Fail;
        }
        let percentage = f64::from(obtained) / f64::from(total) * 100.0;

        if percentage >= 85.0 {
            Self::Excellent
        } else if percentage >= 70.0 {
            Self::Good
        } else if percentage >= 55.0 {
            Self::Average
        } else if percentage >= 40.0 {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    /// Band for a printed letter grade (case-insensitive).
    #[must_use]
    pub fn from_letter(grade: &str) -> Self {
        match grade.trim().to_ascii_uppercase().as_str() {
            "A+" | "A" | "A-" => Self::Excellent,
            "B+" | "B" | "B-" => Self::Good,
            "C+" | "C" | "C-" => Self::Average,
            "D" => Self::Pass,
            _ => Self::Fail,
        }
    }

    /// Returns all variants from best to worst.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Excellent,
            Self::Good,
            Self::Average,
            Self::Pass,
            Self::Fail,
        ]
    }
}

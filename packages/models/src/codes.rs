//! Bidirectional college and branch code tables.
//!
//! Roll numbers carry the college and branch as fixed-width numeric codes.
//! [`CodeTables`] maps those codes to [`CollegeName`] / [`BranchName`] and
//! back. Callers pass the table explicitly; [`CodeTables::standard`] holds
//! the board's real codes and tests can build synthetic ones.

use std::collections::BTreeMap;

use crate::college::STANDARD_COLLEGE_CODES;
use crate::roll::{BRANCH_CODE_RANGE, COLLEGE_CODE_RANGE};
use crate::{BranchName, CollegeName};

/// Board codes for every known branch, as they appear at roll-number
/// positions 5..7.
const STANDARD_BRANCH_CODES: &[(BranchName, u32)] = &[
    (BranchName::Civil, 15),
    (BranchName::Cse, 18),
    (BranchName::Electrical, 20),
    (BranchName::Electronics, 21),
    (BranchName::Mechanical, 25),
    (BranchName::Automobile, 33),
    (BranchName::Ece, 38),
];

/// Code ↔ name lookup tables for colleges and branches.
///
/// Codes are keyed by their zero-padded roll-number form (three digits for
/// colleges, two for branches) so that lookups compare exactly the
/// characters sliced out of a roll number.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTables {
    branches: BTreeMap<String, BranchName>,
    branch_codes: BTreeMap<BranchName, u32>,
    colleges: BTreeMap<String, CollegeName>,
    college_codes: BTreeMap<CollegeName, u32>,
}

impl CodeTables {
    /// Creates empty tables. Every lookup resolves to `Unknown`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Tables populated with the board's published codes.
    #[must_use]
    pub fn standard() -> Self {
        let mut tables = Self::new();
        for &(branch, code) in STANDARD_BRANCH_CODES {
            tables = tables.with_branch(branch, code);
        }
        for &(college, code) in STANDARD_COLLEGE_CODES {
            tables = tables.with_college(college, code);
        }
        tables
    }

    /// Registers a branch code, replacing any previous mapping for either side.
    #[must_use]
    pub fn with_branch(mut self, branch: BranchName, code: u32) -> Self {
        if let Some(old) = self.branch_codes.insert(branch, code) {
            self.branches.remove(&branch_key(old));
        }
        self.branches.insert(branch_key(code), branch);
        self
    }

    /// Registers a college code, replacing any previous mapping for either side.
    #[must_use]
    pub fn with_college(mut self, college: CollegeName, code: u32) -> Self {
        if let Some(old) = self.college_codes.insert(college, code) {
            self.colleges.remove(&college_key(old));
        }
        self.colleges.insert(college_key(code), college);
        self
    }

    /// Looks up a branch by its two-digit code string.
    #[must_use]
    pub fn branch_from_code(&self, code: &str) -> BranchName {
        self.branches
            .get(code)
            .copied()
            .unwrap_or(BranchName::Unknown)
    }

    /// Looks up a college by its three-digit code string.
    #[must_use]
    pub fn college_from_code(&self, code: &str) -> CollegeName {
        self.colleges
            .get(code)
            .copied()
            .unwrap_or(CollegeName::Unknown)
    }

    /// Resolves the branch encoded at positions 5..7 of `roll`.
    ///
    /// Returns [`BranchName::Unknown`] for short rolls or unmapped codes.
    #[must_use]
    pub fn branch_from_roll(&self, roll: &str) -> BranchName {
        roll.get(BRANCH_CODE_RANGE)
            .map_or(BranchName::Unknown, |code| self.branch_from_code(code))
    }

    /// Resolves the college encoded at positions 2..5 of `roll`.
    ///
    /// Returns [`CollegeName::Unknown`] for short rolls or unmapped codes.
    #[must_use]
    pub fn college_from_roll(&self, roll: &str) -> CollegeName {
        roll.get(COLLEGE_CODE_RANGE)
            .map_or(CollegeName::Unknown, |code| self.college_from_code(code))
    }

    /// Numeric code for `branch`, if registered.
    #[must_use]
    pub fn branch_code(&self, branch: BranchName) -> Option<u32> {
        self.branch_codes.get(&branch).copied()
    }

    /// Numeric code for `college`, if registered.
    #[must_use]
    pub fn college_code(&self, college: CollegeName) -> Option<u32> {
        self.college_codes.get(&college).copied()
    }

    /// Registered branches with their codes, in code order.
    pub fn branches(&self) -> impl Iterator<Item = (BranchName, u32)> + '_ {
        self.branches
            .values()
            .filter_map(|&b| self.branch_code(b).map(|code| (b, code)))
    }

    /// Registered colleges with their codes, in code order.
    pub fn colleges(&self) -> impl Iterator<Item = (CollegeName, u32)> + '_ {
        self.colleges
            .values()
            .filter_map(|&c| self.college_code(c).map(|code| (c, code)))
    }
}

fn branch_key(code: u32) -> String {
    format!("{code:02}")
}

fn college_key(code: u32) -> String {
    format!("{code:03}")
}

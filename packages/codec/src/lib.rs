#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Compact positional encoding of [`ParsedResult`] records.
//!
//! A dataset of tens of thousands of results is stored on disk and sent to
//! the viewer as JSON arrays of fixed-arity tuples instead of keyed
//! objects. Branch and college are dropped on encode and recomputed from
//! the roll number on decode, so a decoded record can never carry a branch
//! that disagrees with its roll.
//!
//! - [`encode_result`] / [`decode_result`] convert single records.
//! - [`encode_dataset`] deduplicates by roll before encoding.
//! - [`payload`] renders either the full or the compact JSON form.
//! - [`embed`] gzip-compresses and base64-encodes a payload for inlining
//!   into a static build.

pub mod embed;
pub mod payload;

use std::collections::BTreeSet;

use sbte_results_models::{
    CodeTables, GrandTotal, InternalMarks, Marks, PaperType, ParsedResult, StudentIdentity,
    SubjectResult,
};
use serde::{Deserialize, Serialize};

/// Errors from reading or writing encoded data.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// JSON (de)serialization failed, including wrong-arity tuples.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Compression or decompression failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An embedded payload was not valid base64.
    #[error("Base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
}

/// `[name, type, credits, [intMax, intObtained], [extMax, extPassing,
/// extObtained], [totalMax, totalPassing, totalObtained], grade]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSubject(
    pub String,
    pub PaperType,
    pub f64,
    pub [u32; 2],
    pub [u32; 3],
    pub [u32; 3],
    pub String,
);

/// `[name, roll, [gtMax, gtPassing, gtObtained], subjects, sgpa, remarks]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedResult(
    pub String,
    pub String,
    pub [u32; 3],
    pub Vec<EncodedSubject>,
    pub f64,
    pub String,
);

impl EncodedResult {
    /// Roll number of the encoded record.
    #[must_use]
    pub fn roll(&self) -> &str {
        &self.1
    }
}

/// Encodes one subject.
#[must_use]
pub fn encode_subject(subject: &SubjectResult) -> EncodedSubject {
    EncodedSubject(
        subject.name.clone(),
        subject.paper_type,
        subject.credits,
        [subject.internal.max, subject.internal.obtained],
        marks_triple(subject.external),
        marks_triple(subject.total),
        subject.grade.clone(),
    )
}

/// Decodes one subject.
#[must_use]
pub fn decode_subject(encoded: EncodedSubject) -> SubjectResult {
    let EncodedSubject(name, paper_type, credits, internal, external, total, grade) = encoded;
    SubjectResult {
        name,
        paper_type,
        credits,
        internal: InternalMarks {
            max: internal[0],
            obtained: internal[1],
        },
        external: triple_marks(external),
        total: triple_marks(total),
        grade,
    }
}

/// Encodes one result, dropping branch and college.
#[must_use]
pub fn encode_result(result: &ParsedResult) -> EncodedResult {
    EncodedResult(
        result.student.name.clone(),
        result.student.roll.clone(),
        [
            result.grand_total.maximum,
            result.grand_total.passing,
            result.grand_total.obtained,
        ],
        result.subjects.iter().map(encode_subject).collect(),
        result.sgpa,
        result.remarks.clone(),
    )
}

/// Decodes one result, resolving branch and college from the roll number.
#[must_use]
pub fn decode_result(encoded: EncodedResult, tables: &CodeTables) -> ParsedResult {
    let EncodedResult(name, roll, [maximum, passing, obtained], subjects, sgpa, remarks) = encoded;
    let branch = tables.branch_from_roll(&roll);
    let college = tables.college_from_roll(&roll);

    ParsedResult {
        student: StudentIdentity {
            name,
            roll,
            branch,
            college,
        },
        grand_total: GrandTotal {
            maximum,
            passing,
            obtained,
        },
        subjects: subjects.into_iter().map(decode_subject).collect(),
        sgpa,
        remarks,
    }
}

/// Keeps the first result for each roll number, preserving order.
#[must_use]
pub fn dedup_by_roll<'a>(
    results: impl IntoIterator<Item = &'a ParsedResult>,
) -> Vec<&'a ParsedResult> {
    let mut seen = BTreeSet::new();
    results
        .into_iter()
        .filter(|r| seen.insert(r.student.roll.clone()))
        .collect()
}

/// Encodes a dataset, keeping only the first occurrence of each roll.
#[must_use]
pub fn encode_dataset(results: &[ParsedResult]) -> Vec<EncodedResult> {
    let unique = dedup_by_roll(results);
    if unique.len() < results.len() {
        log::debug!(
            "Dropped {} duplicate roll(s) while encoding",
            results.len() - unique.len()
        );
    }
    unique.into_iter().map(encode_result).collect()
}

/// Decodes a dataset in order.
#[must_use]
pub fn decode_dataset(encoded: Vec<EncodedResult>, tables: &CodeTables) -> Vec<ParsedResult> {
    encoded
        .into_iter()
        .map(|e| decode_result(e, tables))
        .collect()
}

/// Serializes a dataset as a compact JSON array of tuples.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if serialization fails.
pub fn to_json(results: &[ParsedResult]) -> Result<String, CodecError> {
    Ok(serde_json::to_string(&encode_dataset(results))?)
}

/// Parses a compact JSON array of tuples back into results.
///
/// # Errors
///
/// Returns [`CodecError::Json`] if the text is not an array of
/// well-formed tuples.
pub fn from_json(json: &str, tables: &CodeTables) -> Result<Vec<ParsedResult>, CodecError> {
    let encoded: Vec<EncodedResult> = serde_json::from_str(json)?;
    Ok(decode_dataset(encoded, tables))
}

const fn marks_triple(marks: Marks) -> [u32; 3] {
    [marks.max, marks.passing, marks.obtained]
}

const fn triple_marks([max, passing, obtained]: [u32; 3]) -> Marks {
    Marks {
        max,
        passing,
        obtained,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use sbte_results_models::{BranchName, CollegeName};

    pub fn sample_result(roll: &str, name: &str) -> ParsedResult {
        let tables = CodeTables::standard();
        ParsedResult {
            student: StudentIdentity {
                name: name.to_string(),
                roll: roll.to_string(),
                branch: tables.branch_from_roll(roll),
                college: tables.college_from_roll(roll),
            },
            grand_total: GrandTotal {
                maximum: 125,
                passing: 50,
                obtained: 116,
            },
            subjects: vec![
                SubjectResult {
                    name: "Indian Constitution".to_string(),
                    paper_type: PaperType::Theory,
                    credits: 1.0,
                    internal: InternalMarks {
                        max: 25,
                        obtained: 24,
                    },
                    external: Marks::default(),
                    total: Marks {
                        max: 25,
                        passing: 10,
                        obtained: 24,
                    },
                    grade: "A+".to_string(),
                },
                SubjectResult {
                    name: "Basic Engg. Mathematics".to_string(),
                    paper_type: PaperType::Theory,
                    credits: 3.0,
                    internal: InternalMarks {
                        max: 30,
                        obtained: 28,
                    },
                    external: Marks {
                        max: 70,
                        passing: 28,
                        obtained: 64,
                    },
                    total: Marks {
                        max: 100,
                        passing: 40,
                        obtained: 92,
                    },
                    grade: "A+".to_string(),
                },
            ],
            sgpa: 9.3,
            remarks: "First Class with Distinction".to_string(),
        }
    }

    #[test]
    fn round_trip_is_exact() {
        let tables = CodeTables::standard();
        let original = sample_result("111211825301", "Abhinav Kumar");
        let decoded = decode_result(encode_result(&original), &tables);
        assert_eq!(decoded, original);
    }

    #[test]
    fn decode_recomputes_branch_and_college_from_roll() {
        let tables = CodeTables::standard();
        let mut original = sample_result("111211825301", "Abhinav Kumar");
        original.student.branch = BranchName::Civil;
        original.student.college = CollegeName::GpGaya;

        let decoded = decode_result(encode_result(&original), &tables);
        assert_eq!(decoded.student.branch, BranchName::Cse);
        assert_eq!(decoded.student.college, CollegeName::NgpPatna13);
    }

    #[test]
    fn decode_uses_injected_tables() {
        let tables = CodeTables::new().with_branch(BranchName::Ece, 18);
        let original = sample_result("111211825301", "Abhinav Kumar");
        let decoded = decode_result(encode_result(&original), &tables);
        assert_eq!(decoded.student.branch, BranchName::Ece);
        assert_eq!(decoded.student.college, CollegeName::Unknown);
    }

    #[test]
    fn encoded_json_is_positional() {
        let encoded = encode_result(&sample_result("111211825301", "Abhinav Kumar"));
        let json = serde_json::to_value(&encoded).unwrap();

        assert_eq!(json[0], "Abhinav Kumar");
        assert_eq!(json[1], "111211825301");
        assert_eq!(json[2], serde_json::json!([125, 50, 116]));
        assert_eq!(json[3][0][0], "Indian Constitution");
        assert_eq!(json[3][0][1], "THEORY");
        assert_eq!(json[3][0][3], serde_json::json!([25, 24]));
        assert_eq!(json[3][0][4], serde_json::json!([0, 0, 0]));
        assert_eq!(json[3][1][5], serde_json::json!([100, 40, 92]));
        assert_eq!(json[4], 9.3);
        assert_eq!(json[5], "First Class with Distinction");
        assert_eq!(json.as_array().unwrap().len(), 6);
    }

    #[test]
    fn dataset_dedups_first_wins() {
        let first = sample_result("111211825301", "First");
        let other = sample_result("111211825302", "Other");
        let dup = sample_result("111211825301", "Duplicate");

        let encoded = encode_dataset(&[first, other, dup]);
        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded[0].roll(), "111211825301");
        assert_eq!(encoded[0].0, "First");
        assert_eq!(encoded[1].roll(), "111211825302");
    }

    #[test]
    fn json_dataset_round_trip() {
        let tables = CodeTables::standard();
        let results = vec![
            sample_result("111211825301", "Abhinav Kumar"),
            sample_result("311111524010", "Someone Else"),
        ];
        let json = to_json(&results).unwrap();
        let decoded = from_json(&json, &tables).unwrap();
        assert_eq!(decoded, results);
    }

    #[test]
    fn wrong_arity_fails_fast() {
        let tables = CodeTables::standard();
        let err = from_json(r#"[["Name", "111211825301", [1, 2, 3], [], 9.3]]"#, &tables);
        assert!(matches!(err, Err(CodecError::Json(_))));

        let bad_subject = r#"[["N", "111211825301", [1, 2, 3], [["S", "THEORY", 1.0, [1], [0,0,0], [0,0,0], "A"]], 1.0, ""]]"#;
        assert!(from_json(bad_subject, &tables).is_err());
    }

    #[test]
    fn unknown_paper_type_is_rejected() {
        let tables = CodeTables::standard();
        let json = r#"[["N", "111211825301", [1, 2, 3], [["S", "LAB", 1.0, [1, 1], [0,0,0], [0,0,0], "A"]], 1.0, ""]]"#;
        assert!(from_json(json, &tables).is_err());
    }
}

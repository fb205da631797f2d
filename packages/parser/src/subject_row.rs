//! Positional extraction of a single subject-marks row.
//!
//! Rows are whitespace-separated with a variable-length subject name
//! followed by exactly ten fixed fields:
//!
//! ```text
//! <name ...> CREDITS INT_MAX FIN_MAX TOTAL_MAX FIN_PASS TOTAL_PASS INT FIN TOTAL GRADE
//! ```
//!
//! The field block is located by counting from the end of the line, so
//! subject names may contain any number of words (including ones that look
//! numeric, such as `-B`).

use sbte_results_models::{InternalMarks, Marks, PaperType, SubjectResult};

/// Number of fixed trailing fields on every subject row.
pub const MARK_FIELDS: usize = 10;

const CREDITS: usize = 0;
const INTERNAL_MAX: usize = 1;
const EXTERNAL_MAX: usize = 2;
const TOTAL_MAX: usize = 3;
const EXTERNAL_PASSING: usize = 4;
const TOTAL_PASSING: usize = 5;
const INTERNAL_OBTAINED: usize = 6;
const EXTERNAL_OBTAINED: usize = 7;
const TOTAL_OBTAINED: usize = 8;
const GRADE: usize = 9;

/// Parses one subject row listed under a `paper_type` section.
///
/// Returns `None` when the row has fewer than [`MARK_FIELDS`] tokens.
#[must_use]
pub fn parse_subject_row(line: &str, paper_type: PaperType) -> Option<SubjectResult> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < MARK_FIELDS {
        return None;
    }

    let (name_tokens, fields) = tokens.split_at(tokens.len() - MARK_FIELDS);

    Some(SubjectResult {
        name: title_case(&name_tokens.join(" ")),
        paper_type,
        credits: parse_credits(fields[CREDITS]),
        internal: InternalMarks {
            max: parse_marks(fields[INTERNAL_MAX]),
            obtained: parse_marks(fields[INTERNAL_OBTAINED]),
        },
        external: Marks {
            max: parse_marks(fields[EXTERNAL_MAX]),
            passing: parse_marks(fields[EXTERNAL_PASSING]),
            obtained: parse_marks(fields[EXTERNAL_OBTAINED]),
        },
        total: Marks {
            max: parse_marks(fields[TOTAL_MAX]),
            passing: parse_marks(fields[TOTAL_PASSING]),
            obtained: parse_marks(fields[TOTAL_OBTAINED]),
        },
        grade: fields[GRADE].to_string(),
    })
}

/// Parses a marks token. `"-"` (not applicable) and anything non-numeric
/// both read as `0`.
#[must_use]
pub fn parse_marks(token: &str) -> u32 {
    if token == "-" {
        return 0;
    }
    token.parse().unwrap_or(0)
}

/// Parses a credits token such as `"3.0"`, reading garbage as `0.0`.
#[must_use]
pub fn parse_credits(token: &str) -> f64 {
    parse_decimal(token)
}

/// Parses a finite decimal. `f64::from_str` also accepts `NaN`, `inf` and
/// `infinity`, which are garbage on a sheet and read as `0.0` like any
/// other non-numeric token.
#[must_use]
pub fn parse_decimal(token: &str) -> f64 {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Capitalizes the first letter of each whitespace-separated word and
/// lowercases the rest, joining words with single spaces.
///
/// ```
/// use sbte_results_parser::subject_row::title_case;
///
/// assert_eq!(title_case("INDIAN CONSTITUTION"), "Indian Constitution");
/// ```
#[must_use]
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_theory_row() {
        let row = parse_subject_row(
            "BASIC ENGG. MATHEMATICS 3.0 30 70 100 28 40 28 64 92 A+",
            PaperType::Theory,
        )
        .unwrap();

        assert_eq!(row.name, "Basic Engg. Mathematics");
        assert_eq!(row.paper_type, PaperType::Theory);
        assert!((row.credits - 3.0).abs() < f64::EPSILON);
        assert_eq!(row.internal, InternalMarks { max: 30, obtained: 28 });
        assert_eq!(
            row.external,
            Marks {
                max: 70,
                passing: 28,
                obtained: 64
            }
        );
        assert_eq!(
            row.total,
            Marks {
                max: 100,
                passing: 40,
                obtained: 92
            }
        );
        assert_eq!(row.grade, "A+");
    }

    #[test]
    fn dashes_read_as_zero() {
        let row = parse_subject_row(
            "INDIAN CONSTITUTION 1.0 25 - 025 - 10 24 - 24 A+",
            PaperType::Theory,
        )
        .unwrap();

        assert_eq!(row.name, "Indian Constitution");
        assert_eq!(row.external, Marks::default());
        assert_eq!(row.internal, InternalMarks { max: 25, obtained: 24 });
        assert_eq!(row.total.max, 25);
        assert_eq!(row.total.passing, 10);
        assert_eq!(row.total.obtained, 24);
    }

    #[test]
    fn every_numeric_position_accepts_a_dash() {
        let row = parse_subject_row("X - - - - - - - - - F", PaperType::TermWork).unwrap();
        assert_eq!(row.name, "X");
        assert!(row.credits.abs() < f64::EPSILON);
        assert_eq!(row.internal, InternalMarks::default());
        assert_eq!(row.external, Marks::default());
        assert_eq!(row.total, Marks::default());
        assert_eq!(row.grade, "F");
    }

    #[test]
    fn name_with_hyphenated_word_keeps_it() {
        let row = parse_subject_row(
            "APPLIED PHYSICS -B 2.0 20 30 050 - 20 16 27 43 A",
            PaperType::Practical,
        )
        .unwrap();
        assert_eq!(row.name, "Applied Physics -b");
        assert_eq!(row.total.max, 50);
        assert_eq!(row.total.obtained, 43);
    }

    #[test]
    fn garbage_tokens_read_as_zero() {
        let row = parse_subject_row(
            "ICT TOOLS 2.O 2O 30 050 - 20 l8 27 45 A+",
            PaperType::Practical,
        )
        .unwrap();
        assert!(row.credits.abs() < f64::EPSILON);
        assert_eq!(row.internal.max, 0);
        assert_eq!(row.internal.obtained, 0);
        assert_eq!(row.total.obtained, 45);
    }

    #[test]
    fn non_finite_credits_read_as_zero() {
        for token in ["inf", "-inf", "NaN", "infinity"] {
            let row = parse_subject_row(
                &format!("X {token} 25 - 025 - 10 24 - 24 A+"),
                PaperType::Theory,
            )
            .unwrap();
            assert!(row.credits.abs() < f64::EPSILON, "{token}");
        }
        assert!((parse_decimal("9.30") - 9.3).abs() < f64::EPSILON);
    }

    #[test]
    fn short_rows_are_rejected() {
        assert!(parse_subject_row("1.0 25 - 025 - 10 24 - 24", PaperType::Theory).is_none());
        assert!(parse_subject_row("", PaperType::Theory).is_none());
    }

    #[test]
    fn exactly_ten_tokens_gives_empty_name() {
        let row = parse_subject_row("1.0 25 - 025 - 10 24 - 24 A+", PaperType::Theory).unwrap();
        assert_eq!(row.name, "");
    }

    #[test]
    fn title_case_collapses_whitespace() {
        assert_eq!(title_case("  ABHINAV   KUMAR "), "Abhinav Kumar");
        assert_eq!(title_case("fund. of ELECT & electro"), "Fund. Of Elect & Electro");
        assert_eq!(title_case(""), "");
    }
}

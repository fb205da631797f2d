//! Line-oriented parser for a single result-sheet transcript.
//!
//! The sheet is classified line by line. Divider lines (mostly `-`) close
//! the current subject section; section headers open one; every other line
//! inside an open section is a subject row. Header and footer lines are
//! recognised by case-insensitive prefixes.

use sbte_results_models::{
    BranchName, CodeTables, GrandTotal, ParsedResult, PaperType, StudentIdentity, SubjectResult,
};

use crate::subject_row::{parse_decimal, parse_subject_row, title_case};

const ROLL_PREFIX: &str = "roll no";
const NAME_PREFIX: &str = "following are the marks obtained by";
const DIPLOMA_MARKER: &str = "of diploma in";
const GRAND_TOTAL_PREFIX: &str = "grand total";
const SGPA_PREFIX: &str = "sgpa";
const REMARKS_PREFIX: &str = "remarks";

/// Section headers and the paper type they open.
const SECTION_HEADERS: &[(&str, PaperType)] = &[
    ("theory papers", PaperType::Theory),
    ("practical papers", PaperType::Practical),
    ("term work papers", PaperType::TermWork),
];

/// Keywords in the "of Diploma in ..." line, checked in order.
const BRANCH_KEYWORDS: &[(&str, BranchName)] = &[
    ("civil", BranchName::Civil),
    ("computer", BranchName::Cse),
    ("electrical", BranchName::Electrical),
    ("electronics", BranchName::Electronics),
    ("automobile", BranchName::Automobile),
    ("mechanical", BranchName::Mechanical),
];

/// Why a transcript could not be turned into a result.
///
/// A rejection means "no result for this roll" and is expected for rolls
/// that were never issued; it is not a parser failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    /// No `Roll No : ...` line with a value was found.
    #[error("transcript has no roll number")]
    MissingRoll,

    /// No `GRAND TOTAL` line was found.
    #[error("transcript has no grand total")]
    MissingGrandTotal,
}

/// Accumulates fields while walking the transcript.
#[derive(Debug, Default)]
struct SheetState {
    roll: Option<String>,
    name: String,
    branch: Option<BranchName>,
    section: Option<PaperType>,
    subjects: Vec<SubjectResult>,
    grand_total: Option<(u32, u32)>,
    sgpa: f64,
    remarks: String,
}

impl SheetState {
    fn accept(&mut self, line: &str) {
        if is_divider(line) {
            self.section = None;
            return;
        }

        let lower = line.to_lowercase();

        if lower.starts_with(ROLL_PREFIX) {
            if let Some(roll) = after_colon(line) {
                self.roll = Some(roll.to_string());
            }
        } else if lower.starts_with(NAME_PREFIX) {
            self.name = title_case(line.get(NAME_PREFIX.len()..).unwrap_or_default());
        } else if let Some(idx) = lower.find(DIPLOMA_MARKER) {
            self.branch = Some(branch_from_diploma(&lower[idx + DIPLOMA_MARKER.len()..]));
        } else if let Some(paper_type) = section_header(&lower) {
            self.section = Some(paper_type);
        } else if let Some(paper_type) = self.section {
            if let Some(subject) = parse_subject_row(line, paper_type) {
                self.subjects.push(subject);
            } else {
                log::trace!("Skipping short {paper_type} row: {line}");
            }
        } else if lower.starts_with(GRAND_TOTAL_PREFIX) {
            self.grand_total = Some(parse_grand_total(line));
        } else if lower.starts_with(SGPA_PREFIX) {
            self.sgpa = line.split_whitespace().last().map_or(0.0, parse_decimal);
        } else if lower.starts_with(REMARKS_PREFIX) {
            if let Some(remarks) = after_colon(line) {
                self.remarks = remarks.to_string();
            }
        }
    }

    fn finish(self, tables: &CodeTables) -> Result<ParsedResult, Rejection> {
        let roll = self.roll.ok_or(Rejection::MissingRoll)?;
        let (maximum, obtained) = self.grand_total.ok_or(Rejection::MissingGrandTotal)?;

        let branch = match self.branch {
            Some(branch) if branch != BranchName::Unknown => branch,
            _ => tables.branch_from_roll(&roll),
        };
        let college = tables.college_from_roll(&roll);
        let passing = GrandTotal::passing_from(&self.subjects);

        Ok(ParsedResult {
            student: StudentIdentity {
                name: self.name,
                roll,
                branch,
                college,
            },
            grand_total: GrandTotal {
                maximum,
                passing,
                obtained,
            },
            subjects: self.subjects,
            sgpa: self.sgpa,
            remarks: self.remarks,
        })
    }
}

/// Parses one student's result-sheet text.
///
/// Unrecognised lines and malformed subject rows are skipped. The college
/// always comes from the roll number; the branch comes from the "of Diploma
/// in" line and falls back to the roll number when that line is missing or
/// names no known branch. `grand_total.passing` is the sum of the subjects'
/// total passing marks, whatever the sheet prints.
///
/// # Errors
///
/// Returns a [`Rejection`] when the sheet has no roll number or no grand
/// total line.
pub fn parse_transcript(text: &str, tables: &CodeTables) -> Result<ParsedResult, Rejection> {
    let mut state = SheetState::default();

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        state.accept(line);
    }

    let result = state.finish(tables)?;

    log::debug!(
        "Parsed {} ({}): {} subjects, sgpa {}",
        result.student.roll,
        result.student.name,
        result.subjects.len(),
        result.sgpa
    );

    Ok(result)
}

/// A line made up mostly of `-`: splitting on `-` yields at least half as
/// many pieces as the line has characters.
fn is_divider(line: &str) -> bool {
    line.split('-').count() * 2 >= line.chars().count()
}

/// Trimmed, non-empty text between the first and second `:`.
fn after_colon(line: &str) -> Option<&str> {
    line.split(':')
        .nth(1)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

fn section_header(lower: &str) -> Option<PaperType> {
    SECTION_HEADERS
        .iter()
        .find(|(header, _)| lower.contains(header))
        .map(|&(_, paper_type)| paper_type)
}

fn branch_from_diploma(lower: &str) -> BranchName {
    BRANCH_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map_or(BranchName::Unknown, |&(_, branch)| branch)
}

/// Last two tokens of a grand-total line as (maximum, obtained).
fn parse_grand_total(line: &str) -> (u32, u32) {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let from_end = |n: usize| {
        tokens
            .len()
            .checked_sub(n)
            .and_then(|i| tokens[i].parse().ok())
            .unwrap_or(0)
    };
    (from_end(2), from_end(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sbte_results_models::CollegeName;

    const SAMPLE: &str = include_str!("../fixtures/111211825301.txt");

    fn tables() -> CodeTables {
        CodeTables::standard()
    }

    #[test]
    fn parses_sample_sheet() {
        let result = parse_transcript(SAMPLE, &tables()).unwrap();

        assert_eq!(result.student.roll, "111211825301");
        assert_eq!(result.student.name, "Abhinav Kumar");
        assert_eq!(result.student.branch, BranchName::Cse);
        assert_eq!(result.student.college, CollegeName::NgpPatna13);
        assert!((result.sgpa - 9.30).abs() < 1e-9);
        assert_eq!(result.remarks, "First Class with Distinction");

        assert_eq!(result.subjects.len(), 17);
        assert_eq!(result.subjects_of(PaperType::Theory).count(), 6);
        assert_eq!(result.subjects_of(PaperType::Practical).count(), 5);
        assert_eq!(result.subjects_of(PaperType::TermWork).count(), 6);

        assert_eq!(result.grand_total.maximum, 1000);
        assert_eq!(result.grand_total.obtained, 875);
    }

    #[test]
    fn grand_total_passing_is_recomputed() {
        let result = parse_transcript(SAMPLE, &tables()).unwrap();
        let expected: u32 = result.subjects.iter().map(|s| s.total.passing).sum();

        assert_eq!(result.grand_total.passing, expected);
        assert_eq!(result.grand_total.passing, 400);
        assert_ne!(result.grand_total.passing, 875);
    }

    #[test]
    fn subjects_keep_sheet_order() {
        let result = parse_transcript(SAMPLE, &tables()).unwrap();
        let first = &result.subjects[0];
        let last = result.subjects.last().unwrap();

        assert_eq!(first.name, "Indian Constitution");
        assert_eq!(first.paper_type, PaperType::Theory);
        assert_eq!(first.external.max, 0);
        assert_eq!(last.name, "Electrical & Electronics W/p");
        assert_eq!(last.paper_type, PaperType::TermWork);
        assert_eq!(result.subjects[6].paper_type, PaperType::Practical);
    }

    #[test]
    fn missing_roll_is_rejected() {
        let text = "Following are the marks obtained by X\nGRAND TOTAL 30 1000 875\n";
        assert_eq!(
            parse_transcript(text, &tables()),
            Err(Rejection::MissingRoll)
        );

        let blank_roll = "Roll No :   \nGRAND TOTAL 30 1000 875\n";
        assert_eq!(
            parse_transcript(blank_roll, &tables()),
            Err(Rejection::MissingRoll)
        );
    }

    #[test]
    fn missing_grand_total_is_rejected() {
        let text = "Roll No : 111211825301\nSGPA 9.30\n";
        assert_eq!(
            parse_transcript(text, &tables()),
            Err(Rejection::MissingGrandTotal)
        );
        assert_eq!(parse_transcript("", &tables()), Err(Rejection::MissingRoll));
    }

    #[test]
    fn empty_sheet_with_footer_is_valid() {
        let text = "Roll No : 511111523007\nGRAND TOTAL 0 0\nSGPA -\n";
        let result = parse_transcript(text, &tables()).unwrap();

        assert!(result.subjects.is_empty());
        assert_eq!(result.grand_total, GrandTotal::default());
        assert!(result.sgpa.abs() < f64::EPSILON);
        assert_eq!(result.student.branch, BranchName::Civil);
        assert_eq!(result.student.college, CollegeName::GpBarauni);
        assert_eq!(result.student.name, "");
    }

    #[test]
    fn non_finite_sgpa_reads_as_zero() {
        for sgpa in ["NaN", "inf", "-infinity"] {
            let text = format!("Roll No : 111211825301\nGRAND TOTAL 0 0\nSGPA {sgpa}\n");
            let result = parse_transcript(&text, &tables()).unwrap();
            assert!(result.sgpa.abs() < f64::EPSILON, "{sgpa}");
        }
    }

    #[test]
    fn huge_passing_marks_do_not_overflow() {
        let text = "Roll No : 111211825301\n\
                    THEORY PAPERS\n\
                    A 1.0 25 - 025 - 4000000000 24 - 24 A+\n\
                    B 1.0 25 - 025 - 4000000000 24 - 24 A+\n\
                    ----------------------------------------\n\
                    GRAND TOTAL 50 48\n";
        let result = parse_transcript(text, &tables()).unwrap();
        assert_eq!(result.subjects.len(), 2);
        assert_eq!(result.grand_total.passing, u32::MAX);
    }

    #[test]
    fn branch_falls_back_to_roll_when_text_is_unknown() {
        let text = "Roll No : 111212525001\n\
                    at Semester I of Diploma in Textile Technology\n\
                    GRAND TOTAL 30 1000 500\n";
        let result = parse_transcript(text, &tables()).unwrap();
        assert_eq!(result.student.branch, BranchName::Mechanical);
    }

    #[test]
    fn branch_text_wins_over_roll() {
        let text = "Roll No : 111212525001\n\
                    at Semester I of Diploma in Civil Engineering\n\
                    GRAND TOTAL 30 1000 500\n";
        let result = parse_transcript(text, &tables()).unwrap();
        assert_eq!(result.student.branch, BranchName::Civil);
    }

    #[test]
    fn first_branch_keyword_wins() {
        assert_eq!(
            branch_from_diploma(" electrical and electronics engineering"),
            BranchName::Electrical
        );
        assert_eq!(
            branch_from_diploma(" electronics engineering"),
            BranchName::Electronics
        );
        assert_eq!(branch_from_diploma(" fashion design"), BranchName::Unknown);
    }

    #[test]
    fn rows_outside_sections_are_ignored() {
        let text = "Roll No : 111211825301\n\
                    INDIAN CONSTITUTION 1.0 25 - 025 - 10 24 - 24 A+\n\
                    THEORY PAPERS\n\
                    INDIAN CONSTITUTION 1.0 25 - 025 - 10 24 - 24 A+\n\
                    ----------------------------------------\n\
                    OPEN EDUCATIONAL RESOURCES 1.0 25 - 025 - 10 23 - 23 A+\n\
                    GRAND TOTAL 2 50 47\n";
        let result = parse_transcript(text, &tables()).unwrap();
        assert_eq!(result.subjects.len(), 1);
        assert_eq!(result.grand_total.passing, 10);
    }

    #[test]
    fn malformed_rows_do_not_abort_the_section() {
        let text = "Roll No : 111211825301\n\
                    THEORY PAPERS\n\
                    TRUNCATED ROW 1.0 25\n\
                    OPEN EDUCATIONAL RESOURCES 1.0 25 - 025 - 10 23 - 23 A+\n\
                    ----\n\
                    GRAND TOTAL 1 25 23\n";
        let result = parse_transcript(text, &tables()).unwrap();
        assert_eq!(result.subjects.len(), 1);
        assert_eq!(result.subjects[0].name, "Open Educational Resources");
    }

    #[test]
    fn grand_total_line_stated_passing_is_ignored() {
        let text = "Roll No : 111211825301\nGRAND TOTAL 30 1000 875\n";
        let result = parse_transcript(text, &tables()).unwrap();
        assert_eq!(result.grand_total.passing, 0);
        assert_eq!(result.grand_total.maximum, 1000);
    }

    #[test]
    fn divider_heuristic() {
        assert!(is_divider("-------------------------------------------"));
        assert!(is_divider("."));
        assert!(!is_divider("APPLIED PHYSICS -B 3.0 30 70 100 28 40 21 55 76 B"));
        assert!(!is_divider("Result Published On: 16/01/2026"));
    }

    #[test]
    fn parse_grand_total_handles_short_lines() {
        assert_eq!(parse_grand_total("GRAND TOTAL 30 1000 875"), (1000, 875));
        assert_eq!(parse_grand_total("GRAND"), (0, 0));
    }
}

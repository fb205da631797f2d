//! Filtering, sorting and aggregation over the loaded dataset.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use sbte_results_models::{GradeClass, ParsedResult};
use sbte_results_server_models::{
    ApiGradeCount, ApiOptions, ApiStudentPage, ApiSummary, SearchField, SortField, SortOrder,
    StudentQueryParams,
};

/// Applies the filters, search, sort and pagination of `params`.
#[must_use]
pub fn query_students(results: &[ParsedResult], params: &StudentQueryParams) -> ApiStudentPage {
    let mut matching = results
        .iter()
        .filter(|r| matches_filters(r, params))
        .collect::<Vec<_>>();

    let field = params.sort_by.unwrap_or_default();
    let order = params.order.unwrap_or_else(|| field.default_order());
    sort_students(&mut matching, field, order);

    let total = matching.len();
    let students = matching
        .into_iter()
        .skip(params.offset.unwrap_or(0))
        .take(params.limit.unwrap_or(usize::MAX))
        .cloned()
        .collect();

    ApiStudentPage { total, students }
}

fn matches_filters(result: &ParsedResult, params: &StudentQueryParams) -> bool {
    if let Some(branch) = params.branch
        && result.student.branch != branch
    {
        return false;
    }
    if let Some(college) = params.college
        && result.student.college != college
    {
        return false;
    }
    if let Some(semester) = params.semester
        && semester_of(result) != Some(semester)
    {
        return false;
    }

    let Some(q) = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) else {
        return true;
    };
    match params.search_by.unwrap_or_default() {
        SearchField::Name => result
            .student
            .name
            .to_lowercase()
            .contains(&q.to_lowercase()),
        SearchField::Roll => result.student.roll.starts_with(q),
    }
}

/// Sorts in place. Ties are broken by roll number so pages are stable.
pub fn sort_students(students: &mut [&ParsedResult], field: SortField, order: SortOrder) {
    students.sort_by(|a, b| {
        let primary = match field {
            SortField::Marks => a.grand_total.obtained.cmp(&b.grand_total.obtained),
            SortField::Sgpa => a.sgpa.total_cmp(&b.sgpa),
            SortField::Name => a
                .student
                .name
                .to_lowercase()
                .cmp(&b.student.name.to_lowercase()),
            SortField::Roll => Ordering::Equal,
        };
        let primary = match order {
            SortOrder::Asc => primary,
            SortOrder::Desc => primary.reverse(),
        };
        primary.then_with(|| {
            let by_roll = a.student.roll.cmp(&b.student.roll);
            if field == SortField::Roll && order == SortOrder::Desc {
                by_roll.reverse()
            } else {
                by_roll
            }
        })
    });
}

/// Distinct semesters, branches and colleges, each in ascending order.
#[must_use]
pub fn options(results: &[ParsedResult]) -> ApiOptions {
    let semesters = results.iter().filter_map(semester_of).collect::<BTreeSet<_>>();
    let branches = results
        .iter()
        .map(|r| r.student.branch)
        .collect::<BTreeSet<_>>();
    let colleges = results
        .iter()
        .map(|r| r.student.college)
        .collect::<BTreeSet<_>>();

    ApiOptions {
        semesters: semesters.into_iter().collect(),
        branches: branches.into_iter().collect(),
        colleges: colleges.into_iter().collect(),
    }
}

/// Grade-band counts by SGPA, grand-total percentage and subject letter
/// grade, plus the mean SGPA.
#[must_use]
pub fn summary(results: &[ParsedResult]) -> ApiSummary {
    let grade_classes = band_counts(results.iter().map(|r| GradeClass::from_sgpa(r.sgpa)));
    let percentage_classes = band_counts(results.iter().map(|r| {
        GradeClass::from_percentage(r.grand_total.obtained, r.grand_total.maximum)
    }));
    let subject_grades = band_counts(
        results
            .iter()
            .flat_map(|r| &r.subjects)
            .map(|s| GradeClass::from_letter(&s.grade)),
    );

    #[allow(clippy::cast_precision_loss)]
    let average_sgpa = if results.is_empty() {
        0.0
    } else {
        results.iter().map(|r| r.sgpa).sum::<f64>() / results.len() as f64
    };

    ApiSummary {
        students: results.len(),
        average_sgpa,
        grade_classes,
        percentage_classes,
        subject_grades,
    }
}

/// One count per [`GradeClass`], best band first, zeros included.
fn band_counts(classes: impl Iterator<Item = GradeClass>) -> Vec<ApiGradeCount> {
    let mut counts = BTreeMap::new();
    for class in classes {
        *counts.entry(class).or_insert(0) += 1;
    }
    GradeClass::all()
        .iter()
        .map(|&class| ApiGradeCount {
            class,
            count: counts.get(&class).copied().unwrap_or(0),
        })
        .collect()
}

fn semester_of(result: &ParsedResult) -> Option<u8> {
    result
        .semester()
        .and_then(|c| c.to_digit(10))
        .and_then(|d| u8::try_from(d).ok())
}

use super::types::{non_blank, Project, ProjectField, ProjectPatch};
use crate::validation::{parse_date, validate_date_range, validate_target, ValidationError};
use chrono::NaiveDate;

/// A patch after validation, with every field resolved to its final value
pub struct AppliedProjectUpdates {
    pub title: String,
    pub details: String,
    pub total_target: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// The values to write plus the patch fields that were turned down
pub struct ResolvedPatch {
    pub updates: AppliedProjectUpdates,
    pub rejected: Vec<(ProjectField, ValidationError)>,
}

/// Validate each field of `patch` on its own against `current`.
///
/// A rejected field keeps its current value. Date ordering uses the
/// effective pair built from the date fields that passed: a new end date is
/// checked against the new start date if that parsed, else the kept one, and
/// a surviving new start date is then checked against the resulting end.
pub fn resolve_patch(current: &Project, patch: ProjectPatch) -> ResolvedPatch {
    let ProjectPatch {
        title,
        details,
        total_target,
        start_date,
        end_date,
    } = patch;
    let mut rejected = Vec::new();

    let total_target = accept(
        ProjectField::TotalTarget,
        total_target.map(validate_target),
        &mut rejected,
    )
    .unwrap_or(current.total_target);
    let mut new_start = accept(
        ProjectField::StartDate,
        non_blank(start_date.as_deref()).map(parse_date),
        &mut rejected,
    );
    let mut new_end = accept(
        ProjectField::EndDate,
        non_blank(end_date.as_deref()).map(parse_date),
        &mut rejected,
    );

    if let Some(end) = new_end {
        let start = new_start.unwrap_or(current.start_date);
        if let Err(e) = validate_date_range(start, end) {
            rejected.push((ProjectField::EndDate, e));
            new_end = None;
        }
    }
    if let Some(start) = new_start {
        let end = new_end.unwrap_or(current.end_date);
        if let Err(e) = validate_date_range(start, end) {
            rejected.push((ProjectField::StartDate, e));
            new_start = None;
        }
    }

    ResolvedPatch {
        updates: AppliedProjectUpdates {
            title: non_blank(title.as_deref())
                .map_or_else(|| current.title.clone(), str::to_string),
            details: non_blank(details.as_deref())
                .map_or_else(|| current.details.clone(), str::to_string),
            total_target,
            start_date: new_start.unwrap_or(current.start_date),
            end_date: new_end.unwrap_or(current.end_date),
        },
        rejected,
    }
}

fn accept<T>(
    field: ProjectField,
    value: Option<Result<T, ValidationError>>,
    rejected: &mut Vec<(ProjectField, ValidationError)>,
) -> Option<T> {
    match value? {
        Ok(value) => Some(value),
        Err(e) => {
            rejected.push((field, e));
            None
        }
    }
}

pub fn apply_updates(project: &mut Project, updates: AppliedProjectUpdates) {
    project.title = updates.title;
    project.details = updates.details;
    project.total_target = updates.total_target;
    project.start_date = updates.start_date;
    project.end_date = updates.end_date;
}

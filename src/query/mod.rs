pub mod filter_param;

use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::coerce::to_number;
use crate::dates;
use crate::filter::FilterExpression;

pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 150;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionStatus {
    InProgress,
    Finished,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubmissionStatus::InProgress => "in_progress",
            SubmissionStatus::Finished => "finished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Options forwarded to the forms API.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryOptions {
    pub limit: Option<i64>,
    pub after_date: Option<DateTime<Utc>>,
    pub before_date: Option<DateTime<Utc>>,
    pub offset: Option<i64>,
    pub status: Option<SubmissionStatus>,
    pub include_edit_link: Option<bool>,
    pub sort: Option<SortOrder>,
}

impl QueryOptions {
    /// Query pairs for the upstream request, using the API's parameter names.
    pub fn to_upstream_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(after) = &self.after_date {
            pairs.push(("afterDate", dates::to_api_string(after)));
        }
        if let Some(before) = &self.before_date {
            pairs.push(("beforeDate", dates::to_api_string(before)));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(include) = self.include_edit_link {
            pairs.push(("includeEditLink", include.to_string()));
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str().to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidatedQuery {
    pub options: QueryOptions,
    pub filter: FilterExpression,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldIssue {
    pub field: String,
    pub message: String,
}

impl FieldIssue {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationErrors {
    pub issues: Vec<FieldIssue>,
}

impl ValidationErrors {
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|i| i.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .issues
            .iter()
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Decode a raw `a=1&b=2` query string. Later occurrences of a key win.
pub fn parse_query_string(raw: Option<&str>) -> HashMap<String, String> {
    form_urlencoded::parse(raw.unwrap_or("").as_bytes())
        .into_owned()
        .collect()
}

/// Validate decoded query parameters.
///
/// Every parameter has its own parse function. Failures are collected into a
/// single [`ValidationErrors`] so the caller sees every bad field at once, and
/// nothing should be fetched upstream unless the whole query is valid.
pub fn validate(params: &HashMap<String, String>) -> Result<ValidatedQuery, ValidationErrors> {
    let mut issues = Vec::new();

    let options = QueryOptions {
        limit: check(&mut issues, params, "limit", parse_limit),
        after_date: check(&mut issues, params, "afterDate", parse_date),
        before_date: check(&mut issues, params, "beforeDate", parse_date),
        offset: check(&mut issues, params, "offset", parse_integer),
        status: check(&mut issues, params, "status", parse_status),
        include_edit_link: check(&mut issues, params, "includeEditLink", |s| {
            Ok(parse_truthy(s))
        }),
        sort: check(&mut issues, params, "sort", parse_sort),
    };

    let filter = match params.get("filter") {
        None => FilterExpression::default(),
        Some(raw) => match filter_param::parse(raw) {
            Ok(filter) => filter,
            Err(filter_issues) => {
                issues.extend(filter_issues);
                FilterExpression::default()
            }
        },
    };

    if issues.is_empty() {
        Ok(ValidatedQuery { options, filter })
    } else {
        Err(ValidationErrors { issues })
    }
}

fn check<T>(
    issues: &mut Vec<FieldIssue>,
    params: &HashMap<String, String>,
    field: &str,
    parse: impl FnOnce(&str) -> Result<T, String>,
) -> Option<T> {
    let raw = params.get(field)?;
    match parse(raw) {
        Ok(v) => Some(v),
        Err(message) => {
            issues.push(FieldIssue::new(field, message));
            None
        }
    }
}

pub fn parse_integer(raw: &str) -> Result<i64, String> {
    let n = to_number(raw);
    if n.is_nan() {
        return Err(format!("Expected a number, received {raw:?}"));
    }
    if !n.is_finite() || n.fract() != 0.0 || n.abs() > i64::MAX as f64 {
        return Err(format!("Expected an integer, received {raw:?}"));
    }
    Ok(n as i64)
}

pub fn parse_limit(raw: &str) -> Result<i64, String> {
    let n = parse_integer(raw)?;
    if n < MIN_LIMIT {
        return Err(format!("Number must be greater than or equal to {MIN_LIMIT}"));
    }
    if n > MAX_LIMIT {
        return Err(format!("Number must be less than or equal to {MAX_LIMIT}"));
    }
    Ok(n)
}

pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, String> {
    dates::parse(raw).ok_or_else(|| format!("Invalid date {raw:?}"))
}

pub fn parse_status(raw: &str) -> Result<SubmissionStatus, String> {
    match raw {
        "in_progress" => Ok(SubmissionStatus::InProgress),
        "finished" => Ok(SubmissionStatus::Finished),
        other => Err(format!(
            "Invalid enum value. Expected 'in_progress' | 'finished', received {other:?}"
        )),
    }
}

pub fn parse_sort(raw: &str) -> Result<SortOrder, String> {
    match raw {
        "asc" => Ok(SortOrder::Asc),
        "desc" => Ok(SortOrder::Desc),
        other => Err(format!(
            "Invalid enum value. Expected 'asc' | 'desc', received {other:?}"
        )),
    }
}

/// Any non-empty string is true, including `"false"` and `"0"`.
pub fn parse_truthy(raw: &str) -> bool {
    !raw.is_empty()
}

use serde_json::Value as Json;

use crate::filter::{Condition, FilterClause, FilterExpression};
use crate::models::Value;

use super::FieldIssue;

const FIELD: &str = "filter";

/// Parse the JSON-encoded `filter` parameter into a filter expression.
///
/// Shape errors are reported per clause with paths like `filter[2].value`.
pub fn parse(raw: &str) -> Result<FilterExpression, Vec<FieldIssue>> {
    let json: Json = serde_json::from_str(raw)
        .map_err(|e| vec![FieldIssue::new(FIELD, format!("Invalid JSON: {e}"))])?;

    let items = match json {
        Json::Array(items) => items,
        other => {
            return Err(vec![FieldIssue::new(
                FIELD,
                format!("Expected array, received {}", type_name(&other)),
            )]);
        }
    };

    let mut issues = Vec::new();
    let mut clauses = Vec::with_capacity(items.len());

    for (index, item) in items.iter().enumerate() {
        match parse_clause(index, item) {
            Ok(clause) => clauses.push(clause),
            Err(clause_issues) => issues.extend(clause_issues),
        }
    }

    if issues.is_empty() {
        Ok(FilterExpression::new(clauses))
    } else {
        Err(issues)
    }
}

fn parse_clause(index: usize, item: &Json) -> Result<FilterClause, Vec<FieldIssue>> {
    let path = |key: &str| format!("{FIELD}[{index}].{key}");

    let Json::Object(obj) = item else {
        return Err(vec![FieldIssue::new(
            format!("{FIELD}[{index}]"),
            format!("Expected object, received {}", type_name(item)),
        )]);
    };

    let mut issues = Vec::new();

    let id = match obj.get("id") {
        Some(Json::String(s)) if !s.is_empty() => Some(s.clone()),
        Some(Json::String(_)) => {
            issues.push(FieldIssue::new(path("id"), "Must not be empty"));
            None
        }
        other => {
            issues.push(FieldIssue::new(path("id"), expected("string", other)));
            None
        }
    };

    let condition = match obj.get("condition") {
        Some(Json::String(s)) => {
            let parsed = Condition::parse(s);
            if parsed.is_none() {
                let allowed: Vec<String> = Condition::ALL
                    .iter()
                    .map(|c| format!("'{c}'"))
                    .collect();
                issues.push(FieldIssue::new(
                    path("condition"),
                    format!(
                        "Invalid enum value. Expected {}, received {s:?}",
                        allowed.join(" | ")
                    ),
                ));
            }
            parsed
        }
        other => {
            issues.push(FieldIssue::new(path("condition"), expected("string", other)));
            None
        }
    };

    let value = match obj.get("value") {
        Some(Json::String(s)) => Some(Value::Text(s.clone())),
        Some(Json::Number(n)) => Some(Value::Number(n.as_f64().unwrap_or(f64::NAN))),
        other => {
            issues.push(FieldIssue::new(
                path("value"),
                expected("string or number", other),
            ));
            None
        }
    };

    match (id, condition, value) {
        (Some(id), Some(condition), Some(value)) if issues.is_empty() => Ok(FilterClause {
            id,
            condition,
            value,
        }),
        _ => Err(issues),
    }
}

fn expected(what: &str, got: Option<&Json>) -> String {
    match got {
        None => "Required".to_string(),
        Some(v) => format!("Expected {what}, received {}", type_name(v)),
    }
}

fn type_name(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

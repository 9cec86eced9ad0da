use serde::{Deserialize, Serialize};

use super::value::{self, Value};

/// Question type tag the forms API uses for date inputs.
pub const DATE_PICKER: &str = "DatePicker";

/// How a question's value is ordered by `greater_than` / `less_than`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Plain,
    Date,
}

impl FieldKind {
    pub fn from_type_tag(tag: &str) -> Self {
        if tag == DATE_PICKER {
            FieldKind::Date
        } else {
            FieldKind::Plain
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub submission_id: String,
    pub submission_time: String,
    pub last_updated_at: String,
    pub questions: Vec<Question>,
    pub calculations: Vec<Calculation>,
    pub url_parameters: Vec<UrlParameter>,
    pub quiz: Quiz,
}

impl Submission {
    /// First question with the given id, if any.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub value: Value,
}

impl Question {
    pub fn kind(&self) -> FieldKind {
        FieldKind::from_type_tag(&self.field_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calculation {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    #[serde(deserialize_with = "value::non_null")]
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrlParameter {
    pub id: String,
    pub name: String,
    #[serde(deserialize_with = "value::non_null")]
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    #[serde(
        default,
        deserialize_with = "value::coerced_number",
        serialize_with = "value::serialize_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub score: Option<f64>,
    #[serde(
        default,
        deserialize_with = "value::coerced_number",
        serialize_with = "value::serialize_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_score: Option<f64>,
}

/// One page of submissions as returned by the forms API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsPage {
    pub responses: Vec<Submission>,
    pub total_responses: serde_json::Number,
    pub page_count: serde_json::Number,
}

use axum::extract::{Path, RawQuery, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppError;
use crate::filter;
use crate::models::Submission;
use crate::query;
use crate::state::SharedState;

#[derive(Debug, Serialize)]
pub struct FilteredResponses {
    pub data: ResponsesPage,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsesPage {
    pub responses: Vec<Submission>,
    pub total_responses: usize,
    pub page_count: serde_json::Number,
}

pub async fn filtered(
    State(state): State<SharedState>,
    Path(form_id): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Result<Json<FilteredResponses>, AppError> {
    // Reject bad input before spending an upstream call on it
    let params = query::parse_query_string(raw_query.as_deref());
    let validated = query::validate(&params)?;

    let page = state.source.fetch(&form_id, &validated.options).await?;

    let responses = filter::evaluate(&validated.filter, &page.responses);
    tracing::debug!(
        "Form {form_id}: {} of {} submissions matched {} clause(s)",
        responses.len(),
        page.responses.len(),
        validated.filter.clauses.len()
    );

    Ok(Json(FilteredResponses {
        data: ResponsesPage {
            total_responses: responses.len(),
            responses,
            page_count: page.page_count,
        },
    }))
}

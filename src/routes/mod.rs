pub mod responses;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

pub fn api_routes() -> Router<SharedState> {
    Router::new().route("/{form_id}/filteredResponses", get(responses::filtered))
}

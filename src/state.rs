use std::sync::Arc;

use crate::upstream::SubmissionSource;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub source: Arc<dyn SubmissionSource>,
}

pub mod fillout;

use async_trait::async_trait;

use crate::models::SubmissionsPage;
use crate::query::QueryOptions;

pub use fillout::FilloutClient;

#[derive(Debug)]
pub enum UpstreamError {
    /// The request never produced a response (connect, TLS, timeout, body read).
    Request(String),
    /// The API answered with a non-success status.
    Status { status: u16, body: String },
    /// The body did not have the expected submissions shape.
    Schema(String),
}

impl std::fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UpstreamError::Request(msg) => write!(f, "Upstream request failed: {msg}"),
            UpstreamError::Status { status, body } => {
                write!(f, "Upstream returned status {status}: {body}")
            }
            UpstreamError::Schema(msg) => write!(f, "Upstream schema mismatch: {msg}"),
        }
    }
}

impl std::error::Error for UpstreamError {}

/// Where submissions come from. One call per inbound request.
#[async_trait]
pub trait SubmissionSource: Send + Sync {
    async fn fetch(
        &self,
        form_id: &str,
        options: &QueryOptions,
    ) -> Result<SubmissionsPage, UpstreamError>;
}

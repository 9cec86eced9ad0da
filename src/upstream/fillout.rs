use async_trait::async_trait;
use reqwest::Url;

use crate::config::Config;
use crate::models::SubmissionsPage;
use crate::query::QueryOptions;

use super::{SubmissionSource, UpstreamError};

const BODY_SNIPPET_LEN: usize = 1024;

/// Client for the Fillout submissions API.
pub struct FilloutClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl FilloutClient {
    pub fn new(config: &Config) -> Result<Self, UpstreamError> {
        let client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .map_err(|e| UpstreamError::Request(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }

    /// `{base}/v1/api/forms/{form_id}/submissions?{options}`
    pub fn submissions_url(&self, form_id: &str, options: &QueryOptions) -> Result<Url, UpstreamError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| UpstreamError::Request(format!("Invalid API base URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| UpstreamError::Request("API base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(["v1", "api", "forms", form_id, "submissions"]);

        let pairs = options.to_upstream_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }

        Ok(url)
    }
}

#[async_trait]
impl SubmissionSource for FilloutClient {
    async fn fetch(
        &self,
        form_id: &str,
        options: &QueryOptions,
    ) -> Result<SubmissionsPage, UpstreamError> {
        let url = self.submissions_url(form_id, options)?;
        tracing::debug!("Fetching submissions from {url}");

        let resp = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .header("accept", "application/json")
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Submissions request failed: {e}");
                UpstreamError::Request(e.to_string())
            })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read submissions body: {e}");
            UpstreamError::Request(e.to_string())
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Forms API returned {status}: {snippet}");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body: snippet,
            });
        }

        serde_json::from_str::<SubmissionsPage>(&body).map_err(|e| {
            tracing::error!(
                "Submissions body did not match schema: {e} | body: {}",
                truncate_body(&body)
            );
            UpstreamError::Schema(e.to_string())
        })
    }
}

fn truncate_body(body: &str) -> String {
    body.chars().take(BODY_SNIPPET_LEN).collect()
}

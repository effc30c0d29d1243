//! HTTP client for the timeline insight service.

use std::time::Duration;

use async_trait::async_trait;
use finguru_core::expense::{Expense, InsightError, TimelineInsights};
use finguru_shared::config::TimelineConfig;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
struct TimelineRequest<'a> {
    expenses: &'a [Expense],
}

#[derive(Deserialize)]
struct TimelineResponse {
    insight: String,
}

/// Calls `POST {base_url}/timeline` with the user's expenses.
#[derive(Debug, Clone)]
pub struct HttpTimelineClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpTimelineClient {
    /// Builds a client with the configured request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &TimelineConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/timeline", config.base_url.trim_end_matches('/')),
        })
    }
}

fn classify(err: &reqwest::Error) -> InsightError {
    if err.is_timeout() {
        InsightError::Timeout
    } else if err.is_decode() {
        InsightError::Malformed(err.to_string())
    } else {
        InsightError::Unreachable(err.to_string())
    }
}

#[async_trait]
impl TimelineInsights for HttpTimelineClient {
    async fn insight(&self, expenses: &[Expense]) -> Result<String, InsightError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&TimelineRequest { expenses })
            .send()
            .await
            .map_err(|e| classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(InsightError::Status(status.as_u16()));
        }

        let body: TimelineResponse = response.json().await.map_err(|e| classify(&e))?;
        Ok(body.insight)
    }
}

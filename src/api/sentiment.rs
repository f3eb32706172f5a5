use async_trait::async_trait;

use crate::api::{ApiError, SentimentBackend, SentimentRequest, SentimentResponse};

/// Client for the sentiment classification endpoint: `POST { text }` as JSON,
/// response carries the label, confidence, and the label distribution.
pub struct SentimentClient {
    client: reqwest::Client,
    url: String,
}

impl SentimentClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl SentimentBackend for SentimentClient {
    async fn classify(&self, text: &str) -> Result<SentimentResponse, ApiError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SentimentRequest { text })
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::Request)?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        serde_json::from_str(&body).map_err(ApiError::Decode)
    }
}

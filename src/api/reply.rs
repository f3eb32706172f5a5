use async_trait::async_trait;

use crate::api::{ApiError, ReplyBackend, ReplyResponse};

/// Client for the reply-generation endpoint. The backend expects a form
/// field rather than a JSON body: `POST message=<text>`.
pub struct ReplyClient {
    client: reqwest::Client,
    url: String,
}

impl ReplyClient {
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ReplyBackend for ReplyClient {
    async fn reply(&self, text: &str) -> Result<String, ApiError> {
        let response = self
            .client
            .post(&self.url)
            .form(&[("message", text)])
            .send()
            .await
            .map_err(ApiError::Request)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiError::Request)?;
        if !status.is_success() {
            return Err(ApiError::Status { status, body });
        }

        let parsed: ReplyResponse = serde_json::from_str(&body).map_err(ApiError::Decode)?;
        Ok(parsed.response)
    }
}

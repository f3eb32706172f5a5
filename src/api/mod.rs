//! Payload types and client seams for the two backend endpoints.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Serialize)]
pub struct SentimentRequest<'a> {
    pub text: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SentimentResponse {
    pub text: String,
    pub sentiment: String,
    pub confidence: f32,
    pub probabilities: Probabilities,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Probabilities {
    pub negative: f32,
    pub neutral: f32,
    pub positive: f32,
}

#[derive(Debug, Deserialize)]
pub struct ReplyResponse {
    pub response: String,
}

/// Errors from either endpoint: transport failures, non-success statuses,
/// and responses that do not match the expected JSON shape.
#[derive(Debug)]
pub enum ApiError {
    Request(reqwest::Error),
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    Decode(serde_json::Error),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Request(source) => write!(f, "request failed: {source}"),
            ApiError::Status { status, body } => {
                write!(f, "request failed with status {status}: {body}")
            }
            ApiError::Decode(source) => write!(f, "failed to parse response: {source}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Request(source) => Some(source),
            ApiError::Status { .. } => None,
            ApiError::Decode(source) => Some(source),
        }
    }
}

/// Classification seam the session orchestrator is given at construction.
#[async_trait]
pub trait SentimentBackend: Send + Sync {
    async fn classify(&self, text: &str) -> Result<SentimentResponse, ApiError>;
}

/// Reply-generation seam the session orchestrator is given at construction.
#[async_trait]
pub trait ReplyBackend: Send + Sync {
    async fn reply(&self, text: &str) -> Result<String, ApiError>;
}

pub mod reply;
pub mod sentiment;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_response_matches_wire_shape() {
        let json = r#"{
            "text": "hello",
            "sentiment": "positive",
            "confidence": 0.92,
            "probabilities": { "negative": 0.03, "neutral": 0.05, "positive": 0.92 }
        }"#;
        let parsed: SentimentResponse = serde_json::from_str(json).expect("parse failed");
        assert_eq!(parsed.sentiment, "positive");
        assert!((parsed.confidence - 0.92).abs() < f32::EPSILON);
        assert!((parsed.probabilities.positive - 0.92).abs() < f32::EPSILON);
    }

    #[test]
    fn sentiment_request_serializes_text_field() {
        let body = serde_json::to_value(SentimentRequest { text: "hi" }).expect("serialize failed");
        assert_eq!(body, serde_json::json!({ "text": "hi" }));
    }

    #[test]
    fn reply_response_matches_wire_shape() {
        let parsed: ReplyResponse =
            serde_json::from_str(r#"{ "response": "  hello there  " }"#).expect("parse failed");
        assert_eq!(parsed.response, "  hello there  ");
    }

    #[test]
    fn schema_mismatch_is_a_decode_error() {
        let err = serde_json::from_str::<ReplyResponse>(r#"{ "reply": "hi" }"#)
            .map_err(ApiError::Decode)
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}

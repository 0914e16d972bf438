//! HTTP client for `POST /api/analysis`.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{AnalysisService, ServiceError};
use crate::models::{AnalysisResult, BirthDetails};

pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

/// Pull the human-readable message out of an error body. The service
/// wraps failures as `{"detail": "..."}`; anything else falls back to
/// the HTTP status line.
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(Value::as_str).map(String::from))
        .unwrap_or_else(|| format!("analysis service returned HTTP {status}"))
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn analyze(&self, details: &BirthDetails) -> Result<AnalysisResult, ServiceError> {
        let url = format!("{}/api/analysis", self.base_url);
        debug!("requesting analysis for '{}' from {}", details.name, url);

        let response = self
            .client
            .post(&url)
            .json(&json!({ "birth_details": details }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status.as_u16(), &body);
            warn!("analysis request failed with HTTP {status}: {message}");
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

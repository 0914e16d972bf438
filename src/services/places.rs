//! HTTP client for `GET /api/search-place`.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{PlaceResolver, ServiceError};
use crate::models::PlaceSearch;

pub struct HttpPlaceResolver {
    client: Client,
    base_url: String,
}

impl HttpPlaceResolver {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl PlaceResolver for HttpPlaceResolver {
    async fn resolve(&self, query: &str) -> Result<PlaceSearch, ServiceError> {
        let url = format!(
            "{}/api/search-place?query={}",
            self.base_url,
            urlencoding::encode(query)
        );
        debug!("resolving place '{query}'");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ServiceError::Api {
                status: status.as_u16(),
                message: format!("place search returned HTTP {status}"),
            });
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ServiceError::Decode(e.to_string()))
    }
}

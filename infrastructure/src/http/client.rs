//! Thin JSON-over-HTTP client shared by both gateways

use super::error::{HttpError, Result};
use reqwest::Url;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// HTTP client bound to one backend base URL
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| HttpError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(HttpError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("deskchat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Client(e.to_string()))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build `<base>/<segments...>`, percent-encoding each segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| HttpError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn post_json<B, R>(&self, segments: &[&str], body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.endpoint(segments)?;
        debug!("POST {}", url.path());
        let response = self.http.post(url).json(body).send().await?;
        Self::decode(response).await
    }

    pub async fn get_json<R: DeserializeOwned>(&self, segments: &[&str]) -> Result<R> {
        let url = self.endpoint(segments)?;
        debug!("GET {}", url.path());
        let response = self.http.get(url).send().await?;
        Self::decode(response).await
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response) -> Result<R> {
        let status = response.status();
        if !status.is_success() {
            return Err(HttpError::Status(status.as_u16()));
        }
        let raw = response.text().await?;
        serde_json::from_str(&raw).map_err(|e| HttpError::ParseError {
            error: e.to_string(),
            raw,
        })
    }
}

//! HTTP transport for the weather provider API.
//!
//! Every endpoint is a GET with an `apikey` query parameter. The client only
//! moves bytes; response bodies are parsed by the gateway after the cache.

use reqwest::Client;
use std::time::Duration;

use crate::error::WeatherError;

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct ProviderClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ProviderClient {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Canonical request signature: path plus the full parameter set,
    /// API key included. Used as the cache key for this request.
    pub fn request_signature(&self, path: &str, params: &[(&str, &str)]) -> String {
        let mut signature = format!("{}?apikey={}", path, self.api_key);
        for (name, value) in params {
            signature.push('&');
            signature.push_str(name);
            signature.push('=');
            signature.push_str(value);
        }
        signature
    }

    /// Issue a GET against the provider and return the raw response body.
    pub async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, WeatherError> {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .client
            .get(&url)
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        self.handle_response(path, response).await
    }

    async fn handle_response(
        &self,
        path: &str,
        response: reqwest::Response,
    ) -> Result<String, WeatherError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.text().await?);
        }

        match status.as_u16() {
            401 | 403 => Err(WeatherError::InvalidApiKey),
            404 => Err(WeatherError::LocationNotFound(path.to_string())),
            // The provider answers 503 when the request quota is exhausted
            429 | 503 => Err(WeatherError::RateLimited),
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(WeatherError::ApiError(format!("{}: {}", status, text)))
            }
        }
    }
}

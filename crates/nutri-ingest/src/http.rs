//! HTTP client for the Open Food Facts search API.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use nutri_model::ApiConfig;

use crate::error::{IngestError, Result};
use crate::source::ProductSource;

/// User agent string for API requests.
const USER_AGENT_VALUE: &str = concat!("nutrimart/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    products: Vec<Value>,
}

/// Blocking client for `GET <base>/cgi/search.pl`.
#[derive(Debug, Clone)]
pub struct OpenFoodFactsClient {
    client: Client,
    base_url: String,
    connect_check_timeout: Duration,
}

impl OpenFoodFactsClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| IngestError::Http {
                url: config.url.clone(),
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            connect_check_timeout: config.connect_check_timeout(),
        })
    }

    fn search_url(&self, page: usize, page_size: usize) -> String {
        format!(
            "{}/cgi/search.pl?action=process&page_size={page_size}&page={page}&json=true",
            self.base_url
        )
    }
}

impl ProductSource for OpenFoodFactsClient {
    /// Issues `GET <base>` with the short reachability timeout.
    fn check_connection(&self) -> bool {
        match self
            .client
            .get(&self.base_url)
            .timeout(self.connect_check_timeout)
            .send()
        {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                tracing::warn!(url = %self.base_url, status = %response.status(), "API answered with an error status");
                false
            }
            Err(error) => {
                tracing::warn!(url = %self.base_url, %error, "API unreachable");
                false
            }
        }
    }

    fn fetch_page(&self, page: usize, page_size: usize) -> Result<Vec<Value>> {
        let url = self.search_url(page, page_size);
        tracing::debug!(%url, "fetching product page");

        let http_error = |e: reqwest::Error| IngestError::Http {
            url: url.clone(),
            message: e.to_string(),
        };
        let response = self
            .client
            .get(&url)
            .send()
            .and_then(reqwest::blocking::Response::error_for_status)
            .map_err(http_error)?;
        let body: SearchResponse = response.json().map_err(|e| IngestError::Json {
            url: url.clone(),
            message: e.to_string(),
        })?;
        Ok(body.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_url_has_paging_parameters() {
        let config = ApiConfig {
            url: "https://example.org/".to_string(),
            ..ApiConfig::default()
        };
        let client = OpenFoodFactsClient::new(&config).unwrap();
        assert_eq!(
            client.search_url(3, 50),
            "https://example.org/cgi/search.pl?action=process&page_size=50&page=3&json=true"
        );
    }

    #[test]
    fn search_response_defaults_to_no_products() {
        let body: SearchResponse = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(body.products.is_empty());
    }
}

//! Client for the swap routing service, currently the 0x swap API
//!
//! The client is a thin transport: it parses response shapes but leaves the
//! semantic checks of a route to its callers
pub mod error;
pub mod intent;
pub mod price;
pub mod sources;

use std::{collections::BTreeSet, sync::Arc};

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use swap_orchestrator_api::{
    route::RouteQuote, API_KEY_HEADER, API_VERSION, API_VERSION_HEADER,
};

use self::{error::RouteServiceError, intent::SwapIntent};

/// The default base url of the routing service
pub const DEFAULT_BASE_URL: &str = "https://api.0x.org";

/// The routing queries the swap workflow depends on
#[async_trait]
pub trait RouteService: Send + Sync {
    /// List the names of the liquidity sources available on a chain
    async fn list_liquidity_sources(
        &self,
        chain_id: u64,
    ) -> Result<BTreeSet<String>, RouteServiceError>;

    /// Get an indicative price for a swap intent
    async fn get_price(&self, intent: &SwapIntent) -> Result<RouteQuote, RouteServiceError>;
}

/// The client for interacting with the routing service
#[derive(Clone)]
pub struct ZeroExClient {
    /// The API key to use for requests
    api_key: String,
    /// The base URL of the routing service
    base_url: String,
    /// The underlying HTTP client
    http_client: Arc<Client>,
}

impl ZeroExClient {
    /// Create a new client
    pub fn new(api_key: String, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { api_key, base_url, http_client: Arc::new(Client::new()) }
    }

    /// Get a full URL for a given endpoint
    fn build_url(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Url, RouteServiceError> {
        let url = if !endpoint.starts_with('/') {
            format!("{}/{}", self.base_url, endpoint)
        } else {
            format!("{}{}", self.base_url, endpoint)
        };

        Url::parse_with_params(&url, params).map_err(RouteServiceError::parse)
    }

    /// Build an authenticated get request to the routing service
    fn build_get_request(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<RequestBuilder, RouteServiceError> {
        let url = self.build_url(endpoint, params)?;
        Ok(self
            .http_client
            .get(url)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .header(API_VERSION_HEADER, API_VERSION))
    }

    /// Send a get request to the routing service
    async fn send_get_request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, RouteServiceError> {
        let response = self.build_get_request(endpoint, params)?.send().await?;
        handle_http_response(response).await
    }
}

#[async_trait]
impl RouteService for ZeroExClient {
    async fn list_liquidity_sources(
        &self,
        chain_id: u64,
    ) -> Result<BTreeSet<String>, RouteServiceError> {
        self.fetch_sources(chain_id).await
    }

    async fn get_price(&self, intent: &SwapIntent) -> Result<RouteQuote, RouteServiceError> {
        self.fetch_price(intent).await
    }
}

/// Check the status of a response and parse its body
///
/// A non-2xx status is an http error carrying the response body; a body that
/// does not match the expected shape is a parse error
async fn handle_http_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, RouteServiceError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(RouteServiceError::http(format!("status {status}: {body}")));
    }

    serde_json::from_str(&body).map_err(RouteServiceError::parse)
}

//! Error types for the route client

use swap_orchestrator_api::route::RouteQuoteError;

/// An error returned by the route client
#[derive(Debug, Clone, thiserror::Error)]
pub enum RouteServiceError {
    /// A transport error or a non-2xx response
    #[error("http error: {0}")]
    Http(String),
    /// An error parsing a url or a response body
    #[error("parse error: {0}")]
    Parse(String),
    /// A request that violates the routing service's input constraints
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    /// A response that violates the route invariants
    #[error("malformed quote: {0}")]
    MalformedQuote(String),
    /// The routing service found no liquidity for the pair
    #[error("no liquidity available for the requested pair")]
    NoLiquidity,
}

impl RouteServiceError {
    /// Create a new http error
    #[allow(clippy::needless_pass_by_value)]
    pub fn http<T: ToString>(e: T) -> Self {
        RouteServiceError::Http(e.to_string())
    }

    /// Create a new parse error
    #[allow(clippy::needless_pass_by_value)]
    pub fn parse<T: ToString>(e: T) -> Self {
        RouteServiceError::Parse(e.to_string())
    }

    /// Create a new invalid request error
    #[allow(clippy::needless_pass_by_value)]
    pub fn invalid_request<T: ToString>(e: T) -> Self {
        RouteServiceError::InvalidRequest(e.to_string())
    }

    /// Create a new malformed quote error
    #[allow(clippy::needless_pass_by_value)]
    pub fn malformed_quote<T: ToString>(e: T) -> Self {
        RouteServiceError::MalformedQuote(e.to_string())
    }
}

impl From<reqwest::Error> for RouteServiceError {
    fn from(e: reqwest::Error) -> Self {
        RouteServiceError::http(e)
    }
}

impl From<RouteQuoteError> for RouteServiceError {
    fn from(e: RouteQuoteError) -> Self {
        match e {
            RouteQuoteError::NoLiquidity => RouteServiceError::NoLiquidity,
            other => RouteServiceError::malformed_quote(other),
        }
    }
}

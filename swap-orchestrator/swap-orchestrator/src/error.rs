//! Error types for the swap orchestrator

use thiserror::Error;

use crate::{
    approvals::error::ApprovalError, chain_client::error::ChainReadError,
    route_client::error::RouteServiceError,
};

/// Type alias for Results using SwapError
pub type SwapResult<T> = Result<T, SwapError>;

/// The error that ends a swap run
///
/// Every stage of the workflow fails the whole run; there is no recovery
#[derive(Error, Debug, Clone)]
pub enum SwapError {
    /// A missing or invalid setting, detected before any network call
    #[error("configuration error: {0}")]
    Configuration(String),
    /// A failure reading chain state
    #[error("chain read failed: {0}")]
    ChainRead(#[from] ChainReadError),
    /// A failure querying the routing service
    #[error("routing service failed: {0}")]
    RouteService(#[from] RouteServiceError),
    /// A failure granting the allowance the route requires
    #[error("approval failed: {0}")]
    ApprovalFailed(#[from] ApprovalError),
}

impl SwapError {
    /// Create a configuration error
    #[allow(clippy::needless_pass_by_value)]
    pub fn configuration<T: ToString>(e: T) -> Self {
        Self::Configuration(e.to_string())
    }
}

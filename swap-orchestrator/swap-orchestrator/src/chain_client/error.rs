//! Error types for the chain client

/// An error reading state from the chain
#[derive(Debug, Clone, thiserror::Error)]
pub enum ChainReadError {
    /// An error returned by the RPC node
    #[error("rpc error: {0}")]
    Rpc(String),
    /// An error calling a contract
    #[error("contract call error: {0}")]
    Contract(String),
}

impl ChainReadError {
    /// Create a new rpc error
    #[allow(clippy::needless_pass_by_value)]
    pub fn rpc<T: ToString>(e: T) -> Self {
        ChainReadError::Rpc(e.to_string())
    }

    /// Create a new contract call error
    #[allow(clippy::needless_pass_by_value)]
    pub fn contract<T: ToString>(e: T) -> Self {
        ChainReadError::Contract(e.to_string())
    }
}

impl From<alloy::contract::Error> for ChainReadError {
    fn from(e: alloy::contract::Error) -> Self {
        ChainReadError::contract(e)
    }
}

//! Read-only access to token and account state on chain
pub mod error;
pub mod token;

use alloy::{
    providers::{DynProvider, Provider},
    signers::local::PrivateKeySigner,
};
use alloy_primitives::{Address, U256};
use async_trait::async_trait;
use tracing::instrument;

use crate::helpers::{build_provider, IERC20};

use self::error::ChainReadError;

/// The read-only chain queries the swap workflow depends on
///
/// Failures are returned to the caller as-is; retry policy belongs to the
/// caller
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Get the number of decimals of a token
    async fn get_decimals(&self, token: Address) -> Result<u8, ChainReadError>;

    /// Get the symbol of a token
    async fn get_symbol(&self, token: Address) -> Result<String, ChainReadError>;

    /// Get the token balance of an account, in atoms
    async fn get_balance(&self, token: Address, owner: Address) -> Result<U256, ChainReadError>;

    /// Get the addresses controlled by this client, the signer's own address
    /// first
    async fn get_addresses(&self) -> Result<Vec<Address>, ChainReadError>;
}

/// A chain reader backed by an alloy provider
#[derive(Clone)]
pub struct AlloyChainClient {
    /// The RPC provider, configured with the signer's wallet
    provider: DynProvider,
    /// The address of the signer
    signer_address: Address,
}

impl AlloyChainClient {
    /// Create a new client over an existing provider
    pub fn new(provider: DynProvider, signer_address: Address) -> Self {
        Self { provider, signer_address }
    }

    /// Create a new client, building a signing provider for the given RPC url
    pub fn from_rpc_url(rpc_url: &str, wallet: PrivateKeySigner) -> Result<Self, ChainReadError> {
        let signer_address = wallet.address();
        let provider = build_provider(rpc_url, wallet).map_err(ChainReadError::rpc)?;
        Ok(Self::new(provider, signer_address))
    }

    /// The underlying provider
    pub fn provider(&self) -> DynProvider {
        self.provider.clone()
    }

    /// Get the id of the chain the RPC node serves
    pub async fn get_chain_id(&self) -> Result<u64, ChainReadError> {
        self.provider.get_chain_id().await.map_err(ChainReadError::rpc)
    }

    /// Get an ERC20 binding for the given token
    fn erc20(&self, token: Address) -> IERC20::IERC20Instance<DynProvider> {
        IERC20::new(token, self.provider.clone())
    }
}

#[async_trait]
impl ChainReader for AlloyChainClient {
    #[instrument(skip(self))]
    async fn get_decimals(&self, token: Address) -> Result<u8, ChainReadError> {
        let decimals = self.erc20(token).decimals().call().await?;
        Ok(decimals)
    }

    #[instrument(skip(self))]
    async fn get_symbol(&self, token: Address) -> Result<String, ChainReadError> {
        let symbol = self.erc20(token).symbol().call().await?;
        Ok(symbol)
    }

    #[instrument(skip(self))]
    async fn get_balance(&self, token: Address, owner: Address) -> Result<U256, ChainReadError> {
        let balance = self.erc20(token).balanceOf(owner).call().await?;
        Ok(balance)
    }

    async fn get_addresses(&self) -> Result<Vec<Address>, ChainReadError> {
        Ok(vec![self.signer_address])
    }
}

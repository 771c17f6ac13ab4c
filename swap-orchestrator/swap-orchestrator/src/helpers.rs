//! Helpers for the swap orchestrator
#![allow(missing_docs)]

use std::fmt::Display;

use alloy::{
    providers::{DynProvider, ProviderBuilder},
    signers::local::PrivateKeySigner,
    sol,
};
use reqwest::Url;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

// ---------
// | ERC20 |
// ---------

sol! {
    #[sol(rpc)]
    interface IERC20 {
        function symbol() external view returns (string memory);
        function decimals() external view returns (uint8);
        function balanceOf(address account) external view returns (uint256);
        function approve(address spender, uint256 value) external returns (bool);
    }
}

// ----------
// | Chains |
// ----------

/// The chains the routing service supports swaps on
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Chain {
    /// Scroll mainnet
    Scroll,
    /// Ethereum mainnet
    Ethereum,
    /// Arbitrum One
    Arbitrum,
    /// Base mainnet
    Base,
    /// OP mainnet
    Optimism,
    /// Polygon PoS
    Polygon,
}

impl Chain {
    /// The integer chain id
    pub fn chain_id(self) -> u64 {
        match self {
            Chain::Scroll => 534352,
            Chain::Ethereum => 1,
            Chain::Arbitrum => 42161,
            Chain::Base => 8453,
            Chain::Optimism => 10,
            Chain::Polygon => 137,
        }
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Chain::Scroll => write!(f, "Scroll"),
            Chain::Ethereum => write!(f, "Ethereum"),
            Chain::Arbitrum => write!(f, "Arbitrum"),
            Chain::Base => write!(f, "Base"),
            Chain::Optimism => write!(f, "Optimism"),
            Chain::Polygon => write!(f, "Polygon"),
        }
    }
}

// ------------
// | Provider |
// ------------

/// Build a signing provider over HTTP for the given RPC url
pub fn build_provider(rpc_url: &str, wallet: PrivateKeySigner) -> Result<DynProvider, String> {
    let url: Url = rpc_url.parse().map_err(|e| format!("invalid rpc url {rpc_url}: {e}"))?;
    let provider = ProviderBuilder::new().wallet(wallet).connect_http(url);
    Ok(DynProvider::new(provider))
}

// -----------
// | Logging |
// -----------

/// Configure the logging subscriber
pub fn setup_logging(json_logs: bool) {
    let filter =
        EnvFilter::builder().with_default_directive(LevelFilter::INFO.into()).from_env_lossy();
    let registry = tracing_subscriber::registry().with(filter);

    if json_logs {
        registry
            .with(fmt::layer().with_file(true).with_line_number(true).json().flatten_event(true))
            .init();
    } else {
        registry.with(fmt::layer().with_target(false)).init();
    }
}

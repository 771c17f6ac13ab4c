//! CLI argument definition & parsing for the swap orchestrator

use std::str::FromStr;

use alloy::signers::local::PrivateKeySigner;
use alloy_primitives::Address;
use clap::Parser;
use reqwest::Url;
use swap_orchestrator_api::MAX_BPS;

use crate::{
    error::{SwapError, SwapResult},
    helpers::Chain,
    orchestrator::SwapConfig,
    route_client::DEFAULT_BASE_URL,
};

// -------------
// | Constants |
// -------------

/// WETH on Scroll
const DEFAULT_SELL_TOKEN: &str = "0x5300000000000000000000000000000000000004";
/// wstETH on Scroll
const DEFAULT_BUY_TOKEN: &str = "0xf610A9dfB7C89644979b4A0f27063E9e7d7Cda32";
/// The default amount to sell, in whole tokens
const DEFAULT_SELL_AMOUNT: &str = "0.1";
/// The default integrator fee, 1%
const DEFAULT_AFFILIATE_FEE_BPS: u32 = 100;

/// The cli for the swap orchestrator
#[rustfmt::skip]
#[derive(Parser, Debug, Clone)]
#[clap(about = "Prepare a token swap through the 0x API")]
pub struct Cli {
    // --- Secrets --- //

    /// The private key of the swapping account, hex encoded
    #[clap(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub private_key: String,
    /// The API key for the routing service
    #[clap(long, env = "ZERO_EX_API_KEY", hide_env_values = true)]
    pub api_key: String,
    /// The RPC url of the chain to swap on
    #[clap(long, env = "RPC_URL")]
    pub rpc_url: String,

    // --- Routing Service --- //

    /// The chain to swap on
    #[clap(long, env = "CHAIN", value_enum, default_value = "scroll")]
    pub chain: Chain,
    /// The base url of the routing service
    #[clap(long, env = "ZERO_EX_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    // --- Swap Params --- //

    /// The token to sell
    #[clap(long, default_value = DEFAULT_SELL_TOKEN)]
    pub sell_token: String,
    /// The token to buy
    #[clap(long, default_value = DEFAULT_BUY_TOKEN)]
    pub buy_token: String,
    /// The amount of the sell token to sell, in whole tokens
    #[clap(long, default_value = DEFAULT_SELL_AMOUNT)]
    pub sell_amount: String,
    /// The integrator fee charged on the swap, in basis points
    #[clap(long, default_value_t = DEFAULT_AFFILIATE_FEE_BPS)]
    pub affiliate_fee_bps: u32,
    /// Whether the integrator collects positive slippage
    #[clap(long, default_value_t = true, action = clap::ArgAction::Set)]
    pub surplus_collection: bool,

    // --- Telemetry --- //

    /// Whether to emit JSON formatted logs
    #[clap(long, env = "JSON_LOGS")]
    pub json_logs: bool,
}

impl Cli {
    /// Validate the CLI arguments
    ///
    /// Every check here runs before any network call
    pub fn validate(&self) -> SwapResult<()> {
        if self.api_key.trim().is_empty() {
            return Err(SwapError::configuration("ZERO_EX_API_KEY must not be empty"));
        }

        Url::parse(&self.rpc_url)
            .map_err(|e| SwapError::configuration(format!("invalid RPC_URL: {e}")))?;
        Url::parse(&self.api_base_url)
            .map_err(|e| SwapError::configuration(format!("invalid ZERO_EX_BASE_URL: {e}")))?;

        if self.affiliate_fee_bps > MAX_BPS {
            return Err(SwapError::configuration(format!(
                "affiliate fee of {} bps exceeds {MAX_BPS} bps",
                self.affiliate_fee_bps
            )));
        }

        Ok(())
    }

    /// Parse the signing wallet from the private key
    pub fn wallet(&self) -> SwapResult<PrivateKeySigner> {
        PrivateKeySigner::from_str(self.private_key.trim())
            .map_err(|e| SwapError::configuration(format!("invalid PRIVATE_KEY: {e}")))
    }

    /// Build the parameters of the swap run
    pub fn swap_config(&self) -> SwapResult<SwapConfig> {
        Ok(SwapConfig {
            chain: self.chain,
            sell_token: parse_address("sell token", &self.sell_token)?,
            buy_token: parse_address("buy token", &self.buy_token)?,
            sell_amount: self.sell_amount.clone(),
            affiliate_fee_bps: self.affiliate_fee_bps,
            surplus_collection: self.surplus_collection,
        })
    }
}

/// Parse a token address argument
fn parse_address(name: &str, value: &str) -> SwapResult<Address> {
    Address::from_str(value.trim())
        .map_err(|e| SwapError::configuration(format!("invalid {name} address {value}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A well-known development private key
    const DEV_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    /// Parse a CLI with the mandatory secrets and the given extra arguments
    fn parse(extra: &[&str]) -> Cli {
        let mut args = vec![
            "swap-orchestrator",
            "--private-key",
            DEV_KEY,
            "--api-key",
            "test-key",
            "--rpc-url",
            "http://localhost:8545",
            "--chain",
            "scroll",
            "--api-base-url",
            "https://api.0x.org",
        ];
        args.extend_from_slice(extra);
        Cli::try_parse_from(args).unwrap()
    }

    /// Test the defaults of the swap parameters
    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        cli.validate().unwrap();

        let config = cli.swap_config().unwrap();
        assert_eq!(config.chain, Chain::Scroll);
        assert_eq!(config.sell_token, Address::from_str(DEFAULT_SELL_TOKEN).unwrap());
        assert_eq!(config.buy_token, Address::from_str(DEFAULT_BUY_TOKEN).unwrap());
        assert_eq!(config.sell_amount, "0.1");
        assert_eq!(config.affiliate_fee_bps, 100);
        assert!(config.surplus_collection);
    }

    /// Test overriding the swap parameters
    #[test]
    fn test_overrides() {
        let cli = parse(&["--affiliate-fee-bps", "0", "--surplus-collection", "false"]);
        let config = cli.swap_config().unwrap();

        assert_eq!(config.affiliate_fee_bps, 0);
        assert!(!config.surplus_collection);
    }

    /// Test that the private key is accepted with or without a prefix
    #[test]
    fn test_wallet() {
        let with_prefix = parse(&[]).wallet().unwrap();

        let mut cli = parse(&[]);
        cli.private_key = DEV_KEY.trim_start_matches("0x").to_string();
        assert_eq!(cli.wallet().unwrap().address(), with_prefix.address());

        cli.private_key = "0x1234".to_string();
        assert!(matches!(cli.wallet(), Err(SwapError::Configuration(_))));
    }

    /// Test that invalid settings are configuration errors
    #[test]
    fn test_invalid_settings() {
        let mut cli = parse(&[]);
        cli.rpc_url = "not a url".to_string();
        assert!(matches!(cli.validate(), Err(SwapError::Configuration(_))));

        let mut cli = parse(&[]);
        cli.api_key = " ".to_string();
        assert!(matches!(cli.validate(), Err(SwapError::Configuration(_))));

        let cli = parse(&["--affiliate-fee-bps", "10001"]);
        assert!(matches!(cli.validate(), Err(SwapError::Configuration(_))));

        let cli = parse(&["--sell-token", "0xnothex"]);
        assert!(matches!(cli.swap_config(), Err(SwapError::Configuration(_))));
    }
}

//! API types for indicative price requests
//!
//! Mirrors the subset of the permit2 price endpoint documented at
//! <https://0x.org/docs/api#tag/Swap/operation/swap::permit2::getPrice>
use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::serialization::{
    bps_serialization, nullable_bps_serialization, option_u256_string_serialization,
    u256_string_serialization,
};

// --------------
// | Api Routes |
// --------------

/// The route fetching an indicative price for a permit2 swap
pub const PRICE_ROUTE: &str = "/swap/permit2/price";

// ------------------
// | Request Params |
// ------------------

/// The query parameters of a price request
///
/// The monetization parameters are always sent, even when they are zero, so
/// that the returned price deterministically reflects the fee configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceParams {
    /// The id of the chain to swap on
    pub chain_id: u64,
    /// The token being sold
    pub sell_token: Address,
    /// The token being bought
    pub buy_token: Address,
    /// The amount of the sell token, in atoms
    pub sell_amount: U256,
    /// The address that will execute the swap
    pub taker: Address,
    /// The integrator fee, in basis points of the sell amount
    pub affiliate_fee_bps: u32,
    /// Whether positive slippage is collected by the integrator
    pub surplus_collection: bool,
}

impl PriceParams {
    /// Render the parameters as query string pairs, in the order the routing
    /// service documents them
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("chainId", self.chain_id.to_string()),
            ("sellToken", format!("{:#x}", self.sell_token)),
            ("buyToken", format!("{:#x}", self.buy_token)),
            ("sellAmount", self.sell_amount.to_string()),
            ("taker", format!("{:#x}", self.taker)),
            ("affiliateFee", self.affiliate_fee_bps.to_string()),
            ("surplusCollection", self.surplus_collection.to_string()),
        ]
    }
}

// -------------
// | Api Types |
// -------------

/// A single leg of a route, attributed to one liquidity source
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFill {
    /// The token flowing into the leg
    #[serde(default)]
    pub from: Option<Address>,
    /// The token flowing out of the leg
    #[serde(default)]
    pub to: Option<Address>,
    /// The name of the liquidity source
    pub source: String,
    /// The share of the route routed through this source
    #[serde(with = "bps_serialization")]
    pub proportion_bps: u32,
}

/// A token appearing in a route
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApiRouteToken {
    /// The token address
    pub address: Address,
    /// The token symbol, if known
    #[serde(default)]
    pub symbol: Option<String>,
}

/// The route the routing service selected
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiRoute {
    /// The legs of the route, in routing order
    #[serde(default)]
    pub fills: Vec<ApiFill>,
    /// The tokens the route passes through
    #[serde(default)]
    pub tokens: Vec<ApiRouteToken>,
}

/// Transfer tax rates of a token
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTokenTaxes {
    /// The tax charged when buying the token
    #[serde(default, with = "nullable_bps_serialization")]
    pub buy_tax_bps: u32,
    /// The tax charged when selling the token
    #[serde(default, with = "nullable_bps_serialization")]
    pub sell_tax_bps: u32,
}

/// Metadata for the two tokens of the swap
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTokenMetadata {
    /// The buy token's taxes
    #[serde(default)]
    pub buy_token: ApiTokenTaxes,
    /// The sell token's taxes
    #[serde(default)]
    pub sell_token: ApiTokenTaxes,
}

/// An allowance the taker must grant before the swap can execute
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowanceIssue {
    /// The contract that must be approved
    pub spender: Address,
    /// The allowance amount the routing service reported
    #[serde(alias = "actual", default, with = "u256_string_serialization")]
    pub amount: U256,
}

/// A taker balance that is too small for the requested swap
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceIssue {
    /// The token whose balance is insufficient
    pub token: Address,
    /// The taker's current balance
    #[serde(with = "u256_string_serialization")]
    pub actual: U256,
    /// The balance the swap requires
    #[serde(with = "u256_string_serialization")]
    pub expected: U256,
}

/// Non-fatal problems the routing service found with the request
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIssues {
    /// The approval required before swapping, if any
    #[serde(default)]
    pub allowance: Option<AllowanceIssue>,
    /// An insufficient taker balance, if any
    #[serde(default)]
    pub balance: Option<BalanceIssue>,
    /// Whether the routing service could not fully simulate the swap
    #[serde(default)]
    pub simulation_incomplete: bool,
    /// Requested sources that the routing service did not recognize
    #[serde(default)]
    pub invalid_sources_passed: Vec<String>,
}

/// A fee charged on the swap
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiFee {
    /// The fee amount, in atoms of `token`
    #[serde(with = "u256_string_serialization")]
    pub amount: U256,
    /// The token the fee is charged in
    pub token: Address,
    /// The kind of fee, e.g. `volume`
    #[serde(rename = "type")]
    pub fee_type: String,
}

/// The fees charged on the swap
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiFees {
    /// The integrator (affiliate) fee
    #[serde(default)]
    pub integrator_fee: Option<ApiFee>,
    /// The routing service's own fee
    #[serde(default)]
    pub zero_ex_fee: Option<ApiFee>,
    /// The gas fee, for gasless flows
    #[serde(default)]
    pub gas_fee: Option<ApiFee>,
}

/// Returns `true`, the default for `liquidityAvailable`
fn default_liquidity_available() -> bool {
    true
}

/// The response body of the price route
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceResponse {
    /// Whether the routing service found any liquidity for the pair
    #[serde(default = "default_liquidity_available")]
    pub liquidity_available: bool,
    /// The block the price was computed at
    #[serde(default)]
    pub block_number: Option<String>,
    /// The quoted amount of the buy token, in atoms
    #[serde(default, with = "option_u256_string_serialization")]
    pub buy_amount: Option<U256>,
    /// The minimum buy amount after slippage, in atoms
    #[serde(default, with = "option_u256_string_serialization")]
    pub min_buy_amount: Option<U256>,
    /// The sell amount, in atoms
    #[serde(default, with = "option_u256_string_serialization")]
    pub sell_amount: Option<U256>,
    /// The estimated gas limit of the swap
    #[serde(default, with = "option_u256_string_serialization")]
    pub gas: Option<U256>,
    /// The gas price the estimate assumes, in wei
    #[serde(default, with = "option_u256_string_serialization")]
    pub gas_price: Option<U256>,
    /// The estimated network fee of the swap, in wei
    #[serde(default, with = "option_u256_string_serialization")]
    pub total_network_fee: Option<U256>,
    /// The fees charged on the swap
    #[serde(default)]
    pub fees: ApiFees,
    /// Non-fatal problems with the request
    #[serde(default)]
    pub issues: ApiIssues,
    /// The selected route, absent when no liquidity is available
    pub route: Option<ApiRoute>,
    /// Tax metadata for the swapped tokens, absent when no liquidity is
    /// available
    pub token_metadata: Option<ApiTokenMetadata>,
}

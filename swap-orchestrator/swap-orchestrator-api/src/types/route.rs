//! Validated route types, derived from raw price responses
use alloy_primitives::U256;

use crate::{
    price::{AllowanceIssue, ApiFees, ApiTokenTaxes, BalanceIssue, PriceResponse},
    MAX_BPS,
};

// ----------
// | Errors |
// ----------

/// An error converting or validating a route quote
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouteQuoteError {
    /// The routing service found no liquidity for the pair
    #[error("no liquidity available for the requested pair")]
    NoLiquidity,
    /// A response reporting liquidity but carrying no route or token metadata
    #[error("price response is missing its {0}")]
    MissingRoute(String),
    /// A basis point value lies outside `[0, 10000]`
    #[error("{field} is {value} bps, above the 10000 bps maximum")]
    BpsOutOfRange {
        /// The offending field
        field: String,
        /// The offending value
        value: u32,
    },
    /// The fills of a non-empty route do not sum to 100%
    #[error("route fills sum to {0} bps, expected 10000")]
    FillSum(u32),
}

// ---------
// | Types |
// ---------

/// A portion of a route attributed to one liquidity source
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fill {
    /// The liquidity source name
    pub source: String,
    /// The share of the route, in basis points
    pub proportion_bps: u32,
}

/// The buy and sell tax rates of a token, in basis points
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaxInfo {
    /// The tax charged when buying the token
    pub buy_tax_bps: u32,
    /// The tax charged when selling the token
    pub sell_tax_bps: u32,
}

impl TaxInfo {
    /// Whether either rate is non-zero
    pub fn is_taxed(&self) -> bool {
        self.buy_tax_bps > 0 || self.sell_tax_bps > 0
    }
}

impl From<ApiTokenTaxes> for TaxInfo {
    fn from(taxes: ApiTokenTaxes) -> Self {
        Self { buy_tax_bps: taxes.buy_tax_bps, sell_tax_bps: taxes.sell_tax_bps }
    }
}

/// A route quote for a single swap intent
#[derive(Clone, Debug, Default)]
pub struct RouteQuote {
    /// The route legs, in upstream routing order
    pub fills: Vec<Fill>,
    /// The approval required before swapping, if any
    pub allowance_issue: Option<AllowanceIssue>,
    /// The buy token's tax rates
    pub buy_token_tax: TaxInfo,
    /// The sell token's tax rates
    pub sell_token_tax: TaxInfo,
    /// The quoted buy amount, in atoms
    pub buy_amount: Option<U256>,
    /// The minimum buy amount after slippage, in atoms
    pub min_buy_amount: Option<U256>,
    /// The estimated network fee, in wei
    pub total_network_fee: Option<U256>,
    /// The fees charged on the swap
    pub fees: ApiFees,
    /// An insufficient taker balance, if the routing service reported one
    pub balance_issue: Option<BalanceIssue>,
    /// Whether the routing service could not fully simulate the swap
    pub simulation_incomplete: bool,
    /// Requested sources the routing service did not recognize
    pub invalid_sources_passed: Vec<String>,
}

impl RouteQuote {
    /// Check the basis point invariants of the quote
    ///
    /// Every fill and tax rate must lie within `[0, 10000]`, and the fills of
    /// a non-empty route must sum to exactly `10000`. A violation means the
    /// routing service returned a malformed route; it is never normalized away
    pub fn validate(&self) -> Result<(), RouteQuoteError> {
        for fill in &self.fills {
            check_bps(&format!("fill `{}`", fill.source), fill.proportion_bps)?;
        }

        check_bps("buy token buy tax", self.buy_token_tax.buy_tax_bps)?;
        check_bps("buy token sell tax", self.buy_token_tax.sell_tax_bps)?;
        check_bps("sell token buy tax", self.sell_token_tax.buy_tax_bps)?;
        check_bps("sell token sell tax", self.sell_token_tax.sell_tax_bps)?;

        if self.fills.is_empty() {
            return Ok(());
        }

        let total: u32 = self.fills.iter().map(|f| f.proportion_bps).sum();
        if total != MAX_BPS {
            return Err(RouteQuoteError::FillSum(total));
        }

        Ok(())
    }
}

/// Check that a single basis point value is at most 100%
fn check_bps(field: &str, value: u32) -> Result<(), RouteQuoteError> {
    if value > MAX_BPS {
        return Err(RouteQuoteError::BpsOutOfRange { field: field.to_string(), value });
    }

    Ok(())
}

impl TryFrom<PriceResponse> for RouteQuote {
    type Error = RouteQuoteError;

    fn try_from(resp: PriceResponse) -> Result<Self, Self::Error> {
        if !resp.liquidity_available {
            return Err(RouteQuoteError::NoLiquidity);
        }

        let route = resp.route.ok_or_else(|| RouteQuoteError::MissingRoute("route".into()))?;
        let token_metadata = resp
            .token_metadata
            .ok_or_else(|| RouteQuoteError::MissingRoute("token metadata".into()))?;

        let fills = route
            .fills
            .into_iter()
            .map(|f| Fill { source: f.source, proportion_bps: f.proportion_bps })
            .collect();

        Ok(Self {
            fills,
            allowance_issue: resp.issues.allowance,
            buy_token_tax: token_metadata.buy_token.into(),
            sell_token_tax: token_metadata.sell_token.into(),
            buy_amount: resp.buy_amount,
            min_buy_amount: resp.min_buy_amount,
            total_network_fee: resp.total_network_fee,
            fees: resp.fees,
            balance_issue: resp.issues.balance,
            simulation_incomplete: resp.issues.simulation_incomplete,
            invalid_sources_passed: resp.issues.invalid_sources_passed,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    /// Build a quote with the given fills
    fn quote_with_fills(fills: &[(&str, u32)]) -> RouteQuote {
        let fills = fills
            .iter()
            .map(|(source, bps)| Fill { source: source.to_string(), proportion_bps: *bps })
            .collect();
        RouteQuote { fills, ..Default::default() }
    }

    /// Test that a complete route validates
    #[test]
    fn test_valid_route() {
        let quote = quote_with_fills(&[("A", 6000), ("B", 4000)]);
        assert_eq!(quote.validate(), Ok(()));
    }

    /// Test that an empty route validates
    #[test]
    fn test_empty_route() {
        let quote = quote_with_fills(&[]);
        assert_eq!(quote.validate(), Ok(()));
    }

    /// Test that a route that does not sum to 100% is reported, not normalized
    #[test]
    fn test_fill_sum_mismatch() {
        let quote = quote_with_fills(&[("A", 6000), ("B", 3999)]);
        assert_eq!(quote.validate(), Err(RouteQuoteError::FillSum(9999)));
        assert_eq!(quote.fills[1].proportion_bps, 3999);
    }

    /// Test that out of range values are rejected
    #[test]
    fn test_out_of_range() {
        let quote = quote_with_fills(&[("A", 10_001)]);
        assert!(matches!(quote.validate(), Err(RouteQuoteError::BpsOutOfRange { .. })));

        let mut quote = quote_with_fills(&[("A", 10_000)]);
        quote.sell_token_tax.sell_tax_bps = 20_000;
        assert!(matches!(
            quote.validate(),
            Err(RouteQuoteError::BpsOutOfRange { value: 20_000, .. })
        ));
    }

    /// Test converting a raw price response into a quote
    #[test]
    fn test_from_price_response() {
        let resp: PriceResponse = serde_json::from_value(json!({
            "liquidityAvailable": true,
            "buyAmount": "1000",
            "issues": { "allowance": null },
            "route": {
                "fills": [
                    { "source": "B", "proportionBps": "2500" },
                    { "source": "A", "proportionBps": 7500 }
                ]
            },
            "tokenMetadata": {
                "buyToken": { "buyTaxBps": "0", "sellTaxBps": null },
                "sellToken": { "buyTaxBps": "500", "sellTaxBps": "0" }
            }
        }))
        .unwrap();

        let quote = RouteQuote::try_from(resp).unwrap();
        let sources: Vec<&str> = quote.fills.iter().map(|f| f.source.as_str()).collect();
        assert_eq!(sources, vec!["B", "A"]);
        assert!(quote.allowance_issue.is_none());
        assert!(!quote.buy_token_tax.is_taxed());
        assert_eq!(quote.sell_token_tax, TaxInfo { buy_tax_bps: 500, sell_tax_bps: 0 });
        assert_eq!(quote.buy_amount, Some(U256::from(1000u64)));
    }

    /// Test that a response claiming liquidity without a route is rejected
    /// rather than read as a route with no sources
    #[test]
    fn test_missing_route() {
        let empty: PriceResponse = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            RouteQuote::try_from(empty).unwrap_err(),
            RouteQuoteError::MissingRoute("route".to_string())
        );

        // Fills and taxes at the top level are not where the routing service
        // puts them
        let flat: PriceResponse = serde_json::from_value(json!({
            "issues": { "allowance": null },
            "fills": [
                { "source": "A", "proportionBps": 6000 },
                { "source": "B", "proportionBps": 4000 }
            ],
            "sellToken": { "buyTaxBps": "500" }
        }))
        .unwrap();
        assert!(matches!(RouteQuote::try_from(flat), Err(RouteQuoteError::MissingRoute(_))));

        let no_metadata: PriceResponse = serde_json::from_value(json!({
            "route": { "fills": [{ "source": "A", "proportionBps": 10000 }] }
        }))
        .unwrap();
        assert_eq!(
            RouteQuote::try_from(no_metadata).unwrap_err(),
            RouteQuoteError::MissingRoute("token metadata".to_string())
        );
    }

    /// Test that a response without liquidity does not become a quote
    #[test]
    fn test_no_liquidity() {
        let resp: PriceResponse =
            serde_json::from_value(json!({ "liquidityAvailable": false })).unwrap();
        assert_eq!(RouteQuote::try_from(resp).unwrap_err(), RouteQuoteError::NoLiquidity);
    }
}

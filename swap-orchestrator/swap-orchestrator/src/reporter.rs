//! Human-readable transparency reports for a route: where its liquidity comes
//! from, and which transfer taxes apply

use std::fmt::{self, Display};

use swap_orchestrator_api::route::{RouteQuote, TaxInfo};

/// A percentage, stored exactly as basis points
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Percentage(u32);

impl Percentage {
    /// Create a percentage from basis points
    pub fn from_bps(bps: u32) -> Self {
        Self(bps)
    }
}

impl Display for Percentage {
    /// Renders `bps / 100` with two decimal places, e.g. `6000` as `60.00`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// -------------
// | Liquidity |
// -------------

/// One liquidity source's share of a route
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceShare {
    /// The source name
    pub source: String,
    /// The share of the route
    pub percentage: Percentage,
}

/// The liquidity sources of a route, in upstream routing order
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiquidityBreakdown {
    /// The source shares
    pub shares: Vec<SourceShare>,
}

impl Display for LiquidityBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Sources", self.shares.len())?;
        for share in &self.shares {
            write!(f, "\n{}: {}%", share.source, share.percentage)?;
        }

        Ok(())
    }
}

/// Break a route down by liquidity source
pub fn breakdown_liquidity(quote: &RouteQuote) -> LiquidityBreakdown {
    let shares = quote
        .fills
        .iter()
        .map(|fill| SourceShare {
            source: fill.source.clone(),
            percentage: Percentage::from_bps(fill.proportion_bps),
        })
        .collect();

    LiquidityBreakdown { shares }
}

// ---------
// | Taxes |
// ---------

/// The side of the swap a token is on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwapSide {
    /// The token being bought
    BuyToken,
    /// The token being sold
    SellToken,
}

impl Display for SwapSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapSide::BuyToken => write!(f, "Buy Token"),
            SwapSide::SellToken => write!(f, "Sell Token"),
        }
    }
}

/// The tax rates of one token in the swap
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenTaxLine {
    /// Which token the rates apply to
    pub side: SwapSide,
    /// The tax charged when buying the token
    pub buy_tax: Percentage,
    /// The tax charged when selling the token
    pub sell_tax: Percentage,
}

impl Display for TokenTaxLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} Buy Tax: {}%", self.side, self.buy_tax)?;
        write!(f, "{} Sell Tax: {}%", self.side, self.sell_tax)
    }
}

/// The taxed tokens of a swap
///
/// A token appears only if at least one of its rates is non-zero
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaxReport {
    /// One line pair per taxed token, buy token first
    pub lines: Vec<TokenTaxLine>,
}

impl TaxReport {
    /// Whether neither token is taxed
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Display for TaxReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lines: Vec<String> = self.lines.iter().map(ToString::to_string).collect();
        write!(f, "{}", lines.join("\n"))
    }
}

/// Summarize the transfer taxes of both tokens in a route
pub fn summarize_taxes(quote: &RouteQuote) -> TaxReport {
    let lines = [
        (SwapSide::BuyToken, quote.buy_token_tax),
        (SwapSide::SellToken, quote.sell_token_tax),
    ]
    .into_iter()
    .filter(|(_, taxes)| taxes.is_taxed())
    .map(|(side, taxes)| tax_line(side, taxes))
    .collect();

    TaxReport { lines }
}

/// Build the tax line of one token
fn tax_line(side: SwapSide, taxes: TaxInfo) -> TokenTaxLine {
    TokenTaxLine {
        side,
        buy_tax: Percentage::from_bps(taxes.buy_tax_bps),
        sell_tax: Percentage::from_bps(taxes.sell_tax_bps),
    }
}

//! Token handles with lazily cached on-chain metadata

use alloy::primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::{Address, U256};
use tokio::sync::OnceCell;

use super::{error::ChainReadError, ChainReader};

/// An ERC20 token, identified by its contract address
///
/// Decimals and symbol are fetched on first use and cached for the lifetime of
/// the handle
#[derive(Debug)]
pub struct TokenHandle {
    /// The token contract address
    address: Address,
    /// The token's decimals, once read
    decimals: OnceCell<u8>,
    /// The token's symbol, once read
    symbol: OnceCell<String>,
}

impl TokenHandle {
    /// Create a handle for the token at the given address
    pub fn new(address: Address) -> Self {
        Self { address, decimals: OnceCell::new(), symbol: OnceCell::new() }
    }

    /// The token contract address
    pub fn address(&self) -> Address {
        self.address
    }

    /// Get the token's decimals, reading them from chain on first use
    pub async fn decimals(&self, reader: &dyn ChainReader) -> Result<u8, ChainReadError> {
        self.decimals.get_or_try_init(|| reader.get_decimals(self.address)).await.copied()
    }

    /// Get the token's symbol, reading it from chain on first use
    pub async fn symbol(&self, reader: &dyn ChainReader) -> Result<String, ChainReadError> {
        self.symbol.get_or_try_init(|| reader.get_symbol(self.address)).await.cloned()
    }

    /// A label for log lines: the symbol once known, the address otherwise
    pub fn label(&self) -> String {
        match self.symbol.get() {
            Some(symbol) => symbol.clone(),
            None => format!("{:#x}", self.address),
        }
    }
}

/// Convert a human-readable decimal amount into atoms of a token with the
/// given number of decimals, e.g. `"0.1"` with 18 decimals is `10^17`
pub fn to_atoms(amount: &str, decimals: u8) -> Result<U256, String> {
    match parse_units(amount.trim(), decimals) {
        Ok(ParseUnits::U256(atoms)) => Ok(atoms),
        Ok(ParseUnits::I256(_)) => Err(format!("amount must not be negative: {amount}")),
        Err(e) => Err(format!("invalid amount {amount}: {e}")),
    }
}

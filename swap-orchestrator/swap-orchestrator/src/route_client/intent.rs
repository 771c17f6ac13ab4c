//! The swap intent: what the operator asked to trade

use alloy_primitives::{Address, U256};
use swap_orchestrator_api::{price::PriceParams, MAX_BPS};

use super::error::RouteServiceError;

/// A request to sell a fixed amount of one token for another
///
/// Constructed through [`SwapIntent::new`], which enforces the routing
/// service's input constraints, and immutable afterwards
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapIntent {
    /// The id of the chain to swap on
    chain_id: u64,
    /// The token being sold
    sell_token: Address,
    /// The token being bought
    buy_token: Address,
    /// The amount of the sell token, in atoms
    sell_amount: U256,
    /// The address executing the swap
    taker: Address,
    /// The integrator fee, in basis points
    affiliate_fee_bps: u32,
    /// Whether the integrator collects positive slippage
    surplus_collection: bool,
}

impl SwapIntent {
    /// Create a new intent, validating its constraints
    pub fn new(
        chain_id: u64,
        sell_token: Address,
        buy_token: Address,
        sell_amount: U256,
        taker: Address,
        affiliate_fee_bps: u32,
        surplus_collection: bool,
    ) -> Result<Self, RouteServiceError> {
        if sell_amount.is_zero() {
            return Err(RouteServiceError::invalid_request("sell amount must be positive"));
        }

        if affiliate_fee_bps > MAX_BPS {
            return Err(RouteServiceError::invalid_request(format!(
                "affiliate fee of {affiliate_fee_bps} bps exceeds {MAX_BPS} bps"
            )));
        }

        if sell_token == buy_token {
            return Err(RouteServiceError::invalid_request(format!(
                "sell and buy token are both {sell_token:#x}"
            )));
        }

        Ok(Self {
            chain_id,
            sell_token,
            buy_token,
            sell_amount,
            taker,
            affiliate_fee_bps,
            surplus_collection,
        })
    }

    /// The id of the chain to swap on
    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// The token being sold
    pub fn sell_token(&self) -> Address {
        self.sell_token
    }

    /// The token being bought
    pub fn buy_token(&self) -> Address {
        self.buy_token
    }

    /// The amount of the sell token, in atoms
    pub fn sell_amount(&self) -> U256 {
        self.sell_amount
    }

    /// The query parameters of a price request for this intent
    pub fn to_price_params(&self) -> PriceParams {
        PriceParams {
            chain_id: self.chain_id,
            sell_token: self.sell_token,
            buy_token: self.buy_token,
            sell_amount: self.sell_amount,
            taker: self.taker,
            affiliate_fee_bps: self.affiliate_fee_bps,
            surplus_collection: self.surplus_collection,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The Scroll chain id
    const CHAIN_ID: u64 = 534352;

    /// Build an intent with the given amount, fee, and buy token
    fn intent(amount: u64, fee: u32, buy_token: Address) -> Result<SwapIntent, RouteServiceError> {
        SwapIntent::new(
            CHAIN_ID,
            Address::repeat_byte(1),
            buy_token,
            U256::from(amount),
            Address::repeat_byte(9),
            fee,
            true,
        )
    }

    /// Test that a well-formed intent is accepted
    #[test]
    fn test_valid_intent() {
        let swap = intent(100, 100, Address::repeat_byte(2)).unwrap();
        let params = swap.to_price_params();
        assert_eq!(params.affiliate_fee_bps, 100);
        assert!(params.surplus_collection);
        assert_eq!(params.taker, Address::repeat_byte(9));

        // The fee bound is inclusive
        assert!(intent(1, MAX_BPS, Address::repeat_byte(2)).is_ok());
    }

    /// Test each constraint violation
    #[test]
    fn test_invalid_intents() {
        let zero_amount = intent(0, 100, Address::repeat_byte(2));
        assert!(matches!(zero_amount, Err(RouteServiceError::InvalidRequest(_))));

        let excessive_fee = intent(100, MAX_BPS + 1, Address::repeat_byte(2));
        assert!(matches!(excessive_fee, Err(RouteServiceError::InvalidRequest(_))));

        let same_token = intent(100, 100, Address::repeat_byte(1));
        assert!(matches!(same_token, Err(RouteServiceError::InvalidRequest(_))));
    }
}

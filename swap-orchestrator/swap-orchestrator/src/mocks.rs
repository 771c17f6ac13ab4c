//! Mock collaborators for testing the swap workflow without a chain or a
//! routing service

use std::{
    collections::BTreeSet,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Mutex,
    },
};

use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use swap_orchestrator_api::route::RouteQuote;

use crate::{
    approvals::{error::ApprovalError, submitter::ApprovalSubmitter, ApprovalReceipt},
    chain_client::{error::ChainReadError, ChainReader},
    route_client::{error::RouteServiceError, intent::SwapIntent, RouteService},
};

// ----------------
// | Chain Reader |
// ----------------

/// A chain reader serving fixed token metadata
pub struct MockChainReader {
    /// The decimals of every token
    decimals: u8,
    /// The balance of every account
    balance: U256,
    /// The number of decimals reads served
    decimals_reads: AtomicUsize,
    /// Whether reads currently fail
    fail: AtomicBool,
    /// Whether symbol reads fail, as for tokens with a `bytes32` symbol
    fail_symbol: bool,
    /// Whether balance reads fail
    fail_balance: bool,
}

impl MockChainReader {
    /// Create a reader where every token has the given decimals and every
    /// account an unlimited balance
    pub fn new(decimals: u8) -> Self {
        Self {
            decimals,
            balance: U256::MAX,
            decimals_reads: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
            fail_symbol: false,
            fail_balance: false,
        }
    }

    /// Make every symbol read fail
    pub fn with_failing_symbol(mut self) -> Self {
        self.fail_symbol = true;
        self
    }

    /// Make every balance read fail
    pub fn with_failing_balance(mut self) -> Self {
        self.fail_balance = true;
        self
    }

    /// Set the balance of every account
    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = balance;
        self
    }

    /// Make subsequent reads fail or succeed
    pub fn fail_reads(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    /// The number of decimals reads served so far
    pub fn decimals_reads(&self) -> usize {
        self.decimals_reads.load(Ordering::SeqCst)
    }

    /// Fail if reads are currently configured to fail
    fn check_failure(&self) -> Result<(), ChainReadError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(ChainReadError::rpc("connection refused"));
        }

        Ok(())
    }
}

#[async_trait]
impl ChainReader for MockChainReader {
    async fn get_decimals(&self, _token: Address) -> Result<u8, ChainReadError> {
        self.check_failure()?;
        self.decimals_reads.fetch_add(1, Ordering::SeqCst);
        Ok(self.decimals)
    }

    async fn get_symbol(&self, _token: Address) -> Result<String, ChainReadError> {
        self.check_failure()?;
        if self.fail_symbol {
            return Err(ChainReadError::contract("abi decode: bytes32 symbol"));
        }

        Ok("MOCK".to_string())
    }

    async fn get_balance(&self, _token: Address, _owner: Address) -> Result<U256, ChainReadError> {
        self.check_failure()?;
        if self.fail_balance {
            return Err(ChainReadError::rpc("balanceOf reverted"));
        }

        Ok(self.balance)
    }

    async fn get_addresses(&self) -> Result<Vec<Address>, ChainReadError> {
        self.check_failure()?;
        Ok(vec![taker_address()])
    }
}

/// The address the mock chain reader reports for the signer
pub fn taker_address() -> Address {
    Address::repeat_byte(0x7a)
}

// ----------------------
// | Approval Submitter |
// ----------------------

/// A call made to the mock approval submitter
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmitterCall {
    /// A simulation
    Simulate,
    /// A submission
    Submit,
    /// A confirmation wait
    Confirm,
}

/// An approval submitter recording the calls made to it
#[derive(Default)]
pub struct MockApprovalSubmitter {
    /// The calls made, in order
    calls: Mutex<Vec<SubmitterCall>>,
    /// The last approval submitted
    last_approval: Mutex<Option<(Address, Address, U256)>>,
    /// Whether simulations fail
    fail_simulation: bool,
    /// Whether mined approvals revert
    revert: bool,
}

impl MockApprovalSubmitter {
    /// A submitter whose simulations revert
    pub fn failing_simulation() -> Self {
        Self { fail_simulation: true, ..Default::default() }
    }

    /// A submitter whose transactions are mined but revert
    pub fn reverting() -> Self {
        Self { revert: true, ..Default::default() }
    }

    /// The calls made so far, in order
    pub fn calls(&self) -> Vec<SubmitterCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The token, spender, and amount of the last submitted approval
    pub fn last_approval(&self) -> Option<(Address, Address, U256)> {
        *self.last_approval.lock().unwrap()
    }

    /// Record a call
    fn record(&self, call: SubmitterCall) {
        self.calls.lock().unwrap().push(call);
    }
}

/// The hash the mock submitter assigns to every approval
fn mock_tx_hash() -> TxHash {
    TxHash::repeat_byte(0xab)
}

#[async_trait]
impl ApprovalSubmitter for MockApprovalSubmitter {
    async fn simulate_approval(
        &self,
        _token: Address,
        _spender: Address,
        _amount: U256,
    ) -> Result<(), ApprovalError> {
        self.record(SubmitterCall::Simulate);
        if self.fail_simulation {
            return Err(ApprovalError::simulation("execution reverted"));
        }

        Ok(())
    }

    async fn submit_approval(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, ApprovalError> {
        self.record(SubmitterCall::Submit);
        *self.last_approval.lock().unwrap() = Some((token, spender, amount));
        Ok(mock_tx_hash())
    }

    async fn await_confirmation(&self, tx_hash: TxHash) -> Result<ApprovalReceipt, ApprovalError> {
        self.record(SubmitterCall::Confirm);
        Ok(ApprovalReceipt {
            tx_hash,
            block_number: Some(1),
            gas_used: 46_000,
            success: !self.revert,
        })
    }
}

// -----------------
// | Route Service |
// -----------------

/// A routing service returning canned responses
pub struct MockRouteService {
    /// The response to source listings
    sources: Result<BTreeSet<String>, RouteServiceError>,
    /// The response to price requests
    quote: Result<RouteQuote, RouteServiceError>,
    /// The intents prices were requested for
    price_requests: Mutex<Vec<SwapIntent>>,
}

impl MockRouteService {
    /// Create a service listing two sources and returning the given quote
    pub fn new(quote: RouteQuote) -> Self {
        let sources = ["Ambient", "SyncSwap"].into_iter().map(String::from).collect();
        Self { sources: Ok(sources), quote: Ok(quote), price_requests: Mutex::new(Vec::new()) }
    }

    /// Make source listings fail with the given error
    pub fn with_sources_error(mut self, err: RouteServiceError) -> Self {
        self.sources = Err(err);
        self
    }

    /// The intents prices were requested for
    pub fn price_requests(&self) -> Vec<SwapIntent> {
        self.price_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RouteService for MockRouteService {
    async fn list_liquidity_sources(
        &self,
        _chain_id: u64,
    ) -> Result<BTreeSet<String>, RouteServiceError> {
        self.sources.clone()
    }

    async fn get_price(&self, intent: &SwapIntent) -> Result<RouteQuote, RouteServiceError> {
        self.price_requests.lock().unwrap().push(intent.clone());
        self.quote.clone()
    }
}

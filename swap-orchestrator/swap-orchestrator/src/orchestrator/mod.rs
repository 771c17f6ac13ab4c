//! The swap workflow: a strictly sequential pipeline of stages, each of which
//! must succeed before the next begins
//!
//! The pipeline currently ends once the allowance the route requires has been
//! resolved; the quote, signing, submission, and confirmation stages are
//! declared so that the state machine is complete, but are not yet reached
pub mod stage;

use std::{collections::BTreeSet, sync::Arc};

use alloy_primitives::{Address, U256};
use swap_orchestrator_api::route::RouteQuote;
use tracing::{debug, info, instrument, warn};

use crate::{
    approvals::{ApprovalManager, ApprovalOutcome},
    chain_client::{
        error::ChainReadError,
        token::{to_atoms, TokenHandle},
        ChainReader,
    },
    error::{SwapError, SwapResult},
    helpers::Chain,
    reporter::{breakdown_liquidity, summarize_taxes},
    route_client::{error::RouteServiceError, intent::SwapIntent, RouteService},
};

use self::stage::SwapStage;

// ---------
// | Types |
// ---------

/// The parameters of a swap run
#[derive(Clone, Debug)]
pub struct SwapConfig {
    /// The chain to swap on
    pub chain: Chain,
    /// The token to sell
    pub sell_token: Address,
    /// The token to buy
    pub buy_token: Address,
    /// The human-readable amount of the sell token, e.g. `"0.1"`
    pub sell_amount: String,
    /// The integrator fee charged on the swap, in basis points
    pub affiliate_fee_bps: u32,
    /// Whether the integrator collects positive slippage
    pub surplus_collection: bool,
}

/// The result of a successful swap run
#[derive(Clone, Debug)]
pub struct SwapOutcome {
    /// The last stage reached
    pub stage: SwapStage,
    /// The liquidity sources available on the chain
    pub sources: BTreeSet<String>,
    /// The sell amount, in atoms
    pub sell_amount: U256,
    /// The validated route
    pub quote: RouteQuote,
    /// How the route's allowance requirement was resolved
    pub approval: ApprovalOutcome,
}

// ----------------
// | Orchestrator |
// ----------------

/// Sequences the chain, routing, and approval components into one swap run
pub struct SwapOrchestrator {
    /// The parameters of the run
    config: SwapConfig,
    /// The token being sold
    sell_token: TokenHandle,
    /// The token being bought
    buy_token: TokenHandle,
    /// The routing service
    route_service: Arc<dyn RouteService>,
    /// The chain reader
    chain: Arc<dyn ChainReader>,
    /// The approval manager
    approvals: ApprovalManager,
}

impl SwapOrchestrator {
    /// Create a new orchestrator
    pub fn new(
        config: SwapConfig,
        route_service: Arc<dyn RouteService>,
        chain: Arc<dyn ChainReader>,
        approvals: ApprovalManager,
    ) -> Self {
        let sell_token = TokenHandle::new(config.sell_token);
        let buy_token = TokenHandle::new(config.buy_token);
        Self { config, sell_token, buy_token, route_service, chain, approvals }
    }

    /// Run the swap workflow to its terminal stage
    ///
    /// The first failing stage ends the run; in particular, an approval
    /// failure stops the run before anything further is attempted
    #[instrument(skip_all, fields(chain = %self.config.chain))]
    pub async fn run(&self) -> SwapResult<SwapOutcome> {
        let mut stage = SwapStage::Init;

        let sources = self.discover_sources().await?;
        stage.advance();

        let (taker, sell_amount) = self.resolve_amount().await?;
        stage.advance();

        let quote = self.fetch_price(taker, sell_amount).await?;
        stage.advance();

        let approval = self.approvals.ensure_allowance(&quote, &self.sell_token).await?;
        stage.advance();

        self.report_route(&quote);
        info!("Swap prepared, stopping at stage {stage}");

        Ok(SwapOutcome { stage, sources, sell_amount, quote, approval })
    }

    // ----------
    // | Stages |
    // ----------

    /// Confirm the routing service is reachable and list its sources
    async fn discover_sources(&self) -> SwapResult<BTreeSet<String>> {
        let chain_id = self.config.chain.chain_id();
        let sources = self.route_service.list_liquidity_sources(chain_id).await?;

        let names: Vec<&str> = sources.iter().map(String::as_str).collect();
        info!("{} liquidity sources on {}: {}", sources.len(), self.config.chain, names.join(", "));
        Ok(sources)
    }

    /// Resolve the taker and the sell amount in atoms
    async fn resolve_amount(&self) -> SwapResult<(Address, U256)> {
        let chain = self.chain.as_ref();
        let taker = chain
            .get_addresses()
            .await?
            .first()
            .copied()
            .ok_or_else(|| ChainReadError::rpc("the signer controls no addresses"))?;

        let decimals = self.sell_token.decimals(chain).await?;
        let sell_amount =
            to_atoms(&self.config.sell_amount, decimals).map_err(SwapError::configuration)?;

        // The symbol and balance only inform the operator
        if let Err(e) = self.sell_token.symbol(chain).await {
            warn!("could not read the symbol of {}: {e}", self.sell_token.label());
        }
        let symbol = self.sell_token.label();
        info!("Selling {} {symbol} ({sell_amount} atoms) from {taker:#x}", self.config.sell_amount);

        match chain.get_balance(self.sell_token.address(), taker).await {
            Ok(balance) if balance < sell_amount => {
                warn!("{symbol} balance of {taker:#x} is {balance} atoms, below the sell amount");
            },
            Ok(_) => {},
            Err(e) => warn!("could not read the {symbol} balance of {taker:#x}: {e}"),
        }

        Ok((taker, sell_amount))
    }

    /// Fetch and validate a price for the swap
    async fn fetch_price(&self, taker: Address, sell_amount: U256) -> SwapResult<RouteQuote> {
        let intent = SwapIntent::new(
            self.config.chain.chain_id(),
            self.sell_token.address(),
            self.buy_token.address(),
            sell_amount,
            taker,
            self.config.affiliate_fee_bps,
            self.config.surplus_collection,
        )?;

        let quote = self.route_service.get_price(&intent).await?;
        quote.validate().map_err(RouteServiceError::from)?;
        if let Some(buy_amount) = quote.buy_amount {
            info!("Priced at {buy_amount} atoms of {}", self.buy_token.label());
        }

        self.inspect_issues(&quote);
        Ok(quote)
    }

    /// Warn about the non-fatal issues the routing service reported
    fn inspect_issues(&self, quote: &RouteQuote) {
        if let Some(issue) = &quote.balance_issue {
            warn!(
                "Insufficient balance of {:#x}: have {}, need {}",
                issue.token, issue.actual, issue.expected
            );
        }

        if quote.simulation_incomplete {
            warn!("The routing service could not fully simulate the route");
        }

        if !quote.invalid_sources_passed.is_empty() {
            warn!("Invalid sources excluded: {}", quote.invalid_sources_passed.join(", "));
        }

        debug!(fees = ?quote.fees, network_fee = ?quote.total_network_fee, "route fees");
    }

    /// Log the liquidity and tax reports of a validated route
    fn report_route(&self, quote: &RouteQuote) {
        info!("{}", breakdown_liquidity(quote));

        let taxes = summarize_taxes(quote);
        if !taxes.is_empty() {
            info!("{taxes}");
        }
    }
}

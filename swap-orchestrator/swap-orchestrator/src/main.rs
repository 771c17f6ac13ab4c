//! The swap orchestrator, discovers a route for a token swap through the 0x
//! API, grants the allowance the route requires, and reports where the route's
//! liquidity comes from
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]
#![deny(unsafe_code)]
#![deny(clippy::needless_pass_by_ref_mut)]

pub mod approvals;
pub mod chain_client;
pub mod cli;
pub mod error;
pub mod helpers;
pub mod orchestrator;
pub mod reporter;
pub mod route_client;

#[cfg(test)]
mod mocks;

use std::{error::Error, sync::Arc};

use clap::{error::ErrorKind, Parser};
use dotenv::dotenv;
use tracing::{error, info};

use crate::{
    approvals::{submitter::AlloyApprovalSubmitter, ApprovalManager, ApprovalOutcome},
    chain_client::AlloyChainClient,
    cli::Cli,
    error::{SwapError, SwapResult},
    helpers::setup_logging,
    orchestrator::{SwapOrchestrator, SwapOutcome},
    route_client::ZeroExClient,
};

/// Main entrypoint for the swap orchestrator
#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv().ok();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        },
        Err(e) => return Err(SwapError::configuration(e).into()),
    };
    setup_logging(cli.json_logs);

    match run(&cli).await {
        Ok(outcome) => {
            log_outcome(&outcome);
            Ok(())
        },
        Err(e) => {
            error!("Swap failed: {e}");
            Err(e.into())
        },
    }
}

/// Build the clients and run the swap workflow
async fn run(cli: &Cli) -> SwapResult<SwapOutcome> {
    cli.validate()?;
    let config = cli.swap_config()?;
    let wallet = cli.wallet()?;
    let signer = wallet.address();
    info!("Swapping on {} as {signer:#x}", config.chain);

    // Check that the RPC node serves the chain we are swapping on
    let chain_client = AlloyChainClient::from_rpc_url(&cli.rpc_url, wallet)?;
    let rpc_chain_id = chain_client.get_chain_id().await?;
    if rpc_chain_id != config.chain.chain_id() {
        return Err(SwapError::configuration(format!(
            "RPC_URL serves chain {rpc_chain_id}, expected {} ({})",
            config.chain.chain_id(),
            config.chain
        )));
    }

    let route_service = ZeroExClient::new(cli.api_key.clone(), cli.api_base_url.clone());
    let submitter = AlloyApprovalSubmitter::new(chain_client.provider(), signer);
    let approvals = ApprovalManager::new(Arc::new(submitter));

    let orchestrator =
        SwapOrchestrator::new(config, Arc::new(route_service), Arc::new(chain_client), approvals);
    orchestrator.run().await
}

/// Log a summary of a finished run
fn log_outcome(outcome: &SwapOutcome) {
    let approval = match &outcome.approval {
        ApprovalOutcome::NotRequired => "not required".to_string(),
        ApprovalOutcome::Approved { tx_hash, .. } => format!("granted in {tx_hash:#x}"),
    };

    info!(
        "Reached {} selling {} atoms across {} of {} sources, approval {approval}",
        outcome.stage,
        outcome.sell_amount,
        outcome.quote.fills.len(),
        outcome.sources.len(),
    );
}

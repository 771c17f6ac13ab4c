//! Ensures the sell token allowance a route requires has been granted
pub mod error;
pub mod submitter;

use std::sync::Arc;

use alloy_primitives::{Address, TxHash, U256};
use swap_orchestrator_api::route::RouteQuote;
use tracing::{debug, info, instrument, warn};

use crate::chain_client::token::TokenHandle;

use self::{error::ApprovalError, submitter::ApprovalSubmitter};

/// The amount approved for a spender
///
/// We approve the maximum amount once so that later swaps of the same pair
/// do not need another approval transaction
pub const INFINITE_APPROVAL: U256 = U256::MAX;

// ---------
// | Types |
// ---------

/// The retained outcome of a mined approval transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApprovalReceipt {
    /// The transaction hash
    pub tx_hash: TxHash,
    /// The block the transaction was mined in
    pub block_number: Option<u64>,
    /// The gas used by the transaction
    pub gas_used: u64,
    /// Whether the transaction executed successfully
    pub success: bool,
}

/// The lifecycle state of an approval transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApprovalStatus {
    /// Built but not yet broadcast
    Unsubmitted,
    /// Broadcast, awaiting inclusion
    Submitted(TxHash),
    /// Mined successfully
    Confirmed(ApprovalReceipt),
    /// Mined and reverted
    Reverted(ApprovalReceipt),
}

/// An approval of one spender on one token
#[derive(Clone, Debug)]
pub struct ApprovalTransaction {
    /// The token being approved
    token: Address,
    /// The approved spender
    spender: Address,
    /// The approved amount
    amount: U256,
    /// The lifecycle state
    status: ApprovalStatus,
}

impl ApprovalTransaction {
    /// Create a new, unsubmitted approval
    pub fn new(token: Address, spender: Address, amount: U256) -> Self {
        Self { token, spender, amount, status: ApprovalStatus::Unsubmitted }
    }

    /// The lifecycle state
    pub fn status(&self) -> &ApprovalStatus {
        &self.status
    }

    /// Simulate, then broadcast the approval
    async fn submit(&mut self, submitter: &dyn ApprovalSubmitter) -> Result<TxHash, ApprovalError> {
        submitter.simulate_approval(self.token, self.spender, self.amount).await?;
        let tx_hash = submitter.submit_approval(self.token, self.spender, self.amount).await?;

        self.status = ApprovalStatus::Submitted(tx_hash);
        Ok(tx_hash)
    }

    /// Wait for the submitted approval to be mined
    async fn confirm(
        &mut self,
        submitter: &dyn ApprovalSubmitter,
    ) -> Result<ApprovalReceipt, ApprovalError> {
        let tx_hash = match &self.status {
            ApprovalStatus::Submitted(tx_hash) => *tx_hash,
            status => {
                return Err(ApprovalError::confirmation(format!(
                    "cannot confirm an approval in state {status:?}"
                )))
            },
        };

        let receipt = submitter.await_confirmation(tx_hash).await?;
        if receipt.success {
            self.status = ApprovalStatus::Confirmed(receipt.clone());
            Ok(receipt)
        } else {
            self.status = ApprovalStatus::Reverted(receipt);
            Err(ApprovalError::Reverted(tx_hash))
        }
    }
}

/// The result of ensuring an allowance
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApprovalOutcome {
    /// The route needs no approval
    NotRequired,
    /// An approval was mined successfully
    Approved {
        /// The approval's transaction hash
        tx_hash: TxHash,
        /// The approval's receipt
        receipt: ApprovalReceipt,
    },
}

// -----------
// | Manager |
// -----------

/// Grants the allowances routes require, signing with a fixed owner
#[derive(Clone)]
pub struct ApprovalManager {
    /// The transaction submitter
    submitter: Arc<dyn ApprovalSubmitter>,
}

impl ApprovalManager {
    /// Create a new manager
    pub fn new(submitter: Arc<dyn ApprovalSubmitter>) -> Self {
        Self { submitter }
    }

    /// Ensure the allowance the quote requires on the sell token exists
    ///
    /// The routing service's allowance assessment is trusted as-is: no
    /// independent on-chain allowance read happens here. When an approval is
    /// needed it is submitted and `Approved` is only returned once the
    /// transaction has been observed mined
    #[instrument(skip_all, fields(token = %token.label()))]
    pub async fn ensure_allowance(
        &self,
        quote: &RouteQuote,
        token: &TokenHandle,
    ) -> Result<ApprovalOutcome, ApprovalError> {
        let Some(issue) = &quote.allowance_issue else {
            info!("No approval needed for Permit2");
            return Ok(ApprovalOutcome::NotRequired);
        };

        let mut tx = ApprovalTransaction::new(token.address(), issue.spender, INFINITE_APPROVAL);
        info!("Approving {:#x} to spend {}", issue.spender, token.label());

        let tx_hash = tx.submit(self.submitter.as_ref()).await.inspect_err(|e| {
            warn!("approval of {:#x} was not submitted: {e}", issue.spender);
        })?;
        info!("Submitted approval {tx_hash:#x}, waiting for confirmation");

        let receipt = tx.confirm(self.submitter.as_ref()).await?;
        debug!(status = ?tx.status(), "approval settled");
        info!(
            "Approval successful: {:#x} in block {:?} using {} gas",
            receipt.tx_hash, receipt.block_number, receipt.gas_used
        );

        Ok(ApprovalOutcome::Approved { tx_hash, receipt })
    }
}

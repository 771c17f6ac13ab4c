//! Submission of approval transactions on chain

use alloy::providers::{DynProvider, PendingTransactionBuilder, Provider};
use alloy_primitives::{Address, TxHash, U256};
use async_trait::async_trait;
use tracing::instrument;

use crate::helpers::IERC20;

use super::{error::ApprovalError, ApprovalReceipt};

/// The number of confirmations to wait for on an approval
const ONE_CONFIRMATION: u64 = 1;

/// The transaction lifecycle of an ERC20 approval, signed by a fixed owner
#[async_trait]
pub trait ApprovalSubmitter: Send + Sync {
    /// Simulate the approval, failing if it would revert
    async fn simulate_approval(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), ApprovalError>;

    /// Sign and broadcast the approval, returning its hash without waiting for
    /// it to be mined
    async fn submit_approval(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, ApprovalError>;

    /// Block until a submitted approval is mined, returning its receipt
    async fn await_confirmation(&self, tx_hash: TxHash) -> Result<ApprovalReceipt, ApprovalError>;
}

/// An approval submitter backed by an alloy signing provider
#[derive(Clone)]
pub struct AlloyApprovalSubmitter {
    /// The RPC provider, configured with the owner's wallet
    provider: DynProvider,
    /// The token owner, i.e. the signer
    owner: Address,
}

impl AlloyApprovalSubmitter {
    /// Create a new submitter
    pub fn new(provider: DynProvider, owner: Address) -> Self {
        Self { provider, owner }
    }
}

#[async_trait]
impl ApprovalSubmitter for AlloyApprovalSubmitter {
    #[instrument(skip(self))]
    async fn simulate_approval(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<(), ApprovalError> {
        let erc20 = IERC20::new(token, self.provider.clone());
        let approved = erc20
            .approve(spender, amount)
            .from(self.owner)
            .call()
            .await
            .map_err(ApprovalError::simulation)?;

        if !approved {
            return Err(ApprovalError::simulation("approve returned false"));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn submit_approval(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> Result<TxHash, ApprovalError> {
        let erc20 = IERC20::new(token, self.provider.clone());
        let pending_tx = erc20
            .approve(spender, amount)
            .from(self.owner)
            .send()
            .await
            .map_err(ApprovalError::submission)?;

        Ok(*pending_tx.tx_hash())
    }

    #[instrument(skip(self))]
    async fn await_confirmation(&self, tx_hash: TxHash) -> Result<ApprovalReceipt, ApprovalError> {
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(ONE_CONFIRMATION)
            .get_receipt()
            .await
            .map_err(ApprovalError::confirmation)?;

        Ok(ApprovalReceipt {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            success: receipt.status(),
        })
    }
}

//! Error types for the approval manager

use alloy_primitives::TxHash;

/// An error granting a token allowance
///
/// Any of these halts the swap workflow; a swap is never submitted without
/// the allowance it requires
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApprovalError {
    /// The approval call reverted in simulation
    #[error("approval simulation failed: {0}")]
    Simulation(String),
    /// The approval transaction could not be submitted
    #[error("approval submission failed: {0}")]
    Submission(String),
    /// The approval transaction was submitted but never observed mined
    #[error("approval confirmation failed: {0}")]
    Confirmation(String),
    /// The approval transaction was mined but reverted
    #[error("approval transaction {0:#x} reverted")]
    Reverted(TxHash),
}

impl ApprovalError {
    /// Create a new simulation error
    #[allow(clippy::needless_pass_by_value)]
    pub fn simulation<T: ToString>(e: T) -> Self {
        ApprovalError::Simulation(e.to_string())
    }

    /// Create a new submission error
    #[allow(clippy::needless_pass_by_value)]
    pub fn submission<T: ToString>(e: T) -> Self {
        ApprovalError::Submission(e.to_string())
    }

    /// Create a new confirmation error
    #[allow(clippy::needless_pass_by_value)]
    pub fn confirmation<T: ToString>(e: T) -> Self {
        ApprovalError::Confirmation(e.to_string())
    }
}

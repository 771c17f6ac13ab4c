//! The stages of the swap workflow

use std::fmt::{self, Display};

use tracing::debug;

/// A stage of the swap workflow, in the order the stages are reached
///
/// The stages after `AllowanceResolved` are not yet reached by a run
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum SwapStage {
    /// Nothing has happened yet
    Init,
    /// The routing service listed its liquidity sources
    SourcesDiscovered,
    /// The sell amount was converted to atoms
    AmountResolved,
    /// An indicative price was fetched and validated
    PriceFetched,
    /// The allowance the route requires exists
    AllowanceResolved,
    /// A firm quote was fetched
    Quoted,
    /// The swap transaction was signed
    Signed,
    /// The swap transaction was broadcast
    Submitted,
    /// The swap transaction was mined
    Confirmed,
}

impl SwapStage {
    /// The stage following this one, if any
    pub fn next(self) -> Option<Self> {
        match self {
            SwapStage::Init => Some(SwapStage::SourcesDiscovered),
            SwapStage::SourcesDiscovered => Some(SwapStage::AmountResolved),
            SwapStage::AmountResolved => Some(SwapStage::PriceFetched),
            SwapStage::PriceFetched => Some(SwapStage::AllowanceResolved),
            SwapStage::AllowanceResolved => Some(SwapStage::Quoted),
            SwapStage::Quoted => Some(SwapStage::Signed),
            SwapStage::Signed => Some(SwapStage::Submitted),
            SwapStage::Submitted => Some(SwapStage::Confirmed),
            SwapStage::Confirmed => None,
        }
    }

    /// Move to the following stage; the final stage stays put
    pub fn advance(&mut self) {
        if let Some(next) = self.next() {
            debug!("{self} -> {next}");
            *self = next;
        }
    }
}

impl Display for SwapStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SwapStage::Init => "Init",
            SwapStage::SourcesDiscovered => "SourcesDiscovered",
            SwapStage::AmountResolved => "AmountResolved",
            SwapStage::PriceFetched => "PriceFetched",
            SwapStage::AllowanceResolved => "AllowanceResolved",
            SwapStage::Quoted => "Quoted",
            SwapStage::Signed => "Signed",
            SwapStage::Submitted => "Submitted",
            SwapStage::Confirmed => "Confirmed",
        };
        write!(f, "{name}")
    }
}

//! Typed definitions for the swap routing API (0x Swap API v2) consumed by the
//! swap orchestrator
#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

mod serialization;
mod types;
pub use types::*;

/// The number of basis points in one hundred percent
pub const MAX_BPS: u32 = 10_000;

//! API types for liquidity source discovery
use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

// --------------
// | Api Routes |
// --------------

/// The route listing the liquidity sources available on a chain
///
/// Expected query parameters:
/// - chainId: The integer id of the chain to list sources for
pub const SOURCES_ROUTE: &str = "/swap/v1/sources";

// -------------
// | Api Types |
// -------------

/// The response body of the sources route
///
/// The values of the map are venue-specific metadata that this client does not
/// interpret, only the keys are meaningful
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourcesResponse {
    /// The liquidity sources, keyed by name
    pub sources: BTreeMap<String, serde_json::Value>,
}

impl SourcesResponse {
    /// The names of the liquidity sources, in lexical order
    pub fn source_names(&self) -> BTreeSet<String> {
        self.sources.keys().cloned().collect()
    }
}

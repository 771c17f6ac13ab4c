//! Client methods for discovering the liquidity sources on a chain

use std::collections::BTreeSet;

use swap_orchestrator_api::sources::{SourcesResponse, SOURCES_ROUTE};
use tracing::instrument;

use super::{error::RouteServiceError, ZeroExClient};

impl ZeroExClient {
    /// Fetch the names of the liquidity sources available on a chain
    #[instrument(skip(self))]
    pub async fn fetch_sources(&self, chain_id: u64) -> Result<BTreeSet<String>, RouteServiceError> {
        let params = [("chainId", chain_id.to_string())];
        let resp: SourcesResponse = self.send_get_request(SOURCES_ROUTE, &params).await?;

        Ok(resp.source_names())
    }
}

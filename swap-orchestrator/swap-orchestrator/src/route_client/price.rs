//! Client methods for fetching indicative prices

use swap_orchestrator_api::{
    price::{PriceResponse, PRICE_ROUTE},
    route::RouteQuote,
};
use tracing::{error, instrument};

use super::{error::RouteServiceError, intent::SwapIntent, ZeroExClient};

impl ZeroExClient {
    /// Fetch an indicative price for a swap intent
    ///
    /// Only the shape of the response is checked here; whether the route is
    /// internally consistent is for the caller to decide
    #[instrument(skip_all, fields(
        chain_id = intent.chain_id(),
        sell_token = %intent.sell_token(),
        buy_token = %intent.buy_token(),
        sell_amount = %intent.sell_amount(),
    ))]
    pub async fn fetch_price(&self, intent: &SwapIntent) -> Result<RouteQuote, RouteServiceError> {
        let params = intent.to_price_params().to_query_pairs();

        // Log the request parameters if the price request fails
        let resp: PriceResponse = match self.send_get_request(PRICE_ROUTE, &params).await {
            Ok(resp) => resp,
            Err(e) => {
                error!("price request failed with params {params:?}: {e}");
                return Err(e);
            },
        };

        RouteQuote::try_from(resp).map_err(RouteServiceError::from)
    }
}

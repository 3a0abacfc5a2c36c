//! Typed client for the Waves data service: aliases, assets, trading pairs,
//! exchange transactions and candles.
//!
//! Every endpoint is a [`method::Method`] that turns its parameters into a
//! [`request::DataRequest`]. [`DataServiceClient`] hands that request to a
//! [`transport::Transport`] and decodes the body into the endpoint's response.

pub mod aliases;
pub mod assets;
pub mod candles;
pub mod config;
pub mod error;
pub mod method;
pub mod models;
pub mod pairs;
pub mod request;
pub mod transactions;
pub mod transport;

use tracing::{debug, warn};

use crate::aliases::{
    Alias, AliasDataResponse, AliasParams, Aliases, AliasesParams, AliasesResponse,
};
use crate::assets::{Assets, AssetsInfoResponse, AssetsParams};
use crate::candles::{Candles, CandlesParams, CandlesResponse};
use crate::pairs::{
    Pair, PairParams, PairResponse, PairsSearch, PairsSearchParams, SearchPairResponse,
};
use crate::transactions::{ExchangeTransactionsParams, LastTradesResponse, TransactionsExchange};

pub use crate::config::DataServiceConfig;
pub use crate::error::{DataServiceError, Result};
pub use crate::request::DataRequest;
pub use crate::transport::{RawResponse, ReqwestTransport, Transport};

#[derive(Debug, Clone)]
pub struct DataServiceClient<T = ReqwestTransport> {
    transport: T,
}

impl DataServiceClient<ReqwestTransport> {
    pub fn new(config: &DataServiceConfig) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(config)?))
    }
}

impl<T: Transport> DataServiceClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub async fn call<M: method::Method>(&self, params: M::Params) -> Result<M::Response> {
        let request = M::request(&params);
        let path = request.relative_url();
        debug!(%path, "Requesting data service");

        let response = self.transport.execute(&request).await?;
        if !response.is_success() {
            warn!(%path, status = response.status, "Data service returned non-success status");
            return Err(DataServiceError::status(response.status, path, &response.body));
        }

        debug!(
            %path,
            status = response.status,
            bytes = response.body.len(),
            "Data service responded"
        );
        serde_json::from_slice(&response.body).map_err(|source| {
            warn!(%path, error = %source, "Failed to decode data service response");
            DataServiceError::Decode { path, source }
        })
    }

    pub async fn alias(&self, params: AliasParams) -> Result<AliasDataResponse> {
        self.call::<Alias>(params).await
    }

    pub async fn aliases(&self, params: AliasesParams) -> Result<AliasesResponse> {
        self.call::<Aliases>(params).await
    }

    /// Empty `ids` short-circuits to an empty list without a request.
    pub async fn assets(&self, params: AssetsParams) -> Result<AssetsInfoResponse> {
        if params.ids.is_empty() {
            return Ok(AssetsInfoResponse::default());
        }
        self.call::<Assets>(params).await
    }

    pub async fn pair(&self, params: PairParams) -> Result<PairResponse> {
        self.call::<Pair>(params).await
    }

    pub async fn pairs_search(&self, params: PairsSearchParams) -> Result<SearchPairResponse> {
        self.call::<PairsSearch>(params).await
    }

    pub async fn transactions_exchange(
        &self,
        params: ExchangeTransactionsParams,
    ) -> Result<LastTradesResponse> {
        self.call::<TransactionsExchange>(params).await
    }

    /// Returns at most [`candles::MAX_CANDLES`] candles; see [`Self::candles_window`]
    /// for windows longer than that.
    pub async fn candles(&self, params: CandlesParams) -> Result<CandlesResponse> {
        self.call::<Candles>(params).await
    }

    /// Fetches the whole window as consecutive capped requests, one after
    /// another. The first failure aborts the call.
    pub async fn candles_window(&self, params: CandlesParams) -> Result<CandlesResponse> {
        let windows = params.windows();
        debug!(windows = windows.len(), interval = %params.interval, "Fetching candle window");

        let mut merged = CandlesResponse::default();
        for window in windows {
            let page = self.call::<Candles>(window).await?;
            for candle in page {
                let repeated = merged
                    .data
                    .last()
                    .is_some_and(|last| last.data.time == candle.data.time);
                if !repeated {
                    merged.data.push(candle);
                }
            }
        }

        Ok(merged)
    }
}

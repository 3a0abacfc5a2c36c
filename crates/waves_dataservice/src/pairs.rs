use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::method::Method;
use crate::models::ListResponse;
use crate::request::{DataRequest, path_segment};

pub const DEFAULT_PAIRS_LIMIT: u32 = 100;

#[derive(Debug, Clone, Default, Builder)]
pub struct PairParams {
    #[builder(into)]
    pub amount_asset: Option<String>,
    #[builder(into)]
    pub price_asset: Option<String>,
}

#[derive(Debug, Clone, Builder)]
pub struct PairsSearchParams {
    /// Serialized pair list, e.g. `WAVES/8LQW8f7P5d5PZM7GtZEBgaqRPGSzS3DfPuiXrURJ4AJS`.
    #[builder(into)]
    pub pairs: Option<String>,
    /// Matches pairs where either asset's name, ticker or id contains this text.
    #[builder(into)]
    pub search_by_asset: Option<String>,
    /// Entry `i` is matched against asset `i` of each pair.
    pub search_by_assets: Option<Vec<String>>,
    /// Exact rather than substring matching for `search_by_assets`.
    pub match_exactly: Option<bool>,
    #[builder(default = DEFAULT_PAIRS_LIMIT)]
    pub limit: u32,
}

impl Default for PairsSearchParams {
    fn default() -> Self {
        Self {
            pairs: None,
            search_by_asset: None,
            search_by_assets: None,
            match_exactly: None,
            limit: DEFAULT_PAIRS_LIMIT,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PairInfo {
    #[serde(rename = "firstPrice", default)]
    pub first_price: Option<f64>,
    #[serde(rename = "lastPrice", default)]
    pub last_price: Option<f64>,
    #[serde(default)]
    pub low: Option<f64>,
    #[serde(default)]
    pub high: Option<f64>,
    #[serde(default)]
    pub volume: Option<f64>,
    #[serde(rename = "quoteVolume", default)]
    pub quote_volume: Option<f64>,
    #[serde(rename = "volumeWaves", default)]
    pub volume_waves: Option<f64>,
    #[serde(rename = "weightedAveragePrice", default)]
    pub weighted_average_price: Option<f64>,
    #[serde(rename = "txsCount", default)]
    pub txs_count: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PairResponse {
    #[serde(rename = "__type", default)]
    pub kind: String,
    #[serde(rename = "amountAsset")]
    pub amount_asset: String,
    #[serde(rename = "priceAsset")]
    pub price_asset: String,
    pub data: Option<PairInfo>,
}

pub type SearchPairResponse = ListResponse<PairResponse>;

/// `GET v0/pairs/{amountAsset}/{priceAsset}`
pub struct Pair;

impl Method for Pair {
    type Params = PairParams;
    type Response = PairResponse;

    fn request(params: &PairParams) -> DataRequest {
        DataRequest::get(format!(
            "v0/pairs/{}/{}",
            path_segment(params.amount_asset.as_deref()),
            path_segment(params.price_asset.as_deref())
        ))
    }
}

/// `GET v0/pairs`: filtered pair search, sorted by volume in WAVES when unfiltered.
pub struct PairsSearch;

impl Method for PairsSearch {
    type Params = PairsSearchParams;
    type Response = SearchPairResponse;

    fn request(params: &PairsSearchParams) -> DataRequest {
        DataRequest::get("v0/pairs")
            .param_opt("pairs", params.pairs.as_deref())
            .param_opt("search_by_asset", params.search_by_asset.as_deref())
            .param_all("search_by_assets", params.search_by_assets.iter().flatten())
            .param_opt("match_exactly", params.match_exactly)
            .param("limit", params.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_path() {
        let request = Pair::request(
            &PairParams::builder()
                .amount_asset("WAVES")
                .price_asset("8LQW8f7P5d5PZM7GtZEBgaqRPGSzS3DfPuiXrURJ4AJS")
                .build(),
        );
        assert_eq!(
            request.relative_url(),
            "v0/pairs/WAVES/8LQW8f7P5d5PZM7GtZEBgaqRPGSzS3DfPuiXrURJ4AJS"
        );
    }

    #[test]
    fn search_defaults_limit() {
        let request = PairsSearch::request(&PairsSearchParams::builder().build());
        assert_eq!(request.relative_url(), "v0/pairs?limit=100");

        let request = PairsSearch::request(&PairsSearchParams::default());
        assert_eq!(request.query_values("limit").collect::<Vec<_>>(), vec!["100"]);
    }

    #[test]
    fn search_with_all_filters() {
        let request = PairsSearch::request(
            &PairsSearchParams::builder()
                .search_by_asset("btc")
                .search_by_assets(vec!["WAVES".to_string(), "BTC".to_string()])
                .match_exactly(true)
                .limit(10)
                .build(),
        );

        assert_eq!(
            request.relative_url(),
            "v0/pairs?search_by_asset=btc&search_by_assets=WAVES&search_by_assets=BTC&match_exactly=true&limit=10"
        );
    }

    #[test]
    fn decode_pair_without_stats() {
        let response: PairResponse = serde_json::from_str(
            r#"{"__type":"pair","amountAsset":"WAVES","priceAsset":"BTC","data":null}"#,
        )
        .unwrap();

        assert_eq!(response.amount_asset, "WAVES");
        assert!(response.data.is_none());
    }
}

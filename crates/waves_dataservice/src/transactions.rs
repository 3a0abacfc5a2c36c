use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::method::Method;
use crate::models::{ListResponse, Typed};
use crate::request::DataRequest;

#[derive(Debug, Clone, Builder)]
pub struct ExchangeTransactionsParams {
    #[builder(into)]
    pub amount_asset: Option<String>,
    #[builder(into)]
    pub price_asset: Option<String>,
    pub limit: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Buy,
    Sell,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssetPair {
    #[serde(rename = "amountAsset", default)]
    pub amount_asset: Option<String>,
    #[serde(rename = "priceAsset", default)]
    pub price_asset: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Order {
    pub id: String,
    pub sender: String,
    #[serde(rename = "senderPublicKey", default)]
    pub sender_public_key: Option<String>,
    #[serde(rename = "matcherPublicKey", default)]
    pub matcher_public_key: Option<String>,
    #[serde(rename = "assetPair")]
    pub asset_pair: AssetPair,
    #[serde(rename = "orderType")]
    pub order_type: OrderType,
    pub price: f64,
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub expiration: Option<DateTime<Utc>>,
    #[serde(rename = "matcherFee", default)]
    pub matcher_fee: Option<f64>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExchangeTransaction {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub fee: Option<f64>,
    pub sender: String,
    pub amount: f64,
    pub price: f64,
    pub order1: Order,
    pub order2: Order,
    #[serde(rename = "buyMatcherFee", default)]
    pub buy_matcher_fee: Option<f64>,
    #[serde(rename = "sellMatcherFee", default)]
    pub sell_matcher_fee: Option<f64>,
}

impl ExchangeTransaction {
    pub fn buy_order(&self) -> Option<&Order> {
        [&self.order1, &self.order2]
            .into_iter()
            .find(|order| order.order_type == OrderType::Buy)
    }

    pub fn sell_order(&self) -> Option<&Order> {
        [&self.order1, &self.order2]
            .into_iter()
            .find(|order| order.order_type == OrderType::Sell)
    }
}

pub type LastTradesResponse = ListResponse<Typed<ExchangeTransaction>>;

/// `GET v0/transactions/exchange`: latest trades of a pair.
pub struct TransactionsExchange;

impl Method for TransactionsExchange {
    type Params = ExchangeTransactionsParams;
    type Response = LastTradesResponse;

    fn request(params: &ExchangeTransactionsParams) -> DataRequest {
        DataRequest::get("v0/transactions/exchange")
            .param_opt("amountAsset", params.amount_asset.as_deref())
            .param_opt("priceAsset", params.price_asset.as_deref())
            .param("limit", params.limit)
    }
}

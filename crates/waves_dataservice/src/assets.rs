use bon::Builder;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::method::Method;
use crate::models::{ListResponse, Typed, opt_amount};
use crate::request::DataRequest;

#[derive(Debug, Clone, Default, Builder)]
pub struct AssetsParams {
    #[builder(default)]
    pub ids: Vec<String>,
}

impl AssetsParams {
    pub fn new(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AssetInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub ticker: Option<String>,
    pub precision: u8,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub height: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub sender: Option<String>,
    #[serde(default, deserialize_with = "opt_amount")]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub reissuable: bool,
    #[serde(rename = "hasScript", default)]
    pub has_script: bool,
    #[serde(rename = "minSponsoredFee", default, deserialize_with = "opt_amount")]
    pub min_sponsored_fee: Option<i64>,
}

/// One entry per requested id, in request order; unknown ids carry a `null` payload.
pub type AssetsInfoResponse = ListResponse<Typed<Option<AssetInfo>>>;

impl AssetsInfoResponse {
    pub fn known(&self) -> impl Iterator<Item = &AssetInfo> {
        self.iter().filter_map(|entry| entry.data.as_ref())
    }
}

/// `GET v0/assets?ids=`: batch asset metadata.
pub struct Assets;

impl Method for Assets {
    type Params = AssetsParams;
    type Response = AssetsInfoResponse;

    fn request(params: &AssetsParams) -> DataRequest {
        DataRequest::get("v0/assets").param_all("ids", &params.ids)
    }
}

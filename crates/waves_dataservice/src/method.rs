use serde::de::DeserializeOwned;

use crate::request::DataRequest;

/// A single data service endpoint: how its parameters become a request and
/// what the response body decodes into.
pub trait Method {
    type Params;
    type Response: DeserializeOwned;

    fn request(params: &Self::Params) -> DataRequest;
}

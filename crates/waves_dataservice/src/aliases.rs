use bon::Builder;
use serde::{Deserialize, Serialize};

use crate::method::Method;
use crate::models::{ListResponse, Typed};
use crate::request::{DataRequest, path_segment};

#[derive(Debug, Clone, Default, Builder)]
pub struct AliasParams {
    #[builder(into)]
    pub alias: Option<String>,
}

#[derive(Debug, Clone, Default, Builder)]
pub struct AliasesParams {
    #[builder(into)]
    pub address: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AliasData {
    pub alias: String,
    pub address: String,
}

pub type AliasDataResponse = Typed<AliasData>;

pub type AliasesResponse = ListResponse<Typed<AliasData>>;

impl AliasDataResponse {
    pub fn address(&self) -> &str {
        &self.data.address
    }
}

impl AliasesResponse {
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|entry| entry.data.alias.as_str())
    }
}

/// `GET v0/aliases/{alias}`: the address an alias is bound to.
pub struct Alias;

impl Method for Alias {
    type Params = AliasParams;
    type Response = AliasDataResponse;

    fn request(params: &AliasParams) -> DataRequest {
        DataRequest::get(format!(
            "v0/aliases/{}",
            path_segment(params.alias.as_deref())
        ))
    }
}

/// `GET v0/aliases?address=`: every alias of an address.
pub struct Aliases;

impl Method for Aliases {
    type Params = AliasesParams;
    type Response = AliasesResponse;

    fn request(params: &AliasesParams) -> DataRequest {
        DataRequest::get("v0/aliases").param_opt("address", params.address.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alias_request_has_no_query() {
        for alias in ["alice", "bob-1", "x_y.z", "mail@home"] {
            let request = Alias::request(&AliasParams::builder().alias(alias).build());
            assert_eq!(request.path(), format!("v0/aliases/{alias}"));
            assert!(request.query().is_empty());
        }
    }

    #[test]
    fn absent_alias_leaves_segment_empty() {
        let request = Alias::request(&AliasParams::default());
        assert_eq!(request.relative_url(), "v0/aliases/");
    }

    #[test]
    fn aliases_request_by_address() {
        let request = Aliases::request(
            &AliasesParams::builder()
                .address("3PAWwWa6GbwcJaFzwqXQN5KQm7H96Y7SHTQ")
                .build(),
        );
        assert_eq!(
            request.relative_url(),
            "v0/aliases?address=3PAWwWa6GbwcJaFzwqXQN5KQm7H96Y7SHTQ"
        );

        let request = Aliases::request(&AliasesParams::default());
        assert_eq!(request.relative_url(), "v0/aliases");
    }

    #[test]
    fn decode_alias() {
        let response: AliasDataResponse = serde_json::from_str(
            r#"{"__type":"alias","data":{"alias":"alice","address":"3PAWwWa6GbwcJaFzwqXQN5KQm7H96Y7SHTQ"}}"#,
        )
        .unwrap();

        assert_eq!(response.kind, "alias");
        assert_eq!(response.address(), "3PAWwWa6GbwcJaFzwqXQN5KQm7H96Y7SHTQ");
    }
}

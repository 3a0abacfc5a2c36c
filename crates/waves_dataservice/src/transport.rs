use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder, Url};

use crate::config::DataServiceConfig;
use crate::error::{DataServiceError, Result};
use crate::request::DataRequest;

/// Status and body of an HTTP exchange, before any decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one GET request. Implementations must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: &DataRequest) -> Result<RawResponse>;
}

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    base_url: Url,
    reqwest: Client,
}

impl ReqwestTransport {
    pub fn new(config: &DataServiceConfig) -> Result<Self> {
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)
            .map_err(|e| DataServiceError::InvalidUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = ClientBuilder::new().default_headers(headers);
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let reqwest = builder.build()?;

        Ok(Self { base_url, reqwest })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fails for paths holding `.`/`..` segments in any spelling, since joining
    /// would resolve them onto another endpoint.
    pub fn url_for(&self, request: &DataRequest) -> Result<Url> {
        if request.path().split('/').any(is_dot_segment) {
            return Err(DataServiceError::InvalidUrl(format!(
                "{request}: dot segment in path"
            )));
        }

        self.base_url
            .join(&request.relative_url())
            .map_err(|e| DataServiceError::InvalidUrl(format!("{request}: {e}")))
    }
}

fn is_dot_segment(segment: &str) -> bool {
    let segment = segment.to_ascii_lowercase().replace("%2e", ".");
    segment == "." || segment == ".."
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &DataRequest) -> Result<RawResponse> {
        let url = self.url_for(request)?;
        let response = self.reqwest.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;

        Ok(RawResponse::new(status, body.to_vec()))
    }
}

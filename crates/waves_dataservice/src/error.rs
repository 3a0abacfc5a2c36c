use thiserror::Error;

/// Most bytes of a failed response body kept on a [`DataServiceError::Status`].
const MAX_ERROR_BODY: usize = 512;

pub type Result<T> = std::result::Result<T, DataServiceError>;

#[derive(Error, Debug)]
pub enum DataServiceError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Data service returned HTTP {status} for {path}: {body}")]
    Status {
        status: u16,
        path: String,
        body: String,
    },
    #[error("Error decoding response body for {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl DataServiceError {
    pub(crate) fn status(status: u16, path: impl Into<String>, body: &[u8]) -> Self {
        let body = String::from_utf8_lossy(body);
        let body = if body.len() > MAX_ERROR_BODY {
            let mut cut = MAX_ERROR_BODY;
            while !body.is_char_boundary(cut) {
                cut -= 1;
            }
            format!("{}...", &body[..cut])
        } else {
            body.into_owned()
        };

        Self::Status {
            status,
            path: path.into(),
            body,
        }
    }

    /// HTTP status of a non-success response, if that is what failed.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.http_status() == Some(404)
    }
}

impl From<reqwest::Error> for DataServiceError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

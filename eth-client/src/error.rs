use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{provider} request timed out")]
    Timeout { provider: &'static str },

    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} responded with status {status}")]
    Status { provider: &'static str, status: u16 },

    #[error("{provider} error: {message}")]
    Api { provider: &'static str, message: String },

    #[error("{provider} has no record of {what}")]
    NotFound { provider: &'static str, what: String },

    #[error("{provider} returned an unexpected payload: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid endpoint url: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    pub(crate) fn from_reqwest(provider: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            ClientError::Timeout { provider }
        } else {
            ClientError::Http { provider, source }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

use std::error::Error as StdError;

use thiserror::Error;

/// Which side of the exchange failed. Only logged; the loader's visible
/// state collapses both into a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// No response was obtained.
    Transport,
    /// A response arrived but was not a usable value list.
    Response,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid api endpoint '{url}': {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("{}", with_causes(.0))]
    Transport(#[from] reqwest::Error),
    #[error("HTTP error! status: {status}")]
    Status { status: u16 },
    #[error("failed to read values response: {}", with_causes(.0))]
    Body(#[source] reqwest::Error),
    #[error("malformed values response: {0}")]
    MalformedBody(#[from] serde_json::Error),
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            Self::InvalidEndpoint { .. } | Self::Transport(_) => FetchErrorKind::Transport,
            Self::Status { .. } | Self::Body(_) | Self::MalformedBody(_) => {
                FetchErrorKind::Response
            }
        }
    }
}

/// reqwest's `Display` stops at the outermost layer; append each source so
/// the message names the cause (refused, dns, tls).
fn with_causes(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.ends_with(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}

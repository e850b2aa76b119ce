//! Error handling for catalog API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Errors constructing a [crate::CatalogClient].
#[derive(Debug, Error)]
pub enum CatalogClientError {
    #[error("invalid catalog url '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        err: url::ParseError,
    },
    #[error("{}", .0)]
    Other(String),
}

/// A failed exchange with the remote catalog.
///
/// These never cross the gateway boundary as-is:
/// searches absorb them into [crate::SearchOutcome::Degraded]
/// and lookups wrap them in [LookupError::NotFound].
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("could not reach the catalog")]
    Transport(#[source] reqwest::Error),
    #[error("catalog rejected the request with status {0}")]
    RemoteRejection(StatusCode),
    #[error("catalog response could not be decoded")]
    Decode(#[source] serde_json::Error),
}

impl GatewayError {
    /// Short name of the failure kind, for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Transport(_) => "transport",
            GatewayError::RemoteRejection(_) => "remote_rejection",
            GatewayError::Decode(_) => "decode",
        }
    }
}

/// Outcome of a failed single entity lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The id was rejected locally, no request was sent.
    #[error("invalid entity id {0}, expected a positive integer")]
    InvalidRequest(i64),
    /// The catalog did not produce a record for the id.
    #[error("entity not found")]
    NotFound(#[source] GatewayError),
}

//! Error types for the Extract stage.
//!
//! Every variant ends the fetch with "no data this run". The variants exist so
//! callers can tell a failed fetch apart from a provider that legitimately
//! returned an empty collection.

use thiserror::Error;

/// Errors that can occur while fetching from the GraphQL provider.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// No API key or bearer token was configured.
    #[error("Missing credentials for provider: {provider}")]
    MissingCredentials {
        /// The provider that needed the credential
        provider: String,
    },

    /// The request never produced an HTTP response (DNS, TLS, connection reset...).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The provider answered with a non-success HTTP status.
    #[error("HTTP error {status}: {body}")]
    Http {
        /// The HTTP status code
        status: u16,
        /// Response body, truncated for diagnostics
        body: String,
    },

    /// The body was not valid JSON.
    #[error("Invalid response body: {0}")]
    InvalidBody(String),

    /// HTTP succeeded but `data` was absent or null; the provider reports why
    /// in the sibling `errors` array.
    #[error("Query rejected by provider: {}", messages.join("; "))]
    QueryRejected {
        /// Messages taken from the `errors` array
        messages: Vec<String>,
    },

    /// `data` was present but the expected nested collection was not.
    #[error("Unexpected response structure: expected {path}")]
    UnexpectedStructure {
        /// Dotted path that was expected, e.g. `data.ethereum.transactions`
        path: String,
    },
}

impl ProviderError {
    /// Short, stable label for logs and run summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingCredentials { .. } => "missing_credentials",
            Self::Network(_) => "network",
            Self::Http { .. } => "http",
            Self::InvalidBody(_) => "invalid_body",
            Self::QueryRejected { .. } => "query_rejected",
            Self::UnexpectedStructure { .. } => "unexpected_structure",
        }
    }
}

//! Bitquery GraphQL provider.
//!
//! Sends one POST to the Bitquery endpoint and validates the envelope.
//!
//! # Response Format
//!
//! Success: `{"data": {"ethereum": {"<collection>": [ {...}, ... ]}}}`
//!
//! Query-level failure arrives with HTTP 200: `{"data": null, "errors": [{"message": "..."}]}`

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::ProviderError;
use crate::models::RawTrade;
use crate::provider::TradeSource;
use crate::query::{AuthScheme, QueryVariant};

const PROVIDER_ID: &str = "BITQUERY";

/// Longest slice of a response body kept in diagnostics.
const MAX_DIAGNOSTIC_BODY: usize = 500;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    #[serde(default)]
    data: Option<Value>,
    #[serde(default)]
    errors: Option<Vec<GraphQlErrorEntry>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlErrorEntry {
    #[serde(default)]
    message: Option<String>,
}

/// Fetcher for one Bitquery query variant.
///
/// # Example
///
/// ```ignore
/// let provider = BitqueryProvider::new("your-api-key", QueryVariant::Transfers);
/// let records = provider.fetch().await;
/// ```
pub struct BitqueryProvider {
    client: Client,
    api_key: String,
    variant: QueryVariant,
    endpoint: String,
}

impl BitqueryProvider {
    pub fn new(api_key: impl Into<String>, variant: QueryVariant) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            variant,
            endpoint: variant.endpoint().to_string(),
        }
    }

    /// Point the provider at another URL serving the same GraphQL contract
    /// (a local stand-in server, a proxy).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn build_request(&self) -> reqwest::RequestBuilder {
        let request = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest {
                query: self.variant.document(),
            });

        match self.variant.auth_scheme() {
            AuthScheme::ApiKeyHeader => request.header("X-API-KEY", &self.api_key),
            AuthScheme::Bearer => request.bearer_auth(&self.api_key),
        }
    }
}

#[async_trait]
impl TradeSource for BitqueryProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    fn variant(&self) -> QueryVariant {
        self.variant
    }

    async fn try_fetch(&self) -> Result<Vec<RawTrade>, ProviderError> {
        if self.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredentials {
                provider: PROVIDER_ID.to_string(),
            });
        }

        debug!(
            "Requesting {} from {} ({})",
            self.variant,
            self.endpoint,
            self.variant.collection_path()
        );

        let response = self.build_request().send().await?;
        let status = response.status();
        let body = response.text().await?;

        info!(
            "{} responded with HTTP {}: {}",
            PROVIDER_ID,
            status.as_u16(),
            truncate_body(&body)
        );

        if !status.is_success() {
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        let records = extract_collection(self.variant, &body)?;
        info!(
            "Fetched {} {} records from {}",
            records.len(),
            self.variant,
            PROVIDER_ID
        );
        Ok(records)
    }
}

/// Validate a 2xx body and return the collection at the variant's path.
///
/// Records are returned in provider order and otherwise untouched.
pub(crate) fn extract_collection(
    variant: QueryVariant,
    body: &str,
) -> Result<Vec<RawTrade>, ProviderError> {
    let envelope: GraphQlEnvelope = serde_json::from_str(body)
        .map_err(|e| ProviderError::InvalidBody(format!("{}: {}", e, truncate_body(body))))?;

    let messages: Vec<String> = envelope
        .errors
        .unwrap_or_default()
        .into_iter()
        .map(|entry| {
            entry
                .message
                .unwrap_or_else(|| "unspecified error".to_string())
        })
        .collect();

    let data = match envelope.data {
        Some(data) if !data.is_null() => data,
        _ => return Err(ProviderError::QueryRejected { messages }),
    };

    if !messages.is_empty() {
        warn!(
            "{} returned data alongside errors: {}",
            PROVIDER_ID,
            messages.join("; ")
        );
    }

    let unexpected = || ProviderError::UnexpectedStructure {
        path: variant.collection_path(),
    };

    let collection = data
        .get(variant.network_key())
        .and_then(|network| network.get(variant.collection_key()))
        .and_then(Value::as_array)
        .ok_or_else(unexpected)?;

    collection
        .iter()
        .cloned()
        .map(|item| RawTrade::try_from(item).map_err(|_| unexpected()))
        .collect()
}

/// Cut a body down for logs without splitting a UTF-8 character.
fn truncate_body(body: &str) -> String {
    if body.chars().count() <= MAX_DIAGNOSTIC_BODY {
        return body.to_string();
    }
    let mut truncated: String = body.chars().take(MAX_DIAGNOSTIC_BODY).collect();
    truncated.push_str("...");
    truncated
}

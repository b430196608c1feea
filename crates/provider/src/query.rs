//! Compiled-in GraphQL query shapes.
//!
//! The endpoint, filter window, result limit and sort order are part of the
//! document text and are not runtime-configurable. Each variant also fixes
//! where its collection lives in the response (`data.<network>.<collection>`)
//! and how the request authenticates.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Bitquery GraphQL endpoint shared by both variants.
pub const BITQUERY_ENDPOINT: &str = "https://graphql.bitquery.io/";

/// Maximum number of records requested per run.
pub const RESULT_LIMIT: u32 = 100;

const TRANSFERS_QUERY: &str = r#"
{
  ethereum(network: ethereum) {
    transactions(options: {limit: 100, desc: "block.timestamp.time"}) {
      hash
      from { address }
      to { address }
      value
      gas
      gas_price
      block { timestamp { time } height }
    }
  }
}
"#;

const DEX_TRADES_QUERY: &str = r#"
{
  ethereum(network: ethereum) {
    dexTrades(
      options: {limit: 100, desc: "block.height"}
      date: {since: "2024-01-01"}
    ) {
      date { date }
      buyAmount
      buyAmountInUsd: buyAmount(in: USD)
      buyCurrency { symbol }
      sellAmount
      sellAmountInUsd: sellAmount(in: USD)
      sellCurrency { symbol }
      tradeAmount(in: USD)
      transaction { hash gasValue gasPrice gas }
    }
  }
}
"#;

/// How the request carries the credential.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `X-API-KEY: <key>`
    ApiKeyHeader,
    /// `Authorization: Bearer <token>`
    Bearer,
}

/// The two query shapes the pipeline knows how to fetch and normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryVariant {
    /// Address-based transfers: `data.ethereum.transactions`.
    #[default]
    Transfers,
    /// DEX trades with USD-denominated amounts: `data.ethereum.dexTrades`.
    DexTrades,
}

impl QueryVariant {
    pub fn document(&self) -> &'static str {
        match self {
            Self::Transfers => TRANSFERS_QUERY,
            Self::DexTrades => DEX_TRADES_QUERY,
        }
    }

    pub fn endpoint(&self) -> &'static str {
        BITQUERY_ENDPOINT
    }

    pub fn auth_scheme(&self) -> AuthScheme {
        match self {
            Self::Transfers => AuthScheme::ApiKeyHeader,
            Self::DexTrades => AuthScheme::Bearer,
        }
    }

    /// Key under `data` that holds the network object.
    pub fn network_key(&self) -> &'static str {
        "ethereum"
    }

    /// Key under the network object that holds the record array.
    pub fn collection_key(&self) -> &'static str {
        match self {
            Self::Transfers => "transactions",
            Self::DexTrades => "dexTrades",
        }
    }

    /// Dotted path used in diagnostics, e.g. `data.ethereum.transactions`.
    pub fn collection_path(&self) -> String {
        format!("data.{}.{}", self.network_key(), self.collection_key())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transfers => "transfers",
            Self::DexTrades => "dex-trades",
        }
    }
}

impl fmt::Display for QueryVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Unknown query variant: {0} (expected 'transfers' or 'dex-trades')")]
pub struct UnknownVariant(pub String);

impl FromStr for QueryVariant {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "transfers" | "transactions" => Ok(Self::Transfers),
            "dex-trades" | "dex_trades" | "dextrades" => Ok(Self::DexTrades),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

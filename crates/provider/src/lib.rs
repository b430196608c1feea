//! On-chain ETL Provider Crate
//!
//! This crate is the Extract stage of the pipeline. It sends one bounded
//! GraphQL query to Bitquery, validates the response envelope, and hands back
//! the raw records exactly as the provider returned them.
//!
//! # Overview
//!
//! ```text
//! +------------------+     +------------------+     +------------------+
//! |  QueryVariant    | --> | BitqueryProvider | --> |  Vec<RawTrade>   |
//! +------------------+     +------------------+     +------------------+
//!   (document, path,         (POST + envelope        (provider order,
//!    auth scheme)             validation)             untouched)
//! ```
//!
//! # Core Types
//!
//! - [`QueryVariant`] - The compiled-in query shapes (transfers, DEX trades)
//! - [`RawTrade`] - A provider-shaped JSON object
//! - [`TradeSource`] - Trait implemented by fetchers; the orchestrator depends on it
//! - [`ProviderError`] - Why a fetch produced nothing

pub mod errors;
pub mod models;
pub mod provider;
pub mod query;

pub use errors::ProviderError;
pub use models::RawTrade;
pub use provider::bitquery::BitqueryProvider;
pub use provider::TradeSource;
pub use query::{AuthScheme, QueryVariant};

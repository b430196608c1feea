//! Fetcher implementations and the trait the pipeline depends on.

pub mod bitquery;

use async_trait::async_trait;
use log::error;

use crate::errors::ProviderError;
use crate::models::RawTrade;
use crate::query::QueryVariant;

/// Source of raw records for one pipeline run.
///
/// Implementations issue a single bounded request; there is no retry and no
/// pagination. The orchestrator calls [`try_fetch`](Self::try_fetch) so it can
/// tell failures from an empty page, while [`fetch`](Self::fetch) keeps the
/// best-effort contract of "any failure is an empty result".
#[async_trait]
pub trait TradeSource: Send + Sync {
    /// Constant identifier used in logs, e.g. "BITQUERY".
    fn id(&self) -> &'static str;

    /// The query shape this source was built for.
    fn variant(&self) -> QueryVariant;

    /// Fetch the collection, reporting why nothing came back.
    async fn try_fetch(&self) -> Result<Vec<RawTrade>, ProviderError>;

    /// Fetch the collection; every failure degrades to an empty vector.
    async fn fetch(&self) -> Vec<RawTrade> {
        match self.try_fetch().await {
            Ok(records) => records,
            Err(e) => {
                error!("{} fetch failed ({}): {}", self.id(), e.kind(), e);
                Vec::new()
            }
        }
    }
}

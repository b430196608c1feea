//! On-chain ETL Core - normalized records, stage contracts and orchestration.
//!
//! This crate holds the Transform stage and the contracts of the other two.
//! It is database-agnostic: the Load stage is the [`load::RecordSink`] trait,
//! implemented by the `storage-sqlite` crate, and the Extract stage is the
//! provider crate's [`TradeSource`](onchain_etl_provider::TradeSource).
//!
//! ```text
//! TradeSource ──> Vec<RawTrade> ──> normalize_batch ──> NormalizedBatch ──> RecordSink
//!  (provider)                        (this crate)                          (storage)
//! ```

pub mod errors;
pub mod load;
pub mod normalize;
pub mod pipeline;
pub mod records;

pub use errors::{DatabaseError, Error, Result};
pub use load::{LoadMode, LoadOutcome, LoadReport, RecordSink};
pub use normalize::{
    normalize_batch, DexTradeNormalizer, FieldError, NormalizeReport, Normalizer,
    SkippedRecord, TransferNormalizer,
};
pub use pipeline::{Pipeline, RunOutcome};
pub use records::{DexTradeRecord, NormalizedBatch, TargetTable, TransferRecord};

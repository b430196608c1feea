//! Transform stage: provider-shaped records to flat rows.
//!
//! One explicit [`Normalizer`] exists per query variant so each mapping keeps
//! its own required-field contract. A record that breaks the contract is
//! skipped and logged; it never aborts the batch.

mod dex_trade;
mod fields;
mod transfer;


pub use dex_trade::DexTradeNormalizer;
pub use transfer::{TransferNormalizer, WEI_PER_ETHER};

use log::{debug, warn};
use onchain_etl_provider::{QueryVariant, RawTrade};
use thiserror::Error;

use crate::records::NormalizedBatch;

/// Why a single raw record could not be mapped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("missing key '{key}'")]
    MissingKey { key: String },

    #[error("invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

impl FieldError {
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingKey { key: key.into() }
    }

    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::MissingKey { key } | Self::InvalidValue { key, .. } => key,
        }
    }
}

/// A raw record dropped during normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedRecord {
    /// Position in the input batch.
    pub index: usize,
    pub error: FieldError,
}

/// Rows that mapped cleanly plus the records that were dropped.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeReport<R> {
    pub records: Vec<R>,
    pub skipped: Vec<SkippedRecord>,
}

impl<R> Default for NormalizeReport<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

/// Maps raw provider records of one shape into one flat schema.
pub trait Normalizer {
    type Record;

    /// The query variant whose records this normalizer understands.
    fn variant(&self) -> QueryVariant;

    /// Map one record, or report the first key that breaks the contract.
    fn normalize_record(&self, raw: &RawTrade) -> Result<Self::Record, FieldError>;

    /// Map a batch in input order, skipping (and logging) bad records.
    fn normalize_with_report(&self, records: &[RawTrade]) -> NormalizeReport<Self::Record> {
        let mut report = NormalizeReport::default();

        for (index, raw) in records.iter().enumerate() {
            match self.normalize_record(raw) {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    warn!(
                        "Skipping {} record at index {}: {}",
                        self.variant(),
                        index,
                        error
                    );
                    report.skipped.push(SkippedRecord { index, error });
                }
            }
        }

        debug!(
            "Normalized {} of {} {} records",
            report.records.len(),
            records.len(),
            self.variant()
        );
        report
    }

    fn normalize(&self, records: &[RawTrade]) -> Vec<Self::Record> {
        self.normalize_with_report(records).records
    }
}

/// Normalize a batch with the normalizer matching `variant`.
///
/// Returns the tagged batch and the records that were skipped.
pub fn normalize_batch(
    variant: QueryVariant,
    records: &[RawTrade],
) -> (NormalizedBatch, Vec<SkippedRecord>) {
    match variant {
        QueryVariant::Transfers => {
            let report = TransferNormalizer.normalize_with_report(records);
            (NormalizedBatch::Transfers(report.records), report.skipped)
        }
        QueryVariant::DexTrades => {
            let report = DexTradeNormalizer.normalize_with_report(records);
            (NormalizedBatch::DexTrades(report.records), report.skipped)
        }
    }
}

//! Record sink traits.
//!
//! This module defines the storage interface for normalized batches. The
//! trait abstracts the persistence layer so the pipeline can be exercised
//! against an in-memory sink in tests and SQLite in production.
//!
//! # Design Notes
//!
//! - Conflict-skipping inserts are the default load mode
//! - Bulk append is an explicit opt-in for callers that guarantee fresh keys
//! - `persist` never returns an error; the outcome says what happened

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use log::{error, info};
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::records::{NormalizedBatch, TargetTable};

/// How rows are written into the target table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadMode {
    /// Insert each row; rows whose natural key already exists are skipped.
    #[default]
    SkipConflicts,
    /// Insert the batch without conflict handling. A key that already exists
    /// fails the load.
    Append,
}

impl LoadMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SkipConflicts => "skip-conflicts",
            Self::Append => "append",
        }
    }
}

impl fmt::Display for LoadMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoadMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "skip-conflicts" | "skip_conflicts" | "upsert" => Ok(Self::SkipConflicts),
            "append" => Ok(Self::Append),
            other => Err(Error::InvalidConfigValue(format!(
                "unknown load mode '{}' (expected 'skip-conflicts' or 'append')",
                other
            ))),
        }
    }
}

/// Counts from one load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    pub table: TargetTable,
    pub mode: LoadMode,
    /// Rows handed to the sink.
    pub attempted: usize,
    /// Rows that were actually written.
    pub inserted: usize,
}

impl LoadReport {
    pub fn empty(table: TargetTable, mode: LoadMode) -> Self {
        Self {
            table,
            mode,
            attempted: 0,
            inserted: 0,
        }
    }

    /// Rows skipped because their natural key was already stored.
    pub fn skipped(&self) -> usize {
        self.attempted.saturating_sub(self.inserted)
    }
}

/// Result of a best-effort load.
#[derive(Debug)]
pub enum LoadOutcome {
    Completed(LoadReport),
    /// The store rejected the batch. Nothing in this batch was kept.
    Failed { table: TargetTable, error: Error },
}

impl LoadOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }
}

/// Storage interface for normalized batches.
#[async_trait]
pub trait RecordSink: Send + Sync {
    /// Write the batch into `batch.table()`.
    ///
    /// An empty batch is a no-op that returns an empty report.
    async fn try_persist(&self, batch: &NormalizedBatch, mode: LoadMode) -> Result<LoadReport>;

    /// Write the batch, reporting failures instead of returning them.
    ///
    /// A failed load is logged with its cause and the caller carries on.
    /// Durability is not guaranteed by this call; the next run's conflict
    /// skipping is what makes a retry safe.
    async fn persist(&self, batch: &NormalizedBatch, mode: LoadMode) -> LoadOutcome {
        let table = batch.table();
        if batch.is_empty() {
            info!("No records to load into {}", table);
        }

        match self.try_persist(batch, mode).await {
            Ok(report) => {
                info!(
                    "Loaded {} into {} ({}): {} inserted, {} skipped",
                    report.attempted,
                    table,
                    mode,
                    report.inserted,
                    report.skipped()
                );
                LoadOutcome::Completed(report)
            }
            Err(error) => {
                error!("Failed to load {} records into {}: {}", batch.len(), table, error);
                LoadOutcome::Failed { table, error }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_mode_defaults_to_skip_conflicts() {
        assert_eq!(LoadMode::default(), LoadMode::SkipConflicts);
    }

    #[test]
    fn test_load_mode_parse() {
        assert_eq!("append".parse::<LoadMode>().unwrap(), LoadMode::Append);
        assert_eq!(
            "Skip-Conflicts".parse::<LoadMode>().unwrap(),
            LoadMode::SkipConflicts
        );
        assert!(matches!(
            "merge".parse::<LoadMode>(),
            Err(Error::InvalidConfigValue(_))
        ));
    }

    #[test]
    fn test_report_skipped() {
        let report = LoadReport {
            table: TargetTable::Transactions,
            mode: LoadMode::SkipConflicts,
            attempted: 5,
            inserted: 3,
        };
        assert_eq!(report.skipped(), 2);
        assert_eq!(
            LoadReport::empty(TargetTable::DexTrades, LoadMode::Append).skipped(),
            0
        );
    }
}

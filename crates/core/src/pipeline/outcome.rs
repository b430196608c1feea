use std::fmt;

use onchain_etl_provider::ProviderError;

use crate::errors::Error;
use crate::load::LoadReport;

/// Process exit codes for a single run.
pub mod exit_code {
    /// Records were fetched and the load completed (duplicates included).
    pub const SUCCESS: i32 = 0;
    /// Configuration or startup failed before the pipeline ran.
    pub const STARTUP_FAILED: i32 = 1;
    /// The provider answered with an empty collection.
    pub const NO_DATA: i32 = 2;
    /// The fetch failed (transport, HTTP status, query error, shape mismatch).
    pub const FETCH_FAILED: i32 = 3;
    /// The store rejected the batch.
    pub const LOAD_FAILED: i32 = 4;
}

/// Record counts carried through a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunStats {
    pub fetched: usize,
    pub normalized: usize,
    /// Raw records dropped by the normalizer.
    pub skipped: usize,
}

/// How a run ended.
///
/// Only `FetchFailed` and `NoData` stop before the Transform stage.
#[derive(Debug)]
pub enum RunOutcome {
    NoData,
    FetchFailed(ProviderError),
    Loaded { stats: RunStats, report: LoadReport },
    LoadFailed { stats: RunStats, error: Error },
}

impl RunOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Loaded { .. } => exit_code::SUCCESS,
            Self::NoData => exit_code::NO_DATA,
            Self::FetchFailed(_) => exit_code::FETCH_FAILED,
            Self::LoadFailed { .. } => exit_code::LOAD_FAILED,
        }
    }

    pub fn stats(&self) -> RunStats {
        match self {
            Self::Loaded { stats, .. } | Self::LoadFailed { stats, .. } => *stats,
            Self::NoData | Self::FetchFailed(_) => RunStats::default(),
        }
    }
}

impl fmt::Display for RunOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoData => write!(f, "no data"),
            Self::FetchFailed(e) => write!(f, "fetch failed: {}", e),
            Self::Loaded { stats, report } => write!(
                f,
                "fetched {}, normalized {}, skipped {}, inserted {} into {} ({} already present)",
                stats.fetched,
                stats.normalized,
                stats.skipped,
                report.inserted,
                report.table,
                report.skipped()
            ),
            Self::LoadFailed { stats, error } => write!(
                f,
                "fetched {}, normalized {}, load failed: {}",
                stats.fetched, stats.normalized, error
            ),
        }
    }
}

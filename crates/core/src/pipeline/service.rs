use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use onchain_etl_provider::TradeSource;

use super::outcome::{RunOutcome, RunStats};
use crate::load::{LoadMode, LoadOutcome, RecordSink};
use crate::normalize::normalize_batch;

/// Runs Extract, Transform and Load once, in that order.
///
/// Each stage handles its own failures; the only branch between stages is
/// whether Extract produced anything. No stage calls back into an earlier one.
pub struct Pipeline {
    source: Arc<dyn TradeSource>,
    sink: Arc<dyn RecordSink>,
    mode: LoadMode,
}

impl Pipeline {
    pub fn new(source: Arc<dyn TradeSource>, sink: Arc<dyn RecordSink>) -> Self {
        Self {
            source,
            sink,
            mode: LoadMode::default(),
        }
    }

    pub fn with_load_mode(mut self, mode: LoadMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn load_mode(&self) -> LoadMode {
        self.mode
    }

    pub async fn run(&self) -> RunOutcome {
        let started_at = Utc::now();
        info!(
            "Starting {} run against {} (load mode: {})",
            self.source.variant(),
            self.source.id(),
            self.mode
        );

        let outcome = self.run_stages().await;

        let elapsed = Utc::now() - started_at;
        info!(
            "Run finished in {} ms: {}",
            elapsed.num_milliseconds(),
            outcome
        );
        outcome
    }

    async fn run_stages(&self) -> RunOutcome {
        let raw = match self.source.try_fetch().await {
            Ok(raw) => raw,
            Err(e) => {
                error!("{} fetch failed ({}): {}", self.source.id(), e.kind(), e);
                return RunOutcome::FetchFailed(e);
            }
        };

        if raw.is_empty() {
            info!("Provider returned no records; nothing to transform");
            return RunOutcome::NoData;
        }

        let (batch, skipped) = normalize_batch(self.source.variant(), &raw);
        let stats = RunStats {
            fetched: raw.len(),
            normalized: batch.len(),
            skipped: skipped.len(),
        };

        match self.sink.persist(&batch, self.mode).await {
            LoadOutcome::Completed(report) => RunOutcome::Loaded { stats, report },
            LoadOutcome::Failed { error, .. } => RunOutcome::LoadFailed { stats, error },
        }
    }
}

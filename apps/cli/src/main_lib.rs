use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::{Config, LogFormat};
use onchain_etl_core::Pipeline;
use onchain_etl_provider::{BitqueryProvider, TradeSource};
use onchain_etl_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, RecordRepository,
};

pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(false))
            .init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init(),
    }
}

pub fn build_source(config: &Config) -> Arc<dyn TradeSource> {
    Arc::new(BitqueryProvider::new(config.api_key.clone(), config.variant))
}

/// Open the database, apply migrations and start the writer.
///
/// Must be called from inside a Tokio runtime.
pub fn build_sink(config: &Config) -> anyhow::Result<Arc<RecordRepository>> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(&pool)?;
    Ok(Arc::new(RecordRepository::new(pool, writer)))
}

pub fn build_pipeline(config: &Config) -> anyhow::Result<Pipeline> {
    let source = build_source(config);
    let sink = build_sink(config)?;
    Ok(Pipeline::new(source, sink).with_load_mode(config.load_mode))
}

/// Process status for a run exit code. Codes outside `0..=255` become a
/// generic failure.
pub fn exit_with(code: i32) -> ExitCode {
    ExitCode::from(exit_status(code))
}

fn exit_status(code: i32) -> u8 {
    u8::try_from(code).unwrap_or(1)
}

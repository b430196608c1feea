use std::sync::Arc;

use async_trait::async_trait;
use onchain_etl::{build_sink, Config};
use onchain_etl_core::pipeline::exit_code;
use onchain_etl_core::{LoadMode, Pipeline, RunOutcome, TargetTable};
use onchain_etl_provider::{ProviderError, QueryVariant, RawTrade, TradeSource};
use onchain_etl_storage_sqlite::RecordRepository;
use serde_json::json;
use tempfile::{tempdir, TempDir};

struct FixedSource {
    variant: QueryVariant,
    records: Vec<RawTrade>,
}

#[async_trait]
impl TradeSource for FixedSource {
    fn id(&self) -> &'static str {
        "FIXED"
    }

    fn variant(&self) -> QueryVariant {
        self.variant
    }

    async fn try_fetch(&self) -> Result<Vec<RawTrade>, ProviderError> {
        Ok(self.records.clone())
    }
}

fn test_config(dir: &TempDir, variant: QueryVariant, load_mode: LoadMode) -> Config {
    let db_path = dir.path().join("nested").join("etl.db");
    let db_path = db_path.to_string_lossy().to_string();
    let variant = variant.to_string();
    let load_mode = load_mode.to_string();
    Config::from_lookup(move |key| match key {
        "BITQUERY_API_KEY" => Some("test-key".to_string()),
        "ETL_DB_PATH" => Some(db_path.clone()),
        "ETL_QUERY_VARIANT" => Some(variant.clone()),
        "ETL_LOAD_MODE" => Some(load_mode.clone()),
        _ => None,
    })
    .unwrap()
}

fn transfer_record() -> RawTrade {
    RawTrade::try_from(json!({
        "hash": "0xabc",
        "from": {"address": "0x1"},
        "to": {"address": "0x2"},
        "value": "1000000000000000000",
        "block": {"height": 100, "timestamp": {"time": "2024-01-01T00:00:00Z"}}
    }))
    .unwrap()
}

fn dex_record(hash: &str) -> RawTrade {
    RawTrade::try_from(json!({
        "date": {"date": "2024-01-01"},
        "buyAmount": 1.5,
        "buyAmountInUsd": 3000.0,
        "buyCurrency": {"symbol": "WETH"},
        "sellAmount": 3000.0,
        "sellAmountInUsd": 3000.0,
        "sellCurrency": null,
        "tradeAmount": 3000.0,
        "transaction": {"hash": hash, "gasValue": 0.002, "gasPrice": 25.0, "gas": 120000}
    }))
    .unwrap()
}

fn run_with(config: &Config, records: Vec<RawTrade>) -> (Pipeline, Arc<RecordRepository>) {
    let sink = build_sink(config).unwrap();
    let source = Arc::new(FixedSource {
        variant: config.variant,
        records,
    });
    let pipeline = Pipeline::new(source, sink.clone()).with_load_mode(config.load_mode);
    (pipeline, sink)
}

#[tokio::test]
async fn empty_fetch_writes_nothing() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, QueryVariant::Transfers, LoadMode::SkipConflicts);
    let (pipeline, sink) = run_with(&config, vec![]);

    let outcome = pipeline.run().await;
    assert!(matches!(outcome, RunOutcome::NoData));
    assert_eq!(outcome.exit_code(), exit_code::NO_DATA);
    assert_eq!(sink.count(TargetTable::Transactions).unwrap(), 0);
}

#[tokio::test]
async fn single_transfer_is_stored_once_across_runs() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, QueryVariant::Transfers, LoadMode::SkipConflicts);
    let (pipeline, sink) = run_with(&config, vec![transfer_record()]);

    let first = pipeline.run().await;
    assert_eq!(first.exit_code(), exit_code::SUCCESS);
    let stored = sink.list_transfers().unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].tx_hash, "0xabc");
    assert_eq!(stored[0].from_address.as_deref(), Some("0x1"));
    assert_eq!(stored[0].to_address.as_deref(), Some("0x2"));
    assert_eq!(stored[0].value, 1.0);
    assert_eq!(stored[0].block_height, Some(100));
    assert_eq!(stored[0].timestamp.as_deref(), Some("2024-01-01T00:00:00Z"));

    let second = pipeline.run().await;
    match second {
        RunOutcome::Loaded { report, .. } => {
            assert_eq!(report.attempted, 1);
            assert_eq!(report.inserted, 0);
        }
        other => panic!("expected a completed load, got {}", other),
    }
    assert_eq!(sink.count(TargetTable::Transactions).unwrap(), 1);
}

#[tokio::test]
async fn dex_trades_skip_malformed_records() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, QueryVariant::DexTrades, LoadMode::SkipConflicts);
    let mut broken = dex_record("0xbad").into_inner();
    broken.remove("tradeAmount");
    let records = vec![dex_record("0xd1"), RawTrade::new(broken), dex_record("0xd2")];
    let (pipeline, sink) = run_with(&config, records);

    let outcome = pipeline.run().await;
    assert_eq!(outcome.exit_code(), exit_code::SUCCESS);
    let stats = outcome.stats();
    assert_eq!(stats.fetched, 3);
    assert_eq!(stats.normalized, 2);
    assert_eq!(stats.skipped, 1);

    let stored = sink.list_dex_trades().unwrap();
    let hashes: Vec<&str> = stored.iter().map(|t| t.transaction_hash.as_str()).collect();
    assert_eq!(hashes, vec!["0xd1", "0xd2"]);
    assert_eq!(stored[0].buy_currency.as_deref(), Some("WETH"));
    assert_eq!(stored[0].sell_currency, None);
}

#[tokio::test]
async fn append_mode_rejects_a_repeated_batch() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, QueryVariant::Transfers, LoadMode::Append);
    let (pipeline, sink) = run_with(&config, vec![transfer_record()]);

    assert_eq!(pipeline.run().await.exit_code(), exit_code::SUCCESS);
    let second = pipeline.run().await;
    assert!(matches!(second, RunOutcome::LoadFailed { .. }));
    assert_eq!(second.exit_code(), exit_code::LOAD_FAILED);
    assert_eq!(sink.count(TargetTable::Transactions).unwrap(), 1);
}

#[tokio::test]
async fn dropping_the_pipeline_releases_the_database() {
    let dir = tempdir().unwrap();
    let config = test_config(&dir, QueryVariant::Transfers, LoadMode::SkipConflicts);
    let (pipeline, sink) = run_with(&config, vec![transfer_record()]);
    assert_eq!(pipeline.run().await.exit_code(), exit_code::SUCCESS);
    drop(pipeline);
    drop(sink);

    let reopened = build_sink(&config).unwrap();
    assert_eq!(reopened.count(TargetTable::Transactions).unwrap(), 1);
}

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::sync::Arc;

use onchain_etl_core::load::{LoadMode, LoadReport, RecordSink};
use onchain_etl_core::records::{DexTradeRecord, NormalizedBatch, TargetTable, TransferRecord};
use onchain_etl_core::Result;

use super::model::{DexTradeDB, TransactionDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{dex_trades, transactions};

/// Rows per multi-row INSERT in append mode. Twelve columns per row keeps
/// this well under SQLite's bound-parameter limit.
pub const APPEND_CHUNK_SIZE: usize = 500;

/// Stores normalized batches in the `transactions` and `dex_trades` tables.
///
/// Reads go through the pool; every load goes through the writer actor so a
/// batch is committed or rolled back as a whole.
pub struct RecordRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl RecordRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        RecordRepository { pool, writer }
    }

    pub fn count(&self, table: TargetTable) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        let total = match table {
            TargetTable::Transactions => {
                transactions::table.count().get_result::<i64>(&mut conn)
            }
            TargetTable::DexTrades => dex_trades::table.count().get_result::<i64>(&mut conn),
        }
        .map_err(StorageError::from)?;
        Ok(total)
    }

    pub fn list_transfers(&self) -> Result<Vec<TransferRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = transactions::table
            .select(TransactionDB::as_select())
            .order(transactions::tx_hash.asc())
            .load::<TransactionDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(TransferRecord::from).collect())
    }

    pub fn list_dex_trades(&self) -> Result<Vec<DexTradeRecord>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = dex_trades::table
            .select(DexTradeDB::as_select())
            .order(dex_trades::transaction_hash.asc())
            .load::<DexTradeDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(DexTradeRecord::from).collect())
    }
}

fn insert_transactions(
    conn: &mut SqliteConnection,
    rows: &[TransactionDB],
    mode: LoadMode,
) -> Result<usize> {
    let mut inserted = 0;
    match mode {
        LoadMode::SkipConflicts => {
            for row in rows {
                inserted += diesel::insert_into(transactions::table)
                    .values(row)
                    .on_conflict(transactions::tx_hash)
                    .do_nothing()
                    .execute(conn)
                    .map_err(StorageError::from)?;
            }
        }
        LoadMode::Append => {
            for chunk in rows.chunks(APPEND_CHUNK_SIZE) {
                inserted += diesel::insert_into(transactions::table)
                    .values(chunk)
                    .execute(conn)
                    .map_err(StorageError::from)?;
            }
        }
    }
    Ok(inserted)
}

fn insert_dex_trades(
    conn: &mut SqliteConnection,
    rows: &[DexTradeDB],
    mode: LoadMode,
) -> Result<usize> {
    let mut inserted = 0;
    match mode {
        LoadMode::SkipConflicts => {
            for row in rows {
                inserted += diesel::insert_into(dex_trades::table)
                    .values(row)
                    .on_conflict(dex_trades::transaction_hash)
                    .do_nothing()
                    .execute(conn)
                    .map_err(StorageError::from)?;
            }
        }
        LoadMode::Append => {
            for chunk in rows.chunks(APPEND_CHUNK_SIZE) {
                inserted += diesel::insert_into(dex_trades::table)
                    .values(chunk)
                    .execute(conn)
                    .map_err(StorageError::from)?;
            }
        }
    }
    Ok(inserted)
}

#[async_trait]
impl RecordSink for RecordRepository {
    async fn try_persist(&self, batch: &NormalizedBatch, mode: LoadMode) -> Result<LoadReport> {
        let table = batch.table();
        if batch.is_empty() {
            return Ok(LoadReport::empty(table, mode));
        }

        let attempted = batch.len();
        debug!("Writing {} rows into {} ({})", attempted, table, mode);

        let inserted = match batch {
            NormalizedBatch::Transfers(records) => {
                let rows: Vec<TransactionDB> =
                    records.iter().cloned().map(TransactionDB::from).collect();
                self.writer
                    .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                        insert_transactions(conn, &rows, mode)
                    })
                    .await?
            }
            NormalizedBatch::DexTrades(records) => {
                let rows: Vec<DexTradeDB> =
                    records.iter().cloned().map(DexTradeDB::from).collect();
                self.writer
                    .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                        insert_dex_trades(conn, &rows, mode)
                    })
                    .await?
            }
        };

        Ok(LoadReport {
            table,
            mode,
            attempted,
            inserted,
        })
    }
}

//! Database models for the `transactions` and `dex_trades` tables.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use onchain_etl_core::records::{DexTradeRecord, TransferRecord};

/// Row of `transactions`.
#[derive(Queryable, Selectable, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct TransactionDB {
    pub tx_hash: String,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub value: f64,
    pub gas: Option<i64>,
    pub gas_price: Option<f64>,
    pub timestamp: Option<String>,
    pub block_height: Option<i64>,
}

/// Row of `dex_trades`.
#[derive(Queryable, Selectable, Insertable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::dex_trades)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_default_value = false)]
pub struct DexTradeDB {
    pub date: Option<String>,
    pub buy_amount: Option<f64>,
    pub buy_amount_in_usd: Option<f64>,
    pub buy_currency: Option<String>,
    pub sell_amount: Option<f64>,
    pub sell_amount_in_usd: Option<f64>,
    pub sell_currency: Option<String>,
    pub trade_amount: Option<f64>,
    pub transaction_hash: String,
    pub gas_value: Option<f64>,
    pub gas_price: Option<f64>,
    pub gas_used: Option<i64>,
}

impl From<TransferRecord> for TransactionDB {
    fn from(record: TransferRecord) -> Self {
        Self {
            tx_hash: record.tx_hash,
            from_address: record.from_address,
            to_address: record.to_address,
            value: record.value,
            gas: record.gas,
            gas_price: record.gas_price,
            timestamp: record.timestamp,
            block_height: record.block_height,
        }
    }
}

impl From<TransactionDB> for TransferRecord {
    fn from(db: TransactionDB) -> Self {
        Self {
            tx_hash: db.tx_hash,
            from_address: db.from_address,
            to_address: db.to_address,
            value: db.value,
            gas: db.gas,
            gas_price: db.gas_price,
            timestamp: db.timestamp,
            block_height: db.block_height,
        }
    }
}

impl From<DexTradeRecord> for DexTradeDB {
    fn from(record: DexTradeRecord) -> Self {
        Self {
            date: record.date,
            buy_amount: record.buy_amount,
            buy_amount_in_usd: record.buy_amount_in_usd,
            buy_currency: record.buy_currency,
            sell_amount: record.sell_amount,
            sell_amount_in_usd: record.sell_amount_in_usd,
            sell_currency: record.sell_currency,
            trade_amount: record.trade_amount,
            transaction_hash: record.transaction_hash,
            gas_value: record.gas_value,
            gas_price: record.gas_price,
            gas_used: record.gas_used,
        }
    }
}

impl From<DexTradeDB> for DexTradeRecord {
    fn from(db: DexTradeDB) -> Self {
        Self {
            date: db.date,
            buy_amount: db.buy_amount,
            buy_amount_in_usd: db.buy_amount_in_usd,
            buy_currency: db.buy_currency,
            sell_amount: db.sell_amount,
            sell_amount_in_usd: db.sell_amount_in_usd,
            sell_currency: db.sell_currency,
            trade_amount: db.trade_amount,
            transaction_hash: db.transaction_hash,
            gas_value: db.gas_value,
            gas_price: db.gas_price,
            gas_used: db.gas_used,
        }
    }
}

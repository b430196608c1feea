//! Flat, storage-ready records.
//!
//! Each struct serializes to exactly its table's column mapping, so the
//! serde form is the "column name -> scalar" view of a normalized row.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Destination table for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetTable {
    Transactions,
    DexTrades,
}

impl TargetTable {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::DexTrades => "dex_trades",
        }
    }

    /// Column used to suppress duplicates across runs.
    pub fn natural_key(&self) -> &'static str {
        match self {
            Self::Transactions => "tx_hash",
            Self::DexTrades => "transaction_hash",
        }
    }
}

impl fmt::Display for TargetTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records that carry a natural key and belong to one table.
pub trait NaturalKey {
    const TABLE: TargetTable;

    fn natural_key(&self) -> &str;
}

/// Row of the `transactions` table.
///
/// `value` is in whole ether: the provider's wei amount divided by 10^18.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRecord {
    pub tx_hash: String,
    pub from_address: Option<String>,
    pub to_address: Option<String>,
    pub value: f64,
    pub gas: Option<i64>,
    pub gas_price: Option<f64>,
    pub timestamp: Option<String>,
    pub block_height: Option<i64>,
}

impl NaturalKey for TransferRecord {
    const TABLE: TargetTable = TargetTable::Transactions;

    fn natural_key(&self) -> &str {
        &self.tx_hash
    }
}

/// Row of the `dex_trades` table. USD amounts are stored as the provider
/// reported them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DexTradeRecord {
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

impl NaturalKey for DexTradeRecord {
    const TABLE: TargetTable = TargetTable::DexTrades;

    fn natural_key(&self) -> &str {
        &self.transaction_hash
    }
}

/// Output of one Transform pass, tagged with its schema.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedBatch {
    Transfers(Vec<TransferRecord>),
    DexTrades(Vec<DexTradeRecord>),
}

impl NormalizedBatch {
    pub fn table(&self) -> TargetTable {
        match self {
            Self::Transfers(_) => TargetTable::Transactions,
            Self::DexTrades(_) => TargetTable::DexTrades,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Transfers(records) => records.len(),
            Self::DexTrades(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn natural_keys(&self) -> Vec<&str> {
        match self {
            Self::Transfers(records) => records.iter().map(|r| r.natural_key()).collect(),
            Self::DexTrades(records) => records.iter().map(|r| r.natural_key()).collect(),
        }
    }

    /// Flat column maps, in batch order.
    pub fn to_rows(&self) -> serde_json::Result<Vec<Map<String, Value>>> {
        fn flatten<T: Serialize>(records: &[T]) -> serde_json::Result<Vec<Map<String, Value>>> {
            records
                .iter()
                .map(|record| match serde_json::to_value(record)? {
                    Value::Object(map) => Ok(map),
                    _ => Ok(Map::new()),
                })
                .collect()
        }

        match self {
            Self::Transfers(records) => flatten(records),
            Self::DexTrades(records) => flatten(records),
        }
    }
}

//! Normalized record types and the tables they load into.

mod model;

pub use model::{DexTradeRecord, NaturalKey, NormalizedBatch, TargetTable, TransferRecord};

//! SQLite storage for normalized pipeline records.

mod model;
mod repository;

pub use model::{DexTradeDB, TransactionDB};
pub use repository::{RecordRepository, APPEND_CHUNK_SIZE};

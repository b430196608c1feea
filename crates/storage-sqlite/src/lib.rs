//! SQLite storage implementation for the on-chain ETL pipeline.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the [`RecordSink`](onchain_etl_core::RecordSink) trait defined in
//! `onchain-etl-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations for the `transactions` and `dex_trades` tables
//! - A single-writer actor that runs each load in one transaction
//! - Database-specific row types (with Diesel derives)
//!
//! # Architecture
//!
//! ```text
//! core (pipeline, RecordSink)
//!             │
//!             ▼
//!   storage-sqlite (this crate)
//!             │
//!             ▼
//!         SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod records;
pub mod schema;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};

// Re-export storage errors
pub use errors::StorageError;

pub use records::RecordRepository;

// Re-export from onchain-etl-core for convenience
pub use onchain_etl_core::errors::{DatabaseError, Error, Result};

//! Load stage contract.

mod store;

pub use store::{LoadMode, LoadOutcome, LoadReport, RecordSink};

//! Orchestration of one Extract -> Transform -> Load run.

mod outcome;
mod service;


pub use outcome::{exit_code, RunOutcome, RunStats};
pub use service::Pipeline;

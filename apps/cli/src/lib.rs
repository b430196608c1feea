pub mod config;
pub mod main_lib;

pub use config::{Config, ConfigError, LogFormat};
pub use main_lib::{build_pipeline, build_sink, build_source, exit_with, init_tracing};

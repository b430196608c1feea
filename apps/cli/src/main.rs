use std::process::ExitCode;

use onchain_etl::{build_pipeline, exit_with, init_tracing, Config};
use onchain_etl_core::pipeline::exit_code;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return exit_with(exit_code::STARTUP_FAILED);
        }
    };
    init_tracing(config.log_format);

    let pipeline = match build_pipeline(&config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            tracing::error!("Startup failed: {:#}", e);
            return exit_with(exit_code::STARTUP_FAILED);
        }
    };

    let outcome = pipeline.run().await;
    // Releases the writer's connection and the pool before the runtime exits.
    drop(pipeline);
    exit_with(outcome.exit_code())
}

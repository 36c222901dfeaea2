//! Run one traced GET against the compiled-in target.
//!
//! Exits 0 after logging the body, 1 on any failure.

use dialtrace::logging::init_logging;
use dialtrace::{RequestRunner, RunnerConfig};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(e) = init_logging() {
        eprintln!("dialtrace: {e}");
        return ExitCode::FAILURE;
    }

    let runner = RequestRunner::new(RunnerConfig::default());
    match runner.run().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, category = ?e.category(), "request failed");
            ExitCode::FAILURE
        }
    }
}

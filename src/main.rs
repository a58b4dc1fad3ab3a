use dataset_dl::byline::get_byline;
use dataset_dl::{Config, Orchestrator};
use std::path::PathBuf;
use std::process::ExitCode;

/// Optional JSON configuration file; the built-in sources are used when unset
const CONFIG_ENV: &str = "DATASET_DL_CONFIG";

#[tokio::main]
async fn main() -> ExitCode {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dataset_dl=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    println!("Byline: {}", get_byline());

    let config = match std::env::var_os(CONFIG_ENV) {
        Some(path) => match Config::from_json_file(&PathBuf::from(path)) {
            Ok(config) => config,
            Err(e) => {
                tracing::error!(error = %e, "failed to load configuration");
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    let orchestrator = match Orchestrator::new(config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let report = orchestrator.run().await;

    if report.has_failures() && orchestrator.config().fail_on_pipeline_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

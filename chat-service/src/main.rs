//! Chat Service entry point.

use chat_service::config::{ChatConfig, Cli};
use chat_service::lifecycle::shutdown_signal;
use chat_service::services::init_metrics;
use chat_service::startup::Application;
use clap::Parser;
use service_core::error::AppError;
use service_core::observability::{init_tracing, shutdown_tracing};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    // Load configuration - fail fast if invalid
    let config = ChatConfig::load(&cli).map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    )?;

    init_metrics();

    tracing::info!(
        service_name = %config.service_name,
        version = env!("CARGO_PKG_VERSION"),
        listen_addr = %config.common.listen_addr,
        db_max_connections = config.database.max_connections,
        db_min_connections = config.database.min_connections,
        otlp_enabled = config.otlp_endpoint.is_some(),
        "Configuration loaded"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to build application");
        e
    })?;

    let result = app.run_until_stopped(shutdown_signal()).await;

    shutdown_tracing();
    result
}

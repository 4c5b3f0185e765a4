mod cli;

use crate::cli::{StorageBackendArg, CLI};
use anyhow::Context;
use clap::Parser;
use jiff::SignedDuration;
use toolshelf_catalog::ClickConfig;
use toolshelf_core::Repository;
use toolshelf_gateway::{App, AppState, GatewayConfig};
use toolshelf_storage::{DocumentRepository, FileDocument, MemoryDocument};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CLI::parse();

    toolshelf_telemetry::init(config.log_format, toolshelf_telemetry::DEFAULT_DIRECTIVES)?;

    info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage,
        data_file = %config.data_file.display(),
        admin_gate = config.admin_gate,
        "starting toolshelf gateway"
    );

    match config.storage {
        StorageBackendArg::File => {
            let document = FileDocument::open_or_init(&config.data_file)
                .await
                .with_context(|| format!("opening {}", config.data_file.display()))?;
            run_server(&config, DocumentRepository::new(document)).await
        }
        StorageBackendArg::InMemory => {
            run_server(&config, DocumentRepository::new(MemoryDocument::empty())).await
        }
    }
}

async fn run_server<R: Repository>(config: &CLI, repository: R) -> anyhow::Result<()> {
    let dedup_secs = i64::try_from(config.click_dedup_secs).context("click dedup window")?;
    let click_config = ClickConfig::builder()
        .dedup_window(SignedDuration::from_secs(dedup_secs))
        .build();
    let gateway_config = GatewayConfig::builder()
        .admin_gate(config.admin_gate)
        .build();

    let state = AppState::from_repository(repository, click_config, gateway_config);
    let app = App::router(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!(listen_addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("gateway stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("shutdown signal received");
}

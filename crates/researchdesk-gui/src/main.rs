use anyhow::Result;
use axum::Router;
use researchdesk_gui::config::AppConfig;
use researchdesk_gui::routes::build_router;
use researchdesk_gui::state::AppState;
use researchdesk_gui::telemetry::init_tracing;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let app_config = AppConfig::from_env();

    let mut core_config = researchdesk_core::Config::load(None)?;
    if let Some(output_file) = app_config.output_file.clone() {
        core_config.tools.output_file = output_file;
    }

    let service = researchdesk_core::ResearchService::from_config(core_config);
    let state = AppState::new(service);

    let app: Router = build_router(state);

    let listener = TcpListener::bind(&app_config.listen_addr).await?;
    info!(address = %app_config.listen_addr, "researchdesk-gui listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| {
            error!(error = %err, "server shutdown with error");
            err
        })?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        if let Ok(mut stream) = signal(SignalKind::terminate()) {
            stream.recv().await;
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    info!("shutdown signal received");
}

mod handlers;
mod logging;
mod models;
mod router;
#[cfg(test)]
mod test_utils;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use models::{AppConfig, AppState};
    use router::build_router;

    logging::init();
    tracing::debug!("starting GitHub OAuth proxy");

    let app_config = AppConfig::from_env()
        .inspect_err(|e| tracing::error!(error = %e, "invalid configuration"))?;
    let bind_addr = app_config.bind_addr;

    let app_state = AppState::new(app_config)
        .inspect_err(|e| tracing::error!(error = %e, "failed to build GitHub HTTP client"))?;

    let app = build_router(app_state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .inspect_err(|e| tracing::error!(error = %e, %bind_addr, "failed to bind listener"))?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .inspect_err(|e| tracing::error!(error = %e, "error while listening and serving"))?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
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
    tracing::info!("shutdown signal received");
}

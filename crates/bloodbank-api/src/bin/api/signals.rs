use tracing::{error, info};

/// Resolves when the process is asked to stop
pub async fn shutdown_signal() {
    use tokio::signal;

    #[cfg(unix)]
    {
        let terminate = signal::unix::signal(signal::unix::SignalKind::terminate());
        let interrupt = signal::unix::signal(signal::unix::SignalKind::interrupt());
        match (terminate, interrupt) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                }
            }
            (Err(e), _) | (_, Err(e)) => {
                error!(error = %e, "Failed to install signal handlers, falling back to Ctrl+C");
                if let Err(e) = signal::ctrl_c().await {
                    error!(error = %e, "Failed to listen for Ctrl+C");
                }
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
            return;
        }
        info!("Received Ctrl+C");
    }
}

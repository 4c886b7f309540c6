use voice_screening_backend::build_router;
use voice_screening_backend::config::Config;
use voice_screening_backend::logging::init_tracing;
use voice_screening_backend::state::AppState;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();
    let config = Config::from_env();
    let _log_guard = init_tracing(&config);

    let addr = config.bind_addr();
    tracing::info!(
        target_samples = config.baseline_target_samples,
        window = config.personalization_window,
        snapshot = config.baseline_snapshot_path.is_some(),
        "screening engine configured"
    );

    let snapshot_interval = config.snapshot_interval;
    let state = AppState::from_config(config);
    let tracker = state.tracker();
    let flusher = tracker.start_snapshot_flusher(snapshot_interval);
    let app = build_router(state);

    tracing::info!(%addr, "voice-screening-backend listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("bind listener failed");

    let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    if let Err(e) = server.await {
        tracing::error!(error = %e, "server error");
    }

    if let Some(flusher) = flusher {
        flusher.abort();
    }
    match tracker.flush() {
        Ok(true) => tracing::info!(subjects = tracker.subject_count(), "final baseline snapshot written"),
        Ok(false) => {}
        Err(e) => tracing::error!(error = %e, "final baseline snapshot failed"),
    }

    tracing::info!("Graceful shutdown complete");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        let mut sigterm = signal(SignalKind::terminate()).expect("failed to install SIGTERM handler");
        sigterm.recv().await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

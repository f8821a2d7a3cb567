// Application server configuration and setup

use std::time::Duration;
use axum::{
    Router,
    middleware::from_fn_with_state,
    extract::DefaultBodyLimit,
    error_handling::HandleErrorLayer,
};
use tower::{ServiceBuilder, timeout::TimeoutLayer};
use tower_http::catch_panic::CatchPanicLayer;
use tokio::{signal, net::TcpListener};
use listenfd::ListenFd;
use anyhow::{Context, Result};

use crate::config::{environment::EnvironmentVariables, state::AppState};
use crate::api::error_samples::error_sample_routes;
use crate::utils::error_handler::{
    global_error_handler,
    handle_layer_error,
    handle_panic,
    not_found_fallback,
};

/// Creates and configures the application router with all middleware layers
pub fn create_app(state: AppState) -> Router {
    let timeout: Duration = Duration::from_secs(state.environment.default_timeout_seconds);
    let max_body_size: usize = state.environment.max_request_body_size;

    Router::new()
        .merge(error_sample_routes())
        // Add new routes here
        .fallback(not_found_fallback)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(
            ServiceBuilder::new()
                // Outermost: every error response leaves through here
                .layer(from_fn_with_state(state.clone(), global_error_handler))
                .layer(HandleErrorLayer::new(handle_layer_error))
                .layer(TimeoutLayer::new(timeout))
                .layer(DefaultBodyLimit::max(max_body_size))
        )
        .with_state(state)
}

/// Binds the API socket. A socket handed over by a process supervisor
/// (listenfd, e.g. `systemfd` during development) is preferred over `HOST:PORT`.
pub async fn setup_listener(env: &EnvironmentVariables) -> Result<TcpListener> {
    let mut listenfd: ListenFd = ListenFd::from_env();

    if let Some(inherited) = listenfd.take_tcp_listener(0)? {
        inherited.set_nonblocking(true)?;
        let listener: TcpListener = TcpListener::from_std(inherited)?;
        tracing::info!("Serving on inherited socket {}", listener.local_addr()?);
        return Ok(listener);
    }

    let addr: String = format!("{}:{}", env.host, env.port);
    let listener: TcpListener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    Ok(listener)
}

/// Resolves once the process is asked to stop, so in-flight requests can
/// drain before the server exits. A signal that cannot be installed is logged
/// and never fires.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!("Cannot listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!("Cannot listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Ctrl+C received, draining connections"),
        _ = terminate => tracing::info!("SIGTERM received, draining connections"),
    }
}

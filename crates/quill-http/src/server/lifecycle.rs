//! Server lifecycle management - startup, shutdown, and signal handling

use crate::{
    config::HttpConfig,
    errors::{HttpError, HttpResult},
};
use axum::Router;
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::Notify;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::{error, info, warn};

/// Wrap `router` with request tracing, the body size limit and the request
/// timeout. The timeout sits innermost so it wraps the router's own body type.
pub fn apply_http_layers(router: Router, config: &HttpConfig) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(config.max_request_size))
            .layer(TimeoutLayer::new(config.request_timeout())),
    )
}

/// Bind the configured address and serve until SIGINT or SIGTERM
pub async fn start_server(router: Router, config: &HttpConfig) -> HttpResult<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| HttpError::startup(format!("Failed to bind to {}: {}", address, e)))?;

    let local = listener.local_addr()?;
    info!("Server listening on http://{}", local);

    serve_with_shutdown(listener, router, shutdown_signal(), config.shutdown_timeout()).await
}

/// Serve on `listener` until `signal` resolves, then let in-flight requests
/// finish for at most `drain_timeout`.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    router: Router,
    signal: F,
    drain_timeout: Duration,
) -> HttpResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let stopping = Arc::new(Notify::new());
    let notify = stopping.clone();

    let server = axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        signal.await;
        notify.notify_one();
    })
    .into_future();

    let deadline = async move {
        stopping.notified().await;
        tokio::time::sleep(drain_timeout).await;
    };

    tokio::select! {
        result = server => {
            result.map_err(|e| HttpError::internal(format!("Server error: {}", e)))?;
            info!("Server stopped");
        }
        _ = deadline => {
            warn!(
                timeout_secs = drain_timeout.as_secs(),
                "In-flight requests did not finish in time; stopping anyway"
            );
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            warn!("Received terminate signal, shutting down gracefully...");
        },
    }
}

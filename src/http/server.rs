//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum Router serving pseudo-files
//! - Wire up middleware (tracing, request timeout)
//! - Translate interpreter outcomes into status codes
//! - Bind server to listener with graceful shutdown

use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::command::{CommandInterpreter, FailKind, Outcome};
use crate::config::ListenerConfig;
use crate::upstream::StatFetcher;

const XML_CONTENT_TYPE: &str = "application/xml";

/// HTTP front end for a [`CommandInterpreter`].
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a server sharing `interpreter` across all requests.
    pub fn new<F>(interpreter: Arc<CommandInterpreter<F>>, config: &ListenerConfig) -> Self
    where
        F: StatFetcher + 'static,
    {
        Self {
            router: Self::build_router(interpreter, config),
        }
    }

    #[allow(deprecated)]
    fn build_router<F>(interpreter: Arc<CommandInterpreter<F>>, config: &ListenerConfig) -> Router
    where
        F: StatFetcher + 'static,
    {
        Router::new()
            .route("/{*name}", get(open_handler::<F>).head(stat_handler::<F>))
            .with_state(interpreter)
            .layer(TimeoutLayer::new(Duration::from_secs(config.request_timeout_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// Serve on `listener` until `shutdown` resolves.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: impl Future<Output = ()> + Send + 'static,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// GET: one host open, whole payload.
async fn open_handler<F: StatFetcher + 'static>(
    State(interpreter): State<Arc<CommandInterpreter<F>>>,
    Path(name): Path<String>,
) -> Response {
    match interpreter.read(&name).await {
        Outcome::Ok(bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, XML_CONTENT_TYPE)],
            bytes,
        )
            .into_response(),
        Outcome::Skip => StatusCode::NOT_FOUND.into_response(),
        Outcome::Fail(kind) => fail_response(&name, kind),
    }
}

/// HEAD: stat only. Content-Length carries the reported size.
async fn stat_handler<F: StatFetcher + 'static>(
    State(interpreter): State<Arc<CommandInterpreter<F>>>,
    Path(name): Path<String>,
) -> Response {
    match interpreter.stat(&name).await {
        Outcome::Ok(len) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, XML_CONTENT_TYPE)
            .header(header::CONTENT_LENGTH, len)
            .body(Body::empty())
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Outcome::Skip => StatusCode::NOT_FOUND.into_response(),
        Outcome::Fail(kind) => fail_response(&name, kind),
    }
}

fn fail_response(name: &str, kind: FailKind) -> Response {
    tracing::warn!(name = %name, reason = %kind, "Request failed");
    (StatusCode::SERVICE_UNAVAILABLE, kind.to_string()).into_response()
}

/// Wait for shutdown signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

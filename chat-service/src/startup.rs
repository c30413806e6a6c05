//! Application startup and lifecycle management.

use crate::config::{ChatConfig, ServerTimeouts};
use crate::handlers;
use crate::lifecycle::{Lifecycle, LifecycleState, Readiness};
use crate::services::{Database, MessageStore};
use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post, MethodRouter},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{
    access_log_middleware, metrics_middleware, request_id_middleware,
    security_headers_middleware, RequestIdGenerator,
};
use std::future::{Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    timeout::{RequestBodyTimeoutLayer, TimeoutLayer},
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub readiness: Readiness,
}

/// Build the HTTP router with the full middleware chain.
///
/// Middleware order, outermost first: request id, access log, metrics,
/// security headers, panic guard, write timeout, read timeout.
///
/// `/messages/` and `/conversations/:id/` match their whole subtree, so
/// trailing segments are ignored.
pub fn build_router(
    state: AppState,
    timeouts: &ServerTimeouts,
    request_ids: RequestIdGenerator,
) -> Router {
    let messages: MethodRouter<AppState> =
        post(handlers::post_message).fallback(handlers::only_post_allowed);
    let conversation: MethodRouter<AppState> =
        get(handlers::get_conversation).fallback(handlers::only_get_allowed);

    Router::new()
        .route("/messages", messages.clone())
        .route("/messages/", messages.clone())
        .route("/messages/*rest", messages)
        .route("/conversations/:id", conversation.clone())
        .route("/conversations/:id/", conversation.clone())
        .route("/conversations/:id/*rest", conversation)
        .route(
            "/healthz",
            get(handlers::healthz).fallback(handlers::only_get_allowed),
        )
        .route("/metrics", get(handlers::metrics::metrics))
        .fallback(handlers::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(from_fn_with_state(request_ids, request_id_middleware))
                .layer(from_fn(access_log_middleware))
                .layer(from_fn(metrics_middleware))
                .layer(from_fn(security_headers_middleware))
                .layer(CatchPanicLayer::custom(handlers::panic_response))
                .layer(from_fn(handlers::timeout_as_json))
                .layer(TimeoutLayer::new(timeouts.write))
                .layer(RequestBodyTimeoutLayer::new(timeouts.read)),
        )
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    router: Router,
    readiness: Readiness,
    lifecycle: Lifecycle,
    timeouts: ServerTimeouts,
}

impl Application {
    /// Connect to PostgreSQL, create the schema and bind the listener.
    ///
    /// Any failure here is fatal to the process.
    pub async fn build(config: ChatConfig) -> Result<Self, AppError> {
        let lifecycle = Lifecycle::new();

        let db = Database::connect(
            &config.database.url,
            config.database.max_connections,
            config.database.min_connections,
        )
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to connect to PostgreSQL");
            e
        })?;

        db.ensure_schema().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to create schema");
            e
        })?;

        Self::bind(config, Arc::new(db), lifecycle).await
    }

    /// Bind the listener around an already initialized store.
    pub async fn build_with_store(
        config: ChatConfig,
        store: Arc<dyn MessageStore>,
    ) -> Result<Self, AppError> {
        Self::bind(config, store, Lifecycle::new()).await
    }

    async fn bind(
        config: ChatConfig,
        store: Arc<dyn MessageStore>,
        lifecycle: Lifecycle,
    ) -> Result<Self, AppError> {
        let readiness = Readiness::new();
        let state = AppState {
            store,
            readiness: readiness.clone(),
        };
        let router = build_router(state, &config.timeouts, RequestIdGenerator::timestamp());

        let addr = config.common.socket_addr()?;
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!(error = %e, addr = %addr, "Failed to bind HTTP listener");
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!(port = port, "HTTP listener bound");

        Ok(Self {
            port,
            listener,
            router,
            readiness,
            lifecycle,
            timeouts: config.timeouts,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Handle to the readiness flag reported by `/healthz`.
    pub fn readiness(&self) -> Readiness {
        self.readiness.clone()
    }

    /// Handle to the lifecycle state tracker.
    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle.clone()
    }

    /// Serve until `shutdown` resolves, then drain.
    ///
    /// Draining clears the readiness flag before the listener stops
    /// accepting, lets in-flight requests finish and closes idle keep-alive
    /// connections. Requests still running when the grace period elapses
    /// are abandoned.
    pub async fn run_until_stopped<F>(self, shutdown: F) -> Result<(), AppError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Application {
            port,
            listener,
            router,
            readiness,
            lifecycle,
            timeouts,
        } = self;

        let draining = CancellationToken::new();
        let signal = {
            let readiness = readiness.clone();
            let lifecycle = lifecycle.clone();
            let draining = draining.clone();
            async move {
                shutdown.await;
                readiness.mark_draining();
                lifecycle.transition(LifecycleState::Draining);
                draining.cancel();
            }
        };

        let server = axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(signal)
        .into_future();

        let grace_period = timeouts.grace_period;
        let grace_elapsed = async move {
            draining.cancelled().await;
            tokio::time::sleep(grace_period).await;
        };

        readiness.mark_ready();
        lifecycle.transition(LifecycleState::Ready);
        tracing::info!(
            service = "chat-service",
            version = env!("CARGO_PKG_VERSION"),
            port = port,
            "Server is ready to handle requests"
        );

        tokio::select! {
            result = server => {
                result.map_err(|e| {
                    tracing::error!(error = %e, "Could not gracefully shut down the server");
                    AppError::from(e)
                })?;
            }
            _ = grace_elapsed => {
                tracing::warn!(
                    grace_period_secs = grace_period.as_secs(),
                    "Grace period elapsed, abandoning in-flight requests"
                );
            }
        }

        lifecycle.transition(LifecycleState::Stopped);
        Ok(())
    }
}

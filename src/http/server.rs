//! HTTP server setup and dispatch.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (CORS, request ID, tracing, body limit)
//! - Dispatch: exact scrape paths first, then the prefix route table, else 404
//! - Bind server to listener and shut down gracefully

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{MatchedPath, Query, State},
    http::Request,
    response::Response,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{validate_config, ConfigError, ProxyConfig};
use crate::error::{ProxyError, StartupError};
use crate::forwarding::Forwarder;
use crate::http::request::{request_id, UuidRequestId, X_REQUEST_ID};
use crate::net::{build_client, ClientRole};
use crate::routing::RouteTable;
use crate::scrape::{ScrapeRegistry, Scraper};

/// Application state injected into handlers. Read-only after startup.
#[derive(Clone)]
pub struct AppState {
    pub routes: Arc<RouteTable>,
    pub scrapes: Arc<ScrapeRegistry>,
    pub forwarder: Forwarder,
    pub scraper: Scraper,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
    config: ProxyConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Result<Self, StartupError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        let routes = RouteTable::from_config(&config.routes, config.routing.match_mode)?;
        let scrapes = ScrapeRegistry::from_config(&config.scrapes)?;

        if config.upstream.accept_invalid_certs {
            tracing::warn!("Upstream TLS certificate verification is DISABLED (development only)");
        }
        let forwarder = Forwarder::new(
            build_client(&config.upstream, ClientRole::Forward)?,
            config.upstream.max_body_bytes,
        );
        let scraper = Scraper::new(build_client(&config.upstream, ClientRole::Scrape)?);

        for route in config.routes.iter() {
            tracing::debug!(
                route = %route.name,
                prefix = %route.prefix,
                upstream = %route.upstream,
                rewrite = ?route.rewrite,
                "Route registered"
            );
        }
        for scrape in scrapes.iter() {
            tracing::debug!(endpoint = %scrape.name, path = %scrape.path, param = %scrape.param, "Scrape endpoint registered");
        }

        let state = AppState {
            routes: Arc::new(routes),
            scrapes: Arc::new(scrapes),
            forwarder,
            scraper,
        };

        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ProxyConfig, state: AppState) -> Router {
        let mut router: Router<AppState> = Router::new();
        for endpoint in state.scrapes.iter() {
            router = router.route(&endpoint.path, get(scrape_handler));
        }

        router
            .fallback(forward_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
                    .layer(RequestBodyLimitLayer::new(config.upstream.max_body_bytes)),
            )
            // Outermost, so errors and preflights from any layer get CORS headers.
            .layer(CorsLayer::permissive())
    }

    /// Run the server until `shutdown` fires or the process receives Ctrl+C.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = crate::lifecycle::signals::ctrl_c() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &ProxyConfig {
        &self.config
    }

    /// The fully layered router, for in-process use.
    pub fn into_router(self) -> Router {
        self.router
    }
}

/// Serve one of the exact-path scrape endpoints.
async fn scrape_handler(
    State(state): State<AppState>,
    matched: MatchedPath,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Response, ProxyError> {
    let endpoint = state
        .scrapes
        .get(matched.as_str())
        .ok_or_else(|| ProxyError::NotFound(matched.as_str().to_string()))?;
    state.scraper.scrape(endpoint, &params).await
}

/// Everything that is not a scrape path: route table lookup, then forward.
async fn forward_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Result<Response, ProxyError> {
    let path = request.uri().path().to_string();
    let Some(route) = state.routes.match_path(&path) else {
        tracing::warn!(
            request_id = %request_id(request.headers()),
            method = %request.method(),
            path = %path,
            "No route matched"
        );
        return Err(ProxyError::NotFound(path));
    };
    state.forwarder.forward(request, route).await
}

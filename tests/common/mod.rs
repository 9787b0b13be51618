//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;

use fund_proxy::{HttpServer, ProxyConfig, Shutdown};

/// A request as seen by a mock upstream.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: Method,
    pub uri: String,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// What a mock upstream answers with.
#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub body: &'static str,
    pub headers: Vec<(&'static str, &'static str)>,
    pub delay: Duration,
}

impl Reply {
    pub fn ok(body: &'static str) -> Self {
        Self {
            status: 200,
            body,
            headers: Vec::new(),
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: &'static str) -> Self {
        Self {
            status,
            ..Self::ok(body)
        }
    }

    pub fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
        self.headers.push((name, value));
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A running mock upstream that records every request it receives.
#[derive(Clone)]
pub struct MockUpstream {
    pub addr: SocketAddr,
    scheme: &'static str,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockUpstream {
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.addr)
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

/// An app that records each request and answers with `reply`.
fn recording_app(reply: Reply, recorded: Arc<Mutex<Vec<Recorded>>>) -> Router {
    Router::new().fallback(move |request: Request<Body>| {
        let recorded = recorded.clone();
        let reply = reply.clone();
        async move {
            let (parts, body) = request.into_parts();
            let body = axum::body::to_bytes(body, usize::MAX).await.unwrap();
            recorded.lock().unwrap().push(Recorded {
                method: parts.method,
                uri: parts.uri.to_string(),
                headers: parts.headers,
                body,
            });

            tokio::time::sleep(reply.delay).await;

            let mut response =
                (StatusCode::from_u16(reply.status).unwrap(), reply.body).into_response();
            for (name, value) in reply.headers {
                response
                    .headers_mut()
                    .insert(HeaderName::from_static(name), HeaderValue::from_static(value));
            }
            response
        }
    })
}

/// Start a mock upstream answering every request with `reply`.
pub async fn start_upstream(reply: Reply) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = recording_app(reply, requests.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    MockUpstream {
        addr,
        scheme: "http",
        requests,
    }
}

/// Start an HTTPS mock upstream presenting a self-signed certificate.
pub async fn start_tls_upstream(reply: Reply) -> MockUpstream {
    let tls = RustlsConfig::from_pem(
        include_bytes!("../fixtures/self_signed.crt").to_vec(),
        include_bytes!("../fixtures/self_signed.key").to_vec(),
    )
    .await
    .unwrap();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = recording_app(reply, requests.clone());

    let handle = axum_server::Handle::new();
    let server = axum_server::bind_rustls("127.0.0.1:0".parse().unwrap(), tls).handle(handle.clone());
    tokio::spawn(async move {
        server.serve(app.into_make_service()).await.unwrap();
    });
    let addr = handle.listening().await.unwrap();

    MockUpstream {
        addr,
        scheme: "https",
        requests,
    }
}

/// An address nothing is listening on.
pub async fn closed_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Default config with every route and scrape template pointed at `origin`.
pub fn config_for(origin: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.upstream.use_system_proxy = false;
    config.upstream.request_timeout_secs = 5;
    for route in &mut config.routes {
        route.upstream = origin.to_string();
    }
    for scrape in &mut config.scrapes {
        scrape.url_template = scrape
            .url_template
            .replace("https://fund.eastmoney.com", origin)
            .replace("https://finance.eastmoney.com", origin);
    }
    config
}

/// A running proxy; dropping the handle does not stop it, call `stop`.
pub struct ProxyHandle {
    pub addr: SocketAddr,
    shutdown: Shutdown,
}

impl ProxyHandle {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub fn stop(&self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy on an ephemeral port.
pub async fn spawn_proxy(config: ProxyConfig) -> ProxyHandle {
    let server = HttpServer::new(config).unwrap();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    ProxyHandle { addr, shutdown }
}

/// A browser stand-in that ignores any system proxy settings.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}

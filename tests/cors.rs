//! Cross-origin headers on every kind of response.

use axum::http::{header, Method, StatusCode};

mod common;
use common::{client, closed_addr, config_for, spawn_proxy, start_upstream, Reply};

const FOREIGN_ORIGIN: &str = "https://not-allowed.example";

async fn assert_cors(url: String, expected: StatusCode) {
    let res = client()
        .get(url)
        .header(header::ORIGIN, FOREIGN_ORIGIN)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), expected);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_all_responses_carry_cors_headers() {
    let upstream = start_upstream(
        Reply::ok("{}").with_header("access-control-allow-origin", "https://fund.eastmoney.com"),
    )
    .await;
    let proxy = spawn_proxy(config_for(&upstream.origin())).await;

    assert_cors(proxy.url("/api/x"), StatusCode::OK).await;
    assert_cors(proxy.url("/news/fund_news?fundCode=000001"), StatusCode::OK).await;
    assert_cors(proxy.url("/news/fund_news"), StatusCode::BAD_REQUEST).await;
    assert_cors(proxy.url("/unknown"), StatusCode::NOT_FOUND).await;
    proxy.stop();

    let dead = format!("http://{}", closed_addr().await);
    let proxy = spawn_proxy(config_for(&dead)).await;
    assert_cors(proxy.url("/api/x"), StatusCode::BAD_GATEWAY).await;
    assert_cors(
        proxy.url("/news/fund_news?fundCode=000001"),
        StatusCode::INTERNAL_SERVER_ERROR,
    )
    .await;
    proxy.stop();
}

#[tokio::test]
async fn test_preflight_allowed() {
    let upstream = start_upstream(Reply::ok("{}")).await;
    let proxy = spawn_proxy(config_for(&upstream.origin())).await;

    let res = client()
        .request(Method::OPTIONS, proxy.url("/api/FundGuZhi"))
        .header(header::ORIGIN, FOREIGN_ORIGIN)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .send()
        .await
        .unwrap();

    assert!(res.status().is_success());
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    // Preflights are answered locally.
    assert!(upstream.requests().is_empty());
    proxy.stop();
}

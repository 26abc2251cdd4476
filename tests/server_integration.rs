//! End-to-end tests over real TCP connections.

use std::time::Duration;

use reqwest::header::HOST;
use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_good_host() {
    let (addr, shutdown) = common::start_guarded_server(&["example.com"], 501).await;

    let res = common::client()
        .get(format!("http://{}/foo", addr))
        .header(HOST, "example.com")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["hello"], "world");

    shutdown.trigger();
}

#[tokio::test]
async fn test_bad_host() {
    let (addr, shutdown) = common::start_guarded_server(&["example.com"], 501).await;

    let res = common::client()
        .get(format!("http://{}/foo", addr))
        .header(HOST, "malicious.com")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);
    assert!(res.bytes().await.unwrap().is_empty());

    shutdown.trigger();
}

#[tokio::test]
async fn test_address_as_host_rejected() {
    // The client's default Host is the socket address, which is not allowed.
    let (addr, shutdown) = common::start_guarded_server(&["example.com"], 403).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    shutdown.trigger();
}

#[tokio::test]
async fn test_multiple_hosts() {
    let (addr, shutdown) =
        common::start_guarded_server(&["example.com", "foo.com", "bar.com"], 404).await;
    let client = common::client();

    for (host, expected) in [
        ("example.com", StatusCode::OK),
        ("foo.com", StatusCode::OK),
        ("bar.com", StatusCode::OK),
        ("bar.org", StatusCode::NOT_FOUND),
        ("FOO.COM", StatusCode::NOT_FOUND),
        ("foo.com:80", StatusCode::NOT_FOUND),
    ] {
        let res = client
            .get(format!("http://{}/foo", addr))
            .header(HOST, host)
            .send()
            .await
            .expect("Server unreachable");
        assert_eq!(res.status(), expected, "host {host}");
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_invalid_rejection_status_defaults() {
    let (addr, shutdown) = common::start_guarded_server(&["example.com"], 1).await;

    let res = common::client()
        .get(format!("http://{}/foo", addr))
        .header(HOST, "attacker.com")
        .send()
        .await
        .expect("Server unreachable");

    assert_eq!(res.status(), StatusCode::NOT_IMPLEMENTED);

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests() {
    let (addr, shutdown) = common::start_guarded_server(&["example.com"], 404).await;
    let client = common::client();

    let mut handles = Vec::new();
    for i in 0..20 {
        let client = client.clone();
        let url = format!("http://{}/item/{}", addr, i);
        handles.push(tokio::spawn(async move {
            let host = if i % 2 == 0 { "example.com" } else { "evil.com" };
            let res = client.get(url).header(HOST, host).send().await.unwrap();
            (i, res.status())
        }));
    }

    for handle in handles {
        let (i, status) = handle.await.unwrap();
        let expected = if i % 2 == 0 { StatusCode::OK } else { StatusCode::NOT_FOUND };
        assert_eq!(status, expected);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_graceful_shutdown_stops_accepting() {
    let (addr, shutdown) = common::start_guarded_server(&["example.com"], 501).await;

    shutdown.trigger();
    tokio::time::sleep(Duration::from_millis(200)).await;

    let res = common::client()
        .get(format!("http://{}/", addr))
        .header(HOST, "example.com")
        .timeout(Duration::from_secs(2))
        .send()
        .await;

    assert!(res.is_err(), "Server should be down after shutdown");
}

//! Shared utilities for integration testing.

use std::net::SocketAddr;

use host_guard::{HttpServer, ServerConfig, Shutdown};
use tokio::net::TcpListener;

/// Start a guarded server on an ephemeral port.
pub async fn start_guarded_server(hosts: &[&str], rejection_status: u16) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = ServerConfig::default();
    config.listener.bind_address = addr.to_string();
    config.guard.hosts = hosts.iter().map(|h| h.to_string()).collect();
    config.guard.rejection_status = rejection_status;

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.clone();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// A client that never pools connections or goes through a proxy.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

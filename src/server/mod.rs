pub mod api;

use crate::config::{ RelayConfig, TlsPaths };
use crate::relay::ChatRelay;
use self::api::AppState;
use axum::Router;
use log::{ info, error };
use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

pub struct Server {
    addr: String,
    state: AppState,
    tls: Option<TlsPaths>,
}

impl Server {
    pub fn new(config: &RelayConfig, relay: Arc<ChatRelay>) -> Self {
        Self {
            addr: config.server_addr.clone(),
            state: AppState {
                relay,
                page: config.page.clone(),
                api_key_configured: config.api_key_configured(),
            },
            tls: config.tls.clone(),
        }
    }

    pub async fn run(self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let addr = self.addr.parse::<SocketAddr>()?;
        let app = api::router(self.state);

        match self.tls {
            Some(tls) => start_https_server(addr, app, &tls).await,
            None => start_http_server(addr, app).await,
        }
    }
}

async fn start_http_server(
    addr: SocketAddr,
    app: Router,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        error!("Failed to bind HTTP server to {}: {}. Try a different port.", addr, e);
        e
    })?;
    info!("HTTP server listening on: http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("HTTP server stopped");
    Ok(())
}

async fn start_https_server(
    addr: SocketAddr,
    app: Router,
    tls: &TlsPaths,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    // Both ring and aws-lc may be compiled in; pin the provider before building the config.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let tls_config = axum_server::tls_rustls::RustlsConfig::from_pem_file(
        &tls.cert_path,
        &tls.key_path
    ).await?;

    let handle = axum_server::Handle::new();
    let shutdown_handle = handle.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        shutdown_handle.graceful_shutdown(None);
    });

    info!("HTTPS server listening on: https://{}", addr);
    axum_server::bind_rustls(addr, tls_config)
        .handle(handle)
        .serve(app.into_make_service())
        .await
        .map_err(|e| {
            error!("HTTPS server error: {}", e);
            e
        })?;

    info!("HTTPS server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

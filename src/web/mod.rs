//! Web front-end: the search box the index exists to power.
//!
//! Serves an embedded single-page search UI, a JSON API over the loaded
//! table, and the generated documentation pages themselves so result
//! anchors resolve.
//!
//! # Example
//!
//! ```rust,ignore
//! use docdex::web::WebServer;
//!
//! let server = WebServer::new(state);
//! server.start("127.0.0.1", 8080).await?;
//! ```

pub mod handlers;
pub mod routes;
pub mod state;

pub use state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// HTTP server for the documentation search UI.
pub struct WebServer {
    state: AppState,
}

impl WebServer {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Start the server and block until it shuts down.
    pub async fn start(self, host: &str, port: u16) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", host, port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", host, port))?;

        // Permissive CORS: the API is meant to be callable from locally
        // opened documentation pages too.
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        let app = routes::create_router(self.state).layer(cors);

        info!("Starting web server at http://{}", addr);
        info!("Open http://{}:{} in your browser", host, port);

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to port {}", port))?;

        axum::serve(listener, app)
            .await
            .context("Web server failed")?;

        Ok(())
    }
}

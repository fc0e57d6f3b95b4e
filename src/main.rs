//! Floating support chat widget server.
//!
//! Entry point: loads configuration, wires the session store and the remote
//! chat service client, and serves the widget.

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::sync::Arc;
use std::time::Duration;

use dotenvy::dotenv;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use support_widget::config::AppConfig;
use support_widget::session::SessionStore;
use support_widget::upstream::ChatBackend;
use support_widget::{AppState, server};

/// How often idle sessions are swept.
const CLEANUP_INTERVAL: Duration = Duration::from_secs(5 * 60);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (M-LOG-STRUCTURED)
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env (if present)
    let _ = dotenv();

    let config = match AppConfig::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    info!(
        name: "widget.config.loaded",
        upstream = %config.upstream.base_url,
        "configuration loaded"
    );

    let backend = Arc::new(ChatBackend::new(&config.upstream.base_url)?);
    let sessions = SessionStore::new();

    // Sweep idle sessions in the background.
    {
        let sessions = sessions.clone();
        tokio::spawn(async move {
            let mut tick = tokio::time::interval(CLEANUP_INTERVAL);
            loop {
                tick.tick().await;
                let removed = sessions.cleanup_expired();
                if removed > 0 {
                    debug!(
                        name: "widget.sessions.swept",
                        removed,
                        "expired sessions removed"
                    );
                }
            }
        });
    }

    let state = AppState { sessions, backend };
    let app = server::router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(
        name: "server.started",
        address = %addr,
        "server started"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

//! Floating support chat widget, served HTML-first.
//!
//! A small web application that renders a toggleable support chat panel,
//! collects user text, forwards it to a remote chat service, and renders the
//! reply. All widget state lives server-side in an in-memory session store;
//! every interaction is an HTMX exchange that swaps the re-rendered widget
//! fragment.
//!
//! # Architecture
//!
//! - **Server**: Axum HTTP server returning Leptos SSR fragments
//! - **Sessions**: UUID-keyed in-memory widget state, ephemeral per process
//! - **Upstream**: one-shot `POST /api/chat` exchange with the remote service
//! - **UI**: Leptos SSR + HTMX + Alpine.js
//!
//! # Modules
//!
//! - [`config`]: configuration loading (file, environment, CLI)
//! - [`server`]: routes and request handlers
//! - [`session`]: widget session state and the submission gate
//! - [`ui`]: SSR components for the widget and its primitives
//! - [`upstream`]: HTTP client for the remote chat service

pub mod config;
pub mod server;
pub mod session;
pub mod ui;
pub mod upstream;

use std::sync::Arc;

use session::SessionStore;
use upstream::ChatBackend;

/// Application state shared across all handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Session store for widget state.
    pub sessions: SessionStore,
    /// Client for the remote chat service.
    pub backend: Arc<ChatBackend>,
}

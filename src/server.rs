//! Axum routes and request handlers for the widget.

use axum::{
    Form, Router,
    extract::{Query, State},
    response::{Html, IntoResponse},
    routing::{get, post},
};
use leptos::prelude::*;
use serde::Deserialize;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::session::{SendDecision, WidgetSession};
use crate::ui::widget::ChatWidget;

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        // HTML page
        .route("/", get(index_handler))
        // Widget fragments
        .route("/widget", get(widget_fragment))
        .route("/widget/toggle", post(widget_toggle))
        .route("/widget/send", post(widget_send))
        // Static assets
        .nest_service("/static", ServeDir::new("static"))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ─────────────────────────────────────────────────────────────────────────────
// HTML Page Handler
// ─────────────────────────────────────────────────────────────────────────────

/// Generate the HTML shell hosting the widget.
fn html_shell(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="description" content="Floating support chat widget">
    <title>{title}</title>

    <!-- HTMX and Alpine (local) -->
    <script src="/static/vendor/htmx-2.0.8.min.js"></script>
    <script defer src="/static/vendor/alpine.min.js"></script>

    <link rel="stylesheet" href="/static/app.css">
</head>
<body class="min-h-screen bg-white text-gray-900 antialiased dark:bg-gray-950 dark:text-gray-50">
    {content}
</body>
</html>"#
    )
}

/// Index page handler. Mounts a fresh widget session.
async fn index_handler(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.sessions.create();
    tracing::debug!(session_id = %session.id(), "widget session mounted");
    Html(html_shell("Support bot", &render_widget(&session)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Widget Fragment Handlers
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for the fragment endpoint.
#[derive(Debug, Deserialize)]
struct WidgetQuery {
    /// Session ID.
    session_id: String,
}

/// Form body for visibility toggles.
#[derive(Debug, Deserialize)]
struct ToggleForm {
    /// Session ID.
    session_id: String,
}

/// Form body for message submissions.
#[derive(Debug, Deserialize)]
struct SendForm {
    /// Session ID.
    session_id: String,
    /// Raw input text.
    #[serde(default)]
    user_input: String,
}

/// GET /widget - Re-render the widget for a session.
///
/// Unknown ids come back as a fresh default session.
async fn widget_fragment(
    State(state): State<AppState>,
    Query(query): Query<WidgetQuery>,
) -> Html<String> {
    let session = state.sessions.get_or_create(&query.session_id);
    Html(render_widget(&session))
}

/// POST /widget/toggle - Flip panel visibility.
async fn widget_toggle(
    State(state): State<AppState>,
    Form(form): Form<ToggleForm>,
) -> Html<String> {
    let session = state.sessions.get_or_create(&form.session_id);
    session.toggle();
    tracing::debug!(
        session_id = %session.id(),
        is_open = session.is_open(),
        "widget toggled"
    );
    Html(render_widget(&session))
}

/// POST /widget/send - Run the full message submission contract.
///
/// A rejected send changes nothing; an accepted one forwards the text to the
/// remote chat service and appends the reply, if any. Upstream failures are
/// logged and otherwise ignored: the user only observes the missing bot
/// reply. The in-flight flag is cleared in every outcome.
async fn widget_send(State(state): State<AppState>, Form(form): Form<SendForm>) -> Html<String> {
    let session = state.sessions.get_or_create(&form.session_id);

    match session.begin_send(&form.user_input) {
        SendDecision::Rejected(reason) => {
            tracing::debug!(
                session_id = %session.id(),
                reason = ?reason,
                "send suppressed"
            );
        }
        SendDecision::Accepted { text } => {
            tracing::info!(
                session_id = %session.id(),
                message_count = session.message_count(),
                "forwarding message to chat service"
            );

            let reply = match state.backend.ask(&text).await {
                Ok(reply) => reply,
                Err(error) => {
                    tracing::error!(
                        session_id = %session.id(),
                        error = %error,
                        "chat service exchange failed"
                    );
                    None
                }
            };
            session.finish_send(reply);
        }
    }

    Html(render_widget(&session))
}

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Render the widget fragment for the session's current state.
fn render_widget(session: &WidgetSession) -> String {
    let state = session.view();
    view! { <ChatWidget state=state /> }.to_html()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStore;

    #[test]
    fn test_open_session_renders_panel_with_greeting() {
        let store = SessionStore::new();
        let session = store.create();

        let html = render_widget(&session);
        assert!(html.contains("id=\"chat-widget\""));
        assert!(html.contains("Support bot"));
        assert!(html.contains("Hi there! How can I assist you today?"));
        assert!(html.contains("Type your message..."));
        assert!(!html.contains("Contact Support"));
    }

    #[test]
    fn test_closed_session_renders_launcher() {
        let store = SessionStore::new();
        let session = store.create();
        session.toggle();

        let html = render_widget(&session);
        assert!(html.contains("id=\"chat-widget\""));
        assert!(html.contains("Open chat"));
        assert!(!html.contains("Type your message..."));
    }

    #[test]
    fn test_toggle_twice_renders_identically() {
        let store = SessionStore::new();
        let session = store.create();

        let before = render_widget(&session);
        session.toggle();
        session.toggle();
        assert_eq!(render_widget(&session), before);
    }

    #[test]
    fn test_escalation_history_renders_banner() {
        let store = SessionStore::new();
        let session = store.create();
        assert!(matches!(
            session.begin_send("hello"),
            SendDecision::Accepted { .. }
        ));
        session.finish_send(Some("Please contact with support.".to_string()));

        let html = render_widget(&session);
        assert!(html.contains("Contact Support"));
    }

    #[test]
    fn test_messages_render_in_order() {
        let store = SessionStore::new();
        let session = store.create();
        assert!(matches!(
            session.begin_send("Hello"),
            SendDecision::Accepted { .. }
        ));
        session.finish_send(Some("Hi!".to_string()));

        let html = render_widget(&session);
        let greeting = html.find("Hi there!").unwrap();
        let user = html.find("Hello").unwrap();
        let reply = html.rfind("Hi!").unwrap();
        assert!(greeting < user);
        assert!(user < reply);
    }
}

//! Widget session state management.
//!
//! This module provides in-memory session storage for the chat widget.
//! Sessions are identified by UUID and hold the message history together
//! with the widget's visibility and in-flight flags. Nothing is persisted:
//! a session lives exactly as long as the process, and an unknown session
//! id simply yields a fresh default session.
//!
//! # Architecture
//!
//! - [`WidgetSession`]: state of a single mounted widget instance
//! - [`SessionStore`]: thread-safe store for all active sessions
//!
//! # Example
//!
//! ```rust
//! use support_widget::session::{SendDecision, SessionStore};
//!
//! let store = SessionStore::new();
//! let session = store.create();
//!
//! // New sessions open with the greeting already in place.
//! assert_eq!(session.message_count(), 1);
//! assert!(session.is_open());
//!
//! match session.begin_send("Hello") {
//!     SendDecision::Accepted { text } => session.finish_send(Some(format!("You said: {text}"))),
//!     SendDecision::Rejected(_) => unreachable!(),
//! }
//! assert_eq!(session.message_count(), 3);
//! ```

mod widget;

pub use widget::{
    ChatMessage, SendDecision, SendRejection, Sender, SessionStore, WidgetSession, WidgetView,
};

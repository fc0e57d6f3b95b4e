//! Widget state, the submission gate, and session storage.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Greeting seeded into every fresh session.
const GREETING: &str = "Hi there! How can I assist you today?";

/// Keyword that switches the widget into support-escalation mode.
///
/// Matched case-insensitively as a literal substring, in the input and in
/// every message already in the history.
const ESCALATION_PHRASE: &str = "contact with support";

/// Default session timeout (30 minutes).
const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Who authored a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    /// Typed by the person using the widget.
    User,
    /// Returned by the remote chat service.
    Bot,
}

/// A single chat message.
///
/// Messages are append-only and ordered; insertion order is display order.
/// There is no identity beyond position in the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    /// Message author.
    pub sender: Sender,
    /// Message text, verbatim as entered or received.
    pub text: String,
}

/// Outcome of [`WidgetSession::begin_send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendDecision {
    /// The user message was appended and the in-flight flag set; the caller
    /// must perform the upstream exchange and then call
    /// [`WidgetSession::finish_send`].
    Accepted {
        /// The text to forward to the remote service.
        text: String,
    },
    /// The send was suppressed; nothing was appended and no request may be
    /// made.
    Rejected(SendRejection),
}

/// Why a send was suppressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendRejection {
    /// Input was empty after trimming.
    EmptyInput,
    /// The escalation keyword appeared in the input or in the history.
    EscalationGate,
    /// Another send is already in flight for this session.
    InFlight,
}

/// Mutable widget state, guarded by the session lock.
#[derive(Debug)]
struct WidgetState {
    messages: Vec<ChatMessage>,
    is_open: bool,
    is_sending: bool,
}

impl WidgetState {
    fn seeded() -> Self {
        Self {
            messages: vec![ChatMessage {
                sender: Sender::Bot,
                text: GREETING.to_string(),
            }],
            is_open: true,
            is_sending: false,
        }
    }

    fn requires_escalation(&self) -> bool {
        self.messages.iter().any(|m| contains_escalation(&m.text))
    }
}

/// Immutable snapshot of a session, taken for rendering.
#[derive(Debug, Clone)]
pub struct WidgetView {
    /// Session id, embedded into the widget's forms.
    pub session_id: String,
    /// Whether the panel (vs. the launcher) is shown.
    pub is_open: bool,
    /// Whether a send is currently in flight.
    pub is_sending: bool,
    /// Full message history, in display order.
    pub messages: Vec<ChatMessage>,
    /// Whether the escalation banner is shown.
    pub requires_escalation: bool,
}

/// State of a single mounted widget instance.
///
/// Cheap to clone; all clones share the same underlying state.
#[derive(Debug, Clone)]
pub struct WidgetSession {
    inner: Arc<SessionInner>,
}

#[derive(Debug)]
struct SessionInner {
    /// Unique session identifier.
    id: String,
    /// Widget state.
    state: RwLock<WidgetState>,
    /// Session creation time.
    created_at: DateTime<Utc>,
    /// Last activity time.
    last_activity: RwLock<DateTime<Utc>>,
}

impl WidgetSession {
    /// Create a new session with the given ID, seeded with the greeting and
    /// starting open.
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            inner: Arc::new(SessionInner {
                id,
                state: RwLock::new(WidgetState::seeded()),
                created_at: now,
                last_activity: RwLock::new(now),
            }),
        }
    }

    /// Get the session ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.inner.id
    }

    /// Flip panel visibility. Toggling twice returns to the original state.
    pub fn toggle(&self) {
        let mut state = self.inner.state.write().unwrap();
        state.is_open = !state.is_open;
        drop(state);
        self.touch();
    }

    /// Run the submission gate for `raw_input`.
    ///
    /// The checks and the state transition happen atomically under the
    /// session lock: a rejected send leaves the session untouched, an
    /// accepted one appends the user message and sets the in-flight flag in
    /// the same critical section. At most one send can be accepted at a time;
    /// the flag stays set until [`finish_send`](Self::finish_send).
    pub fn begin_send(&self, raw_input: &str) -> SendDecision {
        let trimmed = raw_input.trim();
        let mut state = self.inner.state.write().unwrap();

        if trimmed.is_empty() {
            return SendDecision::Rejected(SendRejection::EmptyInput);
        }
        if state.requires_escalation() || contains_escalation(trimmed) {
            return SendDecision::Rejected(SendRejection::EscalationGate);
        }
        if state.is_sending {
            return SendDecision::Rejected(SendRejection::InFlight);
        }

        state.messages.push(ChatMessage {
            sender: Sender::User,
            text: raw_input.to_string(),
        });
        state.is_sending = true;
        drop(state);
        self.touch();

        SendDecision::Accepted {
            text: raw_input.to_string(),
        }
    }

    /// Complete a send accepted by [`begin_send`](Self::begin_send).
    ///
    /// Appends a bot message iff a reply text is present, then clears the
    /// in-flight flag unconditionally.
    pub fn finish_send(&self, reply: Option<String>) {
        let mut state = self.inner.state.write().unwrap();
        if let Some(text) = reply {
            state.messages.push(ChatMessage {
                sender: Sender::Bot,
                text,
            });
        }
        state.is_sending = false;
        drop(state);
        self.touch();
    }

    /// Whether any message in the history triggers the escalation banner.
    ///
    /// Derived state, recomputed on every call.
    #[must_use]
    pub fn requires_escalation(&self) -> bool {
        self.inner.state.read().unwrap().requires_escalation()
    }

    /// Whether the panel is currently shown.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.state.read().unwrap().is_open
    }

    /// Whether a send is currently in flight.
    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.inner.state.read().unwrap().is_sending
    }

    /// Get all messages, in display order.
    #[must_use]
    pub fn messages(&self) -> Vec<ChatMessage> {
        self.inner.state.read().unwrap().messages.clone()
    }

    /// Get the number of messages in the history.
    #[must_use]
    pub fn message_count(&self) -> usize {
        self.inner.state.read().unwrap().messages.len()
    }

    /// Take a consistent snapshot for rendering.
    #[must_use]
    pub fn view(&self) -> WidgetView {
        let state = self.inner.state.read().unwrap();
        WidgetView {
            session_id: self.inner.id.clone(),
            is_open: state.is_open,
            is_sending: state.is_sending,
            messages: state.messages.clone(),
            requires_escalation: state.requires_escalation(),
        }
    }

    /// Update the last activity timestamp.
    fn touch(&self) {
        let mut guard = self.inner.last_activity.write().unwrap();
        *guard = Utc::now();
    }

    /// Check if the session has been inactive longer than the timeout.
    #[must_use]
    pub fn is_expired_with_timeout(&self, timeout: Duration) -> bool {
        let last = *self.inner.last_activity.read().unwrap();
        let now = Utc::now();
        if let Ok(duration) = (now - last).to_std() {
            duration > timeout
        } else {
            // Negative duration means clock skew or "last" is in the future.
            false
        }
    }

    /// Get the session age.
    #[must_use]
    pub fn age(&self) -> Duration {
        let now = Utc::now();
        (now - self.inner.created_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }
}

fn contains_escalation(text: &str) -> bool {
    text.to_lowercase().contains(ESCALATION_PHRASE)
}

/// Thread-safe store for widget sessions.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<SessionStoreInner>,
}

#[derive(Debug)]
struct SessionStoreInner {
    sessions: RwLock<HashMap<String, WidgetSession>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore {
    /// Create a new session store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(SessionStoreInner {
                sessions: RwLock::new(HashMap::new()),
            }),
        }
    }

    /// Create a new session and return it.
    #[must_use]
    pub fn create(&self) -> WidgetSession {
        let id = Uuid::new_v4().to_string();
        self.create_with_id(id)
    }

    /// Create a new session with a specific ID.
    #[must_use]
    pub fn create_with_id(&self, id: impl Into<String>) -> WidgetSession {
        let id = id.into();
        let session = WidgetSession::new(id.clone());
        let mut guard = self.inner.sessions.write().unwrap();
        guard.insert(id, session.clone());
        session
    }

    /// Get a session by ID.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<WidgetSession> {
        let guard = self.inner.sessions.read().unwrap();
        guard.get(id).cloned()
    }

    /// Get a session by ID, creating a fresh default one if it doesn't
    /// exist. This is the "reset implicitly on remount" path: an unknown or
    /// expired id comes back as a new greeting-only session.
    #[must_use]
    pub fn get_or_create(&self, id: &str) -> WidgetSession {
        // Try read-only first
        {
            let guard = self.inner.sessions.read().unwrap();
            if let Some(session) = guard.get(id) {
                return session.clone();
            }
        }

        // Create if not exists
        self.create_with_id(id)
    }

    /// Remove a session by ID.
    pub fn remove(&self, id: &str) -> Option<WidgetSession> {
        let mut guard = self.inner.sessions.write().unwrap();
        guard.remove(id)
    }

    /// Get the number of active sessions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.sessions.read().unwrap().len()
    }

    /// Check if there are no sessions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remove all sessions inactive longer than the default timeout.
    ///
    /// Returns the number of sessions removed.
    pub fn cleanup_expired(&self) -> usize {
        self.cleanup_expired_with_timeout(DEFAULT_SESSION_TIMEOUT)
    }

    /// Remove sessions that have been inactive longer than the timeout.
    pub fn cleanup_expired_with_timeout(&self, timeout: Duration) -> usize {
        let mut guard = self.inner.sessions.write().unwrap();
        let before = guard.len();
        guard.retain(|_, session| !session.is_expired_with_timeout(timeout));
        before - guard.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_seeded_and_open() {
        let session = WidgetSession::new("test-123".to_string());

        assert_eq!(session.id(), "test-123");
        assert!(session.is_open());
        assert!(!session.is_sending());

        let messages = session.messages();
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[0].text, GREETING);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let session = WidgetSession::new("test".to_string());

        assert!(session.is_open());
        session.toggle();
        assert!(!session.is_open());
        session.toggle();
        assert!(session.is_open());
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let session = WidgetSession::new("test".to_string());

        assert_eq!(
            session.begin_send(""),
            SendDecision::Rejected(SendRejection::EmptyInput)
        );
        assert_eq!(
            session.begin_send("   \t  "),
            SendDecision::Rejected(SendRejection::EmptyInput)
        );
        // Nothing appended, nothing in flight.
        assert_eq!(session.message_count(), 1);
        assert!(!session.is_sending());
    }

    #[test]
    fn test_accepted_send_appends_and_flags() {
        let session = WidgetSession::new("test".to_string());

        let decision = session.begin_send("Hello");
        assert_eq!(
            decision,
            SendDecision::Accepted {
                text: "Hello".to_string()
            }
        );
        assert!(session.is_sending());

        let messages = session.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, Sender::User);
        assert_eq!(messages[1].text, "Hello");
    }

    #[test]
    fn test_finish_send_with_reply() {
        let session = WidgetSession::new("test".to_string());

        assert!(matches!(
            session.begin_send("Hello"),
            SendDecision::Accepted { .. }
        ));
        session.finish_send(Some("Hi!".to_string()));

        assert!(!session.is_sending());
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].sender, Sender::Bot);
        assert_eq!(messages[1].text, "Hello");
        assert_eq!(messages[2].sender, Sender::Bot);
        assert_eq!(messages[2].text, "Hi!");
    }

    #[test]
    fn test_finish_send_without_reply_clears_flag_only() {
        let session = WidgetSession::new("test".to_string());

        assert!(matches!(
            session.begin_send("Hello"),
            SendDecision::Accepted { .. }
        ));
        session.finish_send(None);

        assert!(!session.is_sending());
        assert_eq!(session.message_count(), 2);
    }

    #[test]
    fn test_second_send_while_in_flight_is_rejected() {
        let session = WidgetSession::new("test".to_string());

        assert!(matches!(
            session.begin_send("first"),
            SendDecision::Accepted { .. }
        ));
        assert_eq!(
            session.begin_send("second"),
            SendDecision::Rejected(SendRejection::InFlight)
        );
        // The rejected send appended nothing.
        assert_eq!(session.message_count(), 2);

        session.finish_send(None);
        assert!(matches!(
            session.begin_send("third"),
            SendDecision::Accepted { .. }
        ));
    }

    #[test]
    fn test_escalation_phrase_in_input_suppresses_send() {
        let session = WidgetSession::new("test".to_string());

        assert_eq!(
            session.begin_send("I want to Contact With Support please"),
            SendDecision::Rejected(SendRejection::EscalationGate)
        );
        // Suppressed entirely: no message appended, no flag set.
        assert_eq!(session.message_count(), 1);
        assert!(!session.is_sending());
    }

    #[test]
    fn test_escalation_phrase_in_history_suppresses_send() {
        let session = WidgetSession::new("test".to_string());

        assert!(matches!(
            session.begin_send("help me"),
            SendDecision::Accepted { .. }
        ));
        session.finish_send(Some("Please CONTACT WITH SUPPORT for that.".to_string()));

        assert!(session.requires_escalation());
        assert_eq!(
            session.begin_send("anything else"),
            SendDecision::Rejected(SendRejection::EscalationGate)
        );
        assert_eq!(session.message_count(), 3);
    }

    #[test]
    fn test_escalation_is_derived_from_history() {
        let session = WidgetSession::new("test".to_string());
        assert!(!session.requires_escalation());

        assert!(matches!(
            session.begin_send("hello"),
            SendDecision::Accepted { .. }
        ));
        session.finish_send(Some("you should contact with support".to_string()));
        assert!(session.requires_escalation());

        let view = session.view();
        assert!(view.requires_escalation);
    }

    #[test]
    fn test_view_snapshot() {
        let session = WidgetSession::new("snap".to_string());
        session.toggle();

        let view = session.view();
        assert_eq!(view.session_id, "snap");
        assert!(!view.is_open);
        assert!(!view.is_sending);
        assert_eq!(view.messages.len(), 1);
    }

    #[test]
    fn test_session_store_lifecycle() {
        let store = SessionStore::new();

        assert!(store.is_empty());

        let session = store.create();
        assert_eq!(store.len(), 1);

        let retrieved = store.get(session.id()).unwrap();
        assert_eq!(retrieved.id(), session.id());

        store.remove(session.id());
        assert!(store.is_empty());
    }

    #[test]
    fn test_get_or_create_resets_unknown_ids() {
        let store = SessionStore::new();

        let session = store.get_or_create("gone");
        assert_eq!(session.id(), "gone");
        assert_eq!(session.message_count(), 1);
        assert!(session.is_open());

        // Same id now resolves to the same session.
        assert!(matches!(
            session.begin_send("hi"),
            SendDecision::Accepted { .. }
        ));
        let again = store.get_or_create("gone");
        assert_eq!(again.message_count(), 2);
    }

    #[test]
    fn test_cleanup_expired() {
        let store = SessionStore::new();
        let _session = store.create();

        assert_eq!(store.cleanup_expired_with_timeout(Duration::from_secs(60)), 0);
        assert_eq!(store.len(), 1);

        std::thread::sleep(Duration::from_millis(5));
        assert_eq!(store.cleanup_expired_with_timeout(Duration::ZERO), 1);
        assert!(store.is_empty());
    }
}

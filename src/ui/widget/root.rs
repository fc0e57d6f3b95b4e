//! Widget root component.

use leptos::prelude::*;

use crate::session::WidgetView;

use super::{ChatLauncher, ChatPanel};

/// Root widget component and HTMX swap target.
///
/// Renders the full panel when the widget is open and the floating launcher
/// button when it is closed.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <ChatWidget state=session.view() />
/// }
/// ```
#[component]
pub fn ChatWidget(
    /// Rendering snapshot of the widget session.
    state: WidgetView,
) -> impl IntoView {
    let is_open = state.is_open;

    view! {
        <div id="chat-widget">
            {if is_open {
                view! { <ChatPanel state=state /> }.into_any()
            } else {
                view! { <ChatLauncher session_id=state.session_id /> }.into_any()
            }}
        </div>
    }
}

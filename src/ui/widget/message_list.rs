//! Message list and bubbles.

use leptos::prelude::*;

use crate::session::{ChatMessage, Sender};
use crate::ui::components::{CustomerIcon, ScrollArea, SupportIcon};

/// Scrollable message history.
///
/// Ends with a sentinel element that scrolls itself into view after every
/// swap, keeping the latest message visible.
#[component]
pub fn MessageList(
    /// Messages in display order.
    messages: Vec<ChatMessage>,
) -> impl IntoView {
    view! {
        <ScrollArea class="flex-1 p-4 space-y-4">
            {messages
                .into_iter()
                .map(|message| view! { <MessageBubble message=message /> })
                .collect_view()}

            // Auto-scroll sentinel; Alpine initializes it on every swap.
            <div id="messages-end" x-init="$el.scrollIntoView({ behavior: 'smooth' })"></div>
        </ScrollArea>
    }
}

/// One message bubble: bot messages on the left, user messages on the right.
#[component]
fn MessageBubble(
    /// The message to render.
    message: ChatMessage,
) -> impl IntoView {
    let is_user = message.sender == Sender::User;

    let row_classes = if is_user {
        "flex items-start gap-3 justify-end"
    } else {
        "flex items-start gap-3"
    };
    let bubble_classes = if is_user {
        "max-w-[240px] rounded-lg flex items-center border p-3 text-sm shadow-sm \
         bg-gray-100 dark:bg-gray-700 dark:border-gray-800"
    } else {
        "max-w-[240px] rounded-lg flex items-center border p-3 text-sm shadow-sm \
         bg-white dark:bg-gray-800 dark:border-gray-800"
    };

    view! {
        <div class=row_classes>
            {(!is_user).then(|| view! { <SupportIcon class="h-5 w-5 shrink-0" /> })}
            <div class=bubble_classes>
                <p>{message.text}</p>
            </div>
            {is_user.then(|| view! { <CustomerIcon class="h-5 w-5 shrink-0" /> })}
        </div>
    }
}

//! Message input row.

use leptos::prelude::*;

use crate::ui::components::{Button, ButtonSize, ButtonVariant, Input, SendIcon};

/// Input row with the send button.
///
/// Submitting posts the form and swaps the widget; Enter submits natively.
/// While a send is in flight the controls are disabled and the input shows a
/// loading placeholder, so a second submission cannot be issued from the UI.
#[component]
pub fn InputRow(
    /// Session id carried with the send.
    #[prop(into)]
    session_id: String,
    /// Whether a send is currently in flight.
    is_sending: bool,
) -> impl IntoView {
    let value = if is_sending { "Loading.." } else { "" };

    view! {
        <div class="border-t border-gray-200 bg-gray-100 px-4 py-3 dark:border-gray-800 dark:bg-gray-800">
            <form
                class="flex items-center gap-2"
                hx-post="/widget/send"
                hx-target="#chat-widget"
                hx-swap="outerHTML"
                hx-disabled-elt="find button"
            >
                <input type="hidden" name="session_id" value=session_id />

                <Input
                    class="flex-1"
                    placeholder="Type your message..."
                    name="user_input"
                    value=value
                    disabled=is_sending
                    required=true
                />

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    button_type="submit"
                    disabled=is_sending
                    class="rounded-full"
                >
                    <SendIcon class="h-5 w-5" />
                    <span class="sr-only">"Send message"</span>
                </Button>
            </form>
        </div>
    }
}

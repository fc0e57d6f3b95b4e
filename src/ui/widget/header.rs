//! Panel header component.

use leptos::prelude::*;

use crate::ui::components::{Button, ButtonSize, ButtonVariant, CloseIcon, ContactIcon};

/// Panel header with title and close button.
#[component]
pub fn PanelHeader(
    /// Session id carried through the close toggle.
    #[prop(into)]
    session_id: String,
) -> impl IntoView {
    view! {
        <div class="flex items-center justify-between rounded-t-lg bg-gray-100 px-4 py-2 dark:bg-gray-800">
            <div class="flex items-center gap-2">
                <ContactIcon class="h-5 w-5 text-gray-500 dark:text-gray-400" />
                <h3 class="text-sm font-medium text-gray-900 dark:text-gray-50">"Support bot"</h3>
            </div>

            <form hx-post="/widget/toggle" hx-target="#chat-widget" hx-swap="outerHTML">
                <input type="hidden" name="session_id" value=session_id />
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    button_type="submit"
                    class="rounded-full"
                >
                    <CloseIcon class="h-5 w-5" />
                    <span class="sr-only">"Close chat"</span>
                </Button>
            </form>
        </div>
    }
}

//! Floating launcher button, shown while the panel is closed.

use leptos::prelude::*;

use crate::ui::components::{Button, ButtonSize, ButtonVariant, ContactIcon};

/// Small round launcher in the bottom-right corner; clicking it reopens the
/// panel.
#[component]
pub fn ChatLauncher(
    /// Session id carried through the toggle.
    #[prop(into)]
    session_id: String,
) -> impl IntoView {
    view! {
        <div class="fixed bottom-4 right-4 z-50">
            <form hx-post="/widget/toggle" hx-target="#chat-widget" hx-swap="outerHTML">
                <input type="hidden" name="session_id" value=session_id />
                <Button
                    variant=ButtonVariant::Light
                    size=ButtonSize::Icon
                    button_type="submit"
                    class="rounded-full"
                >
                    <ContactIcon class="h-6 w-6" />
                    <span class="sr-only">"Open chat"</span>
                </Button>
            </form>
        </div>
    }
}

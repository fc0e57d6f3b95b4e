//! Support escalation banner.

use leptos::prelude::*;

use crate::ui::components::Button;

/// Full-width "Contact Support" button, rendered once the history mentions
/// contacting support. The button has no attached action.
#[component]
pub fn SupportBanner() -> impl IntoView {
    view! {
        <div class="px-4 py-3">
            <Button class="w-full">"Contact Support"</Button>
        </div>
    }
}

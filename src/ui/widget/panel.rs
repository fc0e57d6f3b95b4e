//! Chat panel layout component.

use leptos::prelude::*;

use crate::session::WidgetView;

use super::{InputRow, MessageList, PanelHeader, SupportBanner};

/// The open widget panel.
///
/// Provides the complete chat surface:
/// - Header with title and close button
/// - Scrollable message area
/// - Input row for new messages
/// - Escalation banner, when the history calls for it
#[component]
pub fn ChatPanel(
    /// Rendering snapshot of the widget session.
    state: WidgetView,
) -> impl IntoView {
    let WidgetView {
        session_id,
        is_sending,
        messages,
        requires_escalation,
        ..
    } = state;

    view! {
        <div class="fixed bottom-10 right-10 z-50 w-[360px] rounded-lg border border-gray-200 \
                    bg-white shadow-lg dark:border-gray-800 dark:bg-gray-950">
            <PanelHeader session_id=session_id.clone() />

            <div class="flex flex-col h-[500px] overflow-hidden">
                <MessageList messages=messages />

                <InputRow session_id=session_id is_sending=is_sending />

                {requires_escalation.then(|| view! { <SupportBanner /> })}
            </div>
        </div>
    }
}

//! Input component for text fields.

use leptos::prelude::*;

/// Text input component.
///
/// # Example
///
/// ```rust,ignore
/// view! {
///     <Input
///         placeholder="Type your message..."
///         name="user_input"
///     />
/// }
/// ```
#[component]
pub fn Input(
    /// Input type (text, email, password, etc.).
    #[prop(default = "text")]
    input_type: &'static str,
    /// Placeholder text.
    #[prop(default = "")]
    placeholder: &'static str,
    /// Input name attribute.
    #[prop(default = "")]
    name: &'static str,
    /// Whether the input is disabled.
    #[prop(default = false)]
    disabled: bool,
    /// Whether the input is required.
    #[prop(default = false)]
    required: bool,
    /// Default value.
    #[prop(into, default = String::new())]
    value: String,
    /// Additional CSS classes.
    #[prop(default = "")]
    class: &'static str,
) -> impl IntoView {
    let base_classes = "flex h-10 w-full rounded-lg bg-transparent px-3 py-2 text-sm \
                        text-gray-900 placeholder:text-gray-400 focus:outline-none \
                        disabled:cursor-not-allowed disabled:opacity-50 dark:text-gray-50";

    let classes = format!("{} {}", base_classes, class);

    view! {
        <input
            type=input_type
            class=classes
            placeholder=placeholder
            name=name
            disabled=disabled
            required=required
            value=value
            autocomplete="off"
        />
    }
}

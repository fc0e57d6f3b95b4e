//! ShadCN-style reusable UI components.
//!
//! This module provides the small set of composable components the widget
//! is built from, rendered via Leptos SSR.
//!
//! # Components
//!
//! - [`Button`]: Clickable button with variants
//! - [`Input`]: Text input field
//! - [`ScrollArea`]: Scrollable container
//! - [`icons`]: SVG icon components

mod button;
mod icons;
mod input;
mod scroll_area;

pub use button::{Button, ButtonSize, ButtonVariant};
pub use icons::*;
pub use input::Input;
pub use scroll_area::ScrollArea;

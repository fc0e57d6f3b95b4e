//! UI components and layouts.
//!
//! This module provides Leptos SSR components for rendering the chat
//! widget, following ShadCN-UI design principles.
//!
//! # Structure
//!
//! - [`components`]: Reusable ShadCN-style UI components
//! - [`widget`]: Chat widget layout components

pub mod components;
pub mod widget;

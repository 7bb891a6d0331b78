//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render app chrome around the routed page while reading shared
//! state from Leptos context providers.

pub mod error_fallback;
pub mod loading_spinner;
pub mod nav_bar;

//! # client
//!
//! Leptos + WASM single-page frontend for the accessible learning portal.
//!
//! This crate contains the app shell, pages, components, and the browser
//! implementations of the `session` crate's storage and transport seams.
//! Session verification, route gating, and the preference models themselves
//! live in `session` so the CLI shares them.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// Browser entry point: install panic/log hooks and mount the app.
#[cfg(feature = "csr")]
#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
    leptos::mount::mount_to_body(app::App);
}

//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! The root [`app::AppState`] owns one signal per concern (accessibility,
//! language, auth). Each is provided to the tree separately so components
//! depend only on the piece they read.

pub mod app;
pub mod auth;

//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements the `session::AuthApi` seam over browser HTTP.

pub mod api;

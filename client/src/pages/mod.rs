//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page is the target of one `session::View`. Pages read shared state
//! from context and never decide for themselves whether they may be shown;
//! that is the router's job.

pub mod accessibility;
pub mod admin;
pub mod dashboard;
pub mod forgot_password;
pub mod games;
pub mod login;
pub mod profile;
pub mod register;
pub mod textbooks;

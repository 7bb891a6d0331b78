//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, the
//! document root) from page and component logic.

pub mod document;
pub mod storage;

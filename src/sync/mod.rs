//! Keeping closing tag names in sync with their opening tags.
//!
//! This module provides:
//! - `Editor`, the host surface a document is read and edited through
//! - `TagSync`, the per-document controller reacting to cursor moves and edits

mod controller;
mod editor;

pub use controller::{SyncState, TagSync, TextChange};
pub use editor::{EditError, Editor};

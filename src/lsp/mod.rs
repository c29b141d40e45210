//! LSP protocol bindings for tag sync.
//!
//! This module provides:
//! - `QueuedEditor`, an `Editor` that turns rewrites into a `WorkspaceEdit`
//! - The `tagSync/didChangeSelection` notification carrying cursor moves

mod edit;
mod selection;

pub use edit::QueuedEditor;
pub use selection::{SelectionChangedParams, SELECTION_CHANGED};

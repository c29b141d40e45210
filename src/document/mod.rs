//! Document state management and text utilities.
//!
//! This module provides:
//! - `LineIndex` for byte offset <-> LSP position conversion and line lookup
//! - `MemoryBuffer`, an in-process `Editor`
//! - `Document` and `DocumentStore` for document lifecycle management

mod buffer;
mod state;
mod text;

pub use buffer::MemoryBuffer;
pub use state::{Document, DocumentStore};
pub use text::LineIndex;

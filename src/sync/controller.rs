//! Per-document tag tracking.
//!
//! The controller watches the opening tag name under the cursor. When an edit
//! changes that name, it rewrites the paired closing tag so both agree again.

use std::ops::Range;

use tracing::{debug, error, info};

use super::editor::{EditError, Editor};
use crate::tags::{closing_tag_after, tag_at, TagReference};

/// Whether a tag name is currently under watch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SyncState {
    /// The cursor is not inside an opening tag name.
    #[default]
    Idle,
    /// The cursor entered this tag's name; `name` is the last name the
    /// closing tag was synced to.
    Tracking(TagReference),
}

/// What a text change led the controller to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextChange {
    /// No tag was being tracked.
    NotTracking,
    /// The tracked tag no longer exists; tracking stopped.
    TagLost,
    /// The tracked tag still has its last known name.
    Unchanged,
    /// The name changed but no balanced closing tag was found.
    NoMatchingClose { from: String, to: String },
    /// The closing tag at `closing` was renamed from `from` to `to`.
    Rewritten {
        from: String,
        to: String,
        closing: Range<usize>,
    },
    /// The host refused the rewrite of the closing tag at `closing`.
    EditRejected {
        from: String,
        to: String,
        closing: Range<usize>,
        error: EditError,
    },
}

/// Tag sync session for a single document.
#[derive(Debug, Clone, Default)]
pub struct TagSync {
    state: SyncState,
}

impl TagSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    /// The tag currently under watch, if any.
    pub fn tracked(&self) -> Option<&TagReference> {
        match &self.state {
            SyncState::Idle => None,
            SyncState::Tracking(tag) => Some(tag),
        }
    }

    /// Handle the cursor moving to the document offset `position`.
    ///
    /// Never edits the document: moving into a different tag only changes what
    /// is tracked.
    pub fn on_selection_changed<E: Editor + ?Sized>(&mut self, editor: &E, position: usize) {
        let Some(current) = tag_at(editor, position) else {
            if let SyncState::Tracking(tag) = &self.state {
                debug!(name = %tag.name, "left tag");
                self.state = SyncState::Idle;
            }
            return;
        };

        if self.tracked().map(|tag| &tag.range) != Some(&current.range) {
            debug!(name = %current.name, range = ?current.range, "entered tag");
            self.state = SyncState::Tracking(current);
        }
    }

    /// Handle a change to the document text.
    ///
    /// Re-reads the tag at the start of the tracked span. If its name differs
    /// from the last known one, the closing tag still carrying the old name is
    /// rewritten with a single edit and the new name becomes the baseline.
    /// A rejected edit is logged; the baseline moves on regardless.
    pub fn on_text_changed<E: Editor + ?Sized>(&mut self, editor: &mut E) -> TextChange {
        let SyncState::Tracking(tracked) = &self.state else {
            return TextChange::NotTracking;
        };

        let Some(current) = tag_at(&*editor, tracked.range.start) else {
            debug!(name = %tracked.name, "lost tracked tag");
            self.state = SyncState::Idle;
            return TextChange::TagLost;
        };

        if current.name == tracked.name {
            return TextChange::Unchanged;
        }

        let from = tracked.name.clone();
        let to = current.name.clone();
        debug!(%from, %to, "tag renamed");

        // The old end may now lie past the opener when the name got shorter
        let outcome = match closing_tag_after(&*editor, current.range.end, &from) {
            None => {
                debug!(%from, "no matching closing tag");
                TextChange::NoMatchingClose { from, to }
            }
            Some(closing) => match editor.apply_edit(closing.clone(), &to) {
                Ok(()) => {
                    info!(%from, %to, range = ?closing, "updated closing tag");
                    TextChange::Rewritten { from, to, closing }
                }
                Err(err) => {
                    error!(%from, %to, range = ?closing, "failed to update closing tag: {err}");
                    TextChange::EditRejected {
                        from,
                        to,
                        closing,
                        error: err,
                    }
                }
            },
        };

        self.state = SyncState::Tracking(current);
        outcome
    }
}

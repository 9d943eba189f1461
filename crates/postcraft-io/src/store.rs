//! The single live post record.

use dioxus::prelude::*;
use postcraft_core::{PostPatch, PostRecord};

/// Handle to the post record shared by the form and the preview.
///
/// Copying the handle copies the signal, not the record.
#[derive(Clone, Copy, PartialEq)]
pub struct PostStore {
    record: Signal<PostRecord>,
}

impl PostStore {
    /// Current record, subscribing the calling scope to changes.
    #[must_use]
    pub fn record(&self) -> PostRecord {
        self.record.read().clone()
    }

    /// Merge `patch` into the record.  Empty patches do not wake
    /// subscribers.
    pub fn update(&mut self, patch: PostPatch) {
        if patch.is_empty() {
            return;
        }
        self.record.write().apply(patch);
    }
}

/// Create the store, seeded with the demo record.  Call once, from the
/// root component.
pub fn use_post_store() -> PostStore {
    PostStore {
        record: use_signal(PostRecord::demo),
    }
}

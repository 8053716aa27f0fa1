//! Active-conversation pointer for presentation.

use crate::chat::store::ConversationStore;
use crate::chat::types::{ConversationTarget, Entry};

/// Which conversation the user is looking at. Read-only over the store.
#[derive(Debug, Default)]
pub struct ViewSelector {
    active: ConversationTarget,
}

impl ViewSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_active(&mut self, target: ConversationTarget) {
        self.active = target;
    }

    pub fn active(&self) -> &ConversationTarget {
        &self.active
    }

    /// Entries of the active conversation; empty if it does not exist yet.
    pub fn entries<'a>(&self, store: &'a ConversationStore) -> &'a [Entry] {
        store.entries(&self.active)
    }
}

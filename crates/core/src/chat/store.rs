//! In-memory conversation logs.
//!
//! Structure:
//! - one group log, present from construction
//! - one log per private counterpart, created lazily on first contact
//!
//! Logs are append-only. Nothing is persisted past process end.

use crate::chat::types::{ConversationTarget, Entry, Identity};
use std::collections::HashMap;

/// An append-only, arrival-ordered log of entries.
#[derive(Debug, Default, Clone)]
pub struct Conversation {
    entries: Vec<Entry>,
}

impl Conversation {
    fn push(&mut self, entry: Entry) -> usize {
        self.entries.push(entry);
        self.entries.len()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Group log plus private logs keyed by counterpart identity.
///
/// Only the router and the composer append; callers outside the crate get
/// read access only.
#[derive(Debug, Default)]
pub struct ConversationStore {
    group: Conversation,
    private: HashMap<Identity, Conversation>,
    /// Private counterparts in first-contact order.
    order: Vec<Identity>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append to the group log. Returns the new log length.
    pub(crate) fn append_group(&mut self, entry: Entry) -> usize {
        self.group.push(entry)
    }

    /// Append to the private log for `counterpart`, creating it if absent.
    ///
    /// Returns `true` when this call created the conversation.
    pub(crate) fn append_private(&mut self, counterpart: &Identity, entry: Entry) -> bool {
        let created = !self.private.contains_key(counterpart);
        if created {
            self.order.push(counterpart.clone());
        }
        self.private
            .entry(counterpart.clone())
            .or_default()
            .push(entry);
        created
    }

    pub fn group(&self) -> &Conversation {
        &self.group
    }

    pub fn private(&self, counterpart: &Identity) -> Option<&Conversation> {
        self.private.get(counterpart)
    }

    pub fn has_private(&self, counterpart: &Identity) -> bool {
        self.private.contains_key(counterpart)
    }

    /// Entries for `target`; empty when no private log exists yet.
    pub fn entries(&self, target: &ConversationTarget) -> &[Entry] {
        match target {
            ConversationTarget::Group => self.group.entries(),
            ConversationTarget::Private(counterpart) => self
                .private
                .get(counterpart)
                .map(Conversation::entries)
                .unwrap_or(&[]),
        }
    }

    /// Counterparts with a private log, in first-contact order.
    pub fn counterparts(&self) -> &[Identity] {
        &self.order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::{Message, Notification};

    fn id(name: &str) -> Identity {
        Identity::from_remote(name).unwrap()
    }

    fn msg(sender: &str, body: &str) -> Entry {
        Message::compose(id(sender), body.to_string()).into()
    }

    #[test]
    fn test_group_exists_empty() {
        let store = ConversationStore::new();
        assert!(store.group().is_empty());
        assert!(store.entries(&ConversationTarget::Group).is_empty());
    }

    #[test]
    fn test_private_created_lazily() {
        let mut store = ConversationStore::new();
        let bob = id("bob");
        assert!(!store.has_private(&bob));
        assert!(store.entries(&ConversationTarget::Private(bob.clone())).is_empty());

        assert!(store.append_private(&bob, msg("bob", "hey")));
        assert!(!store.append_private(&bob, msg("alice", "yo")));

        assert_eq!(store.private(&bob).unwrap().len(), 2);
        assert_eq!(store.counterparts(), &[bob]);
    }

    #[test]
    fn test_append_preserves_arrival_order() {
        let mut store = ConversationStore::new();
        store.append_group(msg("alice", "one"));
        store.append_group(Notification::left(id("bob")).into());
        assert_eq!(store.append_group(msg("carol", "two")), 3);

        let bodies: Vec<_> = store
            .group()
            .entries()
            .iter()
            .filter_map(Entry::as_message)
            .map(|m| m.body.as_str())
            .collect();
        assert_eq!(bodies, vec!["one", "two"]);
        assert!(store.group().entries()[1].as_notification().is_some());
    }

    #[test]
    fn test_counterparts_in_first_contact_order() {
        let mut store = ConversationStore::new();
        store.append_private(&id("zed"), msg("zed", "1"));
        store.append_private(&id("amy"), msg("amy", "2"));
        store.append_private(&id("zed"), msg("zed", "3"));

        assert_eq!(store.counterparts(), &[id("zed"), id("amy")]);
    }
}

//! Live set of reachable peers.

use crate::chat::types::Identity;
use std::collections::BTreeSet;

/// Presence set, replaced wholesale by each snapshot from the feed.
///
/// Whatever the feed reports is stored verbatim, including the local
/// identity when upstream lists it; use [`PresenceTracker::others`] to hide it.
#[derive(Debug, Default)]
pub struct PresenceTracker {
    peers: BTreeSet<Identity>,
}

impl PresenceTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole set. Never merges with prior state.
    pub fn replace_all<I>(&mut self, identities: I)
    where
        I: IntoIterator<Item = Identity>,
    {
        self.peers = identities.into_iter().collect();
    }

    /// The current set. Empty before the first snapshot.
    pub fn current(&self) -> &BTreeSet<Identity> {
        &self.peers
    }

    /// The current set without `local`.
    pub fn others<'a>(&'a self, local: Option<&'a Identity>) -> impl Iterator<Item = &'a Identity> + 'a {
        self.peers.iter().filter(move |peer| Some(*peer) != local)
    }

    pub fn contains(&self, identity: &Identity) -> bool {
        self.peers.contains(identity)
    }

    pub fn len(&self) -> usize {
        self.peers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }
}

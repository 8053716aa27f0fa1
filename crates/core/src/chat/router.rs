//! Inbound event classification and dispatch.

use crate::chat::event::{InboundEvent, MessagePayload};
use crate::chat::presence::PresenceTracker;
use crate::chat::session::Session;
use crate::chat::store::ConversationStore;
use crate::chat::types::{Entry, Identity, Notification};
use crate::error::{Error, Result};
use tracing::{debug, info, warn};

/// Changes applied to local state, for presentation to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatEvent {
    /// Transport connected.
    Connected,
    /// Transport disconnected.
    Disconnected,
    /// Join was acknowledged; the session is live.
    Joined { identity: Identity },
    /// Entry appended to the group conversation.
    GroupAppended { entry: Entry },
    /// Entry appended to a private conversation.
    PrivateAppended { counterpart: Identity, entry: Entry },
    /// First entry with a counterpart created their conversation.
    ConversationOpened { counterpart: Identity },
    /// Presence set was replaced by a snapshot.
    PresenceReplaced { count: usize },
}

/// Counters for routed and dropped events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouterStats {
    pub routed: u64,
    pub dropped: u64,
}

/// Applies inbound events to session, presence and conversations.
///
/// Each event is handled on its own: the router keeps no state of its own
/// beyond counters. Malformed events are logged and dropped without
/// touching any log.
#[derive(Debug, Default)]
pub struct EventRouter {
    stats: RouterStats,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> RouterStats {
        self.stats
    }

    /// Route one event. Never fails: bad events are dropped with a warning.
    pub fn route(
        &mut self,
        session: &mut Session,
        presence: &mut PresenceTracker,
        store: &mut ConversationStore,
        event: InboundEvent,
    ) -> Vec<ChatEvent> {
        let kind = event.kind();
        match Self::apply(session, presence, store, event) {
            Ok(events) => {
                self.stats.routed += 1;
                events
            }
            Err(e) => {
                self.stats.dropped += 1;
                warn!("Dropping {} event: {}", kind, e);
                Vec::new()
            }
        }
    }

    fn apply(
        session: &mut Session,
        presence: &mut PresenceTracker,
        store: &mut ConversationStore,
        event: InboundEvent,
    ) -> Result<Vec<ChatEvent>> {
        match event {
            InboundEvent::Connected => {
                info!("Connected to lobby");
                session.set_connected(true);
                Ok(vec![ChatEvent::Connected])
            }
            InboundEvent::Disconnected => {
                info!("Disconnected from lobby");
                session.set_connected(false);
                Ok(vec![ChatEvent::Disconnected])
            }
            InboundEvent::JoinAcknowledged => match session.on_join_acknowledged()? {
                Some(identity) => {
                    info!("Joined as {}", identity);
                    Ok(vec![ChatEvent::Joined { identity }])
                }
                None => {
                    debug!("Ignoring repeated join acknowledgment");
                    Ok(Vec::new())
                }
            },
            InboundEvent::GroupMessage(payload) => {
                let entry: Entry = payload.validate()?.into();
                let len = store.append_group(entry.clone());
                debug!("Group message appended (log length {})", len);
                Ok(vec![ChatEvent::GroupAppended { entry }])
            }
            InboundEvent::PrivateMessage(payload) => {
                Self::apply_private(session.identity(), store, payload)
            }
            InboundEvent::PresenceSnapshot { identities } => {
                let identities = identities
                    .ok_or_else(|| Error::MalformedEvent("missing identities".to_string()))?;

                let mut peers = Vec::with_capacity(identities.len());
                for name in &identities {
                    match Identity::from_remote(name) {
                        Some(identity) => peers.push(identity),
                        None => warn!("Skipping blank identity in presence snapshot"),
                    }
                }

                presence.replace_all(peers);
                debug!("Presence replaced ({} peers)", presence.len());
                Ok(vec![ChatEvent::PresenceReplaced {
                    count: presence.len(),
                }])
            }
            InboundEvent::PeerJoined { identity } => {
                let subject = require_identity(identity)?;
                Ok(vec![append_notification(store, Notification::joined(subject))])
            }
            InboundEvent::PeerLeft { identity } => {
                let subject = require_identity(identity)?;
                Ok(vec![append_notification(store, Notification::left(subject))])
            }
        }
    }

    fn apply_private(
        local: Option<&Identity>,
        store: &mut ConversationStore,
        payload: MessagePayload,
    ) -> Result<Vec<ChatEvent>> {
        let message = payload.validate()?;

        // The key must be the counterpart; a reflected copy of our own send
        // does not say who it was for.
        if local == Some(&message.sender) {
            return Err(Error::MalformedEvent(
                "private message attributed to the local identity".to_string(),
            ));
        }

        let counterpart = message.sender.clone();
        let entry: Entry = message.into();
        let mut events = Vec::with_capacity(2);

        if store.append_private(&counterpart, entry.clone()) {
            debug!("Opened private conversation with {}", counterpart);
            events.push(ChatEvent::ConversationOpened {
                counterpart: counterpart.clone(),
            });
        }
        events.push(ChatEvent::PrivateAppended { counterpart, entry });

        Ok(events)
    }
}

fn require_identity(identity: Option<String>) -> Result<Identity> {
    identity
        .as_deref()
        .and_then(Identity::from_remote)
        .ok_or_else(|| Error::MalformedEvent("missing identity".to_string()))
}

fn append_notification(store: &mut ConversationStore, notification: Notification) -> ChatEvent {
    debug!("{}", notification.text());
    let entry: Entry = notification.into();
    store.append_group(entry.clone());
    ChatEvent::GroupAppended { entry }
}

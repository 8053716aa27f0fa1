//! Outgoing message composition.

use crate::chat::event::OutboundIntent;
use crate::chat::router::ChatEvent;
use crate::chat::session::Session;
use crate::chat::store::ConversationStore;
use crate::chat::types::{ConversationTarget, Entry, Message};
use crate::error::{Error, Result};
use crate::transport::Transport;
use std::sync::Arc;
use tracing::debug;

/// Turns local send actions into messages and forwards them upstream.
///
/// Group sends are not echoed locally: the copy reflected back by upstream
/// is the one that lands in the group log. Private sends are echoed into
/// the counterpart's log immediately, since upstream does not reflect them.
pub struct OutboundComposer {
    transport: Arc<dyn Transport>,
    max_body_length: usize,
}

impl OutboundComposer {
    pub fn new(transport: Arc<dyn Transport>, max_body_length: usize) -> Self {
        Self {
            transport,
            max_body_length,
        }
    }

    /// Send `body` to `target`.
    ///
    /// A blank body is a silent no-op. The counterpart does not need to be
    /// in the presence set.
    pub fn send(
        &self,
        session: &Session,
        store: &mut ConversationStore,
        target: &ConversationTarget,
        body: &str,
    ) -> Result<Vec<ChatEvent>> {
        let body = body.trim();
        if body.is_empty() {
            debug!("Ignoring blank message to {}", target);
            return Ok(Vec::new());
        }

        if body.len() > self.max_body_length {
            return Err(Error::Validation(format!(
                "message body exceeds maximum length of {} bytes",
                self.max_body_length
            )));
        }

        let sender = session.identity().ok_or(Error::NotJoined)?;
        if target.counterpart() == Some(sender) {
            return Err(Error::Validation(
                "cannot open a private conversation with yourself".to_string(),
            ));
        }

        let message = Message::compose(sender.clone(), body.to_string());

        match target {
            ConversationTarget::Group => {
                self.transport
                    .emit(OutboundIntent::GroupMessage { message })?;
                Ok(Vec::new())
            }
            ConversationTarget::Private(counterpart) => {
                self.transport.emit(OutboundIntent::PrivateMessage {
                    to: counterpart.clone(),
                    message: message.clone(),
                })?;

                let entry: Entry = message.into();
                let mut events = Vec::with_capacity(2);
                if store.append_private(counterpart, entry.clone()) {
                    events.push(ChatEvent::ConversationOpened {
                        counterpart: counterpart.clone(),
                    });
                }
                events.push(ChatEvent::PrivateAppended {
                    counterpart: counterpart.clone(),
                    entry,
                });
                Ok(events)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::Identity;
    use crate::transport::{ChannelTransport, RemotePeer};

    fn joined_session(name: &str) -> Session {
        let mut session = Session::new();
        session.request_join(name, 3).unwrap();
        session.on_join_acknowledged().unwrap();
        session
    }

    fn composer() -> (OutboundComposer, RemotePeer) {
        let (transport, peer) = ChannelTransport::pair();
        (OutboundComposer::new(Arc::new(transport), 64), peer)
    }

    #[test]
    fn test_group_send_has_no_local_echo() {
        let (composer, mut peer) = composer();
        let session = joined_session("alice");
        let mut store = ConversationStore::new();

        let events = composer
            .send(&session, &mut store, &ConversationTarget::Group, "hello")
            .unwrap();

        assert!(events.is_empty());
        assert!(store.group().is_empty());
        match peer.try_next_intent() {
            Some(OutboundIntent::GroupMessage { message }) => {
                assert_eq!(message.sender.as_str(), "alice");
                assert_eq!(message.body, "hello");
            }
            other => panic!("unexpected intent: {:?}", other),
        }
    }

    #[test]
    fn test_private_send_echoes_immediately() {
        let (composer, mut peer) = composer();
        let session = joined_session("alice");
        let mut store = ConversationStore::new();
        let bob = Identity::from_remote("bob").unwrap();

        composer
            .send(&session, &mut store, &bob.clone().into(), "  hi  ")
            .unwrap();

        let log = store.private(&bob).unwrap();
        assert_eq!(log.len(), 1);
        let echoed = log.entries()[0].as_message().unwrap();
        assert_eq!(echoed.body, "hi");
        assert!(echoed.is_from(session.identity().unwrap()));

        assert!(matches!(
            peer.try_next_intent(),
            Some(OutboundIntent::PrivateMessage { to, .. }) if to == bob
        ));
    }

    #[test]
    fn test_blank_body_is_silent_noop() {
        let (composer, mut peer) = composer();
        let session = joined_session("alice");
        let mut store = ConversationStore::new();
        let bob = Identity::from_remote("bob").unwrap();

        let events = composer
            .send(&session, &mut store, &bob.clone().into(), "   ")
            .unwrap();

        assert!(events.is_empty());
        assert!(!store.has_private(&bob));
        assert!(peer.try_next_intent().is_none());
    }

    #[test]
    fn test_send_requires_join() {
        let (composer, _peer) = composer();
        let mut store = ConversationStore::new();
        let result = composer.send(&Session::new(), &mut store, &ConversationTarget::Group, "hi");
        assert!(matches!(result, Err(Error::NotJoined)));
    }

    #[test]
    fn test_oversized_body_rejected() {
        let (composer, mut peer) = composer();
        let session = joined_session("alice");
        let mut store = ConversationStore::new();

        let body = "x".repeat(65);
        let result = composer.send(&session, &mut store, &ConversationTarget::Group, &body);
        assert!(result.unwrap_err().is_validation());
        assert!(peer.try_next_intent().is_none());
    }

    #[test]
    fn test_private_send_to_self_rejected() {
        let (composer, mut peer) = composer();
        let session = joined_session("alice");
        let mut store = ConversationStore::new();
        let alice = Identity::from_remote("alice").unwrap();

        let result = composer.send(&session, &mut store, &alice.clone().into(), "note to self");
        assert!(result.unwrap_err().is_validation());
        assert!(!store.has_private(&alice));
        assert!(store.counterparts().is_empty());
        assert!(peer.try_next_intent().is_none());
    }

    #[test]
    fn test_failed_emit_skips_echo() {
        let (composer, peer) = composer();
        drop(peer);
        let session = joined_session("alice");
        let mut store = ConversationStore::new();
        let bob = Identity::from_remote("bob").unwrap();

        let result = composer.send(&session, &mut store, &bob.clone().into(), "hi");
        assert!(matches!(result, Err(Error::Transport(_))));
        assert!(!store.has_private(&bob));
    }
}

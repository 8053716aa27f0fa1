//! Transport capability handed to the client at construction.
//!
//! The real duplex channel (reconnection, wire framing) lives outside this
//! crate. The core only needs to emit intents and to hold one subscription
//! to the inbound feed. [`ChannelTransport`] is an in-memory implementation
//! backed by tokio channels, paired with a [`RemotePeer`] that plays the
//! server side.

use crate::chat::event::{InboundEvent, OutboundIntent};
use crate::error::{Error, Result};
use std::sync::Mutex;
use tokio::sync::mpsc;

/// Capability to talk to the remote peer.
pub trait Transport: Send + Sync {
    /// Fire-and-forget send of an outbound intent.
    fn emit(&self, intent: OutboundIntent) -> Result<()>;

    /// Register the single inbound handler.
    ///
    /// Implementations hand out at most one live subscription.
    fn subscribe(&self) -> Result<Subscription>;
}

/// The registered inbound handler. Dropping it deregisters.
#[derive(Debug)]
pub struct Subscription {
    rx: mpsc::UnboundedReceiver<InboundEvent>,
}

impl Subscription {
    pub fn new(rx: mpsc::UnboundedReceiver<InboundEvent>) -> Self {
        Self { rx }
    }

    /// Wait for the next event; `None` once the transport has closed.
    pub async fn next(&mut self) -> Option<InboundEvent> {
        self.rx.recv().await
    }

    /// Take the next event if one is already queued.
    pub fn try_next(&mut self) -> Option<InboundEvent> {
        self.rx.try_recv().ok()
    }
}

/// In-memory transport.
pub struct ChannelTransport {
    outbound: mpsc::UnboundedSender<OutboundIntent>,
    inbound: Mutex<Option<mpsc::UnboundedReceiver<InboundEvent>>>,
}

/// Server side of a [`ChannelTransport`].
pub struct RemotePeer {
    inbound: mpsc::UnboundedSender<InboundEvent>,
    outbound: mpsc::UnboundedReceiver<OutboundIntent>,
}

impl ChannelTransport {
    /// Create a connected transport/peer pair.
    pub fn pair() -> (ChannelTransport, RemotePeer) {
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();

        let transport = ChannelTransport {
            outbound: outbound_tx,
            inbound: Mutex::new(Some(inbound_rx)),
        };
        let peer = RemotePeer {
            inbound: inbound_tx,
            outbound: outbound_rx,
        };
        (transport, peer)
    }
}

impl Transport for ChannelTransport {
    fn emit(&self, intent: OutboundIntent) -> Result<()> {
        tracing::debug!("emitting {}", intent.kind());
        self.outbound
            .send(intent)
            .map_err(|_| Error::Transport("remote peer has closed the channel".to_string()))
    }

    fn subscribe(&self) -> Result<Subscription> {
        let mut slot = self
            .inbound
            .lock()
            .map_err(|_| Error::Transport("subscription lock poisoned".to_string()))?;

        slot.take()
            .map(Subscription::new)
            .ok_or_else(|| Error::Transport("transport already has a subscriber".to_string()))
    }
}

impl RemotePeer {
    /// Deliver an event to the subscribed client.
    pub fn deliver(&self, event: InboundEvent) -> Result<()> {
        self.inbound
            .send(event)
            .map_err(|_| Error::Transport("client subscription has been dropped".to_string()))
    }

    /// Next intent the client emitted, if any is queued.
    pub fn try_next_intent(&mut self) -> Option<OutboundIntent> {
        self.outbound.try_recv().ok()
    }

    /// All intents emitted so far.
    pub fn drain_intents(&mut self) -> Vec<OutboundIntent> {
        let mut intents = Vec::new();
        while let Ok(intent) = self.outbound.try_recv() {
            intents.push(intent);
        }
        intents
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::types::Identity;

    #[test]
    fn test_single_subscription() {
        let (transport, _peer) = ChannelTransport::pair();
        assert!(transport.subscribe().is_ok());
        assert!(matches!(transport.subscribe(), Err(Error::Transport(_))));
    }

    #[test]
    fn test_deliver_reaches_subscriber() {
        let (transport, peer) = ChannelTransport::pair();
        let mut sub = transport.subscribe().unwrap();

        peer.deliver(InboundEvent::Connected).unwrap();
        assert_eq!(sub.try_next(), Some(InboundEvent::Connected));
        assert_eq!(sub.try_next(), None);
    }

    #[test]
    fn test_dropped_subscription_rejects_delivery() {
        let (transport, peer) = ChannelTransport::pair();
        drop(transport.subscribe().unwrap());
        assert!(peer.deliver(InboundEvent::Connected).is_err());
    }

    #[test]
    fn test_emit_after_peer_closed() {
        let (transport, peer) = ChannelTransport::pair();
        drop(peer);
        let intent = OutboundIntent::Join {
            name: Identity::parse("alice", 3).unwrap(),
        };
        assert!(matches!(transport.emit(intent), Err(Error::Transport(_))));
    }

    #[test]
    fn test_pairs_are_independent() {
        let (first, mut first_peer) = ChannelTransport::pair();
        let (_second, mut second_peer) = ChannelTransport::pair();

        first
            .emit(OutboundIntent::Join {
                name: Identity::parse("alice", 3).unwrap(),
            })
            .unwrap();

        assert_eq!(first_peer.drain_intents().len(), 1);
        assert!(second_peer.try_next_intent().is_none());
    }
}

//! Events exchanged with the remote peer.
//!
//! Both directions are JSON objects tagged by a `type` field. Inbound
//! payload fields are optional on the wire so an incomplete event still
//! decodes and can be rejected by the router with a diagnostic.

use crate::chat::types::{Identity, Message};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Message fields as delivered by the feed, not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessagePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sent_at: Option<DateTime<Utc>>,
}

impl MessagePayload {
    pub fn new(sender: &str, body: &str, sent_at: DateTime<Utc>) -> Self {
        Self {
            sender: Some(sender.to_string()),
            body: Some(body.to_string()),
            sent_at: Some(sent_at),
        }
    }

    /// Turn the payload into a [`Message`], or explain what is missing.
    pub fn validate(self) -> Result<Message> {
        let sender = self
            .sender
            .as_deref()
            .and_then(Identity::from_remote)
            .ok_or_else(|| Error::MalformedEvent("missing sender".to_string()))?;

        let body = match self.body {
            Some(body) if !body.trim().is_empty() => body,
            _ => return Err(Error::MalformedEvent("empty body".to_string())),
        };

        let sent_at = self
            .sent_at
            .ok_or_else(|| Error::MalformedEvent("missing sent_at".to_string()))?;

        Ok(Message {
            sender,
            body,
            sent_at,
        })
    }
}

/// Events received from the remote peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Transport connected.
    Connected,

    /// Transport lost its connection.
    Disconnected,

    /// Upstream accepted our join request.
    JoinAcknowledged,

    /// Message in the group conversation (our own included).
    GroupMessage(MessagePayload),

    /// Message addressed to us; the sender is the counterpart.
    PrivateMessage(MessagePayload),

    /// Authoritative list of reachable peers.
    PresenceSnapshot {
        #[serde(default)]
        identities: Option<Vec<String>>,
    },

    /// A peer joined the lobby.
    PeerJoined {
        #[serde(default)]
        identity: Option<String>,
    },

    /// A peer left the lobby.
    PeerLeft {
        #[serde(default)]
        identity: Option<String>,
    },
}

impl InboundEvent {
    pub fn group_message(sender: &str, body: &str, sent_at: DateTime<Utc>) -> Self {
        InboundEvent::GroupMessage(MessagePayload::new(sender, body, sent_at))
    }

    pub fn private_message(sender: &str, body: &str, sent_at: DateTime<Utc>) -> Self {
        InboundEvent::PrivateMessage(MessagePayload::new(sender, body, sent_at))
    }

    pub fn presence_snapshot<I, S>(identities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        InboundEvent::PresenceSnapshot {
            identities: Some(identities.into_iter().map(Into::into).collect()),
        }
    }

    pub fn peer_joined(identity: &str) -> Self {
        InboundEvent::PeerJoined {
            identity: Some(identity.to_string()),
        }
    }

    pub fn peer_left(identity: &str) -> Self {
        InboundEvent::PeerLeft {
            identity: Some(identity.to_string()),
        }
    }

    /// Short name of the event kind for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            InboundEvent::Connected => "connected",
            InboundEvent::Disconnected => "disconnected",
            InboundEvent::JoinAcknowledged => "join_acknowledged",
            InboundEvent::GroupMessage(_) => "group_message",
            InboundEvent::PrivateMessage(_) => "private_message",
            InboundEvent::PresenceSnapshot { .. } => "presence_snapshot",
            InboundEvent::PeerJoined { .. } => "peer_joined",
            InboundEvent::PeerLeft { .. } => "peer_left",
        }
    }

    /// Decode an event from its JSON form.
    pub fn decode(data: &str) -> Result<Self> {
        let event = serde_json::from_str(data)?;
        Ok(event)
    }
}

/// Intents emitted toward the remote peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OutboundIntent {
    /// Ask to join under a display name.
    Join { name: Identity },

    /// Post to the group conversation.
    GroupMessage { message: Message },

    /// Send a private message to `to`.
    PrivateMessage { to: Identity, message: Message },
}

impl OutboundIntent {
    pub fn kind(&self) -> &'static str {
        match self {
            OutboundIntent::Join { .. } => "join",
            OutboundIntent::GroupMessage { .. } => "group_message",
            OutboundIntent::PrivateMessage { .. } => "private_message",
        }
    }
}

//! Core data types for the chat system.

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Display name identifying a participant for the lifetime of a session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(String);

impl Identity {
    /// Validate a locally chosen display name.
    ///
    /// The name is trimmed and must keep at least `min_len` characters.
    pub fn parse(name: &str, min_len: usize) -> Result<Self> {
        let trimmed = name.trim();
        let len = trimmed.chars().count();
        if len < min_len {
            return Err(Error::Validation(format!(
                "display name must be at least {} characters, got {}",
                min_len, len
            )));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Accept an identity reported by the remote feed.
    ///
    /// The feed is authoritative for names, so only blank values are refused.
    pub fn from_remote(name: &str) -> Option<Self> {
        if name.trim().is_empty() {
            None
        } else {
            Some(Self(name.to_string()))
        }
    }

    /// Get the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Identity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single chat message. Never modified after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Who wrote the message.
    pub sender: Identity,
    /// Message text, never blank.
    pub body: String,
    /// Sender's local clock at composition time.
    pub sent_at: DateTime<Utc>,
}

impl Message {
    /// Compose an outgoing message stamped with the local clock.
    pub fn compose(sender: Identity, body: String) -> Self {
        Self {
            sender,
            body,
            sent_at: Utc::now(),
        }
    }

    /// Check if this message was written by `identity`.
    pub fn is_from(&self, identity: &Identity) -> bool {
        &self.sender == identity
    }
}

/// Kind of presence notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Join,
    Leave,
}

/// Synthetic log entry recording that a peer joined or left.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub subject: Identity,
}

impl Notification {
    pub fn joined(subject: Identity) -> Self {
        Self {
            kind: NotificationKind::Join,
            subject,
        }
    }

    pub fn left(subject: Identity) -> Self {
        Self {
            kind: NotificationKind::Leave,
            subject,
        }
    }

    /// Human-readable line for display.
    pub fn text(&self) -> String {
        match self.kind {
            NotificationKind::Join => format!("{} joined the chat", self.subject),
            NotificationKind::Leave => format!("{} left the chat", self.subject),
        }
    }
}

/// One entry in a conversation log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Entry {
    Message(Message),
    Notification(Notification),
}

impl Entry {
    /// The message, if this entry is one.
    pub fn as_message(&self) -> Option<&Message> {
        match self {
            Entry::Message(message) => Some(message),
            Entry::Notification(_) => None,
        }
    }

    /// The notification, if this entry is one.
    pub fn as_notification(&self) -> Option<&Notification> {
        match self {
            Entry::Notification(notification) => Some(notification),
            Entry::Message(_) => None,
        }
    }
}

impl From<Message> for Entry {
    fn from(message: Message) -> Self {
        Entry::Message(message)
    }
}

impl From<Notification> for Entry {
    fn from(notification: Notification) -> Self {
        Entry::Notification(notification)
    }
}

/// Which conversation an action or view refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ConversationTarget {
    /// The shared group conversation.
    #[default]
    Group,
    /// The private conversation with a counterpart.
    Private(Identity),
}

impl ConversationTarget {
    /// Sentinel naming the group conversation.
    pub const GROUP: &'static str = "group";

    pub fn is_group(&self) -> bool {
        matches!(self, ConversationTarget::Group)
    }

    /// The counterpart, for private targets.
    pub fn counterpart(&self) -> Option<&Identity> {
        match self {
            ConversationTarget::Group => None,
            ConversationTarget::Private(identity) => Some(identity),
        }
    }
}

impl From<Identity> for ConversationTarget {
    fn from(identity: Identity) -> Self {
        ConversationTarget::Private(identity)
    }
}

impl std::fmt::Display for ConversationTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversationTarget::Group => write!(f, "{}", Self::GROUP),
            ConversationTarget::Private(identity) => write!(f, "{}", identity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_validation() {
        assert!(Identity::parse("ab", 3).unwrap_err().is_validation());
        assert!(Identity::parse("  ab   ", 3).is_err());
        assert!(Identity::parse("", 3).is_err());

        let alice = Identity::parse("  alice ", 3).unwrap();
        assert_eq!(alice.as_str(), "alice");
    }

    #[test]
    fn test_identity_length_counts_chars_not_bytes() {
        assert!(Identity::parse("éé", 3).is_err());
        assert!(Identity::parse("äöü", 3).is_ok());
    }

    #[test]
    fn test_remote_identity_rejects_blank() {
        assert!(Identity::from_remote("   ").is_none());
        assert!(Identity::from_remote("").is_none());
        assert_eq!(Identity::from_remote("bo").unwrap().as_str(), "bo");
    }

    #[test]
    fn test_message_attribution() {
        let alice = Identity::parse("alice", 3).unwrap();
        let bob = Identity::parse("bob", 3).unwrap();
        let msg = Message::compose(alice.clone(), "hi".to_string());

        assert!(msg.is_from(&alice));
        assert!(!msg.is_from(&bob));
    }

    #[test]
    fn test_notification_text() {
        let bob = Identity::parse("bob", 3).unwrap();
        assert_eq!(Notification::joined(bob.clone()).text(), "bob joined the chat");
        assert_eq!(Notification::left(bob).text(), "bob left the chat");
    }

    #[test]
    fn test_target_display() {
        assert_eq!(ConversationTarget::Group.to_string(), "group");
        let bob = Identity::parse("bob", 3).unwrap();
        assert_eq!(ConversationTarget::from(bob).to_string(), "bob");
    }
}

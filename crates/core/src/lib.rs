//! Lobby Core Library
//!
//! This crate provides the conversation synchronization core of the lobby
//! chat client, including:
//! - Session identity and join state
//! - Presence tracking
//! - Group and private conversation logs
//! - Inbound event routing and outbound composition
//! - Configuration management
//!
//! Transport, rendering and persistence live outside this crate.

pub mod chat;
pub mod config;
pub mod error;
pub mod platform;
pub mod transport;

// Re-export commonly used types
pub use chat::{
    ChatClient, ChatEvent, ConversationTarget, Entry, Identity, InboundEvent, Message,
    Notification, NotificationKind, OutboundIntent,
};
pub use config::Config;
pub use error::{Error, Result};
pub use transport::{ChannelTransport, RemotePeer, Subscription, Transport};

//! Conversation synchronization for the lobby chat.
//!
//! This module keeps a local view of the shared group conversation and of
//! one private conversation per counterpart, driven by an untrusted,
//! at-least-once event feed:
//!
//! - Session identity with acknowledgment-only join
//! - Presence set replaced wholesale by each snapshot
//! - Append-only, arrival-ordered conversation logs
//! - Event routing with drop-and-log for malformed input
//! - Outbound composition with local echo for private sends only

pub mod client;
pub mod composer;
pub mod event;
pub mod presence;
pub mod router;
pub mod session;
pub mod store;
pub mod types;
pub mod view;

pub use client::ChatClient;
pub use composer::OutboundComposer;
pub use event::{InboundEvent, MessagePayload, OutboundIntent};
pub use presence::PresenceTracker;
pub use router::{ChatEvent, EventRouter, RouterStats};
pub use session::{Session, SessionState};
pub use store::{Conversation, ConversationStore};
pub use types::*;
pub use view::ViewSelector;

//! Common test utilities for integration tests.
//!
//! Shared helpers for driving a [`ChatClient`] against an in-memory
//! transport.

use lobby_core::{ChannelTransport, ChatClient, Config, InboundEvent, RemotePeer};
use std::sync::Arc;

/// Initialize test logging with appropriate filters.
///
/// Safe to call multiple times (subsequent calls are no-ops).
#[allow(dead_code)]
pub fn init_test_logging() {
    use tracing_subscriber::EnvFilter;

    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lobby_core=debug")),
        )
        .with_test_writer()
        .try_init();
}

/// A fresh client wired to its own remote peer.
#[allow(dead_code)]
pub fn client() -> (ChatClient, RemotePeer) {
    let (transport, peer) = ChannelTransport::pair();
    let client = ChatClient::new(Config::default(), Arc::new(transport)).expect("subscribe");
    (client, peer)
}

/// A client that has joined as `name` and drained the join intent.
#[allow(dead_code)]
pub fn joined_client(name: &str) -> (ChatClient, RemotePeer) {
    let (mut client, mut peer) = client();
    client.request_join(name).expect("valid name");
    peer.deliver(InboundEvent::JoinAcknowledged).expect("deliver");
    client.pump();
    peer.drain_intents();
    (client, peer)
}

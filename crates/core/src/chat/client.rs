//! Session-scoped chat client tying the components together.

use crate::chat::composer::OutboundComposer;
use crate::chat::event::{InboundEvent, OutboundIntent};
use crate::chat::presence::PresenceTracker;
use crate::chat::router::{ChatEvent, EventRouter, RouterStats};
use crate::chat::session::{Session, SessionState};
use crate::chat::store::ConversationStore;
use crate::chat::types::{ConversationTarget, Entry, Identity};
use crate::chat::view::ViewSelector;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::transport::{Subscription, Transport};
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{debug, info};

/// One chat session against one transport.
///
/// All state is owned here and mutated through `&mut self`, so events and
/// local actions are applied one at a time to completion.
pub struct ChatClient {
    config: Config,
    transport: Arc<dyn Transport>,
    subscription: Option<Subscription>,
    session: Session,
    presence: PresenceTracker,
    store: ConversationStore,
    router: EventRouter,
    composer: OutboundComposer,
    view: ViewSelector,
}

impl ChatClient {
    /// Create a client and register its inbound subscription.
    pub fn new(config: Config, transport: Arc<dyn Transport>) -> Result<Self> {
        let subscription = transport.subscribe()?;
        let composer = OutboundComposer::new(transport.clone(), config.max_body_length);

        Ok(Self {
            config,
            transport,
            subscription: Some(subscription),
            session: Session::new(),
            presence: PresenceTracker::new(),
            store: ConversationStore::new(),
            router: EventRouter::new(),
            composer,
            view: ViewSelector::new(),
        })
    }

    // ==================== Intents ====================

    /// Validate `name` and ask upstream to join under it.
    ///
    /// The session stays unjoined until a `join_acknowledged` event arrives.
    pub fn request_join(&mut self, name: &str) -> Result<Identity> {
        let identity = self
            .session
            .request_join(name, self.config.min_identity_len)?;
        if let Err(e) = self.transport.emit(OutboundIntent::Join {
            name: identity.clone(),
        }) {
            // Nothing went upstream, so no acknowledgment may bind this name.
            self.session.cancel_pending();
            return Err(e);
        }
        info!("Requested join as {}", identity);
        Ok(identity)
    }

    /// Send `body` to `target`.
    pub fn send(&mut self, target: &ConversationTarget, body: &str) -> Result<Vec<ChatEvent>> {
        self.composer
            .send(&self.session, &mut self.store, target, body)
    }

    /// Send `body` to the active conversation.
    pub fn send_to_active(&mut self, body: &str) -> Result<Vec<ChatEvent>> {
        let target = self.view.active().clone();
        self.send(&target, body)
    }

    /// Point the view at `target`. The local identity cannot be a counterpart.
    pub fn set_active_conversation(&mut self, target: ConversationTarget) -> Result<()> {
        if target.counterpart().is_some() && target.counterpart() == self.session.identity() {
            return Err(Error::Validation(
                "cannot open a private conversation with yourself".to_string(),
            ));
        }
        debug!("Active conversation: {}", target);
        self.view.set_active(target);
        Ok(())
    }

    // ==================== Inbound ====================

    /// Apply one inbound event.
    pub fn handle_event(&mut self, event: InboundEvent) -> Vec<ChatEvent> {
        self.router.route(
            &mut self.session,
            &mut self.presence,
            &mut self.store,
            event,
        )
    }

    /// Apply every event already queued on the subscription.
    pub fn pump(&mut self) -> Vec<ChatEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.subscription.as_mut().and_then(Subscription::try_next) {
            events.extend(self.handle_event(event));
        }
        events
    }

    /// Process events until the transport closes or the client is torn down.
    ///
    /// `on_change` sees every resulting [`ChatEvent`] in order.
    pub async fn run<F>(&mut self, mut on_change: F) -> RouterStats
    where
        F: FnMut(&ChatEvent),
    {
        loop {
            let Some(subscription) = self.subscription.as_mut() else {
                break;
            };
            let Some(event) = subscription.next().await else {
                info!("Transport closed");
                break;
            };
            for change in self.handle_event(event) {
                on_change(&change);
            }
        }
        self.router.stats()
    }

    /// Deregister the inbound subscription.
    pub fn teardown(&mut self) {
        if self.subscription.take().is_some() {
            debug!("Subscription released");
        }
    }

    // ==================== Queries ====================

    /// Entries of `target`; empty if no such private conversation exists yet.
    pub fn current_conversation_entries(&self, target: &ConversationTarget) -> &[Entry] {
        self.store.entries(target)
    }

    /// Entries of the active conversation.
    pub fn active_entries(&self) -> &[Entry] {
        self.view.entries(&self.store)
    }

    pub fn active_conversation(&self) -> &ConversationTarget {
        self.view.active()
    }

    /// The presence set exactly as last reported.
    pub fn presence_list(&self) -> &BTreeSet<Identity> {
        self.presence.current()
    }

    /// Reachable peers other than ourselves.
    pub fn other_peers(&self) -> Vec<Identity> {
        self.presence
            .others(self.session.identity())
            .cloned()
            .collect()
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn router_stats(&self) -> RouterStats {
        self.router.stats()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

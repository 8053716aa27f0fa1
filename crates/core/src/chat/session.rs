//! Local session identity and join state.

use crate::chat::types::Identity;
use crate::error::{Error, Result};
use serde::Serialize;

/// Snapshot of the local session for presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionState {
    /// Confirmed identity, set once the join is acknowledged.
    pub identity: Option<Identity>,
    /// Name awaiting acknowledgment, if a join is outstanding.
    pub pending: Option<Identity>,
    pub joined: bool,
    pub connected: bool,
}

/// The local participant's session.
///
/// Joining is authoritative-only: `joined` flips to true solely on an
/// acknowledgment from upstream, never optimistically.
#[derive(Debug, Default)]
pub struct Session {
    identity: Option<Identity>,
    pending: Option<Identity>,
    connected: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate `name` and record it as the outstanding join request.
    ///
    /// Returns the validated identity so the caller can forward it upstream.
    /// A second request before acknowledgment replaces the pending name.
    pub fn request_join(&mut self, name: &str, min_len: usize) -> Result<Identity> {
        if let Some(identity) = &self.identity {
            return Err(Error::AlreadyJoined(identity.to_string()));
        }

        let identity = Identity::parse(name, min_len)?;
        self.pending = Some(identity.clone());
        Ok(identity)
    }

    /// Apply an upstream join acknowledgment.
    ///
    /// Returns the newly confirmed identity on the first acknowledgment,
    /// `Ok(None)` on repeats, and an error when no join was ever requested.
    pub fn on_join_acknowledged(&mut self) -> Result<Option<Identity>> {
        if self.identity.is_some() {
            return Ok(None);
        }

        match self.pending.take() {
            Some(identity) => {
                self.identity = Some(identity.clone());
                Ok(Some(identity))
            }
            None => Err(Error::MalformedEvent(
                "join acknowledgment without an outstanding join request".to_string(),
            )),
        }
    }

    /// Forget an outstanding join request that never reached upstream.
    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    pub fn set_connected(&mut self, connected: bool) {
        self.connected = connected;
    }

    pub fn is_joined(&self) -> bool {
        self.identity.is_some()
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The confirmed local identity.
    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn state(&self) -> SessionState {
        SessionState {
            identity: self.identity.clone(),
            pending: self.pending.clone(),
            joined: self.is_joined(),
            connected: self.connected,
        }
    }
}

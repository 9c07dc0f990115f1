//! Bidirectional mapping between stable identities and session ids.
//!
//! Latency reports and some transport events only name a session id;
//! the registry is keyed by stable identity. This map translates in both
//! directions and keeps the two sides consistent: at most one identity
//! per session and one session per identity.

use std::collections::HashMap;

use deathlink_protocol::{ParticipantIdentity, SessionId};

/// Two `HashMap`s kept in sync, one per direction.
#[derive(Debug, Default, Clone)]
pub struct IdentityMap {
    by_identity: HashMap<ParticipantIdentity, SessionId>,
    by_session: HashMap<SessionId, ParticipantIdentity>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `identity` is on `session`.
    ///
    /// Any existing pair that shares either side is evicted first, so the
    /// newest pair always wins.
    pub fn insert(&mut self, identity: ParticipantIdentity, session: SessionId) {
        self.remove_identity(&identity);
        self.remove_session(session);
        self.by_session.insert(session, identity.clone());
        self.by_identity.insert(identity, session);
    }

    /// True if exactly this pair is present.
    pub fn contains(&self, identity: &ParticipantIdentity, session: SessionId) -> bool {
        self.by_identity.get(identity) == Some(&session)
    }

    pub fn session_of(&self, identity: &ParticipantIdentity) -> Option<SessionId> {
        self.by_identity.get(identity).copied()
    }

    pub fn identity_of(&self, session: SessionId) -> Option<&ParticipantIdentity> {
        self.by_session.get(&session)
    }

    /// Removes the pair containing `identity`, returning its session.
    pub fn remove_identity(&mut self, identity: &ParticipantIdentity) -> Option<SessionId> {
        let session = self.by_identity.remove(identity)?;
        self.by_session.remove(&session);
        Some(session)
    }

    /// Removes the pair containing `session`, returning its identity.
    pub fn remove_session(&mut self, session: SessionId) -> Option<ParticipantIdentity> {
        let identity = self.by_session.remove(&session)?;
        self.by_identity.remove(&identity);
        Some(identity)
    }

    pub fn len(&self) -> usize {
        debug_assert_eq!(self.by_identity.len(), self.by_session.len());
        self.by_identity.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_identity.is_empty()
    }
}

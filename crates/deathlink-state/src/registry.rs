//! The registry of remote participants' state.
//!
//! Like the rest of the sync core, `PlayerRegistry` is single-threaded:
//! it lives inside the tick and is only touched by drained effects, so it
//! uses plain `HashMap`s and no locks.

use std::collections::HashMap;
use std::time::Instant;

use deathlink_protocol::{ParticipantIdentity, PlayerStateUpdate, SessionId};

use crate::{IdentityMap, PlayerState, RegistryConfig};

/// What [`PlayerRegistry::apply_update`] did with an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// First update from this participant.
    Inserted,
    /// Merged into an existing record.
    Updated,
    /// The update carried our own identity and was ignored.
    IgnoredSelf,
}

/// Remote participants, keyed by stable identity.
///
/// ## Lifecycle
///
/// ```text
/// apply_update() ──→ [record + id mapping] ──→ apply_update() ...
///                             │
///                             ▼ (no update for `purge_after`)
///                       purge_stale() ──→ gone from both maps
/// ```
pub struct PlayerRegistry {
    states: HashMap<ParticipantIdentity, PlayerState>,
    ids: IdentityMap,
    config: RegistryConfig,
}

impl PlayerRegistry {
    pub fn new(config: RegistryConfig) -> Self {
        Self {
            states: HashMap::new(),
            ids: IdentityMap::new(),
            config: config.validated(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Looks up a participant. `None` just means "never heard of them".
    pub fn get(&self, identity: &ParticipantIdentity) -> Option<&PlayerState> {
        self.states.get(identity)
    }

    /// Looks up a participant by the session it was last seen on.
    pub fn get_by_session(&self, session: SessionId) -> Option<&PlayerState> {
        self.ids
            .identity_of(session)
            .and_then(|identity| self.states.get(identity))
    }

    pub fn all(&self) -> impl Iterator<Item = &PlayerState> {
        self.states.values()
    }

    pub fn identities(&self) -> &IdentityMap {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Merges an update from a remote participant.
    ///
    /// `local` is our own identity. An update carrying it is an echo of
    /// something we sent and is ignored.
    pub fn apply_update(
        &mut self,
        local: &ParticipantIdentity,
        update: PlayerStateUpdate,
        now: Instant,
    ) -> ApplyOutcome {
        if update.identity == *local {
            tracing::trace!(identity = %update.identity, "ignoring own state echo");
            return ApplyOutcome::IgnoredSelf;
        }

        let session = update.identity.session_id;
        if session.is_assigned() && !self.ids.contains(&update.identity, session) {
            self.ids.insert(update.identity.clone(), session);
        }

        match self.states.get_mut(&update.identity) {
            Some(existing) => {
                existing.apply(update, now);
                ApplyOutcome::Updated
            }
            None => {
                tracing::info!(identity = %update.identity, %session, "new participant");
                let identity = update.identity.clone();
                self.states.insert(identity, PlayerState::from_update(update, now));
                ApplyOutcome::Inserted
            }
        }
    }

    /// Stores latency for whoever is on `session`.
    ///
    /// `fast_ms` falls back to `reliable_ms` when the transport has no
    /// fast channel. Returns `false` if the session maps to nobody.
    pub fn record_latency(
        &mut self,
        session: SessionId,
        reliable_ms: u32,
        fast_ms: Option<u32>,
    ) -> bool {
        let Some(identity) = self.ids.identity_of(session) else {
            return false;
        };
        let Some(state) = self.states.get_mut(identity) else {
            return false;
        };
        state.latency.reliable_ms = reliable_ms;
        state.latency.fast_ms = fast_ms.unwrap_or(reliable_ms);
        true
    }

    /// Drops every record older than the purge window, together with its
    /// identity mapping. Returns who was dropped.
    pub fn purge_stale(&mut self, now: Instant) -> Vec<ParticipantIdentity> {
        let window = self.config.purge_after;
        let mut purged = Vec::new();

        self.states.retain(|identity, state| {
            if state.is_stale(now, window) {
                purged.push(identity.clone());
                false
            } else {
                true
            }
        });

        for identity in &purged {
            self.ids.remove_identity(identity);
            tracing::info!(%identity, "purged stale participant");
        }
        purged
    }
}

impl Default for PlayerRegistry {
    fn default() -> Self {
        Self::new(RegistryConfig::default())
    }
}

//! Per-participant state records.
//!
//! A [`PlayerState`] has two kinds of fields:
//!
//! - **replicated**: identity, map, room, respawn, active marker. These
//!   come from the wire and are overwritten by every accepted update.
//! - **bookkeeping**: timestamps and latency. These are local to this
//!   process and an incoming update never touches them.

use std::time::{Duration, Instant};

use deathlink_protocol::{
    ActiveMarker, LOBBY_MAP, ParticipantIdentity, PlayerStateUpdate, Vec2,
};

/// Round-trip times to one participant, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Latency {
    /// Reliable/slow channel.
    pub reliable_ms: u32,
    /// Fast/lossy channel.
    pub fast_ms: u32,
}

impl Default for Latency {
    fn default() -> Self {
        Self {
            reliable_ms: 100,
            fast_ms: 300,
        }
    }
}

/// What we know about one participant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub identity: ParticipantIdentity,
    pub map: String,
    pub room: String,
    pub respawn: Vec2,
    pub active_marker: Option<ActiveMarker>,
    pub last_update_sent: Instant,
    pub last_update_received: Instant,
    pub latency: Latency,
}

impl PlayerState {
    /// A record sitting in the lobby, as every participant starts out.
    pub fn new(identity: ParticipantIdentity, now: Instant) -> Self {
        Self {
            identity,
            map: LOBBY_MAP.to_owned(),
            room: String::new(),
            respawn: Vec2::ZERO,
            active_marker: None,
            last_update_sent: now,
            last_update_received: now,
            latency: Latency::default(),
        }
    }

    /// A fresh record built from the first update we saw.
    pub fn from_update(update: PlayerStateUpdate, now: Instant) -> Self {
        let mut state = Self::new(update.identity.clone(), now);
        state.apply(update, now);
        state
    }

    /// Overwrites the replicated fields and stamps the receive time.
    pub fn apply(&mut self, update: PlayerStateUpdate, now: Instant) {
        self.identity = update.identity;
        self.map = update.map;
        self.room = update.room;
        self.respawn = update.respawn;
        self.active_marker = update.active_marker;
        self.last_update_received = now;
    }

    /// The replicated fields, ready to send.
    pub fn to_update(&self) -> PlayerStateUpdate {
        PlayerStateUpdate {
            identity: self.identity.clone(),
            map: self.map.clone(),
            room: self.room.clone(),
            respawn: self.respawn,
            active_marker: self.active_marker.clone(),
        }
    }

    /// True once more than `window` has passed since the last update.
    /// Exactly `window` is still fresh.
    pub fn is_stale(&self, now: Instant, window: Duration) -> bool {
        now.saturating_duration_since(self.last_update_received) > window
    }
}

// ---------------------------------------------------------------------------
// LocalPlayer
// ---------------------------------------------------------------------------

/// Our own record, plus the heartbeat that keeps others informed.
///
/// The record's identity must always be our own identity. Every method
/// that produces an update takes the current own identity and refuses to
/// produce anything if the two disagree.
#[derive(Debug, Clone)]
pub struct LocalPlayer {
    state: PlayerState,
    heartbeat_interval: Duration,
}

impl LocalPlayer {
    pub fn new(identity: ParticipantIdentity, now: Instant, heartbeat_interval: Duration) -> Self {
        Self {
            state: PlayerState::new(identity, now),
            heartbeat_interval,
        }
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn identity(&self) -> &ParticipantIdentity {
        &self.state.identity
    }

    /// Rebinds the record to a freshly computed own identity.
    pub fn set_identity(&mut self, identity: ParticipantIdentity) {
        self.state.identity = identity;
    }

    /// Entered a map. The respawn point is unknown until the level
    /// reports one, so it resets to the origin.
    pub fn enter_map(&mut self, map: impl Into<String>, room: impl Into<String>) {
        self.state.map = map.into();
        self.state.room = room.into();
        self.state.respawn = Vec2::ZERO;
        tracing::info!(map = %self.state.map, room = %self.state.room, "entered map");
    }

    pub fn enter_room(&mut self, room: impl Into<String>, respawn: Vec2) {
        self.state.room = room.into();
        self.state.respawn = respawn;
        tracing::debug!(room = %self.state.room, "entered room");
    }

    pub fn update_respawn(&mut self, respawn: Vec2) {
        self.state.respawn = respawn;
    }

    /// Back to the lobby, with no room.
    pub fn enter_lobby(&mut self) {
        self.state.map = LOBBY_MAP.to_owned();
        self.state.room.clear();
        self.state.respawn = Vec2::ZERO;
    }

    pub fn set_active_marker(&mut self, marker: Option<ActiveMarker>) {
        self.state.active_marker = marker;
    }

    /// True when the last send is more than one heartbeat interval ago.
    pub fn heartbeat_due(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.state.last_update_sent) > self.heartbeat_interval
    }

    /// Produces an update to broadcast now and records the send time.
    ///
    /// Returns `None`, and leaves the send time alone, if the record's
    /// identity isn't `own`.
    pub fn prepare_update(
        &mut self,
        own: &ParticipantIdentity,
        now: Instant,
    ) -> Option<PlayerStateUpdate> {
        if self.state.identity != *own {
            tracing::warn!(
                record = %self.state.identity,
                own = %own,
                "local record identity differs from own identity, not sending"
            );
            return None;
        }
        self.state.last_update_sent = now;
        Some(self.state.to_update())
    }

    /// [`prepare_update`](Self::prepare_update), but only if a heartbeat
    /// is due.
    pub fn check_heartbeat(
        &mut self,
        own: &ParticipantIdentity,
        now: Instant,
    ) -> Option<PlayerStateUpdate> {
        if !self.heartbeat_due(now) {
            return None;
        }
        self.prepare_update(own, now)
    }
}

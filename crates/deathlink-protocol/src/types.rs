//! Core protocol types for Deathlink's wire format.
//!
//! Everything in this module either travels on the wire or describes who
//! sent something that travelled on the wire. Two kinds of identity live
//! here and it matters which one you reach for:
//!
//! - [`SessionId`] / [`PeerInfo`] are *transport* identities. They change
//!   every time a participant reconnects.
//! - [`ParticipantIdentity`] is the *stable* identity. Its equality ignores
//!   the session id so a reconnecting participant is still "the same person".

use serde::{Deserialize, Serialize};

use std::fmt;
use std::hash::{Hash, Hasher};

/// Team number meaning "every participant, regardless of team".
pub const TEAM_EVERYONE: i32 = 0;

/// Highest team number a participant can configure or target.
pub const MAX_TEAM: i32 = 100;

/// Map reported by a participant that has not entered a level yet.
pub const LOBBY_MAP: &str = "lobby";

// ---------------------------------------------------------------------------
// Transport identities
// ---------------------------------------------------------------------------

/// The transient numeric id the transport assigns to one connection.
///
/// This is a "newtype wrapper": a `u32` with its own name so it can't be
/// mixed up with a team number or a latency value. `#[serde(transparent)]`
/// keeps the JSON form a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u32);

impl SessionId {
    /// Sentinel used while the participant has no live connection.
    pub const UNASSIGNED: SessionId = SessionId(u32::MAX);

    /// Returns `true` unless this is [`SessionId::UNASSIGNED`].
    pub fn is_assigned(self) -> bool {
        self != Self::UNASSIGNED
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::UNASSIGNED
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_assigned() {
            write!(f, "s-{}", self.0)
        } else {
            f.write_str("s-none")
        }
    }
}

/// What the transport tells us about the sender of a message.
///
/// The death event body does not carry a sender; the transport attaches
/// this as metadata when it hands the bytes over.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeerInfo {
    pub session_id: SessionId,
    pub name: String,
}

impl PeerInfo {
    pub fn new(session_id: SessionId, name: impl Into<String>) -> Self {
        Self {
            session_id,
            name: name.into(),
        }
    }
}

impl fmt::Display for PeerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.session_id)
    }
}

// ---------------------------------------------------------------------------
// ParticipantIdentity
// ---------------------------------------------------------------------------

/// Stable identifier for a participant, independent of its connection.
///
/// ## Equality
///
/// Two identities are equal when their `stable_hash` and `name` match.
/// `session_id` is carried along for routing but is deliberately *not*
/// part of `PartialEq` or `Hash`, so we implement both traits by hand
/// instead of deriving them. `Hash` must agree with `Eq` (equal values
/// must hash equally) or a `HashMap` keyed by identities would silently
/// lose entries, which is why both impls look at exactly the same fields.
///
/// When the hardware hash is unavailable for two participants with the
/// same display name they compare equal. There is no tie-break for that.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParticipantIdentity {
    /// Hash derived from local hardware, `None` when it couldn't be read.
    pub stable_hash: Option<i32>,
    /// Last known display name.
    pub name: String,
    /// Session id of the connection this identity was last seen on.
    #[serde(default)]
    pub session_id: SessionId,
}

impl ParticipantIdentity {
    pub fn new(
        stable_hash: Option<i32>,
        name: impl Into<String>,
        session_id: SessionId,
    ) -> Self {
        Self {
            stable_hash,
            name: name.into(),
            session_id,
        }
    }

    /// True for an identity that carries no information at all.
    pub fn is_default(&self) -> bool {
        self.stable_hash.is_none() && self.name.is_empty()
    }

    /// Returns a copy of this identity bound to another session.
    pub fn with_session(&self, session_id: SessionId) -> Self {
        Self {
            session_id,
            ..self.clone()
        }
    }
}

impl PartialEq for ParticipantIdentity {
    fn eq(&self, other: &Self) -> bool {
        self.stable_hash == other.stable_hash && self.name == other.name
    }
}

impl Eq for ParticipantIdentity {}

impl Hash for ParticipantIdentity {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.stable_hash.hash(state);
        self.name.hash(state);
    }
}

impl fmt::Display for ParticipantIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.stable_hash {
            Some(hash) => write!(f, "{}[{:08x}]", self.name, hash),
            None => write!(f, "{}[?]", self.name),
        }
    }
}

// ---------------------------------------------------------------------------
// LocationFilterMode
// ---------------------------------------------------------------------------

/// How much of the sender's location has to match ours for a death to
/// be relevant.
///
/// On the wire this is an `i32` ordinal, so the discriminants are fixed
/// explicitly with `= 0`, `= 1`, `= 2`. Reordering the variants must
/// never change what goes on the wire.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum LocationFilterMode {
    /// Map and room are ignored.
    #[default]
    Everywhere = 0,
    /// Same map required.
    SameMap = 1,
    /// Same map and same room required.
    SameRoom = 2,
}

impl LocationFilterMode {
    /// The wire ordinal.
    pub fn ordinal(self) -> i32 {
        self as i32
    }

    /// Parses a wire ordinal, returning `None` for anything out of range.
    pub fn from_ordinal(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Everywhere),
            1 => Some(Self::SameMap),
            2 => Some(Self::SameRoom),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// DeathEvent
// ---------------------------------------------------------------------------

/// "Someone on my team just died."
///
/// The five fields are written to the wire in declaration order. The
/// sender isn't part of the body; see [`Delivery`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathEvent {
    /// [`TEAM_EVERYONE`] or a team in `1..=MAX_TEAM`.
    pub team: i32,
    /// Channel the sender was in when it sent this. Empty when none.
    pub channel: String,
    pub map: String,
    pub room: String,
    /// The sender's own filter mode, informational for receivers.
    #[serde(default)]
    pub location_mode: LocationFilterMode,
}

impl DeathEvent {
    /// Data id used to tag death events on the wire.
    pub const DATA_ID: &'static str = "deathlink_update";

    pub fn new(
        team: i32,
        channel: impl Into<String>,
        map: impl Into<String>,
        room: impl Into<String>,
        location_mode: LocationFilterMode,
    ) -> Self {
        Self {
            team,
            channel: channel.into(),
            map: map.into(),
            room: room.into(),
            location_mode,
        }
    }

    /// True when every team should consider this death.
    pub fn targets_everyone(&self) -> bool {
        self.team == TEAM_EVERYONE
    }
}

// ---------------------------------------------------------------------------
// Player state replication
// ---------------------------------------------------------------------------

/// A 2D point in level coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A level entity reference some hosts use to piggyback event data on
/// state updates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActiveMarker {
    pub level: String,
    pub id: i32,
}

/// The replicated part of one participant's state.
///
/// Sent as a heartbeat every so often and immediately on connect or map
/// change. Receivers merge it into their registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStateUpdate {
    pub identity: ParticipantIdentity,
    pub map: String,
    pub room: String,
    pub respawn: Vec2,
    #[serde(default)]
    pub active_marker: Option<ActiveMarker>,
}

impl PlayerStateUpdate {
    /// Data id used to tag player state updates on the wire.
    pub const DATA_ID: &'static str = "deathlink_player_state";
}

// ---------------------------------------------------------------------------
// Transport-originated data
// ---------------------------------------------------------------------------

/// Latency measurements the transport reports for one session.
///
/// `fast_ms` is `None` when the lossy channel isn't available; consumers
/// fall back to `reliable_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub session_id: SessionId,
    pub reliable_ms: u32,
    pub fast_ms: Option<u32>,
}

/// A decoded message plus who the transport says sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery<M> {
    pub sender: PeerInfo,
    pub message: M,
}

// ---------------------------------------------------------------------------
// Message — everything a codec can encode
// ---------------------------------------------------------------------------

/// Every application message Deathlink puts on the wire.
///
/// `#[serde(tag = "type", content = "data")]` gives the JSON form
/// `{ "type": "Death", "data": { ... } }`, which mirrors the binary
/// framing of "data id, then body".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Message {
    Death(DeathEvent),
    PlayerState(PlayerStateUpdate),
}

impl Message {
    /// The data id this message is framed with.
    pub fn data_id(&self) -> &'static str {
        match self {
            Message::Death(_) => DeathEvent::DATA_ID,
            Message::PlayerState(_) => PlayerStateUpdate::DATA_ID,
        }
    }
}

impl From<DeathEvent> for Message {
    fn from(event: DeathEvent) -> Self {
        Message::Death(event)
    }
}

impl From<PlayerStateUpdate> for Message {
    fn from(update: PlayerStateUpdate) -> Self {
        Message::PlayerState(update)
    }
}

// =========================================================================
// Tests
// =========================================================================

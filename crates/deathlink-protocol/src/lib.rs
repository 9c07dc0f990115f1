//! Wire protocol for Deathlink.
//!
//! This crate defines what participants say to each other:
//!
//! - **Types** ([`DeathEvent`], [`PlayerStateUpdate`], [`ParticipantIdentity`],
//!   etc.): the structures that travel on the wire, plus the transport-level
//!   identities ([`SessionId`], [`PeerInfo`]) attached to them on receipt.
//! - **Codec** ([`Codec`] trait, [`BinaryCodec`], [`JsonCodec`]): how those
//!   messages become bytes.
//! - **Errors** ([`ProtocolError`]): what can go wrong while doing so.
//!
//! # Architecture
//!
//! ```text
//! Transport (frames) → Protocol (Message) → Sync core (state, deaths)
//! ```
//!
//! Nothing here knows about connections or game state; it only knows how
//! to describe and serialize messages.

mod codec;
mod error;
mod types;

pub use codec::{BinaryCodec, Codec};
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ActiveMarker, ConnectionInfo, DeathEvent, Delivery, LocationFilterMode,
    Message, ParticipantIdentity, PeerInfo, PlayerStateUpdate, SessionId,
    Vec2, LOBBY_MAP, MAX_TEAM, TEAM_EVERYONE,
};

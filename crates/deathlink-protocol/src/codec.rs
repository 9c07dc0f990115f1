//! Codec trait and implementations for turning messages into bytes.
//!
//! A "codec" (coder/decoder) converts between [`Message`] values and raw
//! frames. The transport adapter only needs *something* implementing
//! [`Codec`], so the binary and JSON forms are interchangeable.
//!
//! ## Binary frame layout
//!
//! ```text
//! ┌────────────┬──────────────────────────────────────────────┐
//! │ data id    │ body (fields in declaration order)           │
//! │ (string)   │                                              │
//! └────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! - integers are little-endian (`i32`, `u32`, `f32`)
//! - strings are a 7-bit varint byte length followed by UTF-8 bytes
//! - booleans are a single `0` / `1` byte
//!
//! A death event body is `team: i32, channel: string, map: string,
//! room: string, location_mode: i32`, in exactly that order.

use bytes::{Buf, BufMut, BytesMut};

use crate::types::{
    ActiveMarker, DeathEvent, LocationFilterMode, Message,
    ParticipantIdentity, PlayerStateUpdate, SessionId, Vec2,
};
use crate::ProtocolError;

/// Something that can encode a [`Message`] to bytes and decode it back.
///
/// ## Trait bounds
///
/// - `Send + Sync` because the transport's receive thread decodes while
///   the main tick encodes, both through the same shared codec.
/// - `'static` because the codec lives as long as the adapter holding it.
///
/// Both methods are non-generic, which keeps the trait object-safe: the
/// adapter stores a `Box<dyn Codec>` and can swap formats at runtime.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a message into a complete frame.
    ///
    /// # Errors
    /// Returns a [`ProtocolError`] if the message can't be represented.
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError>;

    /// Parses a complete frame.
    ///
    /// # Errors
    /// Returns a [`ProtocolError`] for truncated, malformed, or unknown
    /// frames.
    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError>;
}

/// Lets a codec chosen at runtime be passed wherever `impl Codec` is
/// expected.
impl Codec for Box<dyn Codec> {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError> {
        (**self).encode(message)
    }

    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError> {
        (**self).decode(data)
    }
}

// ---------------------------------------------------------------------------
// BinaryCodec
// ---------------------------------------------------------------------------

/// The compact binary wire format.
///
/// ```rust
/// use deathlink_protocol::{BinaryCodec, Codec, DeathEvent, LocationFilterMode, Message};
///
/// let codec = BinaryCodec;
/// let msg = Message::Death(DeathEvent::new(1, "main", "7-Summit", "b-02", LocationFilterMode::SameMap));
///
/// let frame = codec.encode(&msg).unwrap();
/// assert_eq!(codec.decode(&frame).unwrap(), msg);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryCodec;

impl Codec for BinaryCodec {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError> {
        let mut buf = BytesMut::with_capacity(64);
        put_string(&mut buf, message.data_id());
        match message {
            Message::Death(event) => put_death_event(&mut buf, event),
            Message::PlayerState(update) => put_player_state(&mut buf, update),
        }
        Ok(buf.to_vec())
    }

    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError> {
        let mut buf = data;
        let data_id = get_string(&mut buf)?;

        let message = match data_id.as_str() {
            DeathEvent::DATA_ID => Message::Death(get_death_event(&mut buf)?),
            PlayerStateUpdate::DATA_ID => {
                Message::PlayerState(get_player_state(&mut buf)?)
            }
            _ => return Err(ProtocolError::UnknownDataId(data_id)),
        };

        if buf.has_remaining() {
            return Err(ProtocolError::TrailingBytes(buf.remaining()));
        }
        Ok(message)
    }
}

// -- body writers ----------------------------------------------------------

fn put_death_event(buf: &mut BytesMut, event: &DeathEvent) {
    buf.put_i32_le(event.team);
    put_string(buf, &event.channel);
    put_string(buf, &event.map);
    put_string(buf, &event.room);
    buf.put_i32_le(event.location_mode.ordinal());
}

fn put_player_state(buf: &mut BytesMut, update: &PlayerStateUpdate) {
    put_identity(buf, &update.identity);
    put_string(buf, &update.map);
    put_string(buf, &update.room);
    buf.put_f32_le(update.respawn.x);
    buf.put_f32_le(update.respawn.y);
    match &update.active_marker {
        Some(marker) => {
            buf.put_u8(1);
            put_string(buf, &marker.level);
            buf.put_i32_le(marker.id);
        }
        None => buf.put_u8(0),
    }
}

fn put_identity(buf: &mut BytesMut, identity: &ParticipantIdentity) {
    match identity.stable_hash {
        Some(hash) => {
            buf.put_u8(1);
            buf.put_i32_le(hash);
        }
        None => buf.put_u8(0),
    }
    put_string(buf, &identity.name);
    buf.put_u32_le(identity.session_id.0);
}

fn put_string(buf: &mut BytesMut, value: &str) {
    let mut len = value.len() as u64;
    while len >= 0x80 {
        buf.put_u8((len as u8) | 0x80);
        len >>= 7;
    }
    buf.put_u8(len as u8);
    buf.put_slice(value.as_bytes());
}

// -- body readers ----------------------------------------------------------

fn get_death_event(buf: &mut &[u8]) -> Result<DeathEvent, ProtocolError> {
    let team = get_i32(buf)?;
    let channel = get_string(buf)?;
    let map = get_string(buf)?;
    let room = get_string(buf)?;
    let mode = get_i32(buf)?;
    let location_mode = LocationFilterMode::from_ordinal(mode).ok_or(
        ProtocolError::InvalidEnum {
            field: "location_mode",
            value: mode,
        },
    )?;

    Ok(DeathEvent {
        team,
        channel,
        map,
        room,
        location_mode,
    })
}

fn get_player_state(
    buf: &mut &[u8],
) -> Result<PlayerStateUpdate, ProtocolError> {
    let identity = get_identity(buf)?;
    let map = get_string(buf)?;
    let room = get_string(buf)?;
    need(buf, 8)?;
    let respawn = Vec2::new(buf.get_f32_le(), buf.get_f32_le());
    let active_marker = if get_bool(buf, "active_marker")? {
        Some(ActiveMarker {
            level: get_string(buf)?,
            id: get_i32(buf)?,
        })
    } else {
        None
    };

    Ok(PlayerStateUpdate {
        identity,
        map,
        room,
        respawn,
        active_marker,
    })
}

fn get_identity(buf: &mut &[u8]) -> Result<ParticipantIdentity, ProtocolError> {
    let stable_hash = if get_bool(buf, "stable_hash")? {
        Some(get_i32(buf)?)
    } else {
        None
    };
    let name = get_string(buf)?;
    need(buf, 4)?;
    let session_id = SessionId(buf.get_u32_le());

    Ok(ParticipantIdentity {
        stable_hash,
        name,
        session_id,
    })
}

/// `Buf::get_*` panics on short input, so every read checks first.
fn need(buf: &&[u8], n: usize) -> Result<(), ProtocolError> {
    if buf.remaining() < n {
        return Err(ProtocolError::Truncated {
            needed: n,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}

fn get_i32(buf: &mut &[u8]) -> Result<i32, ProtocolError> {
    need(buf, 4)?;
    Ok(buf.get_i32_le())
}

fn get_bool(buf: &mut &[u8], field: &'static str) -> Result<bool, ProtocolError> {
    need(buf, 1)?;
    match buf.get_u8() {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(ProtocolError::InvalidEnum {
            field,
            value: i32::from(other),
        }),
    }
}

fn get_varint_len(buf: &mut &[u8]) -> Result<usize, ProtocolError> {
    let mut value: u64 = 0;
    let mut shift = 0;
    loop {
        need(buf, 1)?;
        let byte = buf.get_u8();
        value |= u64::from(byte & 0x7f) << shift;
        if byte & 0x80 == 0 {
            break;
        }
        shift += 7;
        if shift >= 35 {
            return Err(ProtocolError::InvalidMessage(
                "string length prefix is too long".into(),
            ));
        }
    }
    usize::try_from(value).map_err(|_| {
        ProtocolError::InvalidMessage("string length overflows usize".into())
    })
}

fn get_string(buf: &mut &[u8]) -> Result<String, ProtocolError> {
    let len = get_varint_len(buf)?;
    need(buf, len)?;
    let bytes = buf[..len].to_vec();
    buf.advance(len);
    Ok(String::from_utf8(bytes)?)
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// Handy when inspecting traffic by eye. Behind the `json` feature flag,
/// which is on by default.
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode(&self, message: &Message) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(message).map_err(ProtocolError::Encode)
    }

    fn decode(&self, data: &[u8]) -> Result<Message, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}

// =========================================================================
// Tests
// =========================================================================

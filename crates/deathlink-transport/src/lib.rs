//! Transport boundary for Deathlink.
//!
//! The network client itself (connections, framing, channel membership)
//! belongs to the host. This crate only defines the narrow [`NetClient`]
//! seam it must provide, and the [`TransportAdapter`] that sits on top:
//!
//! - sends are fire-and-forget and never fail loudly
//! - inbound traffic is turned into effects on an [`EffectQueue`] that the
//!   single-threaded tick drains
//!
//! # Feature Flags
//!
//! - `memory` (default): [`MemoryHub`], an in-process client used by tests
//!   and the demo, with optional simulated loss and reordering.

mod adapter;
mod error;
#[cfg(feature = "memory")]
mod memory;
mod queue;

pub use adapter::{InboundHandler, TransportAdapter, TransportStats};
pub use error::TransportError;
#[cfg(feature = "memory")]
pub use memory::{HubConfig, HubStats, MemoryClient, MemoryHub};
pub use queue::{effect_queue, Effect, EffectHandle, EffectQueue};

use deathlink_protocol::{ConnectionInfo, PeerInfo};

/// What the host's network client has to offer.
///
/// Implementations are called from both the tick and the transport's own
/// receive thread, hence `Send + Sync`.
pub trait NetClient: Send + Sync + 'static {
    /// Whether a send right now has any chance of leaving.
    fn is_connected(&self) -> bool;

    /// Our own session and display name, `None` while disconnected.
    fn local_peer(&self) -> Option<PeerInfo>;

    /// Name of the channel we're in, if any.
    fn current_channel(&self) -> Option<String>;

    /// Broadcasts a frame to every other participant.
    fn send(&self, frame: &[u8]) -> Result<(), TransportError>;
}

/// Everything a [`NetClient`] can hand to [`TransportAdapter::receive`].
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    Connected,
    Disconnected,
    /// Fresh latency figures for some session.
    ConnectionInfo(ConnectionInfo),
    /// An application frame. `sender` is `None` for loopback frames or
    /// when the transport lost track of who sent it.
    Data {
        sender: Option<PeerInfo>,
        frame: Vec<u8>,
    },
}

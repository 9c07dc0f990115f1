//! Identity and replicated player state for Deathlink.
//!
//! This crate keeps the distributed picture of "who is out there and
//! where are they":
//!
//! 1. **Identity** ([`IdentityProvider`]): our own stable identity, from
//!    a cached hardware hash plus the live session.
//! 2. **Identity mapping** ([`IdentityMap`]): stable identity ↔ session id.
//! 3. **Remote state** ([`PlayerRegistry`]): one [`PlayerState`] per
//!    remote participant, merged from updates and purged when idle.
//! 4. **Local state** ([`LocalPlayer`]): our own record and its heartbeat.
//!
//! # How it fits in the stack
//!
//! ```text
//! Sync core (above)   ← applies drained effects to the registry
//!     ↕
//! State (this crate)  ← who is where, as of the last update
//!     ↕
//! Protocol (below)    ← ParticipantIdentity, PlayerStateUpdate
//! ```

mod config;
mod identity;
mod identity_map;
mod player;
mod registry;

pub use config::RegistryConfig;
pub use identity::{
    hash_address, HardwareSource, IdentityProvider, SysfsInterfaces, UnsupportedPlatform,
};
pub use identity_map::IdentityMap;
pub use player::{Latency, LocalPlayer, PlayerState};
pub use registry::{ApplyOutcome, PlayerRegistry};

//! # Deathlink
//!
//! Cooperative death synchronization: when one participant dies, the
//! others on the same team (and, optionally, in the same map or room)
//! die too.
//!
//! The host game supplies three things: a network client
//! ([`transport::NetClient`]), an [`Engine`] for the local player, and a
//! per-frame call to [`DeathlinkContext::tick`]. Everything else
//! (identity, state replication, loop prevention, filtering,
//! announcements) lives in the [`DeathlinkContext`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::time::Instant;
//! use deathlink::prelude::*;
//! use deathlink::transport::MemoryHub;
//!
//! # struct Game;
//! # impl Engine for Game {
//! #     fn is_transitioning(&self) -> bool { false }
//! #     fn player(&self) -> Option<PlayerCondition> { Some(PlayerCondition::default()) }
//! #     fn kill_player(&mut self) -> bool { true }
//! # }
//! let hub = MemoryHub::new();
//! let client = hub.connect("madeline", Some("main"));
//! let mut ctx = DeathlinkContext::builder(client.clone())
//!     .settings(Settings { kill_others: true, receive_deaths: true, ..Settings::default() })
//!     .build(Instant::now());
//!
//! let mut game = Game;
//! loop {
//!     client.pump(ctx.adapter());
//!     ctx.tick(&mut game, Instant::now());
//! #   break;
//! }
//! ```
//!
//! ## Crates
//!
//! | Crate | Re-exported as |
//! |---|---|
//! | `deathlink-protocol` | [`protocol`] |
//! | `deathlink-transport` | [`transport`] |
//! | `deathlink-state` | [`state`] |
//! | `deathlink-policy` | [`policy`] |

mod commands;
mod context;
mod death;
mod engine;
mod error;
pub mod logging;
mod tally;

pub use commands::{Command, CommandError};
pub use context::{DeathlinkBuilder, DeathlinkContext, TickSummary};
pub use death::DeathLatches;
pub use engine::{DieArgs, Engine, PlayerCondition};
pub use error::DeathlinkError;
pub use logging::{LogHandle, LoggingError};
pub use tally::{render, Announcement, DeathTally};

pub use deathlink_policy as policy;
pub use deathlink_protocol as protocol;
pub use deathlink_state as state;
pub use deathlink_transport as transport;

/// Everything a host typically needs.
pub mod prelude {
    pub use crate::{
        Announcement, Command, DeathlinkContext, DeathlinkError, DieArgs, Engine,
        PlayerCondition, TickSummary,
    };
    pub use deathlink_policy::{AnnounceMode, DisplayFormat, Settings};
    pub use deathlink_protocol::{
        ActiveMarker, DeathEvent, LocationFilterMode, ParticipantIdentity, Vec2,
    };
    pub use deathlink_state::{IdentityProvider, RegistryConfig};
    pub use deathlink_transport::{Inbound, NetClient};
}

//! Policy engine for Deathlink.
//!
//! Two pieces:
//!
//! - [`Settings`]: the user's configuration, loadable from JSON.
//! - [`should_send`], [`should_receive`], [`should_announce`]: pure
//!   predicates over a settings snapshot and event fields. No transport,
//!   no engine, no hidden state, so they are trivially unit-testable.

mod error;
mod policy;
mod settings;

pub use error::SettingsError;
pub use policy::{location_flag, should_announce, should_receive, should_send};
pub use settings::{AnnounceMode, DisplayFormat, KeyBindings, Settings};

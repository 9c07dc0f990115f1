//! Unified error type for Deathlink.

use deathlink_policy::SettingsError;
use deathlink_protocol::ProtocolError;
use deathlink_transport::TransportError;

use crate::commands::CommandError;
use crate::logging::LoggingError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant generates a `From` impl, so
/// `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum DeathlinkError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Loading or parsing settings.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Parsing or running a console command.
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

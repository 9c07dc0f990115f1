//! Console commands.
//!
//! Parsing lives here; running a command needs the context, see
//! [`DeathlinkContext::execute`](crate::DeathlinkContext::execute).

use std::str::FromStr;

use crate::logging::LoggingError;

/// A parsed console command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `kill-team [n]`: kill team `n`, or our own team when `n` is
    /// missing or not a number.
    KillTeam(Option<i32>),
    /// `list-deaths`
    ListDeaths,
    /// `reset-deaths`
    ResetDeaths,
    /// `set-debug-logging [bool]`: only `true` turns debug on.
    SetDebugLogging(bool),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("team {0} out of range, expected 0..=100")]
    TeamOutOfRange(i32),

    #[error("not connected")]
    NotConnected,

    #[error("logging was not initialized with a reload handle")]
    NoLogHandle,

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(CommandError::Empty)?;
        let arg = words.next();

        match name {
            "kill-team" => Ok(Command::KillTeam(arg.and_then(|a| a.parse().ok()))),
            "list-deaths" => Ok(Command::ListDeaths),
            "reset-deaths" => Ok(Command::ResetDeaths),
            "set-debug-logging" => Ok(Command::SetDebugLogging(
                arg.is_some_and(|a| a.eq_ignore_ascii_case("true")),
            )),
            other => Err(CommandError::UnknownCommand(other.to_owned())),
        }
    }
}

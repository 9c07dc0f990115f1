//! User settings.
//!
//! A plain struct with named fields. The host owns persistence and any
//! settings UI; the core only ever reads a snapshot.

use std::fs;
use std::path::Path;

use deathlink_protocol::{LocationFilterMode, MAX_TEAM};
use serde::{Deserialize, Serialize};

use crate::SettingsError;

// ---------------------------------------------------------------------------
// Presentation enums
// ---------------------------------------------------------------------------

/// Which remote deaths become on-screen announcements.
///
/// Deaths sent to team 0 are always announced, whatever this says.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum AnnounceMode {
    /// Nothing but team-0 deaths.
    Off,
    /// Only deaths attributed to ourselves.
    Own,
    /// Deaths on our own team.
    #[default]
    Team,
    /// Every death we hear about.
    All,
}

/// How an announcement is worded.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "PascalCase")]
pub enum DisplayFormat {
    /// `"theo died"`
    NameOnly,
    /// `"theo died (team 2)"`
    #[default]
    NameAndTeam,
    /// `"theo died (team 2) in 1-ForsakenCity / a-00"`
    Full,
}

/// Key names the host binds to settings toggles. Unset means unbound.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub toggle_kill_others: Option<String>,
    pub toggle_receive_deaths: Option<String>,
    pub kill_team: Option<String>,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Everything the user can configure.
///
/// `#[serde(default)]` on the struct means any field missing from the
/// JSON takes its value from `Settings::default()`, so a settings file
/// only needs to mention what it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master switch. Off means nothing is sent or received.
    pub enabled: bool,
    /// Broadcast our deaths.
    pub kill_others: bool,
    /// Die when others do.
    pub receive_deaths: bool,
    /// Our team, `1..=100`.
    pub team: i32,
    pub location_mode: LocationFilterMode,
    pub announce_mode: AnnounceMode,
    pub display_format: DisplayFormat,
    pub key_bindings: KeyBindings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enabled: true,
            kill_others: false,
            receive_deaths: false,
            team: 1,
            location_mode: LocationFilterMode::Everywhere,
            announce_mode: AnnounceMode::default(),
            display_format: DisplayFormat::default(),
            key_bindings: KeyBindings::default(),
        }
    }
}

impl Settings {
    /// Lowest team a participant can be on. Team 0 is only a target.
    pub const MIN_TEAM: i32 = 1;

    /// Returns a copy with `team` clamped into `MIN_TEAM..=MAX_TEAM`.
    pub fn validated(mut self) -> Self {
        if !(Self::MIN_TEAM..=MAX_TEAM).contains(&self.team) {
            let clamped = self.team.clamp(Self::MIN_TEAM, MAX_TEAM);
            tracing::warn!(team = self.team, clamped, "team out of range, clamping");
            self.team = clamped;
        }
        self
    }

    /// Parses and validates settings from JSON text.
    ///
    /// # Errors
    /// Returns [`SettingsError::Parse`] for malformed JSON or wrong types.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        Ok(settings.validated())
    }

    /// Reads, parses, and validates a JSON settings file.
    ///
    /// # Errors
    /// Returns [`SettingsError::Io`] if the file can't be read and
    /// [`SettingsError::Parse`] if it isn't valid settings JSON.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings = Self::from_json_str(&text)?;
        tracing::info!(path = %path.display(), team = settings.team, "settings loaded");
        Ok(settings)
    }
}

//! Simulation parameters.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::SimError;

/// How the simulation runs. Any field missing from a config file keeps
/// its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub participants: usize,
    /// Participants are spread round-robin over teams `1..=teams`.
    pub teams: i32,
    /// Ticks per second, 1–128.
    pub tick_rate_hz: u32,
    /// Simulated run length in seconds.
    pub duration_secs: u64,
    /// One random living participant dies every this many ticks.
    pub death_every_ticks: u64,
    /// Simulated packet loss, `0.0..=1.0`.
    pub drop_rate: f64,
    pub reorder: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            participants: 4,
            teams: 1,
            tick_rate_hz: 20,
            duration_secs: 10,
            death_every_ticks: 40,
            drop_rate: 0.0,
            reorder: false,
        }
    }
}

impl SimConfig {
    pub const MIN_TICK_RATE: u32 = 1;
    pub const MAX_TICK_RATE: u32 = 128;

    /// Returns a copy with every field forced into a usable range.
    pub fn validated(mut self) -> Self {
        if !(Self::MIN_TICK_RATE..=Self::MAX_TICK_RATE).contains(&self.tick_rate_hz) {
            let clamped = self
                .tick_rate_hz
                .clamp(Self::MIN_TICK_RATE, Self::MAX_TICK_RATE);
            tracing::warn!(
                requested = self.tick_rate_hz,
                clamped,
                "tick_rate_hz out of range, clamping"
            );
            self.tick_rate_hz = clamped;
        }
        if self.participants == 0 {
            tracing::warn!("participants is 0, using 1");
            self.participants = 1;
        }
        if !(1..=deathlink::protocol::MAX_TEAM).contains(&self.teams) {
            tracing::warn!(teams = self.teams, "teams out of range, using 1");
            self.teams = 1;
        }
        self.death_every_ticks = self.death_every_ticks.max(1);
        self
    }

    /// Total ticks the run lasts.
    pub fn total_ticks(&self) -> u64 {
        self.duration_secs * u64::from(self.tick_rate_hz)
    }

    pub fn from_json_str(json: &str) -> Result<Self, SimError> {
        let config: SimConfig = serde_json::from_str(json)?;
        Ok(config.validated())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}

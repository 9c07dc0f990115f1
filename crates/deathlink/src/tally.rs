//! Announcements and per-participant death counts.

use std::collections::BTreeMap;

use deathlink_policy::DisplayFormat;
use deathlink_protocol::TEAM_EVERYONE;

/// A death ready to be shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    pub player: String,
    pub team: i32,
    pub text: String,
}

/// Words a death according to `format`.
pub fn render(format: DisplayFormat, player: &str, team: i32, map: &str, room: &str) -> String {
    let team_label = if team == TEAM_EVERYONE {
        "everyone".to_owned()
    } else {
        format!("team {team}")
    };
    match format {
        DisplayFormat::NameOnly => format!("{player} died"),
        DisplayFormat::NameAndTeam => format!("{player} died ({team_label})"),
        DisplayFormat::Full => format!("{player} died ({team_label}) in {map} / {room}"),
    }
}

/// Death counts by display name.
///
/// A `BTreeMap` keeps names sorted, so listings come out alphabetical
/// with no extra work.
#[derive(Debug, Clone, Default)]
pub struct DeathTally {
    counts: BTreeMap<String, u32>,
}

impl DeathTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts one announced death. Team-0 deaths aren't counted; returns
    /// whether this one was.
    pub fn record(&mut self, player: &str, team: i32) -> bool {
        if team == TEAM_EVERYONE {
            return false;
        }
        *self.counts.entry(player.to_owned()).or_insert(0) += 1;
        true
    }

    pub fn count(&self, player: &str) -> u32 {
        self.counts.get(player).copied().unwrap_or(0)
    }

    /// `(name, count)` pairs in name order.
    pub fn list(&self) -> Vec<(&str, u32)> {
        self.counts
            .iter()
            .map(|(name, count)| (name.as_str(), *count))
            .collect()
    }

    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    pub fn reset(&mut self) {
        self.counts.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

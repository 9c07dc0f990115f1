//! Send, receive, and announce decisions.
//!
//! Every function here is pure: settings plus event fields in, `bool`
//! out. The only state the death protocol keeps (its two latches) lives
//! with the caller and is passed in.

use deathlink_protocol::{DeathEvent, LocationFilterMode, TEAM_EVERYONE};

use crate::{AnnounceMode, Settings};

/// Whether a death at the given location is close enough to matter
/// under `mode`.
///
/// `same_room` only counts together with `same_map`: two maps can have
/// rooms with the same name.
pub fn location_flag(mode: LocationFilterMode, same_map: bool, same_room: bool) -> bool {
    match mode {
        LocationFilterMode::Everywhere => true,
        LocationFilterMode::SameMap => same_map,
        LocationFilterMode::SameRoom => same_map && same_room,
    }
}

/// Whether a local death should be broadcast.
///
/// `propagate_next` is false for exactly one death after we accepted a
/// remote one, so a forced death is never echoed back out.
pub fn should_send(settings: &Settings, propagate_next: bool) -> bool {
    settings.enabled && settings.kill_others && propagate_next
}

/// Whether an inbound death should kill us.
///
/// Only our own location mode is consulted; the sender's
/// `event.location_mode` does not gate receipt.
pub fn should_receive(
    settings: &Settings,
    my_map: &str,
    my_room: &str,
    event: &DeathEvent,
) -> bool {
    if !settings.enabled || !settings.receive_deaths {
        return false;
    }
    if event.team != TEAM_EVERYONE && event.team != settings.team {
        return false;
    }
    location_flag(
        settings.location_mode,
        event.map == my_map,
        event.room == my_room,
    )
}

/// Whether a death by `player` on `team` gets an announcement.
///
/// `own_name` is our own display name, used by [`AnnounceMode::Own`].
pub fn should_announce(settings: &Settings, own_name: &str, player: &str, team: i32) -> bool {
    if team == TEAM_EVERYONE {
        return true;
    }
    match settings.announce_mode {
        AnnounceMode::Off => false,
        AnnounceMode::Own => player == own_name,
        AnnounceMode::Team => team == settings.team,
        AnnounceMode::All => true,
    }
}

#[cfg(test)]
mod tests {
    //! Truth tables for the policy predicates.

    use super::*;

    fn receiving(team: i32, mode: LocationFilterMode) -> Settings {
        Settings {
            receive_deaths: true,
            team,
            location_mode: mode,
            ..Settings::default()
        }
    }

    fn event(team: i32, map: &str, room: &str) -> DeathEvent {
        DeathEvent::new(team, "main", map, room, LocationFilterMode::Everywhere)
    }

    // =====================================================================
    // location_flag()
    // =====================================================================

    #[test]
    fn test_location_flag_everywhere_ignores_location() {
        for same_map in [false, true] {
            for same_room in [false, true] {
                assert!(location_flag(LocationFilterMode::Everywhere, same_map, same_room));
            }
        }
    }

    #[test]
    fn test_location_flag_same_map() {
        assert!(location_flag(LocationFilterMode::SameMap, true, false));
        assert!(!location_flag(LocationFilterMode::SameMap, false, true));
    }

    #[test]
    fn test_location_flag_same_room_needs_both() {
        assert!(location_flag(LocationFilterMode::SameRoom, true, true));
        assert!(!location_flag(LocationFilterMode::SameRoom, true, false));
        assert!(!location_flag(LocationFilterMode::SameRoom, false, true));
    }

    // =====================================================================
    // should_send()
    // =====================================================================

    #[test]
    fn test_should_send_requires_kill_others_and_propagate() {
        let on = Settings {
            kill_others: true,
            ..Settings::default()
        };
        assert!(should_send(&on, true));
        assert!(!should_send(&on, false));
        assert!(!should_send(&Settings::default(), true));
    }

    #[test]
    fn test_should_send_disabled_master_switch() {
        let settings = Settings {
            enabled: false,
            kill_others: true,
            ..Settings::default()
        };
        assert!(!should_send(&settings, true));
    }

    // =====================================================================
    // should_receive()
    // =====================================================================

    #[test]
    fn test_should_receive_team_zero_ignores_location_and_team() {
        let settings = receiving(7, LocationFilterMode::Everywhere);
        assert!(should_receive(&settings, "a", "1", &event(0, "b", "2")));
    }

    #[test]
    fn test_should_receive_team_zero_still_honours_own_location_mode() {
        // Team 0 bypasses the team check only.
        let settings = receiving(7, LocationFilterMode::SameMap);
        assert!(!should_receive(&settings, "a", "1", &event(0, "b", "2")));
        assert!(should_receive(&settings, "b", "1", &event(0, "b", "2")));
    }

    #[test]
    fn test_should_receive_other_team_rejected() {
        let settings = receiving(2, LocationFilterMode::Everywhere);
        assert!(!should_receive(&settings, "m", "r", &event(1, "m", "r")));
    }

    #[test]
    fn test_should_receive_own_team_same_room_needs_map_and_room() {
        let settings = receiving(1, LocationFilterMode::SameRoom);
        assert!(should_receive(&settings, "m", "r", &event(1, "m", "r")));
        assert!(!should_receive(&settings, "m", "x", &event(1, "m", "r")));
        assert!(!should_receive(&settings, "x", "r", &event(1, "m", "r")));
    }

    #[test]
    fn test_should_receive_everywhere_ignores_map_and_room() {
        let settings = receiving(1, LocationFilterMode::Everywhere);
        assert!(should_receive(&settings, "x", "y", &event(1, "m", "r")));
    }

    #[test]
    fn test_should_receive_ignores_sender_mode() {
        let settings = receiving(1, LocationFilterMode::Everywhere);
        let strict = DeathEvent::new(1, "main", "m", "r", LocationFilterMode::SameRoom);
        assert!(should_receive(&settings, "x", "y", &strict));
    }

    #[test]
    fn test_should_receive_disabled_returns_false() {
        let mut settings = receiving(1, LocationFilterMode::Everywhere);
        settings.receive_deaths = false;
        assert!(!should_receive(&settings, "m", "r", &event(0, "m", "r")));

        let mut settings = receiving(1, LocationFilterMode::Everywhere);
        settings.enabled = false;
        assert!(!should_receive(&settings, "m", "r", &event(0, "m", "r")));
    }

    #[test]
    fn test_should_receive_team_scenario() {
        // A on team 1 dies with Everywhere; B is on team 2, C on team 1.
        let from_a = DeathEvent::new(1, "main", "m", "r", LocationFilterMode::Everywhere);
        let b = receiving(2, LocationFilterMode::Everywhere);
        let c = receiving(1, LocationFilterMode::Everywhere);

        assert!(!should_receive(&b, "m", "r", &from_a));
        assert!(should_receive(&c, "m", "r", &from_a));
    }

    // =====================================================================
    // should_announce()
    // =====================================================================

    fn announcing(mode: AnnounceMode) -> Settings {
        Settings {
            team: 3,
            announce_mode: mode,
            ..Settings::default()
        }
    }

    #[test]
    fn test_should_announce_team_zero_always() {
        assert!(should_announce(&announcing(AnnounceMode::Off), "me", "theo", 0));
    }

    #[test]
    fn test_should_announce_modes() {
        assert!(!should_announce(&announcing(AnnounceMode::Off), "me", "theo", 3));

        assert!(should_announce(&announcing(AnnounceMode::Own), "me", "me", 5));
        assert!(!should_announce(&announcing(AnnounceMode::Own), "me", "theo", 3));

        assert!(should_announce(&announcing(AnnounceMode::Team), "me", "theo", 3));
        assert!(!should_announce(&announcing(AnnounceMode::Team), "me", "theo", 4));

        assert!(should_announce(&announcing(AnnounceMode::All), "me", "theo", 99));
    }
}

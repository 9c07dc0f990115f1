//! The seam between the sync core and the host game.
//!
//! The core never reaches into the engine on its own. The host hands it
//! an [`Engine`] on every tick and calls
//! [`DeathlinkContext::on_player_die`](crate::DeathlinkContext::on_player_die)
//! from its death hook.

use deathlink_protocol::Vec2;

/// What the engine can tell us about the local player right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerCondition {
    /// Already dead or in the engine's forced-death state.
    pub dead: bool,
    /// Protected by the invincibility assist.
    pub invincible: bool,
    /// In the scripted reflection fall, which can't be interrupted.
    pub reflection_fall: bool,
}

/// Arguments the engine's die routine was called with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DieArgs {
    pub direction: Vec2,
    /// Kill even through the invincibility assist.
    pub if_invincible: bool,
    pub register_stats: bool,
}

impl Default for DieArgs {
    fn default() -> Self {
        Self {
            direction: Vec2::ZERO,
            if_invincible: false,
            register_stats: true,
        }
    }
}

impl DieArgs {
    /// Whether calling the die routine with these arguments will really
    /// kill a player in `condition`.
    pub fn kills(&self, condition: &PlayerCondition) -> bool {
        let shielded = condition.invincible && !self.if_invincible;
        !condition.dead && !shielded && !condition.reflection_fall
    }
}

/// Host-side operations the death protocol needs.
pub trait Engine {
    /// A level or room transition is running. Killing the player now
    /// isn't safe.
    fn is_transitioning(&self) -> bool;

    /// The local player's condition, or `None` if there is no player
    /// entity in the scene.
    fn player(&self) -> Option<PlayerCondition>;

    /// Kills the local player. Returns whether a death happened.
    ///
    /// The resulting death must not be reported back through
    /// `on_player_die`; the context accounts for it itself.
    fn kill_player(&mut self) -> bool;
}

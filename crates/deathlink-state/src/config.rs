//! Timing configuration for the player registry.

use std::time::Duration;

/// How long remote state lives and how often local state is re-sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryConfig {
    /// A remote record with no update for longer than this is purged.
    ///
    /// Default: 10 minutes.
    pub purge_after: Duration,

    /// The local record is re-broadcast once this much time has passed
    /// since it was last sent.
    ///
    /// Default: 30 seconds.
    pub heartbeat_interval: Duration,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            purge_after: Duration::from_secs(600),
            heartbeat_interval: Duration::from_secs(30),
        }
    }
}

impl RegistryConfig {
    /// Returns a copy with zero durations replaced by the defaults.
    ///
    /// A zero purge window would drop every record on the tick it arrived;
    /// a zero heartbeat would broadcast every tick.
    pub fn validated(mut self) -> Self {
        let defaults = Self::default();
        if self.purge_after.is_zero() {
            tracing::warn!("purge_after is zero, using default");
            self.purge_after = defaults.purge_after;
        }
        if self.heartbeat_interval.is_zero() {
            tracing::warn!("heartbeat_interval is zero, using default");
            self.heartbeat_interval = defaults.heartbeat_interval;
        }
        self
    }
}

//! The two latches behind the death protocol.
//!
//! ```text
//!                 inbound death accepted
//!   ┌──────────┐  (arm_forced_death)   ┌────────────────────────────┐
//!   │ idle     │ ────────────────────→ │ propagate_next = false     │
//!   │ prop=T   │                       │ pending_forced_death = T   │
//!   │ pend=F   │ ←──────────────────── └────────────┬───────────────┘
//!   └──────────┘  natural death first               │ tick, engine ready
//!        ↑        (begin_local_death)               ▼ (take_forced_death)
//!        │                              ┌────────────────────────────┐
//!        └── forced_death_applied ───── │ prop=F, pend=F             │
//!            forced_death_failed        └────────────────────────────┘
//! ```
//!
//! The forced death never goes through `begin_local_death`, so the
//! suppression can't be spent on some other death. A natural death that
//! lands while a forced one is still pending stands in for it.

/// Loop-prevention state, one per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeathLatches {
    propagate_next: bool,
    pending_forced_death: bool,
}

impl Default for DeathLatches {
    fn default() -> Self {
        Self {
            propagate_next: true,
            pending_forced_death: false,
        }
    }
}

impl DeathLatches {
    pub fn propagate_next(&self) -> bool {
        self.propagate_next
    }

    pub fn pending_forced_death(&self) -> bool {
        self.pending_forced_death
    }

    /// Called first thing when the engine reports a death. Returns whether
    /// this death may be broadcast and re-arms propagation for the next.
    ///
    /// A pending forced death is satisfied by this one and dropped.
    pub fn begin_local_death(&mut self) -> bool {
        if std::mem::take(&mut self.pending_forced_death) {
            self.propagate_next = true;
            return true;
        }
        std::mem::replace(&mut self.propagate_next, true)
    }

    /// An inbound death passed every filter: die at the next safe tick,
    /// and don't broadcast that death.
    pub fn arm_forced_death(&mut self) {
        self.propagate_next = false;
        self.pending_forced_death = true;
    }

    /// Consumes a pending forced death if the engine is `ready` for it.
    pub fn take_forced_death(&mut self, ready: bool) -> bool {
        if self.pending_forced_death && ready {
            self.pending_forced_death = false;
            true
        } else {
            false
        }
    }

    /// The forced death happened. It is never broadcast, and the next
    /// death is back to normal.
    pub fn forced_death_applied(&mut self) {
        self.propagate_next = true;
    }

    /// The engine refused the forced death; don't let the suppression
    /// swallow an unrelated death later.
    pub fn forced_death_failed(&mut self) {
        self.propagate_next = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // begin_local_death()
    // =====================================================================

    #[test]
    fn test_begin_local_death_default_propagates() {
        let mut latches = DeathLatches::default();
        assert!(latches.begin_local_death());
        assert!(latches.propagate_next());
    }

    #[test]
    fn test_begin_local_death_while_pending_satisfies_forced_death() {
        let mut latches = DeathLatches::default();
        latches.arm_forced_death();

        assert!(latches.begin_local_death());
        assert!(!latches.pending_forced_death());
        assert!(latches.propagate_next());
        assert!(!latches.take_forced_death(true));
    }

    #[test]
    fn test_begin_local_death_after_forced_death_applied_propagates() {
        let mut latches = DeathLatches::default();
        latches.arm_forced_death();
        assert!(latches.take_forced_death(true));
        latches.forced_death_applied();

        assert!(latches.begin_local_death());
        assert!(latches.propagate_next());
    }

    // =====================================================================
    // take_forced_death()
    // =====================================================================

    #[test]
    fn test_take_forced_death_nothing_pending() {
        let mut latches = DeathLatches::default();
        assert!(!latches.take_forced_death(true));
    }

    #[test]
    fn test_take_forced_death_waits_until_ready() {
        let mut latches = DeathLatches::default();
        latches.arm_forced_death();

        assert!(!latches.take_forced_death(false));
        assert!(!latches.take_forced_death(false));
        assert!(latches.pending_forced_death());

        assert!(latches.take_forced_death(true));
        assert!(!latches.pending_forced_death());
        assert!(!latches.take_forced_death(true));
    }

    #[test]
    fn test_arm_twice_before_tick_is_one_death() {
        let mut latches = DeathLatches::default();
        latches.arm_forced_death();
        latches.arm_forced_death();

        assert!(latches.take_forced_death(true));
        assert!(!latches.take_forced_death(true));
    }

    #[test]
    fn test_forced_death_failed_restores_propagation() {
        let mut latches = DeathLatches::default();
        latches.arm_forced_death();
        assert!(latches.take_forced_death(true));

        latches.forced_death_failed();
        assert!(latches.propagate_next());
    }
}

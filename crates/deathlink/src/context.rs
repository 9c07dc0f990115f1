//! The per-process Deathlink context.
//!
//! One [`DeathlinkContext`] owns everything that used to be global: the
//! settings snapshot, our identity and local record, the registry of
//! remote participants, the death latches and the tally. The host drives
//! it from a single thread:
//!
//! ```text
//! transport thread                      host tick (single thread)
//! ────────────────                      ─────────────────────────
//! adapter.receive(inbound) ──effects──→ ctx.tick(engine, now)
//!                                         1. drain effects
//!                                         2. forced-death step
//!                                         3. heartbeat
//!                                         4. purge stale
//! engine death hook ──────────────────→ ctx.on_player_die(...)
//! level/room hooks ───────────────────→ ctx.enter_map(...), ...
//! ```

use std::sync::Arc;
use std::time::Instant;

use deathlink_policy::{should_announce, should_receive, should_send, Settings};
use deathlink_protocol::{
    ActiveMarker, BinaryCodec, Codec, ConnectionInfo, DeathEvent, Delivery, ParticipantIdentity,
    PlayerStateUpdate, Vec2, MAX_TEAM, TEAM_EVERYONE,
};
use deathlink_state::{
    IdentityProvider, LocalPlayer, PlayerRegistry, RegistryConfig,
};
use deathlink_transport::{
    EffectQueue, InboundHandler, NetClient, TransportAdapter, TransportStats,
};
use tracing::{debug, info, trace, warn};

use crate::commands::{Command, CommandError};
use crate::death::DeathLatches;
use crate::engine::{DieArgs, Engine};
use crate::logging::LogHandle;
use crate::tally::{render, Announcement, DeathTally};
use crate::DeathlinkError;

/// What one [`DeathlinkContext::tick`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Inbound effects applied.
    pub effects_applied: usize,
    /// A pending forced death was carried out.
    pub forced_death: bool,
    /// A heartbeat state update left.
    pub heartbeat_sent: bool,
    /// Participants dropped for being idle too long.
    pub purged: Vec<ParticipantIdentity>,
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Configures and creates a [`DeathlinkContext`].
///
/// ```rust,no_run
/// use std::time::Instant;
/// use deathlink::prelude::*;
/// use deathlink::transport::MemoryHub;
///
/// let hub = MemoryHub::new();
/// let client = hub.connect("madeline", Some("main"));
/// let ctx = DeathlinkContext::builder(client)
///     .settings(Settings { kill_others: true, ..Settings::default() })
///     .build(Instant::now());
/// ```
pub struct DeathlinkBuilder<N> {
    client: Arc<N>,
    settings: Settings,
    registry: RegistryConfig,
    identity: Option<IdentityProvider>,
    codec: Box<dyn Codec>,
    log_handle: Option<LogHandle>,
}

impl<N: NetClient> DeathlinkBuilder<N> {
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn registry_config(mut self, config: RegistryConfig) -> Self {
        self.registry = config;
        self
    }

    /// Overrides where our stable identity comes from. The default reads
    /// network interfaces from sysfs.
    pub fn identity_provider(mut self, provider: IdentityProvider) -> Self {
        self.identity = Some(provider);
        self
    }

    /// Wire format. Every participant must use the same one. Defaults to
    /// [`BinaryCodec`].
    pub fn codec(mut self, codec: impl Codec) -> Self {
        self.codec = Box::new(codec);
        self
    }

    /// Handle used by the `set-debug-logging` command.
    pub fn log_handle(mut self, handle: LogHandle) -> Self {
        self.log_handle = Some(handle);
        self
    }

    /// Creates the context. `now` is the starting time for heartbeats and
    /// staleness.
    pub fn build(self, now: Instant) -> DeathlinkContext<N> {
        let registry = self.registry.validated();
        let (adapter, effects) =
            TransportAdapter::<N, DeathlinkContext<N>>::new(self.client, self.codec);
        let mut identity = self
            .identity
            .unwrap_or_else(IdentityProvider::for_host);
        let own = identity.current(adapter.local_peer().as_ref());
        info!(identity = %own, "deathlink context created");

        DeathlinkContext {
            settings: self.settings.validated(),
            identity,
            local: LocalPlayer::new(own.clone(), now, registry.heartbeat_interval),
            own,
            players: PlayerRegistry::new(registry),
            latches: DeathLatches::default(),
            tally: DeathTally::new(),
            announcements: Vec::new(),
            adapter: Arc::new(adapter),
            effects,
            log_handle: self.log_handle,
            now,
        }
    }
}

// ---------------------------------------------------------------------------
// DeathlinkContext
// ---------------------------------------------------------------------------

/// Everything one participant's Deathlink needs, generic over the host's
/// network client.
pub struct DeathlinkContext<N: NetClient> {
    settings: Settings,
    identity: IdentityProvider,
    own: ParticipantIdentity,
    local: LocalPlayer,
    players: PlayerRegistry,
    latches: DeathLatches,
    tally: DeathTally,
    announcements: Vec<Announcement>,
    adapter: Arc<TransportAdapter<N, DeathlinkContext<N>>>,
    effects: EffectQueue<DeathlinkContext<N>>,
    log_handle: Option<LogHandle>,
    /// Time of the current (or last) tick.
    now: Instant,
}

impl<N: NetClient> DeathlinkContext<N> {
    pub fn builder(client: Arc<N>) -> DeathlinkBuilder<N> {
        DeathlinkBuilder {
            client,
            settings: Settings::default(),
            registry: RegistryConfig::default(),
            identity: None,
            codec: Box::new(BinaryCodec),
            log_handle: None,
        }
    }

    // -- Tick ----------------------------------------------------------------

    /// Runs one processing step. Call once per host frame.
    pub fn tick<E: Engine>(&mut self, engine: &mut E, now: Instant) -> TickSummary {
        self.now = now;
        let mut summary = TickSummary::default();

        // `drain_and_apply` would borrow `self` twice.
        let batch = self.effects.take_pending();
        summary.effects_applied = batch.len();
        for effect in batch {
            effect(&mut *self);
        }

        summary.forced_death = self.apply_forced_death(engine);

        if self.adapter.is_connected() {
            if let Some(update) = self.local.check_heartbeat(&self.own, now) {
                summary.heartbeat_sent = self.adapter.send(&update.into(), false);
            }
        }

        summary.purged = self.players.purge_stale(now);
        summary
    }

    fn apply_forced_death<E: Engine>(&mut self, engine: &mut E) -> bool {
        if !self.latches.pending_forced_death() {
            return false;
        }
        let ready = !engine.is_transitioning()
            && engine.player().is_some_and(|player| !player.dead);
        if !self.latches.take_forced_death(ready) {
            trace!("forced death deferred");
            return false;
        }

        if engine.kill_player() {
            info!("applied forced death");
            self.latches.forced_death_applied();
            true
        } else {
            warn!("engine refused forced death");
            self.latches.forced_death_failed();
            false
        }
    }

    // -- Local deaths --------------------------------------------------------

    /// Wraps the engine's die routine.
    ///
    /// Core logic runs first and only for a death that will really
    /// happen; then `original` runs regardless and its result is passed
    /// through.
    pub fn on_player_die<E: Engine, R>(
        &mut self,
        engine: &mut E,
        args: DieArgs,
        original: impl FnOnce(&mut E) -> R,
    ) -> R {
        if engine.player().is_some_and(|player| args.kills(&player)) {
            self.on_local_death();
        }
        original(engine)
    }

    /// Handles a natural local death that is definitely happening.
    /// Returns whether a death event was broadcast. Forced deaths never
    /// come through here.
    pub fn on_local_death(&mut self) -> bool {
        if self.latches.pending_forced_death() {
            debug!("natural death stands in for pending forced death");
        }
        let propagate = self.latches.begin_local_death();
        if !should_send(&self.settings, propagate) {
            debug!(propagate, "local death not broadcast");
            return false;
        }
        let event = self.death_event(self.settings.team);
        info!(team = event.team, map = %event.map, room = %event.room, "broadcasting death");
        self.adapter.send(&event.into(), false)
    }

    fn death_event(&self, team: i32) -> DeathEvent {
        let state = self.local.state();
        DeathEvent::new(
            team,
            self.adapter.current_channel().unwrap_or_default(),
            state.map.clone(),
            state.room.clone(),
            self.settings.location_mode,
        )
    }

    // -- Location ------------------------------------------------------------

    /// Loaded a map. Others hear about it right away.
    pub fn enter_map(&mut self, map: impl Into<String>, room: impl Into<String>) {
        self.local.enter_map(map, room);
        self.send_state_now();
    }

    pub fn enter_room(&mut self, room: impl Into<String>, respawn: Vec2) {
        self.local.enter_room(room, respawn);
    }

    pub fn update_respawn(&mut self, respawn: Vec2) {
        self.local.update_respawn(respawn);
    }

    pub fn enter_lobby(&mut self) {
        self.local.enter_lobby();
    }

    pub fn set_active_marker(&mut self, marker: Option<ActiveMarker>) {
        self.local.set_active_marker(marker);
    }

    fn send_state_now(&mut self) -> bool {
        if !self.adapter.is_connected() {
            return false;
        }
        match self.local.prepare_update(&self.own, self.now) {
            Some(update) => self.adapter.send(&update.into(), false),
            None => false,
        }
    }

    fn refresh_identity(&mut self) {
        let peer = self.adapter.local_peer();
        self.own = self.identity.current(peer.as_ref());
        self.local.set_identity(self.own.clone());
    }

    // -- Settings ------------------------------------------------------------

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings.validated();
    }

    /// Flips `kill_others` and returns the new value.
    pub fn toggle_kill_others(&mut self) -> bool {
        self.settings.kill_others = !self.settings.kill_others;
        info!(kill_others = self.settings.kill_others, "toggled");
        self.settings.kill_others
    }

    /// Flips `receive_deaths` and returns the new value.
    pub fn toggle_receive_deaths(&mut self) -> bool {
        self.settings.receive_deaths = !self.settings.receive_deaths;
        info!(receive_deaths = self.settings.receive_deaths, "toggled");
        self.settings.receive_deaths
    }

    // -- Accessors -----------------------------------------------------------

    pub fn identity(&self) -> &ParticipantIdentity {
        &self.own
    }

    pub fn local(&self) -> &LocalPlayer {
        &self.local
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn latches(&self) -> DeathLatches {
        self.latches
    }

    pub fn tally(&self) -> &DeathTally {
        &self.tally
    }

    /// Takes every announcement made since the last call, oldest first.
    pub fn drain_announcements(&mut self) -> Vec<Announcement> {
        std::mem::take(&mut self.announcements)
    }

    /// The adapter the host's transport thread feeds with
    /// [`TransportAdapter::receive`].
    pub fn adapter(&self) -> &Arc<TransportAdapter<N, DeathlinkContext<N>>> {
        &self.adapter
    }

    pub fn stats(&self) -> TransportStats {
        self.adapter.stats()
    }

    // -- Commands ------------------------------------------------------------

    /// Sends a death to `team`, or our own team when `None`, and applies
    /// it to ourselves too. Returns the team it went to.
    pub fn kill_team(&mut self, team: Option<i32>) -> Result<i32, CommandError> {
        if !self.adapter.is_connected() {
            return Err(CommandError::NotConnected);
        }
        let team = team.unwrap_or(self.settings.team);
        if !(TEAM_EVERYONE..=MAX_TEAM).contains(&team) {
            return Err(CommandError::TeamOutOfRange(team));
        }
        let event = self.death_event(team);
        info!(team, "kill-team");
        self.adapter.send(&event.into(), true);
        Ok(team)
    }

    /// Runs a parsed command and returns the text to show the user.
    pub fn execute(&mut self, command: Command) -> Result<String, CommandError> {
        match command {
            Command::KillTeam(team) => {
                let team = self.kill_team(team)?;
                if team == TEAM_EVERYONE {
                    Ok("killed everyone".to_owned())
                } else {
                    Ok(format!("killed team {team}"))
                }
            }
            Command::ListDeaths => {
                if self.tally.is_empty() {
                    return Ok("no deaths recorded".to_owned());
                }
                let lines: Vec<String> = self
                    .tally
                    .list()
                    .into_iter()
                    .map(|(name, count)| format!("{name}: {count}"))
                    .collect();
                Ok(lines.join("\n"))
            }
            Command::ResetDeaths => {
                self.tally.reset();
                Ok("death counts reset".to_owned())
            }
            Command::SetDebugLogging(enabled) => {
                let handle = self.log_handle.as_ref().ok_or(CommandError::NoLogHandle)?;
                handle.set_debug(enabled)?;
                Ok(format!("debug logging {}", if enabled { "on" } else { "off" }))
            }
        }
    }

    /// Parses and runs one console line.
    pub fn run_command(&mut self, line: &str) -> Result<String, DeathlinkError> {
        let command: Command = line.parse()?;
        Ok(self.execute(command)?)
    }

    fn announce(&mut self, player: &str, event: &DeathEvent) {
        let text = render(
            self.settings.display_format,
            player,
            event.team,
            &event.map,
            &event.room,
        );
        self.tally.record(player, event.team);
        info!(%text, "announce");
        self.announcements.push(Announcement {
            player: player.to_owned(),
            team: event.team,
            text,
        });
    }
}

// ---------------------------------------------------------------------------
// Inbound effects
// ---------------------------------------------------------------------------

impl<N: NetClient> InboundHandler for DeathlinkContext<N> {
    fn on_connected(&mut self) {
        self.refresh_identity();
        info!(identity = %self.own, "connected");
        self.send_state_now();
    }

    fn on_disconnected(&mut self) {
        self.own = self.identity.current(None);
        self.local.set_identity(self.own.clone());
        info!(identity = %self.own, "disconnected");
    }

    fn on_death_event(&mut self, delivery: Delivery<DeathEvent>) {
        let Delivery {
            sender,
            message: event,
        } = delivery;

        if should_announce(&self.settings, &self.own.name, &sender.name, event.team) {
            self.announce(&sender.name, &event);
        }

        let state = self.local.state();
        if should_receive(&self.settings, &state.map, &state.room, &event) {
            info!(
                %sender,
                team = event.team,
                everyone = event.targets_everyone(),
                "accepted death, dying next tick"
            );
            self.latches.arm_forced_death();
        } else {
            debug!(
                %sender,
                team = event.team,
                sender_mode = ?event.location_mode,
                "death filtered out"
            );
        }
    }

    fn on_player_state(&mut self, delivery: Delivery<PlayerStateUpdate>) {
        let Delivery {
            sender,
            message: mut update,
        } = delivery;
        if sender.session_id.is_assigned() {
            update.identity = update.identity.with_session(sender.session_id);
        }
        self.players.apply_update(&self.own, update, self.now);
    }

    fn on_connection_info(&mut self, info: ConnectionInfo) {
        if !self
            .players
            .record_latency(info.session_id, info.reliable_ms, info.fast_ms)
        {
            trace!(session = %info.session_id, "latency for unknown session");
        }
    }
}

#[cfg(test)]
mod tests {
    //! Context tests against a single memory client. Multi-participant
    //! scenarios live in `tests/death_sync.rs`.

    use super::*;
    use crate::engine::PlayerCondition;
    use deathlink_protocol::LocationFilterMode;
    use deathlink_transport::{MemoryClient, MemoryHub};
    use std::time::Duration;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[derive(Default)]
    struct StubEngine {
        transitioning: bool,
        condition: Option<PlayerCondition>,
        kills: u32,
    }

    impl Engine for StubEngine {
        fn is_transitioning(&self) -> bool {
            self.transitioning
        }

        fn player(&self) -> Option<PlayerCondition> {
            self.condition
        }

        fn kill_player(&mut self) -> bool {
            self.kills += 1;
            true
        }
    }

    fn alive() -> StubEngine {
        StubEngine {
            condition: Some(PlayerCondition::default()),
            ..StubEngine::default()
        }
    }

    fn context(
        hub: &MemoryHub,
        settings: Settings,
        now: Instant,
    ) -> (Arc<MemoryClient>, DeathlinkContext<MemoryClient>) {
        let client = hub.connect("madeline", Some("main"));
        let ctx = DeathlinkContext::builder(Arc::clone(&client))
            .settings(settings)
            .identity_provider(IdentityProvider::with_fixed_hash(Some(1)))
            .build(now);
        (client, ctx)
    }

    // =====================================================================
    // on_player_die()
    // =====================================================================

    #[test]
    fn test_on_player_die_effective_death_broadcasts() {
        let hub = MemoryHub::new();
        let settings = Settings {
            kill_others: true,
            ..Settings::default()
        };
        let (_client, mut ctx) = context(&hub, settings, Instant::now());
        let mut engine = alive();

        let result = ctx.on_player_die(&mut engine, DieArgs::default(), |_| "died");

        assert_eq!(result, "died");
        assert_eq!(ctx.stats().sent, 1);
    }

    #[test]
    fn test_on_player_die_ineffective_death_runs_original_only() {
        let hub = MemoryHub::new();
        let settings = Settings {
            kill_others: true,
            ..Settings::default()
        };
        let (_client, mut ctx) = context(&hub, settings, Instant::now());
        let mut engine = StubEngine {
            condition: Some(PlayerCondition {
                invincible: true,
                ..PlayerCondition::default()
            }),
            ..StubEngine::default()
        };

        let mut ran = false;
        ctx.on_player_die(&mut engine, DieArgs::default(), |_| ran = true);

        assert!(ran);
        assert_eq!(ctx.stats().sent, 0);
    }

    #[test]
    fn test_on_local_death_kill_others_off_not_sent() {
        let hub = MemoryHub::new();
        let (_client, mut ctx) = context(&hub, Settings::default(), Instant::now());
        assert!(!ctx.on_local_death());
        assert_eq!(ctx.stats().sent, 0);
    }

    // =====================================================================
    // tick()
    // =====================================================================

    #[test]
    fn test_tick_applies_connected_and_sends_state() {
        let hub = MemoryHub::new();
        let start = Instant::now();
        let (client, mut ctx) = context(&hub, Settings::default(), start);

        client.pump(ctx.adapter());
        let summary = ctx.tick(&mut alive(), start);

        assert_eq!(summary.effects_applied, 1);
        assert_eq!(ctx.stats().sent_state, 1);
        assert_eq!(ctx.identity().session_id, client.session_id());
    }

    #[test]
    fn test_tick_heartbeat_after_interval() {
        let hub = MemoryHub::new();
        let start = Instant::now();
        let (_client, mut ctx) = context(&hub, Settings::default(), start);
        let mut engine = alive();

        assert!(!ctx.tick(&mut engine, start + secs(30)).heartbeat_sent);
        assert!(ctx.tick(&mut engine, start + secs(31)).heartbeat_sent);
    }

    #[test]
    fn test_tick_engine_refuses_forced_death_restores_propagation() {
        struct Refusing;
        impl Engine for Refusing {
            fn is_transitioning(&self) -> bool {
                false
            }
            fn player(&self) -> Option<PlayerCondition> {
                Some(PlayerCondition::default())
            }
            fn kill_player(&mut self) -> bool {
                false
            }
        }

        let hub = MemoryHub::new();
        let settings = Settings {
            receive_deaths: true,
            ..Settings::default()
        };
        let (client, mut ctx) = context(&hub, settings, Instant::now());
        client.pump(ctx.adapter());
        ctx.kill_team(None).unwrap();

        let summary = ctx.tick(&mut Refusing, Instant::now());
        assert!(!summary.forced_death);
        assert!(ctx.latches().propagate_next());
        assert!(!ctx.latches().pending_forced_death());
    }

    #[test]
    fn test_tick_forced_death_is_never_broadcast() {
        let hub = MemoryHub::new();
        let settings = Settings {
            kill_others: true,
            receive_deaths: true,
            ..Settings::default()
        };
        let (client, mut ctx) = context(&hub, settings, Instant::now());
        let mut engine = alive();
        client.pump(ctx.adapter());
        ctx.kill_team(None).unwrap();
        let sent = ctx.stats().sent;

        let summary = ctx.tick(&mut engine, Instant::now());

        assert!(summary.forced_death);
        assert_eq!(engine.kills, 1);
        assert_eq!(ctx.stats().sent, sent);
        assert!(ctx.latches().propagate_next());
    }

    #[test]
    fn test_on_player_die_while_forced_death_deferred_replaces_it() {
        let hub = MemoryHub::new();
        let settings = Settings {
            kill_others: true,
            receive_deaths: true,
            ..Settings::default()
        };
        let (client, mut ctx) = context(&hub, settings, Instant::now());
        let mut engine = StubEngine {
            transitioning: true,
            ..alive()
        };
        client.pump(ctx.adapter());
        ctx.kill_team(None).unwrap();
        assert!(!ctx.tick(&mut engine, Instant::now()).forced_death);
        let sent = ctx.stats().sent;

        ctx.on_player_die(&mut engine, DieArgs::default(), |_| ());
        engine.transitioning = false;
        let summary = ctx.tick(&mut engine, Instant::now());

        assert_eq!(ctx.stats().sent, sent + 1);
        assert!(!summary.forced_death);
        assert_eq!(engine.kills, 0);
        assert!(!ctx.latches().pending_forced_death());
    }

    // =====================================================================
    // Commands
    // =====================================================================

    #[test]
    fn test_kill_team_out_of_range_is_error() {
        let hub = MemoryHub::new();
        let (_client, mut ctx) = context(&hub, Settings::default(), Instant::now());
        assert!(matches!(
            ctx.kill_team(Some(101)),
            Err(CommandError::TeamOutOfRange(101))
        ));
        assert!(matches!(
            ctx.kill_team(Some(-1)),
            Err(CommandError::TeamOutOfRange(-1))
        ));
        assert_eq!(ctx.stats().sent, 0);
    }

    #[test]
    fn test_kill_team_disconnected_is_error() {
        let hub = MemoryHub::new();
        let (client, mut ctx) = context(&hub, Settings::default(), Instant::now());
        client.disconnect();
        assert!(matches!(ctx.kill_team(Some(1)), Err(CommandError::NotConnected)));
    }

    #[test]
    fn test_kill_team_loops_back_to_self() {
        let hub = MemoryHub::new();
        let settings = Settings {
            receive_deaths: true,
            team: 4,
            location_mode: LocationFilterMode::SameRoom,
            ..Settings::default()
        };
        let (_client, mut ctx) = context(&hub, settings, Instant::now());
        let mut engine = alive();

        assert_eq!(ctx.kill_team(None).unwrap(), 4);
        let summary = ctx.tick(&mut engine, Instant::now());

        assert!(summary.forced_death);
        assert_eq!(engine.kills, 1);
        // The forced death is not broadcast.
        assert_eq!(ctx.stats().sent, 1);
    }

    #[test]
    fn test_run_command_set_debug_logging_without_handle() {
        let hub = MemoryHub::new();
        let (_client, mut ctx) = context(&hub, Settings::default(), Instant::now());
        let err = ctx.run_command("set-debug-logging true").unwrap_err();
        assert!(matches!(err, DeathlinkError::Command(CommandError::NoLogHandle)));
    }

    #[test]
    fn test_run_command_set_debug_logging_with_handle() {
        use tracing_subscriber::layer::SubscriberExt;

        let (layer, handle) = crate::logging::filter_layer("info");
        let _subscriber = tracing_subscriber::registry().with(layer);
        let hub = MemoryHub::new();
        let client = hub.connect("madeline", Some("main"));
        let mut ctx = DeathlinkContext::builder(client)
            .identity_provider(IdentityProvider::with_fixed_hash(None))
            .log_handle(handle.clone())
            .build(Instant::now());

        assert_eq!(ctx.run_command("set-debug-logging true").unwrap(), "debug logging on");
        assert_eq!(handle.current_filter().as_deref(), Some("debug"));
    }

    #[test]
    fn test_toggles_flip_settings() {
        let hub = MemoryHub::new();
        let (_client, mut ctx) = context(&hub, Settings::default(), Instant::now());
        assert!(ctx.toggle_kill_others());
        assert!(ctx.toggle_receive_deaths());
        assert!(!ctx.toggle_kill_others());
        assert!(!ctx.settings().kill_others);
    }

    #[test]
    fn test_update_settings_validates_team() {
        let hub = MemoryHub::new();
        let (_client, mut ctx) = context(&hub, Settings::default(), Instant::now());
        ctx.update_settings(Settings {
            team: 500,
            ..Settings::default()
        });
        assert_eq!(ctx.settings().team, MAX_TEAM);
    }
}

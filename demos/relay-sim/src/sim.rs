//! The simulation loop.
//!
//! Every participant gets a [`MemoryClient`], a [`DeathlinkContext`] and
//! a [`SimEngine`]. A `tokio::time::interval` drives the fixed-rate tick;
//! missed ticks are skipped rather than replayed.

use std::sync::Arc;
use std::time::Duration;

use deathlink::prelude::*;
use deathlink::transport::{HubConfig, HubStats, MemoryClient, MemoryHub};
use rand::Rng;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info};

use crate::SimConfig;

/// A player that dies on request and respawns on the next tick.
#[derive(Debug, Default)]
pub struct SimEngine {
    dead: bool,
    pub forced_deaths: u32,
}

impl Engine for SimEngine {
    fn is_transitioning(&self) -> bool {
        false
    }

    fn player(&self) -> Option<PlayerCondition> {
        Some(PlayerCondition {
            dead: self.dead,
            ..PlayerCondition::default()
        })
    }

    fn kill_player(&mut self) -> bool {
        self.dead = true;
        self.forced_deaths += 1;
        true
    }
}

struct Participant {
    client: Arc<MemoryClient>,
    ctx: DeathlinkContext<MemoryClient>,
    engine: SimEngine,
}

/// Totals from one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SimReport {
    pub ticks: u64,
    /// Deaths the script caused.
    pub natural_deaths: u64,
    /// Deaths caused by someone else's death.
    pub forced_deaths: u64,
    /// Death events that left any participant.
    pub deaths_sent: u64,
    pub announcements: u64,
    pub hub: HubStats,
}

const NAMES: [&str; 8] = [
    "madeline", "badeline", "theo", "granny", "oshiro", "mr-kevin", "seeker", "bird",
];

fn name_for(index: usize) -> String {
    let base = NAMES[index % NAMES.len()];
    match index / NAMES.len() {
        0 => base.to_owned(),
        n => format!("{base}-{n}"),
    }
}

/// Follows tokio's clock, so paused-time tests advance it too.
fn sim_clock() -> std::time::Instant {
    time::Instant::now().into_std()
}

/// Runs the simulation to completion.
pub async fn run(config: SimConfig) -> SimReport {
    let config = config.validated();
    let hub = MemoryHub::with_config(HubConfig {
        drop_rate: config.drop_rate,
        reorder: config.reorder,
    });

    let start = sim_clock();
    let mut party: Vec<Participant> = (0..config.participants)
        .map(|i| {
            let name = name_for(i);
            let client = hub.connect(&name, Some("main"));
            let settings = Settings {
                kill_others: true,
                receive_deaths: true,
                team: (i as i32 % config.teams) + 1,
                ..Settings::default()
            };
            let ctx = DeathlinkContext::builder(Arc::clone(&client))
                .settings(settings)
                .identity_provider(IdentityProvider::with_fixed_hash(Some(i as i32)))
                .build(start);
            Participant {
                client,
                ctx,
                engine: SimEngine::default(),
            }
        })
        .collect();
    info!(
        participants = party.len(),
        teams = config.teams,
        rate_hz = config.tick_rate_hz,
        "simulation starting"
    );

    let period = Duration::from_secs(1) / config.tick_rate_hz;
    let mut interval = time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    let mut report = SimReport::default();

    let total_ticks = config.total_ticks();
    for tick in 1..=total_ticks {
        interval.tick().await;
        let now = sim_clock();

        for p in party.iter_mut() {
            p.engine.dead = false;
            p.client.pump(p.ctx.adapter());
            let summary = p.ctx.tick(&mut p.engine, now);
            for announcement in p.ctx.drain_announcements() {
                debug!(to = %p.ctx.identity().name, "{}", announcement.text);
                report.announcements += 1;
            }
            for gone in summary.purged {
                info!(%gone, "purged");
            }
        }

        // The last tick has no successor to deliver a death to.
        if tick % config.death_every_ticks == 0 && tick < total_ticks {
            let victim = &mut party[rand::rng().random_range(0..config.participants)];
            if !victim.engine.dead {
                info!(tick, name = %victim.ctx.identity().name, "scripted death");
                victim
                    .ctx
                    .on_player_die(&mut victim.engine, DieArgs::default(), |engine| {
                        engine.dead = true;
                    });
                report.natural_deaths += 1;
            }
        }
        report.ticks = tick;
    }

    for p in &party {
        report.forced_deaths += u64::from(p.engine.forced_deaths);
        report.deaths_sent += p.ctx.stats().sent;
        let counts: Vec<String> = p
            .ctx
            .tally()
            .list()
            .into_iter()
            .map(|(name, count)| format!("{name}={count}"))
            .collect();
        info!(
            name = %p.ctx.identity().name,
            team = p.ctx.settings().team,
            forced = p.engine.forced_deaths,
            seen = p.ctx.tally().total(),
            tally = %counts.join(","),
            "participant summary"
        );
    }
    report.hub = hub.stats();
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_for_wraps_with_suffix() {
        assert_eq!(name_for(0), "madeline");
        assert_eq!(name_for(8), "madeline-1");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_every_natural_death_sent_exactly_once() {
        let config = SimConfig {
            participants: 4,
            teams: 1,
            duration_secs: 10,
            death_every_ticks: 10,
            ..SimConfig::default()
        };

        let report = run(config).await;

        assert_eq!(report.ticks, 200);
        assert!(report.natural_deaths > 0);
        assert_eq!(report.deaths_sent, report.natural_deaths);
        // Everyone else on the single team follows each natural death.
        assert_eq!(report.forced_deaths, report.natural_deaths * 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_separate_teams_never_force_deaths() {
        let config = SimConfig {
            participants: 3,
            teams: 3,
            duration_secs: 5,
            death_every_ticks: 5,
            ..SimConfig::default()
        };

        let report = run(config).await;

        assert!(report.natural_deaths > 0);
        assert_eq!(report.forced_deaths, 0);
    }
}

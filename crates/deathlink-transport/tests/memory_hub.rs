//! Integration tests: several adapters talking through one `MemoryHub`.
//!
//! Each participant gets its own adapter and queue, exactly like a real
//! process would. `pump` plays the role of the transport's receive
//! thread, `drain_and_apply` the role of the tick.

use std::sync::Arc;

use deathlink_protocol::{
    BinaryCodec, ConnectionInfo, DeathEvent, Delivery, LocationFilterMode,
    Message,
};
use deathlink_transport::{
    EffectQueue, HubConfig, InboundHandler, MemoryClient, MemoryHub,
    TransportAdapter,
};

#[derive(Default)]
struct Inbox {
    deaths: Vec<Delivery<DeathEvent>>,
    latencies: Vec<ConnectionInfo>,
    connected: u32,
}

impl InboundHandler for Inbox {
    fn on_connected(&mut self) {
        self.connected += 1;
    }

    fn on_death_event(&mut self, delivery: Delivery<DeathEvent>) {
        self.deaths.push(delivery);
    }

    fn on_connection_info(&mut self, info: ConnectionInfo) {
        self.latencies.push(info);
    }
}

struct Participant {
    client: Arc<MemoryClient>,
    adapter: TransportAdapter<MemoryClient, Inbox>,
    queue: EffectQueue<Inbox>,
    inbox: Inbox,
}

impl Participant {
    fn join(hub: &MemoryHub, name: &str, channel: Option<&str>) -> Self {
        let client = hub.connect(name, channel);
        let (adapter, queue) = TransportAdapter::new(client.clone(), BinaryCodec);
        Self {
            client,
            adapter,
            queue,
            inbox: Inbox::default(),
        }
    }

    fn tick(&mut self) {
        self.client.pump(&self.adapter);
        self.queue.drain_and_apply(&mut self.inbox);
    }
}

fn death(team: i32, channel: &str) -> Message {
    Message::Death(DeathEvent::new(
        team,
        channel,
        "1-ForsakenCity",
        "a-00",
        LocationFilterMode::Everywhere,
    ))
}

#[test]
fn test_channel_isolation_across_hub() {
    let hub = MemoryHub::new();
    let mut a = Participant::join(&hub, "madeline", Some("main"));
    let mut b = Participant::join(&hub, "badeline", Some("side"));
    let mut c = Participant::join(&hub, "theo", Some("main"));

    a.tick();
    b.tick();
    c.tick();

    assert!(a.adapter.send(&death(1, "main"), false));
    b.tick();
    c.tick();

    assert!(b.inbox.deaths.is_empty());
    assert_eq!(b.adapter.stats().dropped, 1);
    assert_eq!(c.inbox.deaths.len(), 1);
    assert_eq!(c.inbox.deaths[0].sender.name, "madeline");
    assert_eq!(c.inbox.deaths[0].sender.session_id, a.client.session_id());
}

#[test]
fn test_connected_event_arrives_on_first_tick() {
    let hub = MemoryHub::new();
    let mut a = Participant::join(&hub, "madeline", None);
    a.tick();
    assert_eq!(a.inbox.connected, 1);
}

#[test]
fn test_reconnect_delivers_second_connected_event() {
    let hub = MemoryHub::new();
    let mut a = Participant::join(&hub, "madeline", None);
    a.tick();

    a.client.disconnect();
    assert!(!a.adapter.send(&death(1, ""), false));
    a.client.reconnect();
    a.tick();

    assert_eq!(a.inbox.connected, 2);
}

#[test]
fn test_latency_report_reaches_everyone() {
    let hub = MemoryHub::new();
    let mut a = Participant::join(&hub, "madeline", None);
    let mut b = Participant::join(&hub, "badeline", None);

    hub.report_latency(b.client.session_id(), 35, Some(20));
    a.tick();
    b.tick();

    assert_eq!(a.inbox.latencies.len(), 1);
    assert_eq!(a.inbox.latencies[0].fast_ms, Some(20));
    assert_eq!(b.inbox.latencies.len(), 1);
}

#[test]
fn test_reordering_still_delivers_every_frame() {
    let hub = MemoryHub::with_config(HubConfig {
        drop_rate: 0.0,
        reorder: true,
    });
    let a = Participant::join(&hub, "madeline", Some("main"));
    let mut b = Participant::join(&hub, "badeline", Some("main"));
    b.tick();

    for team in 1..=20 {
        a.adapter.send(&death(team, "main"), false);
    }
    b.tick();

    let mut teams: Vec<i32> = b.inbox.deaths.iter().map(|d| d.message.team).collect();
    teams.sort_unstable();
    assert_eq!(teams, (1..=20).collect::<Vec<_>>());
}

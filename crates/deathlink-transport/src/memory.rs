//! In-process transport: every participant's [`MemoryClient`] talks to
//! the others through a shared [`MemoryHub`].
//!
//! Frames are broadcast to every other connected client regardless of
//! channel, the same way a relay server fans out; channel filtering is
//! the adapter's job. Delivery is manual: a client's frames sit in its
//! inbox until [`MemoryClient::pump`] forwards them, which stands in for
//! the transport's receive thread.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use deathlink_protocol::{ConnectionInfo, PeerInfo, SessionId};
use rand::Rng;
use rand::seq::SliceRandom;
use tokio::sync::mpsc;
use tracing::{debug, trace, warn};

use crate::{InboundHandler, Inbound, NetClient, TransportAdapter, TransportError};

/// Network conditions the hub simulates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HubConfig {
    /// Probability in `0.0..=1.0` that a frame is lost on its way to one
    /// receiver.
    pub drop_rate: f64,
    /// Shuffle each batch a client pumps, so arrival order differs from
    /// send order.
    pub reorder: bool,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            drop_rate: 0.0,
            reorder: false,
        }
    }
}

impl HubConfig {
    /// Returns a copy with `drop_rate` clamped into `0.0..=1.0`.
    pub fn validated(mut self) -> Self {
        if !(0.0..=1.0).contains(&self.drop_rate) {
            let clamped = if self.drop_rate.is_nan() {
                0.0
            } else {
                self.drop_rate.clamp(0.0, 1.0)
            };
            warn!(
                drop_rate = self.drop_rate,
                clamped, "drop_rate out of range, clamping"
            );
            self.drop_rate = clamped;
        }
        self
    }
}

/// Delivery totals across the whole hub.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HubStats {
    /// Frames placed in some receiver's inbox.
    pub delivered: u64,
    /// Frames lost to the simulated drop rate.
    pub lost: u64,
}

struct PeerSlot {
    name: String,
    channel: Option<String>,
    connected: bool,
    inbox: mpsc::UnboundedSender<Inbound>,
}

#[derive(Default)]
struct HubState {
    next_session: u32,
    peers: HashMap<SessionId, PeerSlot>,
    stats: HubStats,
}

impl HubState {
    fn allocate_session(&mut self) -> SessionId {
        let id = SessionId(self.next_session);
        self.next_session += 1;
        id
    }
}

fn lock(state: &Mutex<HubState>) -> MutexGuard<'_, HubState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// The shared "server" all memory clients broadcast through.
#[derive(Clone, Default)]
pub struct MemoryHub {
    state: Arc<Mutex<HubState>>,
    config: HubConfig,
}

impl MemoryHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: HubConfig) -> Self {
        Self {
            state: Arc::default(),
            config: config.validated(),
        }
    }

    /// Connects a new participant and queues its `Connected` event.
    pub fn connect(&self, name: &str, channel: Option<&str>) -> Arc<MemoryClient> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = lock(&self.state);
        let session = state.allocate_session();
        let _ = tx.send(Inbound::Connected);
        state.peers.insert(
            session,
            PeerSlot {
                name: name.to_owned(),
                channel: channel.map(str::to_owned),
                connected: true,
                inbox: tx,
            },
        );
        debug!(%session, name, ?channel, "memory client connected");

        Arc::new(MemoryClient {
            session: AtomicU32::new(session.0),
            state: Arc::clone(&self.state),
            config: self.config,
            inbox: Mutex::new(rx),
        })
    }

    /// Broadcasts latency figures for `session` to every connected peer.
    pub fn report_latency(
        &self,
        session: SessionId,
        reliable_ms: u32,
        fast_ms: Option<u32>,
    ) {
        let info = ConnectionInfo {
            session_id: session,
            reliable_ms,
            fast_ms,
        };
        let state = lock(&self.state);
        for slot in state.peers.values().filter(|slot| slot.connected) {
            let _ = slot.inbox.send(Inbound::ConnectionInfo(info));
        }
    }

    pub fn stats(&self) -> HubStats {
        lock(&self.state).stats
    }
}

/// One participant's end of a [`MemoryHub`].
pub struct MemoryClient {
    session: AtomicU32,
    state: Arc<Mutex<HubState>>,
    config: HubConfig,
    inbox: Mutex<mpsc::UnboundedReceiver<Inbound>>,
}

impl MemoryClient {
    pub fn session_id(&self) -> SessionId {
        SessionId(self.session.load(Ordering::Acquire))
    }

    /// Moves this client to another channel, or out of all channels.
    pub fn join_channel(&self, channel: Option<&str>) {
        let mut state = lock(&self.state);
        if let Some(slot) = state.peers.get_mut(&self.session_id()) {
            slot.channel = channel.map(str::to_owned);
        }
    }

    /// Drops the connection and queues a `Disconnected` event.
    pub fn disconnect(&self) {
        let mut state = lock(&self.state);
        if let Some(slot) = state.peers.get_mut(&self.session_id()) {
            if slot.connected {
                slot.connected = false;
                let _ = slot.inbox.send(Inbound::Disconnected);
            }
        }
    }

    /// Reconnects under a fresh session id, keeping name and channel.
    pub fn reconnect(&self) -> SessionId {
        let mut state = lock(&self.state);
        let old = self.session_id();
        let new = state.allocate_session();
        if let Some(mut slot) = state.peers.remove(&old) {
            slot.connected = true;
            let _ = slot.inbox.send(Inbound::Connected);
            state.peers.insert(new, slot);
        }
        self.session.store(new.0, Ordering::Release);
        debug!(%old, %new, "memory client reconnected");
        new
    }

    /// Forwards everything waiting in this client's inbox to `adapter`,
    /// returning how many events were forwarded.
    pub fn pump<C: InboundHandler>(
        &self,
        adapter: &TransportAdapter<MemoryClient, C>,
    ) -> usize {
        let mut batch = Vec::new();
        {
            let mut inbox = self.inbox.lock().unwrap_or_else(PoisonError::into_inner);
            while let Ok(inbound) = inbox.try_recv() {
                batch.push(inbound);
            }
        }
        if self.config.reorder {
            batch.shuffle(&mut rand::rng());
        }

        let count = batch.len();
        for inbound in batch {
            adapter.receive(inbound);
        }
        count
    }
}

impl NetClient for MemoryClient {
    fn is_connected(&self) -> bool {
        lock(&self.state)
            .peers
            .get(&self.session_id())
            .is_some_and(|slot| slot.connected)
    }

    fn local_peer(&self) -> Option<PeerInfo> {
        let session = self.session_id();
        lock(&self.state)
            .peers
            .get(&session)
            .filter(|slot| slot.connected)
            .map(|slot| PeerInfo::new(session, slot.name.clone()))
    }

    fn current_channel(&self) -> Option<String> {
        lock(&self.state)
            .peers
            .get(&self.session_id())
            .and_then(|slot| slot.channel.clone())
    }

    fn send(&self, frame: &[u8]) -> Result<(), TransportError> {
        let session = self.session_id();
        let mut state = lock(&self.state);
        let sender = match state.peers.get(&session) {
            Some(slot) if slot.connected => PeerInfo::new(session, slot.name.clone()),
            _ => return Err(TransportError::NotConnected),
        };

        let mut rng = rand::rng();
        let mut stats = state.stats;
        for (id, slot) in &state.peers {
            if *id == session || !slot.connected {
                continue;
            }
            if self.config.drop_rate > 0.0 && rng.random_bool(self.config.drop_rate) {
                trace!(from = %session, to = %id, "simulated loss");
                stats.lost += 1;
                continue;
            }
            let _ = slot.inbox.send(Inbound::Data {
                sender: Some(sender.clone()),
                frame: frame.to_vec(),
            });
            stats.delivered += 1;
        }
        state.stats = stats;
        Ok(())
    }
}

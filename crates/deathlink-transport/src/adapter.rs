//! The send/receive boundary between the sync core and a [`NetClient`].
//!
//! Outbound: [`TransportAdapter::send`] checks connectivity, encodes,
//! sends, and swallows failures.
//!
//! Inbound: [`TransportAdapter::receive`] runs on whatever thread the
//! transport calls back on. It decodes, drops death events from other
//! channels, and turns everything else into effects for the tick to
//! apply later.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use deathlink_protocol::{
    Codec, ConnectionInfo, DeathEvent, Delivery, Message, PeerInfo,
    PlayerStateUpdate,
};
use tracing::{debug, trace, warn};

use crate::queue::{effect_queue, EffectHandle, EffectQueue};
use crate::{Inbound, NetClient};

/// What the tick-side consumer does with inbound traffic.
///
/// Every method runs on the consumer's thread while it drains its
/// [`EffectQueue`], never on the transport thread.
pub trait InboundHandler: 'static {
    fn on_connected(&mut self) {}

    fn on_disconnected(&mut self) {}

    /// A death event from a participant in our channel.
    fn on_death_event(&mut self, delivery: Delivery<DeathEvent>);

    fn on_player_state(&mut self, _delivery: Delivery<PlayerStateUpdate>) {}

    fn on_connection_info(&mut self, _info: ConnectionInfo) {}
}

/// Snapshot of the adapter's traffic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransportStats {
    /// Death events handed to the client.
    pub sent: u64,
    /// Player state updates handed to the client.
    pub sent_state: u64,
    /// Inbound messages turned into effects.
    pub received: u64,
    /// Inbound frames discarded (undecodable, wrong channel, no sender).
    pub dropped: u64,
}

#[derive(Default)]
struct Counters {
    sent: AtomicU64,
    sent_state: AtomicU64,
    received: AtomicU64,
    dropped: AtomicU64,
}

/// Wraps a [`NetClient`] for one consumer type `C`.
///
/// Shared between the consumer and the transport's receive thread, so it
/// is usually held in an `Arc`. All methods take `&self`.
pub struct TransportAdapter<N, C> {
    client: Arc<N>,
    codec: Box<dyn Codec>,
    effects: EffectHandle<C>,
    counters: Counters,
}

impl<N: NetClient, C: InboundHandler> TransportAdapter<N, C> {
    /// Creates an adapter and the queue its inbound effects land in.
    pub fn new(client: Arc<N>, codec: impl Codec) -> (Self, EffectQueue<C>) {
        let (effects, queue) = effect_queue();
        let adapter = Self {
            client,
            codec: Box::new(codec),
            effects,
            counters: Counters::default(),
        };
        (adapter, queue)
    }

    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    pub fn current_channel(&self) -> Option<String> {
        self.client.current_channel()
    }

    pub fn local_peer(&self) -> Option<PeerInfo> {
        self.client.local_peer()
    }

    /// True if a message tagged with `channel` belongs to our channel.
    ///
    /// Not being in any channel matches nothing.
    pub fn is_same_channel(&self, channel: &str) -> bool {
        self.client
            .current_channel()
            .is_some_and(|current| current == channel)
    }

    /// Sends a message to the other participants.
    ///
    /// Does nothing while disconnected. With `loopback` set, the same
    /// frame is also fed through [`receive`](Self::receive) as if it had
    /// arrived from ourselves. Encode and send failures are logged and
    /// swallowed; the return value only says whether the frame left.
    pub fn send(&self, message: &Message, loopback: bool) -> bool {
        let data_id = message.data_id();
        if !self.client.is_connected() {
            debug!(data_id, "not connected, dropping outbound message");
            return false;
        }

        let frame = match self.codec.encode(message) {
            Ok(frame) => frame,
            Err(e) => {
                warn!(data_id, error = %e, "failed to encode outbound message");
                return false;
            }
        };

        if let Err(e) = self.client.send(&frame) {
            warn!(data_id, error = %e, "send failed, message dropped");
            return false;
        }

        match message {
            Message::Death(_) => self.counters.sent.fetch_add(1, Ordering::Relaxed),
            Message::PlayerState(_) => {
                self.counters.sent_state.fetch_add(1, Ordering::Relaxed)
            }
        };
        trace!(data_id, bytes = frame.len(), loopback, "sent");

        if loopback {
            self.receive(Inbound::Data {
                sender: None,
                frame,
            });
        }
        true
    }

    /// Entry point for the transport's receive thread.
    pub fn receive(&self, inbound: Inbound) {
        match inbound {
            Inbound::Connected => {
                self.push(|c: &mut C| c.on_connected());
            }
            Inbound::Disconnected => {
                self.push(|c: &mut C| c.on_disconnected());
            }
            Inbound::ConnectionInfo(info) => {
                self.push(move |c: &mut C| c.on_connection_info(info));
            }
            Inbound::Data { sender, frame } => self.receive_frame(sender, &frame),
        }
    }

    fn receive_frame(&self, sender: Option<PeerInfo>, frame: &[u8]) {
        let message = match self.codec.decode(frame) {
            Ok(message) => message,
            Err(e) => {
                debug!(error = %e, "dropping undecodable frame");
                self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        // Loopback frames and frames the transport couldn't attribute
        // are credited to our own connection.
        let Some(sender) = sender.or_else(|| self.client.local_peer()) else {
            debug!(data_id = message.data_id(), "no sender context, dropping");
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
            return;
        };

        match message {
            Message::Death(event) => {
                if !self.is_same_channel(&event.channel) {
                    trace!(
                        %sender,
                        channel = %event.channel,
                        "death event from another channel, dropping"
                    );
                    self.counters.dropped.fetch_add(1, Ordering::Relaxed);
                    return;
                }
                let delivery = Delivery {
                    sender,
                    message: event,
                };
                self.push(move |c: &mut C| c.on_death_event(delivery));
            }
            Message::PlayerState(update) => {
                let delivery = Delivery {
                    sender,
                    message: update,
                };
                self.push(move |c: &mut C| c.on_player_state(delivery));
            }
        }
    }

    fn push(&self, effect: impl FnOnce(&mut C) + Send + 'static) {
        if self.effects.enqueue(effect) {
            self.counters.received.fetch_add(1, Ordering::Relaxed);
        } else {
            self.counters.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn stats(&self) -> TransportStats {
        TransportStats {
            sent: self.counters.sent.load(Ordering::Relaxed),
            sent_state: self.counters.sent_state.load(Ordering::Relaxed),
            received: self.counters.received.load(Ordering::Relaxed),
            dropped: self.counters.dropped.load(Ordering::Relaxed),
        }
    }
}

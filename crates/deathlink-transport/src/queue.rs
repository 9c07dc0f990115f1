//! Deferred effects: the only bridge between the transport's receive
//! thread and the single-threaded tick.
//!
//! The receive side holds an [`EffectHandle`] and pushes closures; the
//! tick owns the [`EffectQueue`] and applies them. Pushing never blocks
//! and never takes a lock (it's an unbounded `tokio::sync::mpsc` channel,
//! used here without any runtime).

use tokio::sync::mpsc;

/// A deferred mutation of the consumer `C`.
pub type Effect<C> = Box<dyn FnOnce(&mut C) + Send>;

/// Creates a connected handle/queue pair.
pub fn effect_queue<C>() -> (EffectHandle<C>, EffectQueue<C>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EffectHandle { tx }, EffectQueue { rx })
}

/// The producer side. Cheap to clone, safe to use from any thread.
pub struct EffectHandle<C> {
    tx: mpsc::UnboundedSender<Effect<C>>,
}

// Derived `Clone` would require `C: Clone`.
impl<C> Clone for EffectHandle<C> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<C> EffectHandle<C> {
    /// Appends an effect. Returns `false` if the queue has been dropped,
    /// in which case the effect is discarded.
    pub fn enqueue(&self, effect: impl FnOnce(&mut C) + Send + 'static) -> bool {
        self.tx.send(Box::new(effect)).is_ok()
    }
}

/// The consumer side, owned by whoever runs the tick.
pub struct EffectQueue<C> {
    rx: mpsc::UnboundedReceiver<Effect<C>>,
}

impl<C> EffectQueue<C> {
    /// Takes every effect queued so far, leaving the queue empty.
    ///
    /// The batch size is fixed when the call starts; effects pushed while
    /// this runs are left for the next call. A consumer that owns its own
    /// queue can't hand itself to [`drain_and_apply`](Self::drain_and_apply)
    /// and applies the batch itself.
    pub fn take_pending(&mut self) -> Vec<Effect<C>> {
        let pending = self.rx.len();
        let mut batch = Vec::with_capacity(pending);
        while batch.len() < pending {
            match self.rx.try_recv() {
                Ok(effect) => batch.push(effect),
                Err(_) => break,
            }
        }
        batch
    }

    /// Applies every pending effect to `target` in enqueue order and
    /// returns how many ran.
    ///
    /// The entry point when the queue lives outside `target`, as with a
    /// bare adapter and a separate handler.
    pub fn drain_and_apply(&mut self, target: &mut C) -> usize {
        let batch = self.take_pending();
        let applied = batch.len();
        for effect in batch {
            effect(target);
        }
        applied
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    // =====================================================================
    // drain_and_apply()
    // =====================================================================

    #[test]
    fn test_drain_and_apply_empty_queue_is_noop() {
        let (_handle, mut queue) = effect_queue::<Vec<u32>>();
        let mut log = Vec::new();
        assert_eq!(queue.drain_and_apply(&mut log), 0);
        assert!(log.is_empty());
    }

    #[test]
    fn test_drain_and_apply_preserves_enqueue_order() {
        let (handle, mut queue) = effect_queue::<Vec<u32>>();
        for i in 0..5 {
            handle.enqueue(move |log: &mut Vec<u32>| log.push(i));
        }

        let mut log = Vec::new();
        assert_eq!(queue.drain_and_apply(&mut log), 5);
        assert_eq!(log, vec![0, 1, 2, 3, 4]);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_drain_and_apply_runs_each_effect_once() {
        let (handle, mut queue) = effect_queue::<u32>();
        handle.enqueue(|n: &mut u32| *n += 1);

        let mut count = 0;
        queue.drain_and_apply(&mut count);
        queue.drain_and_apply(&mut count);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_drain_and_apply_effect_enqueued_during_drain_waits() {
        let (handle, mut queue) = effect_queue::<Vec<&'static str>>();
        let inner = handle.clone();
        handle.enqueue(move |log: &mut Vec<&'static str>| {
            log.push("first");
            inner.enqueue(|log: &mut Vec<&'static str>| log.push("second"));
        });

        let mut log = Vec::new();
        assert_eq!(queue.drain_and_apply(&mut log), 1);
        assert_eq!(log, vec!["first"]);

        assert_eq!(queue.drain_and_apply(&mut log), 1);
        assert_eq!(log, vec!["first", "second"]);
    }

    // =====================================================================
    // take_pending()
    // =====================================================================

    #[test]
    fn test_take_pending_hands_back_batch_in_order() {
        let (handle, mut queue) = effect_queue::<Vec<u32>>();
        handle.enqueue(|log: &mut Vec<u32>| log.push(1));
        handle.enqueue(|log: &mut Vec<u32>| log.push(2));

        let batch = queue.take_pending();
        assert_eq!(batch.len(), 2);
        assert!(queue.is_empty());

        let mut log = Vec::new();
        for effect in batch {
            effect(&mut log);
        }
        assert_eq!(log, vec![1, 2]);
        assert!(queue.take_pending().is_empty());
    }

    // =====================================================================
    // enqueue()
    // =====================================================================

    #[test]
    fn test_enqueue_from_other_threads() {
        let (handle, mut queue) = effect_queue::<u32>();
        let workers: Vec<_> = (0..4)
            .map(|_| {
                let handle = handle.clone();
                thread::spawn(move || {
                    for _ in 0..25 {
                        handle.enqueue(|n: &mut u32| *n += 1);
                    }
                })
            })
            .collect();
        for worker in workers {
            worker.join().unwrap();
        }

        let mut total = 0;
        queue.drain_and_apply(&mut total);
        assert_eq!(total, 100);
    }

    #[test]
    fn test_enqueue_after_queue_dropped_returns_false() {
        let (handle, queue) = effect_queue::<u32>();
        drop(queue);
        assert!(!handle.enqueue(|n: &mut u32| *n += 1));
    }
}

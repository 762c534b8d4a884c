//! Bounded ring buffer of canonical host events.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::input::HostEvent;

/// Default slot count; one slot is always kept free.
pub const DEFAULT_CAPACITY: usize = 256;

/// Smallest usable slot count (holds a single live event).
pub const MIN_CAPACITY: usize = 2;

/// Counters describing queue traffic since creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueStats {
    /// Events accepted by `push`.
    pub pushed: u64,
    /// Events discarded because the queue was full.
    pub dropped: u64,
}

struct Ring {
    slots: Box<[Option<HostEvent>]>,
    head: usize,
    tail: usize,
}

impl Ring {
    fn next(&self, index: usize) -> usize {
        (index + 1) % self.slots.len()
    }

    fn is_full(&self) -> bool {
        self.next(self.tail) == self.head
    }

    fn len(&self) -> usize {
        (self.tail + self.slots.len() - self.head) % self.slots.len()
    }

    fn pop(&mut self) -> Option<HostEvent> {
        if self.head == self.tail {
            return None;
        }
        let event = self.slots[self.head].take();
        self.head = self.next(self.head);
        event
    }
}

/// Fixed-capacity FIFO shared between input producers and the tick pump.
///
/// A queue created with `capacity` slots holds at most `capacity - 1` events.
/// Pushing onto a full queue drops the new event and bumps the drop counter;
/// neither `push` nor `pop` ever waits.
///
/// The cursors live behind a mutex so producers on other threads can push
/// while the engine thread drains. Critical sections are a few index updates.
pub struct EventQueue {
    ring: Mutex<Ring>,
    pushed: AtomicU64,
    dropped: AtomicU64,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl EventQueue {
    /// Creates an empty queue with `capacity` slots (at least [`MIN_CAPACITY`]).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(MIN_CAPACITY);
        Self {
            ring: Mutex::new(Ring {
                slots: vec![None; capacity].into_boxed_slice(),
                head: 0,
                tail: 0,
            }),
            pushed: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Ring> {
        // A panicking producer cannot leave the cursors half-updated, so the
        // ring stays usable after poisoning.
        self.ring.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Appends `event`, returning `false` if the queue was full and the event
    /// was dropped.
    pub fn push(&self, event: HostEvent) -> bool {
        let mut ring = self.lock();
        if ring.is_full() {
            drop(ring);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }
        let tail = ring.tail;
        ring.slots[tail] = Some(event);
        ring.tail = ring.next(tail);
        drop(ring);
        self.pushed.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Removes and returns the oldest event, or `None` if the queue is empty.
    pub fn pop(&self) -> Option<HostEvent> {
        self.lock().pop()
    }

    /// Takes every queued event in FIFO order under a single lock.
    pub fn drain_pending(&self) -> Vec<HostEvent> {
        let mut ring = self.lock();
        let mut events = Vec::with_capacity(ring.len());
        while let Some(event) = ring.pop() {
            events.push(event);
        }
        events
    }

    /// Number of events currently queued.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Total slot count, including the reserved slot.
    pub fn capacity(&self) -> usize {
        self.lock().slots.len()
    }

    /// Snapshot of the push and drop counters.
    pub fn stats(&self) -> QueueStats {
        QueueStats {
            pushed: self.pushed.load(Ordering::Relaxed),
            dropped: self.dropped.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn key(code: i32) -> HostEvent {
        HostEvent::Key {
            code,
            pressed: true,
        }
    }

    #[test]
    fn pops_in_push_order() {
        let queue = EventQueue::new(16);
        let events: Vec<HostEvent> = (0..15).map(key).collect();
        for event in &events {
            assert!(queue.push(*event));
        }
        let popped: Vec<HostEvent> = std::iter::from_fn(|| queue.pop()).collect();
        assert_eq!(popped, events);
        assert!(queue.is_empty());
    }

    #[test]
    fn full_queue_drops_and_counts() {
        let queue = EventQueue::new(8);
        for code in 0..7 {
            assert!(queue.push(key(code)));
        }
        assert_eq!(queue.len(), 7);
        assert!(!queue.push(key(99)));
        assert!(!queue.push(key(100)));
        assert_eq!(queue.len(), 7);
        assert_eq!(
            queue.stats(),
            QueueStats {
                pushed: 7,
                dropped: 2
            }
        );
        // The dropped events never show up.
        let drained = queue.drain_pending();
        assert_eq!(drained, (0..7).map(key).collect::<Vec<_>>());
    }

    #[test]
    fn cursors_wrap_around() {
        let queue = EventQueue::new(4);
        for round in 0..10 {
            assert!(queue.push(key(round * 2)));
            assert!(queue.push(key(round * 2 + 1)));
            assert_eq!(queue.pop(), Some(key(round * 2)));
            assert_eq!(queue.pop(), Some(key(round * 2 + 1)));
            assert_eq!(queue.pop(), None);
        }
        assert_eq!(queue.stats().dropped, 0);
    }

    #[test]
    fn capacity_is_clamped_to_minimum() {
        let queue = EventQueue::new(0);
        assert_eq!(queue.capacity(), MIN_CAPACITY);
        assert!(queue.push(key(1)));
        assert!(!queue.push(key(2)));
    }

    #[test]
    fn pop_on_empty_returns_none() {
        let queue = EventQueue::default();
        assert_eq!(queue.pop(), None);
        assert!(queue.drain_pending().is_empty());
        assert_eq!(queue.capacity(), DEFAULT_CAPACITY);
    }

    #[test]
    fn producers_on_other_threads_never_exceed_capacity() {
        let queue = Arc::new(EventQueue::new(64));
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..100 {
                        queue.push(key(worker * 1000 + i));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let stats = queue.stats();
        assert_eq!(stats.pushed + stats.dropped, 400);
        assert_eq!(stats.pushed, 63);
        assert_eq!(queue.len(), 63);
    }

    #[test]
    fn per_producer_order_survives_interleaving() {
        let queue = Arc::new(EventQueue::new(1024));
        let handles: Vec<_> = (0..3)
            .map(|worker| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for i in 0..200 {
                        assert!(queue.push(key(worker * 1000 + i)));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut last = [-1; 3];
        for event in queue.drain_pending() {
            let HostEvent::Key { code, .. } = event else {
                panic!("unexpected event {event:?}");
            };
            let worker = (code / 1000) as usize;
            assert!(code % 1000 > last[worker]);
            last[worker] = code % 1000;
        }
        assert_eq!(last, [199; 3]);
    }
}

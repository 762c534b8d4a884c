//! Per-tick drain of the event queue into an engine sink.

use log::{debug, trace};

use super::queue::EventQueue;
use crate::engine::EventSink;
use crate::input::translate;

/// Batches a single pump takes before leaving the rest for the next tick.
pub const MAX_PUMP_BATCHES: usize = 16;

/// What a single pump delivered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PumpReport {
    /// Canonical events taken off the queue.
    pub canonical: usize,
    /// Native events handed to the sink after translation.
    pub delivered: usize,
}

/// Drains `queue`, translating each canonical event and posting the results
/// to `sink` in FIFO order.
///
/// Everything queued when the call starts is delivered. The queue lock is
/// released while the sink runs; events pushed meanwhile are picked up by
/// further batches, at most [`MAX_PUMP_BATCHES`] in total. Producers that keep
/// pace with the sink therefore cannot hold the pump forever; their leftover
/// events stay queued for the next call.
pub fn pump(queue: &EventQueue, sink: &mut impl EventSink) -> PumpReport {
    let mut report = PumpReport::default();
    for _ in 0..MAX_PUMP_BATCHES {
        let batch = queue.drain_pending();
        if batch.is_empty() {
            break;
        }
        report.canonical += batch.len();
        for event in &batch {
            translate(event, |native| {
                report.delivered += 1;
                sink.post_event(native);
            });
        }
    }

    if !queue.is_empty() {
        debug!(
            "Pump stopped after {} batches with {} event(s) still queued",
            MAX_PUMP_BATCHES,
            queue.len()
        );
    }
    if report.canonical > 0 {
        trace!(
            "Pumped {} host events into {} engine events",
            report.canonical, report.delivered
        );
    }
    report
}

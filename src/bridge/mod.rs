//! Event bridge between the host and the engine loop.
//!
//! Producers report input through an [`InputReporter`] from any thread; the
//! engine thread owns the [`Bridge`], which pumps the shared queue into the
//! engine once per tick and exposes the resulting framebuffer.

pub mod pump;
pub mod queue;


use std::path::PathBuf;
use std::sync::Arc;

use log::{debug, warn};

use crate::config::InputConfig;
use crate::engine::{Engine, EngineArgs, EngineError, Framebuffer, HostPlatform};
use crate::input::{HostEvent, Key};

pub use pump::{MAX_PUMP_BATCHES, PumpReport, pump};
pub use queue::{EventQueue, QueueStats};

/// Runtime options for a bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeOptions {
    /// Queue slot count; one slot stays free.
    pub queue_capacity: usize,
    /// Log a warning on the first dropped event and then every this many drops.
    pub drop_log_interval: u64,
}

impl Default for BridgeOptions {
    fn default() -> Self {
        Self {
            queue_capacity: queue::DEFAULT_CAPACITY,
            drop_log_interval: 64,
        }
    }
}

impl From<&InputConfig> for BridgeOptions {
    fn from(config: &InputConfig) -> Self {
        Self {
            queue_capacity: config.queue_capacity,
            drop_log_interval: config.drop_log_interval,
        }
    }
}

/// Cloneable producer handle onto a bridge's event queue.
///
/// Every `report_*` call returns immediately. When the queue is full the event
/// is dropped and `false` is returned; callers are free to ignore it.
#[derive(Clone)]
pub struct InputReporter {
    queue: Arc<EventQueue>,
    drop_log_interval: u64,
}

impl InputReporter {
    pub fn new(queue: Arc<EventQueue>, drop_log_interval: u64) -> Self {
        Self {
            queue,
            drop_log_interval: drop_log_interval.max(1),
        }
    }

    /// Queues an arbitrary canonical event.
    pub fn report(&self, event: HostEvent) -> bool {
        if self.queue.push(event) {
            return true;
        }
        let dropped = self.queue.stats().dropped;
        if dropped == 1 || dropped % self.drop_log_interval == 0 {
            warn!(
                "Input queue full ({} slots); dropped {} event(s) so far",
                self.queue.capacity(),
                dropped
            );
        }
        false
    }

    pub fn report_key_down(&self, code: i32) -> bool {
        self.report(HostEvent::Key {
            code,
            pressed: true,
        })
    }

    pub fn report_key_up(&self, code: i32) -> bool {
        self.report(HostEvent::Key {
            code,
            pressed: false,
        })
    }

    /// Reports a semantic key, converting it to its host code first.
    pub fn report_key(&self, key: Key, pressed: bool) -> bool {
        self.report(HostEvent::Key {
            code: key.host_code(),
            pressed,
        })
    }

    pub fn report_mouse_button(&self, index: i32, down: bool) -> bool {
        self.report(HostEvent::MouseButton {
            index,
            pressed: down,
        })
    }

    pub fn report_mouse_move_relative(&self, dx: f32, dy: f32) -> bool {
        self.report(HostEvent::MouseMoveRelative { dx, dy })
    }

    pub fn report_mouse_move_absolute(&self, x: f32, y: f32) -> bool {
        self.report(HostEvent::MouseMoveAbsolute { x, y })
    }

    pub fn report_mouse_wheel(&self, lines: f32) -> bool {
        self.report(HostEvent::Wheel { lines })
    }

    pub fn queue_stats(&self) -> QueueStats {
        self.queue.stats()
    }
}

/// Owns the engine and drives it one tick at a time.
///
/// Ticking takes `&mut self` while [`Bridge::framebuffer`] borrows `&self`,
/// so the host can never observe the pixel buffer mid-tick.
pub struct Bridge<E: Engine> {
    engine: E,
    platform: HostPlatform,
    reporter: InputReporter,
    ticks: u64,
}

impl<E: Engine> Bridge<E> {
    /// Creates the engine with an optional resource path and default options.
    pub fn create(engine: E, resource_path: Option<PathBuf>) -> Result<Self, EngineError> {
        Self::create_with(
            engine,
            &EngineArgs::with_iwad(resource_path),
            BridgeOptions::default(),
            HostPlatform::new(),
        )
    }

    /// Creates the engine with full start-up arguments.
    ///
    /// # Errors
    /// Returns whatever the engine reports from its own creation.
    pub fn create_with(
        mut engine: E,
        args: &EngineArgs,
        options: BridgeOptions,
        mut platform: HostPlatform,
    ) -> Result<Self, EngineError> {
        debug!("Creating engine with argv {:?}", args.to_argv());
        engine.create(args, &mut platform)?;

        let queue = Arc::new(EventQueue::new(options.queue_capacity));
        debug!("Input queue ready with {} slots", queue.capacity());

        Ok(Self {
            engine,
            platform,
            reporter: InputReporter::new(queue, options.drop_log_interval),
            ticks: 0,
        })
    }

    /// A producer handle that can be moved to other threads.
    pub fn reporter(&self) -> InputReporter {
        self.reporter.clone()
    }

    pub fn report_key_down(&self, code: i32) -> bool {
        self.reporter.report_key_down(code)
    }

    pub fn report_key_up(&self, code: i32) -> bool {
        self.reporter.report_key_up(code)
    }

    pub fn report_key(&self, key: Key, pressed: bool) -> bool {
        self.reporter.report_key(key, pressed)
    }

    pub fn report_mouse_button(&self, index: i32, down: bool) -> bool {
        self.reporter.report_mouse_button(index, down)
    }

    pub fn report_mouse_move_relative(&self, dx: f32, dy: f32) -> bool {
        self.reporter.report_mouse_move_relative(dx, dy)
    }

    pub fn report_mouse_move_absolute(&self, x: f32, y: f32) -> bool {
        self.reporter.report_mouse_move_absolute(x, y)
    }

    pub fn report_mouse_wheel(&self, lines: f32) -> bool {
        self.reporter.report_mouse_wheel(lines)
    }

    pub fn report(&self, event: HostEvent) -> bool {
        self.reporter.report(event)
    }

    /// Delivers every queued event to the engine without ticking it.
    pub fn pump(&mut self) -> PumpReport {
        pump(&self.reporter.queue, &mut self.engine)
    }

    /// Pumps pending input, then advances the engine by one tick.
    pub fn advance_one_tick(&mut self) -> PumpReport {
        let report = self.pump();
        self.engine.tick(&mut self.platform);
        self.ticks += 1;
        report
    }

    /// The engine's pixel buffer as of the last completed tick.
    pub fn framebuffer(&self) -> Framebuffer<'_> {
        self.engine.framebuffer()
    }

    /// Ticks advanced through this bridge.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn queue_stats(&self) -> QueueStats {
        self.reporter.queue_stats()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn platform(&self) -> &HostPlatform {
        &self.platform
    }
}

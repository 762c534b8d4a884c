//! Fixed-rate tick loop driving a bridge.
//!
//! A session feeds scripted input into the bridge, advances the engine at the
//! configured tick rate, and stops on a tick limit or when its quit flag is
//! raised (the binary wires SIGINT/SIGTERM to that flag).

pub mod script;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::bridge::Bridge;
use crate::engine::Engine;

pub use script::{InputScript, ScriptError, ScriptedEvent};

/// Pacing and stop conditions for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Ticks per second; 0 runs unpaced.
    pub tick_rate_hz: u32,
    /// Stop after this many ticks; `None` runs until the quit flag is set.
    pub max_ticks: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            tick_rate_hz: 35,
            max_ticks: None,
        }
    }
}

/// Totals for a finished session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    /// Host events taken off the queue.
    pub canonical_events: u64,
    /// Native events delivered to the engine.
    pub delivered_events: u64,
    /// Host events lost to a full queue.
    pub dropped_events: u64,
    /// Checksum of the final framebuffer.
    pub checksum: u64,
}

/// Tick loop over an owned bridge.
pub struct Session<E: Engine> {
    bridge: Bridge<E>,
    script: InputScript,
    options: SessionOptions,
    quit: Arc<AtomicBool>,
}

impl<E: Engine> Session<E> {
    pub fn new(bridge: Bridge<E>, options: SessionOptions) -> Self {
        Self {
            bridge,
            script: InputScript::default(),
            options,
            quit: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn with_script(mut self, script: InputScript) -> Self {
        self.script = script;
        self
    }

    /// Flag that stops the loop before the next tick once set.
    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit)
    }

    pub fn bridge(&self) -> &Bridge<E> {
        &self.bridge
    }

    pub fn into_bridge(self) -> Bridge<E> {
        self.bridge
    }

    fn tick_interval(&self) -> Option<Duration> {
        (self.options.tick_rate_hz > 0)
            .then(|| Duration::from_secs(1) / self.options.tick_rate_hz)
    }

    /// Runs ticks until the tick limit is reached or the quit flag is set.
    pub fn run(&mut self) -> RunSummary {
        let interval = self.tick_interval();
        let mut summary = RunSummary::default();
        let mut next_deadline = Instant::now();

        info!(
            "Running session at {} Hz{}",
            self.options.tick_rate_hz,
            self.options
                .max_ticks
                .map(|n| format!(" for {n} ticks"))
                .unwrap_or_default()
        );

        loop {
            if self.quit.load(Ordering::Relaxed) {
                info!("Quit requested; stopping after {} ticks", summary.ticks);
                break;
            }
            if self.options.max_ticks.is_some_and(|max| summary.ticks >= max) {
                break;
            }

            let reporter = self.bridge.reporter();
            for scripted in self.script.take_due(summary.ticks) {
                reporter.report(scripted.event);
            }

            let report = self.bridge.advance_one_tick();
            summary.ticks += 1;
            summary.canonical_events += report.canonical as u64;
            summary.delivered_events += report.delivered as u64;

            if let Some(interval) = interval {
                next_deadline += interval;
                let now = Instant::now();
                if next_deadline > now {
                    thread::sleep(next_deadline - now);
                } else {
                    // Running behind; don't try to catch up with a burst.
                    next_deadline = now;
                }
            }
        }

        summary.dropped_events = self.bridge.queue_stats().dropped;
        summary.checksum = self.bridge.framebuffer().checksum();
        if self.script.remaining() > 0 {
            debug!(
                "{} scripted event(s) were scheduled after the last tick",
                self.script.remaining()
            );
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::TestCardEngine;
    use crate::input::HostEvent;
    use crate::input::keymap::ENGINE_WHEEL_UP;
    use std::path::Path;

    fn unpaced(max_ticks: Option<u64>) -> SessionOptions {
        SessionOptions {
            tick_rate_hz: 0,
            max_ticks,
        }
    }

    fn test_bridge() -> Bridge<TestCardEngine> {
        Bridge::create(TestCardEngine::new(), None).unwrap()
    }

    #[test]
    fn runs_until_tick_limit() {
        let mut session = Session::new(test_bridge(), unpaced(Some(5)));
        let summary = session.run();
        assert_eq!(summary.ticks, 5);
        assert_eq!(session.bridge().ticks(), 5);
        assert_eq!(session.bridge().engine().tick_count(), 5);
        assert_eq!(summary.delivered_events, 0);
        assert_eq!(summary.checksum, session.bridge().framebuffer().checksum());
    }

    #[test]
    fn raised_quit_flag_stops_before_first_tick() {
        let mut session = Session::new(test_bridge(), unpaced(None));
        session.quit_flag().store(true, Ordering::Relaxed);
        let summary = session.run();
        assert_eq!(summary.ticks, 0);
    }

    #[test]
    fn scripted_events_land_on_their_tick() {
        let script = InputScript::parse(
            "[[event]]\ntick = 2\nkind = \"wheel\"\nlines = 1.0\n\n\
             [[event]]\ntick = 2\nkind = \"mouse_move_absolute\"\nx = 4.0\ny = 4.0\n",
            Path::new("inline.toml"),
        )
        .unwrap();

        let mut session = Session::new(test_bridge(), unpaced(Some(3))).with_script(script);
        let summary = session.run();

        assert_eq!(summary.ticks, 3);
        assert_eq!(summary.canonical_events, 2);
        assert_eq!(summary.delivered_events, 2);
        assert_eq!(session.bridge().engine().palette_shift(), 1);
        let last = session.bridge().engine().last_tick_events();
        assert_eq!(last.len(), 2);
        assert_eq!(last[0].data1, ENGINE_WHEEL_UP);
    }

    #[test]
    fn paced_session_takes_roughly_tick_interval() {
        let options = SessionOptions {
            tick_rate_hz: 200,
            max_ticks: Some(4),
        };
        let mut session = Session::new(test_bridge(), options);
        let started = Instant::now();
        session.run();
        assert!(started.elapsed() >= Duration::from_millis(15));
    }

    #[test]
    fn overflowing_script_reports_drops() {
        let events = (0..10)
            .map(|i| ScriptedEvent {
                tick: 0,
                event: HostEvent::Key {
                    code: 'a' as i32 + i,
                    pressed: true,
                },
            })
            .collect();
        let bridge = Bridge::create_with(
            TestCardEngine::new(),
            &crate::engine::EngineArgs::default(),
            crate::bridge::BridgeOptions {
                queue_capacity: 4,
                drop_log_interval: 1,
            },
            crate::engine::HostPlatform::new(),
        )
        .unwrap();

        let mut session =
            Session::new(bridge, unpaced(Some(1))).with_script(InputScript::new(events));
        let summary = session.run();
        assert_eq!(summary.canonical_events, 3);
        assert_eq!(summary.dropped_events, 7);
    }
}

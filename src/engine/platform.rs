//! Platform callbacks the engine invokes on its host.

use std::thread;
use std::time::{Duration, Instant};

use log::debug;

use super::stubs::Subsystems;

/// Hooks the engine calls back into during creation and ticking.
///
/// The host implements these; the engine never reaches the window system,
/// clock or audio stack any other way.
pub trait PlatformHooks {
    /// Called once while the engine is being created.
    fn init(&mut self);

    /// Called when the engine has finished rendering a frame.
    fn draw_frame(&mut self);

    /// Blocks the engine thread for `ms` milliseconds.
    fn sleep_ms(&mut self, ms: u32);

    /// Milliseconds since the platform was created; wraps after ~49 days.
    fn ticks_ms(&self) -> u32;

    /// Polled key input as `(pressed, key)`.
    fn poll_key(&mut self) -> Option<(bool, u8)>;

    fn set_window_title(&mut self, title: &str);

    /// Optional audio, music and joystick backends.
    fn subsystems(&mut self) -> &mut Subsystems;
}

/// Platform implementation backing a [`crate::bridge::Bridge`].
///
/// Presentation belongs to the host, so `draw_frame` only counts frames and
/// the window title is recorded for the host to apply. Input never arrives
/// through `poll_key`; it is pumped into the engine's event sink instead.
#[derive(Debug)]
pub struct HostPlatform {
    started: Instant,
    frames_drawn: u64,
    window_title: Option<String>,
    initialized: bool,
    subsystems: Subsystems,
}

impl Default for HostPlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl HostPlatform {
    pub fn new() -> Self {
        Self::with_subsystems(Subsystems::null())
    }

    pub fn with_subsystems(subsystems: Subsystems) -> Self {
        Self {
            started: Instant::now(),
            frames_drawn: 0,
            window_title: None,
            initialized: false,
            subsystems,
        }
    }

    /// Frames the engine has reported as drawn.
    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    /// Title most recently requested by the engine.
    pub fn window_title(&self) -> Option<&str> {
        self.window_title.as_deref()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl PlatformHooks for HostPlatform {
    fn init(&mut self) {
        debug!("Engine platform init");
        self.initialized = true;
    }

    fn draw_frame(&mut self) {
        self.frames_drawn += 1;
    }

    fn sleep_ms(&mut self, ms: u32) {
        thread::sleep(Duration::from_millis(u64::from(ms)));
    }

    fn ticks_ms(&self) -> u32 {
        self.started.elapsed().as_millis() as u32
    }

    fn poll_key(&mut self) -> Option<(bool, u8)> {
        None
    }

    fn set_window_title(&mut self, title: &str) {
        debug!("Engine requested window title: {}", title);
        self.window_title = Some(title.to_string());
    }

    fn subsystems(&mut self) -> &mut Subsystems {
        &mut self.subsystems
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_platform_records_engine_callbacks() {
        let mut platform = HostPlatform::new();
        assert!(!platform.is_initialized());
        platform.init();
        platform.set_window_title("E1M1");
        platform.draw_frame();
        platform.draw_frame();

        assert!(platform.is_initialized());
        assert_eq!(platform.window_title(), Some("E1M1"));
        assert_eq!(platform.frames_drawn(), 2);
        assert_eq!(platform.poll_key(), None);
    }

    #[test]
    fn ticks_advance_after_sleep() {
        let mut platform = HostPlatform::new();
        let before = platform.ticks_ms();
        platform.sleep_ms(5);
        assert!(platform.ticks_ms() >= before + 5);
    }
}

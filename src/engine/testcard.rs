//! Headless reference engine that renders a test card.
//!
//! Used by the binary when no real engine is linked in, and by tests that
//! need an [`Engine`] whose reaction to input is visible in its pixels.

use std::collections::BTreeSet;

use log::{debug, warn};

use super::{Engine, EngineArgs, EngineError, EventSink, Framebuffer, PlatformHooks};
use crate::input::keymap::{ENGINE_NO_KEY, ENGINE_WHEEL_DOWN, ENGINE_WHEEL_UP};
use crate::input::{NativeEvent, NativeEventKind};

/// Native framebuffer width.
pub const WIDTH: usize = 320;
/// Native framebuffer height.
pub const HEIGHT: usize = 200;

const CURSOR_SIZE: usize = 5;
const KEY_STRIP_HEIGHT: usize = 8;
const IDLE_CURSOR: u32 = 0x00FF_FFFF;
const PRESSED_CURSOR: u32 = 0x00FF_3030;
const HELD_KEY: u32 = 0x0030_FF30;

/// Test card engine.
///
/// Each tick it applies the events posted since the previous tick: keys are
/// held between keydown and keyup, the mouse mask replaces the button state,
/// motion moves a cursor, and wheel keys shift the background palette.
#[derive(Debug)]
pub struct TestCardEngine {
    created: bool,
    tick: u64,
    pending: Vec<NativeEvent>,
    last_tick_events: Vec<NativeEvent>,
    held_keys: BTreeSet<i32>,
    buttons: i32,
    cursor: (i32, i32),
    palette_shift: i32,
    sound_enabled: bool,
    pixels: Vec<u32>,
}

impl Default for TestCardEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCardEngine {
    pub fn new() -> Self {
        Self {
            created: false,
            tick: 0,
            pending: Vec::new(),
            last_tick_events: Vec::new(),
            held_keys: BTreeSet::new(),
            buttons: 0,
            cursor: (WIDTH as i32 / 2, HEIGHT as i32 / 2),
            palette_shift: 0,
            sound_enabled: false,
            pixels: vec![0; WIDTH * HEIGHT],
        }
    }

    /// Ticks completed since creation.
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Events consumed by the most recent tick, in delivery order.
    pub fn last_tick_events(&self) -> &[NativeEvent] {
        &self.last_tick_events
    }

    /// Engine keys currently held down.
    pub fn held_keys(&self) -> impl Iterator<Item = i32> + '_ {
        self.held_keys.iter().copied()
    }

    /// Mouse button mask from the latest mouse event.
    pub fn buttons(&self) -> i32 {
        self.buttons
    }

    pub fn cursor(&self) -> (i32, i32) {
        self.cursor
    }

    pub fn palette_shift(&self) -> i32 {
        self.palette_shift
    }

    /// Whether the sound probe at creation found a working device.
    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    fn apply(&mut self, event: NativeEvent) {
        match event.kind {
            NativeEventKind::KeyDown => match event.data1 {
                ENGINE_NO_KEY => {}
                ENGINE_WHEEL_UP => self.palette_shift += 1,
                ENGINE_WHEEL_DOWN => self.palette_shift -= 1,
                key => {
                    self.held_keys.insert(key);
                }
            },
            NativeEventKind::KeyUp => {
                self.held_keys.remove(&event.data1);
            }
            NativeEventKind::Mouse => {
                self.buttons = event.data1;
                self.cursor.0 = self
                    .cursor
                    .0
                    .saturating_add(event.data2)
                    .clamp(0, WIDTH as i32 - 1);
                self.cursor.1 = self
                    .cursor
                    .1
                    .saturating_add(event.data3)
                    .clamp(0, HEIGHT as i32 - 1);
            }
        }
    }

    fn render(&mut self) {
        let shift = (self.tick as i64 + i64::from(self.palette_shift) * 16) as u32;
        for y in 0..HEIGHT {
            let row = &mut self.pixels[y * WIDTH..(y + 1) * WIDTH];
            for (x, px) in row.iter_mut().enumerate() {
                let r = (x as u32).wrapping_add(shift) & 0xFF;
                let g = (y as u32 * 255 / (HEIGHT as u32 - 1)) & 0xFF;
                let b = shift & 0xFF;
                *px = (r << 16) | (g << 8) | b;
            }
        }

        for key in &self.held_keys {
            let x = (*key as usize) % WIDTH;
            for y in 0..KEY_STRIP_HEIGHT {
                self.pixels[y * WIDTH + x] = HELD_KEY;
            }
        }

        let color = if self.buttons != 0 {
            PRESSED_CURSOR
        } else {
            IDLE_CURSOR
        };
        let (cx, cy) = (self.cursor.0 as usize, self.cursor.1 as usize);
        for y in cy..(cy + CURSOR_SIZE).min(HEIGHT) {
            for x in cx..(cx + CURSOR_SIZE).min(WIDTH) {
                self.pixels[y * WIDTH + x] = color;
            }
        }
    }
}

impl EventSink for TestCardEngine {
    fn post_event(&mut self, event: NativeEvent) {
        self.pending.push(event);
    }
}

impl Engine for TestCardEngine {
    fn create(
        &mut self,
        args: &EngineArgs,
        platform: &mut dyn PlatformHooks,
    ) -> Result<(), EngineError> {
        if self.created {
            return Err(EngineError::AlreadyCreated);
        }
        if let Some(path) = args.resource_path() {
            if !path.exists() {
                return Err(EngineError::MissingResource(path.display().to_string()));
            }
        }
        if let Some(skill) = args.skill.filter(|skill| !(1..=5).contains(skill)) {
            return Err(EngineError::InitFailed(format!(
                "skill {skill} is outside 1-5"
            )));
        }
        if args.warp.len() > 2 || args.warp.contains(&0) {
            return Err(EngineError::InitFailed(format!(
                "invalid warp target {:?}",
                args.warp
            )));
        }
        debug!("Test card engine argv: {:?}", args.to_argv());

        platform.init();
        platform.set_window_title("Test card");

        let subsystems = platform.subsystems();
        subsystems.sound.init();
        subsystems.music.init();
        subsystems.joystick.bind_variables();
        subsystems.joystick.init();
        let probe = subsystems.sound.start_sound(0, 0, 128, 128);
        self.sound_enabled = probe.is_valid();
        if self.sound_enabled {
            subsystems.sound.stop_sound(probe);
        } else {
            debug!("No sound device; running silent");
        }

        self.created = true;
        self.render();
        Ok(())
    }

    fn tick(&mut self, platform: &mut dyn PlatformHooks) {
        if !self.created {
            warn!("Tick requested before the engine was created; ignoring");
            return;
        }

        let events = std::mem::take(&mut self.pending);
        for event in &events {
            self.apply(*event);
        }
        self.last_tick_events = events;

        self.tick += 1;
        self.render();
        platform.subsystems().sound.update();
        platform.draw_frame();
    }

    fn framebuffer(&self) -> Framebuffer<'_> {
        Framebuffer {
            pixels: &self.pixels,
            width: WIDTH,
            height: HEIGHT,
        }
    }
}

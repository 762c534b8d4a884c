//! Contracts with the external tick-driven engine.
//!
//! The engine owns game state and renders into its own pixel buffer. The
//! bridge drives it through [`Engine`], delivers input through [`EventSink`],
//! and answers its platform callbacks through [`PlatformHooks`].

pub mod args;
pub mod platform;
pub mod stubs;
pub mod testcard;

use thiserror::Error;

use crate::input::NativeEvent;

pub use args::EngineArgs;
pub use platform::{HostPlatform, PlatformHooks};
pub use stubs::{JoystickDevice, MusicDevice, SoundDevice, SoundHandle, Subsystems};
pub use testcard::TestCardEngine;

/// Errors surfaced while bringing an engine up.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("engine initialisation failed: {0}")]
    InitFailed(String),

    #[error("engine was already created")]
    AlreadyCreated,

    #[error("engine resource not found: {0}")]
    MissingResource(String),
}

/// Receiver for native input events.
pub trait EventSink {
    fn post_event(&mut self, event: NativeEvent);
}

impl EventSink for Vec<NativeEvent> {
    fn post_event(&mut self, event: NativeEvent) {
        self.push(event);
    }
}

/// A tick-driven engine the host cannot block.
pub trait Engine: EventSink {
    /// One-time start-up with the given argument vector.
    fn create(
        &mut self,
        args: &EngineArgs,
        platform: &mut dyn PlatformHooks,
    ) -> Result<(), EngineError>;

    /// Advances game state by one tick, consuming events posted since the
    /// previous tick.
    fn tick(&mut self, platform: &mut dyn PlatformHooks);

    /// The pixel buffer as of the last completed tick.
    fn framebuffer(&self) -> Framebuffer<'_>;
}

/// Read-only view of an engine pixel buffer.
///
/// Pixels are row-major packed `0x00RRGGBB` values.
#[derive(Debug, Clone, Copy)]
pub struct Framebuffer<'a> {
    pub pixels: &'a [u32],
    pub width: usize,
    pub height: usize,
}

impl<'a> Framebuffer<'a> {
    /// Wraps `pixels`, returning `None` when the dimensions are empty or do
    /// not match the buffer length.
    #[cfg(test)]
    pub fn new(pixels: &'a [u32], width: usize, height: usize) -> Option<Self> {
        if width == 0 || height == 0 || width.checked_mul(height)? != pixels.len() {
            return None;
        }
        Some(Self {
            pixels,
            width,
            height,
        })
    }

    /// Pixel at (x, y), or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels.get(y * self.width + x).copied()
    }

    /// FNV-1a hash over the pixel data; handy for comparing frames in logs.
    pub fn checksum(&self) -> u64 {
        self.pixels.iter().fold(0xcbf2_9ce4_8422_2325_u64, |hash, px| {
            px.to_le_bytes()
                .iter()
                .fold(hash, |h, b| (h ^ u64::from(*b)).wrapping_mul(0x0000_0100_0000_01b3))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framebuffer_rejects_mismatched_dimensions() {
        let pixels = vec![0u32; 12];
        assert!(Framebuffer::new(&pixels, 4, 3).is_some());
        assert!(Framebuffer::new(&pixels, 4, 4).is_none());
        assert!(Framebuffer::new(&pixels, 0, 3).is_none());
        assert!(Framebuffer::new(&[], 0, 0).is_none());
    }

    #[test]
    fn framebuffer_pixel_lookup() {
        let pixels: Vec<u32> = (0..6).collect();
        let fb = Framebuffer::new(&pixels, 3, 2).unwrap();
        assert_eq!(fb.pixel(0, 0), Some(0));
        assert_eq!(fb.pixel(2, 1), Some(5));
        assert_eq!(fb.pixel(3, 0), None);
        assert_eq!(fb.pixel(0, 2), None);
    }

    #[test]
    fn checksum_tracks_content() {
        let a = vec![1u32, 2, 3, 4];
        let b = vec![1u32, 2, 3, 5];
        let fa = Framebuffer::new(&a, 2, 2).unwrap();
        let fb = Framebuffer::new(&b, 2, 2).unwrap();
        assert_eq!(fa.checksum(), Framebuffer::new(&a, 2, 2).unwrap().checksum());
        assert_ne!(fa.checksum(), fb.checksum());
    }
}

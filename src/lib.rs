//! Headless host for a tick-driven game engine.
//!
//! Host input is reported as canonical [`HostEvent`]s through a bounded,
//! thread-safe queue. Once per engine tick the [`Bridge`] drains that queue,
//! translates each event into the engine's native records and advances the
//! engine, whose framebuffer the host can then present.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod engine;
pub mod input;
pub mod present;
pub mod session;

pub use bridge::{Bridge, BridgeOptions, InputReporter};
pub use config::Config;
pub use engine::{Engine, EngineArgs, EngineError, Framebuffer, TestCardEngine};
pub use input::{HostEvent, Key, NativeEvent};
pub use session::{RunSummary, Session, SessionOptions};

//! Input event model and translation.
//!
//! This module defines the canonical events the host reports, the native
//! records the engine consumes, and the fixed key mapping and translation
//! rules that connect the two.

pub mod events;
pub mod keymap;
pub mod translate;

// Re-export commonly used types at module level
pub use events::{HostEvent, Key, NativeEvent, NativeEventKind};
pub use translate::translate;

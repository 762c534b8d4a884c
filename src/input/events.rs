//! Canonical host events and the native records delivered to the engine.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::keymap;

/// An input occurrence as reported by the host, before any engine translation.
///
/// This is what the event queue stores. Translation into [`NativeEvent`]s
/// happens only when the queue is pumped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostEvent {
    /// Key press or release; `code` is in host key space (ASCII or a sentinel).
    Key { code: i32, pressed: bool },
    /// Mouse button press or release (0 = left, 1 = right, 2 = middle).
    MouseButton { index: i32, pressed: bool },
    /// Relative pointer motion, typically from a captured pointer.
    MouseMoveRelative { dx: f32, dy: f32 },
    /// Absolute pointer position. Accepted but not forwarded to the engine.
    MouseMoveAbsolute { x: f32, y: f32 },
    /// Wheel motion in lines; positive scrolls up.
    Wheel { lines: f32 },
}

/// Semantic host key, mapped onto the host code space by [`Key::host_code`].
///
/// Backends that do not already speak host codes map their native key
/// representation to these values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character; only ASCII 32..=126 survives mapping
    Char(char),
    /// Return/Enter key
    Enter,
    /// Escape key
    Escape,
    /// Arrow up
    Up,
    /// Arrow down
    Down,
    /// Arrow left
    Left,
    /// Arrow right
    Right,
    /// Space bar, bound to the engine's "use" action
    Space,
    /// Either Ctrl key, bound to the engine's "fire" action
    Ctrl,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Returns the host key code for this key.
    ///
    /// Non-ASCII characters and [`Key::Unknown`] return 0, which the engine
    /// receives as a harmless no-op key.
    pub fn host_code(self) -> i32 {
        match self {
            Key::Char(c) if (' '..='~').contains(&c) => c as i32,
            Key::Char(_) | Key::Unknown => 0,
            Key::Enter => keymap::HOST_ENTER,
            Key::Escape => keymap::HOST_ESCAPE,
            Key::Up => keymap::HOST_UP,
            Key::Down => keymap::HOST_DOWN,
            Key::Left => keymap::HOST_LEFT,
            Key::Right => keymap::HOST_RIGHT,
            Key::Space => keymap::HOST_USE,
            Key::Ctrl => keymap::HOST_FIRE,
        }
    }
}

/// Kind tag of a native engine event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeEventKind {
    KeyDown,
    KeyUp,
    Mouse,
}

/// Event record in the engine's native layout.
///
/// For key events `data1` is the engine key code. For mouse events `data1` is
/// the button mask and `data2`/`data3` are the x/y deltas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeEvent {
    pub kind: NativeEventKind,
    pub data1: i32,
    pub data2: i32,
    pub data3: i32,
}

impl NativeEvent {
    pub fn key_down(key: i32) -> Self {
        Self {
            kind: NativeEventKind::KeyDown,
            data1: key,
            data2: 0,
            data3: 0,
        }
    }

    pub fn key_up(key: i32) -> Self {
        Self {
            kind: NativeEventKind::KeyUp,
            data1: key,
            data2: 0,
            data3: 0,
        }
    }

    pub fn mouse(buttons: i32, dx: i32, dy: i32) -> Self {
        Self {
            kind: NativeEventKind::Mouse,
            data1: buttons,
            data2: dx,
            data3: dy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn semantic_keys_map_to_host_codes() {
        assert_eq!(Key::Char('w').host_code(), 'w' as i32);
        assert_eq!(Key::Char('~').host_code(), 126);
        assert_eq!(Key::Char('é').host_code(), 0);
        assert_eq!(Key::Char('\n').host_code(), 0);
        assert_eq!(Key::Enter.host_code(), keymap::HOST_ENTER);
        assert_eq!(Key::Space.host_code(), keymap::HOST_USE);
        assert_eq!(Key::Ctrl.host_code(), keymap::HOST_FIRE);
        assert_eq!(Key::Unknown.host_code(), 0);
    }

    #[test]
    fn host_event_deserializes_from_tagged_toml() {
        let event: HostEvent = toml::from_str("kind = \"wheel\"\nlines = -2.0").unwrap();
        assert_eq!(event, HostEvent::Wheel { lines: -2.0 });

        let event: HostEvent =
            toml::from_str("kind = \"mouse_button\"\nindex = 1\npressed = true").unwrap();
        assert_eq!(
            event,
            HostEvent::MouseButton {
                index: 1,
                pressed: true
            }
        );
    }
}

//! Fixed mapping from host key codes to engine key codes.
//!
//! Printable ASCII (32..=126) passes through unchanged. Non-printable keys are
//! reported by the host as sentinel codes well outside the ASCII range and are
//! mapped here onto the engine's semantic keys. Everything else becomes
//! [`ENGINE_NO_KEY`].

// ============================================================================
// Host Sentinels
// ============================================================================

pub const HOST_ENTER: i32 = 1000;
pub const HOST_ESCAPE: i32 = 1001;
pub const HOST_UP: i32 = 1100;
pub const HOST_DOWN: i32 = 1101;
pub const HOST_LEFT: i32 = 1102;
pub const HOST_RIGHT: i32 = 1103;
pub const HOST_USE: i32 = 1200;
pub const HOST_FIRE: i32 = 1201;

/// Every host sentinel paired with the engine key it maps to.
pub const SENTINELS: [(i32, i32); 8] = [
    (HOST_ENTER, ENGINE_ENTER),
    (HOST_ESCAPE, ENGINE_ESCAPE),
    (HOST_UP, ENGINE_UP_ARROW),
    (HOST_DOWN, ENGINE_DOWN_ARROW),
    (HOST_LEFT, ENGINE_LEFT_ARROW),
    (HOST_RIGHT, ENGINE_RIGHT_ARROW),
    (HOST_USE, ENGINE_USE),
    (HOST_FIRE, ENGINE_FIRE),
];

// ============================================================================
// Engine Key Codes
// ============================================================================

/// Delivered for unmapped host codes; the engine ignores it.
pub const ENGINE_NO_KEY: i32 = 0;
pub const ENGINE_ENTER: i32 = 13;
pub const ENGINE_ESCAPE: i32 = 27;
pub const ENGINE_LEFT_ARROW: i32 = 0xac;
pub const ENGINE_UP_ARROW: i32 = 0xad;
pub const ENGINE_RIGHT_ARROW: i32 = 0xae;
pub const ENGINE_DOWN_ARROW: i32 = 0xaf;
pub const ENGINE_USE: i32 = 0xa2;
pub const ENGINE_FIRE: i32 = 0xa3;
pub const ENGINE_PAGE_UP: i32 = 0x80 + 0x49;
pub const ENGINE_PAGE_DOWN: i32 = 0x80 + 0x51;

/// The engine has no dedicated wheel keys; wheel clicks arrive as paging keys.
pub const ENGINE_WHEEL_UP: i32 = ENGINE_PAGE_UP;
pub const ENGINE_WHEEL_DOWN: i32 = ENGINE_PAGE_DOWN;

/// Maps a host key code onto the engine key space.
pub fn host_to_engine(code: i32) -> i32 {
    if (32..=126).contains(&code) {
        return code;
    }
    match code {
        HOST_ENTER => ENGINE_ENTER,
        HOST_ESCAPE => ENGINE_ESCAPE,
        HOST_UP => ENGINE_UP_ARROW,
        HOST_DOWN => ENGINE_DOWN_ARROW,
        HOST_LEFT => ENGINE_LEFT_ARROW,
        HOST_RIGHT => ENGINE_RIGHT_ARROW,
        HOST_USE => ENGINE_USE,
        HOST_FIRE => ENGINE_FIRE,
        _ => ENGINE_NO_KEY,
    }
}

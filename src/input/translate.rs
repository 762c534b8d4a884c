//! Translation of canonical host events into native engine events.
//!
//! Translation is pure and stateless. It runs while the queue is pumped,
//! never at enqueue time, so the queue always holds canonical events.

use super::events::{HostEvent, NativeEvent};
use super::keymap;

/// Converts a mouse button index into the engine's button mask bit.
///
/// Left, right and middle map to 1, 2 and 4; any other index maps to 0.
pub fn button_mask(index: i32) -> i32 {
    match index {
        0 => 1,
        1 => 2,
        2 => 4,
        _ => 0,
    }
}

/// Number of whole wheel clicks in `lines`, ignoring the fractional part.
///
/// NaN and infinite deltas count as no motion.
pub fn wheel_clicks(lines: f32) -> u32 {
    if !lines.is_finite() {
        return 0;
    }
    // Float-to-int casts saturate, so even absurd finite deltas stay in range.
    lines.abs().trunc() as u32
}

/// Translates one canonical event, handing each native event to `emit` in
/// delivery order.
///
/// # Behavior
/// - Keys are mapped through [`keymap::host_to_engine`]
/// - A button press reports only that button's mask; any release reports 0
/// - Relative motion is truncated toward zero on both axes
/// - Absolute motion produces nothing
/// - Wheel motion produces adjacent keydown/keyup pairs, one pair per click
pub fn translate(event: &HostEvent, mut emit: impl FnMut(NativeEvent)) {
    match *event {
        HostEvent::Key { code, pressed } => {
            let key = keymap::host_to_engine(code);
            if pressed {
                emit(NativeEvent::key_down(key));
            } else {
                emit(NativeEvent::key_up(key));
            }
        }
        HostEvent::MouseButton { index, pressed } => {
            let buttons = if pressed { button_mask(index) } else { 0 };
            emit(NativeEvent::mouse(buttons, 0, 0));
        }
        HostEvent::MouseMoveRelative { dx, dy } => {
            emit(NativeEvent::mouse(0, dx as i32, dy as i32));
        }
        // Reserved for a future absolute-to-relative conversion.
        HostEvent::MouseMoveAbsolute { .. } => {}
        HostEvent::Wheel { lines } => {
            let key = if lines > 0.0 {
                keymap::ENGINE_WHEEL_UP
            } else {
                keymap::ENGINE_WHEEL_DOWN
            };
            for _ in 0..wheel_clicks(lines) {
                emit(NativeEvent::key_down(key));
                emit(NativeEvent::key_up(key));
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::events::NativeEventKind;
    use crate::input::keymap::{ENGINE_WHEEL_DOWN, ENGINE_WHEEL_UP};

    fn translate_to_vec(event: &HostEvent) -> Vec<NativeEvent> {
        let mut out = Vec::new();
        translate(event, |native| out.push(native));
        out
    }

    fn wheel_pairs(lines: f32) -> Vec<NativeEvent> {
        translate_to_vec(&HostEvent::Wheel { lines })
    }

    fn assert_pairs(events: &[NativeEvent], key: i32, pairs: usize) {
        assert_eq!(events.len(), pairs * 2);
        for pair in events.chunks(2) {
            assert_eq!(pair[0], NativeEvent::key_down(key));
            assert_eq!(pair[1], NativeEvent::key_up(key));
        }
    }

    #[test]
    fn wheel_up_expands_into_pairs() {
        assert_pairs(&wheel_pairs(3.0), ENGINE_WHEEL_UP, 3);
    }

    #[test]
    fn wheel_down_expands_into_pairs() {
        assert_pairs(&wheel_pairs(-2.0), ENGINE_WHEEL_DOWN, 2);
    }

    #[test]
    fn wheel_fraction_is_truncated() {
        assert_pairs(&wheel_pairs(1.9), ENGINE_WHEEL_UP, 1);
        assert!(wheel_pairs(0.0).is_empty());
        assert!(wheel_pairs(-0.7).is_empty());
    }

    #[test]
    fn wheel_rejects_non_finite_deltas() {
        assert!(wheel_pairs(f32::NAN).is_empty());
        assert!(wheel_pairs(f32::INFINITY).is_empty());
        assert!(wheel_pairs(f32::NEG_INFINITY).is_empty());
    }

    #[test]
    fn large_pixel_deltas_expand_in_full() {
        assert_pairs(&wheel_pairs(120.0), ENGINE_WHEEL_UP, 120);
        assert_pairs(&wheel_pairs(-250.5), ENGINE_WHEEL_DOWN, 250);
    }

    #[test]
    fn huge_finite_delta_saturates_click_count() {
        assert_eq!(wheel_clicks(1.0e30), u32::MAX);
        assert_eq!(wheel_clicks(-1.0e30), u32::MAX);
        assert_eq!(wheel_clicks(f32::MAX), u32::MAX);
    }

    #[test]
    fn key_translation_keeps_press_state() {
        let down = translate_to_vec(&HostEvent::Key {
            code: keymap::HOST_ESCAPE,
            pressed: true,
        });
        assert_eq!(down, vec![NativeEvent::key_down(keymap::ENGINE_ESCAPE)]);

        let up = translate_to_vec(&HostEvent::Key {
            code: 'a' as i32,
            pressed: false,
        });
        assert_eq!(up, vec![NativeEvent::key_up('a' as i32)]);
    }

    #[test]
    fn unmapped_key_is_still_delivered_as_no_key() {
        let events = translate_to_vec(&HostEvent::Key {
            code: 5000,
            pressed: true,
        });
        assert_eq!(events, vec![NativeEvent::key_down(keymap::ENGINE_NO_KEY)]);
    }

    #[test]
    fn button_release_clears_whole_mask() {
        let press = translate_to_vec(&HostEvent::MouseButton {
            index: 2,
            pressed: true,
        });
        assert_eq!(press, vec![NativeEvent::mouse(4, 0, 0)]);

        let release = translate_to_vec(&HostEvent::MouseButton {
            index: 2,
            pressed: false,
        });
        assert_eq!(release, vec![NativeEvent::mouse(0, 0, 0)]);
    }

    #[test]
    fn unknown_button_presses_empty_mask() {
        assert_eq!(button_mask(3), 0);
        assert_eq!(button_mask(-1), 0);
    }

    #[test]
    fn relative_motion_truncates_toward_zero() {
        let events = translate_to_vec(&HostEvent::MouseMoveRelative { dx: 2.9, dy: -3.7 });
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, NativeEventKind::Mouse);
        assert_eq!((events[0].data1, events[0].data2, events[0].data3), (0, 2, -3));
    }

    #[test]
    fn absolute_motion_is_dropped() {
        assert!(translate_to_vec(&HostEvent::MouseMoveAbsolute { x: 10.0, y: 20.0 }).is_empty());
    }
}

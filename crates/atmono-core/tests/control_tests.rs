use atmono_core::constants::LIGHT_BANK_SIZE;
use atmono_core::{fader_travel_px, light_opacity, rotary_degrees, thumb_offset_px, ControlState};

#[test]
fn rotary_drag_combines_axes_and_clamps() {
    let mut c = ControlState::with_value(0.5);
    c.begin_drag(100.0, 100.0);

    // +dx and -dy both increase: (dx - dy) * sensitivity
    let v = c.drag_rotary(120.0, 80.0).unwrap();
    assert!((v - (0.5 + 40.0 * 0.005)).abs() < 1e-6);

    // A wild move that maps to a raw value of 1.5 must clamp to exactly 1.0
    let v = c.drag_rotary(100.0 + 400.0, 100.0).unwrap();
    assert_eq!(v, 1.0);
    assert_eq!(c.value, 1.0);

    c.end_drag();
    assert!(!c.dragging);
    assert!(c.origin.is_none());
}

#[test]
fn rotary_move_outside_session_is_ignored() {
    let mut c = ControlState::with_value(0.2);
    assert!(c.drag_rotary(50.0, 50.0).is_none());
    assert_eq!(c.value, 0.2);
}

#[test]
fn drag_resumes_from_value_at_drag_start() {
    let mut c = ControlState::with_value(0.0);
    c.begin_drag(0.0, 0.0);
    c.drag_rotary(40.0, 0.0);
    c.end_drag();
    let first = c.value;

    // Second session adds on top of the first session's result.
    c.begin_drag(0.0, 0.0);
    c.drag_rotary(40.0, 0.0);
    assert!((c.value - first * 2.0).abs() < 1e-6);
}

#[test]
fn linear_drag_normalizes_by_travel() {
    let mut c = ControlState::with_value(0.0);
    c.begin_drag(0.0, 0.0);
    let v = c.drag_linear(50.0, 200.0).unwrap();
    assert!((v - 0.25).abs() < 1e-6);

    // Past the end of the track clamps
    let v = c.drag_linear(500.0, 200.0).unwrap();
    assert_eq!(v, 1.0);

    // Degenerate track is a no-op
    assert!(c.drag_linear(10.0, 0.0).is_none());
}

#[test]
fn toggle_flips_binary_state() {
    let mut c = ControlState::with_value(0.0);
    assert_eq!(c.toggle(), 1.0);
    assert_eq!(c.toggle(), 0.0);
    assert_eq!(c.toggle(), 1.0);
}

#[test]
fn mirror_update_clamps_and_does_not_touch_drag_state() {
    let mut c = ControlState::with_value(0.5);
    c.set_mirrored(1.5);
    assert_eq!(c.value, 1.0);
    assert!(!c.dragging);
}

#[test]
fn visual_mappings() {
    assert_eq!(rotary_degrees(0.0), 0.0);
    assert_eq!(rotary_degrees(1.0), 270.0);
    assert_eq!(rotary_degrees(2.0), 270.0); // clamped
    assert_eq!(thumb_offset_px(0.5, 120.0), 60.0);
    assert_eq!(fader_travel_px(200.0, 30.0), 170.0);
    assert_eq!(fader_travel_px(10.0, 30.0), 0.0);
}

#[test]
fn light_bank_selection_is_all_or_nothing() {
    // Selecting slot 3 lights exactly slot 3; every other slot is fully
    // transparent, never dimmed.
    for slot in 1..=LIGHT_BANK_SIZE {
        let expected = if slot == 3 { 1.0 } else { 0.0 };
        assert_eq!(light_opacity(3, slot), expected);
    }

    // Selection 0 darkens the whole bank.
    for slot in 1..=LIGHT_BANK_SIZE {
        assert_eq!(light_opacity(0, slot), 0.0);
    }
}

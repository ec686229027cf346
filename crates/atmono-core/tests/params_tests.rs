use atmono_core::constants::SMOOTHING_FACTOR;
use atmono_core::{Channel, SmoothedParams};

#[test]
fn defaults_match_startup_values() {
    let p = SmoothedParams::default();
    assert_eq!(p.current(Channel::MorphIntensity), 0.3);
    assert_eq!(p.current(Channel::MorphFrequency), 4.0);
    assert_eq!(p.current(Channel::NoiseFactor), 0.1);
    assert_eq!(p.current(Channel::BloomStrength), 0.5);
    assert_eq!(p.current(Channel::BloomRadius), 0.2);
    for ch in [
        Channel::MorphIntensity,
        Channel::MorphFrequency,
        Channel::NoiseFactor,
        Channel::BloomStrength,
        Channel::BloomRadius,
    ] {
        assert_eq!(p.current(ch), p.target(ch));
    }
}

#[test]
fn advance_converges_monotonically_toward_target() {
    let mut p = SmoothedParams::default();
    p.set_target(Channel::MorphIntensity, 1.0);

    let mut prev_err = (1.0 - p.current(Channel::MorphIntensity)).abs();
    for _ in 0..200 {
        p.advance();
        let err = (1.0 - p.current(Channel::MorphIntensity)).abs();
        assert!(err < prev_err, "error must shrink every step");
        prev_err = err;
    }
    assert!(prev_err < 1e-3);
}

#[test]
fn error_shrinks_by_one_minus_alpha_per_step() {
    let mut p = SmoothedParams::default();
    p.set_target(Channel::NoiseFactor, 2.0);

    for _ in 0..10 {
        let before = 2.0 - p.current(Channel::NoiseFactor);
        p.advance();
        let after = 2.0 - p.current(Channel::NoiseFactor);
        let ratio = after / before;
        assert!(
            (ratio - (1.0 - SMOOTHING_FACTOR)).abs() < 1e-5,
            "geometric shrink ratio off: {ratio}"
        );
    }
}

#[test]
fn set_target_is_unvalidated_passthrough() {
    // Out-of-range values pass through uncapped; the device pre-normalizes.
    let mut p = SmoothedParams::default();
    p.set_target(Channel::MorphFrequency, -40.0);
    assert_eq!(p.target(Channel::MorphFrequency), -40.0);
    for _ in 0..2000 {
        p.advance();
    }
    assert!((p.current(Channel::MorphFrequency) + 40.0).abs() < 1e-2);
}

#[test]
fn channels_advance_independently() {
    let mut p = SmoothedParams::default();
    p.set_target(Channel::MorphIntensity, 1.0);
    p.advance();
    assert_eq!(p.current(Channel::MorphFrequency), 4.0);
    assert_eq!(p.current(Channel::BloomStrength), 0.5);
}

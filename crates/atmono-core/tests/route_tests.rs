use atmono_core::{Action, Channel, InboundEvent, Router};

fn route_one(router: &mut Router, id: &str, value: f64) -> Vec<Action> {
    router.classify(id, value).into_iter().collect()
}

#[test]
fn both_stream_shapes_route_identically() {
    let mut r = Router::new();
    let a = r.route(&InboundEvent::Parameter {
        id: "morph".into(),
        value: 0.7,
    });
    let b = r.route(&InboundEvent::Message {
        tag: "morph".into(),
        payload: 0.7,
    });
    assert_eq!(a.as_slice(), b.as_slice());
    assert_eq!(
        a.as_slice(),
        &[Action::SetChannel(Channel::MorphIntensity, 0.7)]
    );
}

#[test]
fn continuous_identifiers_hit_the_parameter_store() {
    let mut r = Router::new();
    assert_eq!(
        route_one(&mut r, "morphFrequency", 6.0),
        vec![Action::SetChannel(Channel::MorphFrequency, 6.0)]
    );
    assert_eq!(
        route_one(&mut r, "noiseFactor", 0.25),
        vec![Action::SetChannel(Channel::NoiseFactor, 0.25)]
    );
    // bloom ids must not be swallowed by the `b` button prefix
    assert_eq!(
        route_one(&mut r, "bloomStrength", 1.2),
        vec![Action::SetChannel(Channel::BloomStrength, 1.2)]
    );
    assert_eq!(
        route_one(&mut r, "bloomRadius", 0.4),
        vec![Action::SetChannel(Channel::BloomRadius, 0.4)]
    );
}

#[test]
fn discrete_one_shots_carry_their_integer_payload() {
    let mut r = Router::new();
    assert_eq!(
        route_one(&mut r, "planetlight", 3.0),
        vec![Action::SatelliteGlow(3)]
    );
    assert_eq!(route_one(&mut r, "seqlight", 1.0), vec![Action::SpawnPlanet(1)]);
    assert_eq!(
        route_one(&mut r, "rndmblink", 0.0),
        vec![Action::RandomBlink(0)]
    );
    assert_eq!(route_one(&mut r, "grider", 1.0), vec![Action::OutlineFlash(1)]);
}

#[test]
fn sliders_mirror_without_redispatch() {
    let mut r = Router::new();
    assert_eq!(
        route_one(&mut r, "s1", 0.5),
        vec![Action::MirrorKnob {
            index: 0,
            value: 0.5
        }]
    );
    assert_eq!(
        route_one(&mut r, "s10", 0.9),
        vec![Action::MirrorKnob {
            index: 9,
            value: 0.9
        }]
    );
    // s11 is not a knob
    assert!(route_one(&mut r, "s11", 0.9).is_empty());
}

#[test]
fn buttons_mirror_as_binary_state() {
    let mut r = Router::new();
    assert_eq!(
        route_one(&mut r, "b4", 1.0),
        vec![Action::MirrorButton {
            id: "b4".into(),
            on: true
        }]
    );
    assert_eq!(
        route_one(&mut r, "rndm", 0.0),
        vec![Action::MirrorButton {
            id: "rndm".into(),
            on: false
        }]
    );
}

#[test]
fn rec_stop_transition_schedules_the_pull() {
    let mut r = Router::new();
    // 0 -> 1: mirror only
    assert_eq!(
        route_one(&mut r, "rec", 1.0),
        vec![Action::MirrorButton {
            id: "rec".into(),
            on: true
        }]
    );
    // 1 -> 0: mirror plus the delayed buffer pull
    assert_eq!(
        route_one(&mut r, "rec", 0.0),
        vec![
            Action::MirrorButton {
                id: "rec".into(),
                on: false
            },
            Action::PullRecording,
        ]
    );
    // 0 -> 0: no second pull
    assert_eq!(
        route_one(&mut r, "rec", 0.0),
        vec![Action::MirrorButton {
            id: "rec".into(),
            on: false
        }]
    );
}

#[test]
fn dedicated_fader_mirrors() {
    let mut r = Router::new();
    assert_eq!(route_one(&mut r, "vol", 0.3), vec![Action::MirrorVolume(0.3)]);
    assert_eq!(
        route_one(&mut r, "playstat", 0.75),
        vec![Action::MirrorPlaystat(0.75)]
    );
}

#[test]
fn glitchy_toggles_only_the_glitch_flag() {
    let mut r = Router::new();
    assert_eq!(route_one(&mut r, "glitchy", 1.0), vec![Action::SetGlitch(true)]);
    assert_eq!(
        route_one(&mut r, "glitchy", 0.0),
        vec![Action::SetGlitch(false)]
    );
}

#[test]
fn light_prefixed_identifiers_forward_bank_and_index() {
    let mut r = Router::new();
    assert_eq!(
        route_one(&mut r, "light1", 3.0),
        vec![Action::SetLights {
            bank: "light1".into(),
            index: 3
        }]
    );
    assert_eq!(
        route_one(&mut r, "light2", 0.0),
        vec![Action::SetLights {
            bank: "light2".into(),
            index: 0
        }]
    );
}

#[test]
fn trig16th_requests_one_scope_frame() {
    let mut r = Router::new();
    assert_eq!(route_one(&mut r, "trig16th", 1.0), vec![Action::ScopeFrame]);
}

#[test]
fn unrecognized_identifiers_yield_nothing() {
    let mut r = Router::new();
    assert!(route_one(&mut r, "nonsense", 1.0).is_empty());
    assert!(route_one(&mut r, "", 0.0).is_empty());
}

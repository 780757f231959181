// Host-side tests for keyboard ramps and toggles.

use sphere_core::{toggle_for_key, ControlAction, KeyboardControls, Modifiers, ParamId, ParamStore};

const FRAME: f32 = 1.0 / 60.0;

fn shift() -> Modifiers {
    Modifiers {
        shift: true,
        ..Modifiers::default()
    }
}

fn hold(controls: &KeyboardControls, store: &mut ParamStore, frames: usize) {
    for _ in 0..frames {
        controls.apply(store, FRAME);
    }
}

#[test]
fn toggle_keys_map_to_actions() {
    let none = Modifiers::default();
    assert_eq!(toggle_for_key('1', none), Some(ControlAction::ToggleEffectSetA));
    assert_eq!(toggle_for_key('2', none), Some(ControlAction::ToggleEffectSetB));
    assert_eq!(toggle_for_key('3', none), Some(ControlAction::AllEffectsOff));
    assert_eq!(toggle_for_key('4', none), Some(ControlAction::ToggleLayer(0)));
    assert_eq!(toggle_for_key('6', none), Some(ControlAction::ToggleLayer(2)));
    assert_eq!(toggle_for_key('0', none), Some(ControlAction::ResetToInitial));
    assert_eq!(toggle_for_key('p', none), Some(ControlAction::ToggleDebugReadout));
    assert_eq!(toggle_for_key('q', none), None);
}

#[test]
fn modifiers_gate_toggles() {
    assert_eq!(toggle_for_key('1', shift()), None);
    let ctrl = Modifiers {
        ctrl: true,
        ..Modifiers::default()
    };
    let meta = Modifiers {
        meta: true,
        ..Modifiers::default()
    };
    assert_eq!(toggle_for_key('r', ctrl), Some(ControlAction::ResetToInitial));
    assert_eq!(toggle_for_key('R', meta), Some(ControlAction::ResetToInitial));
    assert_eq!(toggle_for_key('r', Modifiers::default()), None);
}

#[test]
fn holding_q_ramps_particle_target() {
    let mut store = ParamStore::new();
    let mut controls = KeyboardControls::new();
    controls.key_down('q', Modifiers::default());
    hold(&controls, &mut store, 60);

    let target = store[ParamId::ParticleCount].target();
    assert!((target - 105_000.0).abs() < 1.0, "target {target}");
    assert_eq!(
        store[ParamId::ParticleCount].current(),
        100_000.0,
        "ramps only move the target"
    );
}

#[test]
fn shift_speeds_up_count_ramp_and_stops_at_bounds() {
    let mut store = ParamStore::new();
    let mut controls = KeyboardControls::new();
    store.set_value(ParamId::ParticleCount, 499_000.0);
    controls.key_down('Q', shift());
    assert!(controls.is_held('q'));
    hold(&controls, &mut store, 60);
    assert_eq!(store[ParamId::ParticleCount].target(), 500_000.0);

    controls.key_up('Q', shift());
    store.set_value(ParamId::ParticleCount, 12_000.0);
    controls.key_down('a', Modifiers::default());
    hold(&controls, &mut store, 60);
    assert_eq!(store[ParamId::ParticleCount].target(), 10_000.0);
}

#[test]
fn hue_ramp_wraps() {
    let mut store = ParamStore::new();
    let mut controls = KeyboardControls::new();
    store.set_value(ParamId::Hue, 0.99);
    controls.key_down('r', Modifiers::default());
    controls.apply(&mut store, 1.0);
    let hue = store[ParamId::Hue].target();
    assert!((hue - 0.01).abs() < 1e-5, "hue {hue}");

    controls.key_up('r', Modifiers::default());
    store.set_value(ParamId::Hue, 0.0);
    controls.key_down('f', Modifiers::default());
    controls.apply(&mut store, 1.0);
    let hue = store[ParamId::Hue].target();
    assert!((hue - 0.98).abs() < 1e-5, "hue {hue}");
}

#[test]
fn lightness_floor_and_rotation_ceiling() {
    let mut store = ParamStore::new();
    let mut controls = KeyboardControls::new();
    controls.key_down('d', Modifiers::default());
    controls.key_down('t', Modifiers::default());
    controls.apply(&mut store, 100.0);
    assert_eq!(store[ParamId::Lightness].target(), 0.2);
    assert_eq!(store[ParamId::RotationX].target(), 0.01);
}

#[test]
fn release_stops_ramps() {
    let mut store = ParamStore::new();
    let mut controls = KeyboardControls::new();
    controls.key_down('i', Modifiers::default());
    controls.key_down('z', Modifiers::default());
    controls.release_all();
    assert!(!controls.is_held('i'));
    hold(&controls, &mut store, 30);
    assert_eq!(store[ParamId::NoiseStrength].target(), 0.2);
    assert_eq!(store[ParamId::BloomStrength].target(), 0.8);
}

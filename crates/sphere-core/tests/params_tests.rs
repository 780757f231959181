// Host-side tests for the fixed-schema parameter store.

use sphere_core::{ParamId, ParamStore, PARAM_COUNT};

#[test]
fn schema_order_and_names_are_stable() {
    let names: Vec<&str> = ParamId::ALL.iter().map(|id| id.name()).collect();
    assert_eq!(names.len(), PARAM_COUNT);
    assert_eq!(
        names,
        [
            "particleCount",
            "hue",
            "saturation",
            "lightness",
            "rotationX",
            "rotationY",
            "noiseStrength",
            "colorCycleSpeed",
            "bloomStrength",
            "trailStrength",
            "warpStrength",
            "glitchStrength",
            "aberrationStrength",
        ]
    );
    for id in ParamId::ALL {
        assert_eq!(ParamId::from_name(id.name()), Some(id));
    }
    assert_eq!(ParamId::from_name("brightness"), None);
}

#[test]
fn store_starts_at_initial_values() {
    let store = ParamStore::new();
    for (id, entry) in store.iter() {
        assert_eq!(entry.current(), id.initial(), "{} current", id.name());
        assert_eq!(entry.target(), id.initial(), "{} target", id.name());
    }
    assert_eq!(store[ParamId::ParticleCount].current(), 100_000.0);
    assert_eq!(store[ParamId::Lightness].current(), 0.9);
    assert_eq!(store[ParamId::ParticleCount].smoothing(), 0.1);
    assert_eq!(store[ParamId::RotationY].smoothing(), 0.2);
}

#[test]
fn lookup_by_name() {
    let store = ParamStore::new();
    let bloom = store.lookup("bloomStrength").map(|e| e.current());
    assert_eq!(bloom, Some(0.8));
    assert!(store.lookup("BloomStrength").is_none());
}

#[test]
fn update_all_moves_every_entry_toward_its_target() {
    let mut store = ParamStore::new();
    store.set_target(ParamId::Hue, 1.0);
    store.set_target(ParamId::NoiseStrength, 1.0);
    store.update_all(1.0 / 60.0);

    let hue = store[ParamId::Hue].current();
    let noise = store[ParamId::NoiseStrength].current();
    assert!((hue - 0.15).abs() < 1e-4, "hue {hue}");
    assert!((noise - 0.28).abs() < 1e-4, "noise {noise}");
    assert_eq!(store[ParamId::Saturation].current(), 0.0);
}

#[test]
fn snapshot_is_detached_from_the_store() {
    let mut store = ParamStore::new();
    let before = store.values();
    store.set_value(ParamId::WarpStrength, 0.3);
    assert_eq!(before[ParamId::WarpStrength], 0.0);
    assert_eq!(store.values().get(ParamId::WarpStrength), 0.3);

    let pairs: Vec<(&str, f32)> = store.values().iter().collect();
    assert_eq!(pairs.len(), PARAM_COUNT);
    assert_eq!(pairs[0], ("particleCount", 100_000.0));
    assert_eq!(pairs[10], ("warpStrength", 0.3));
}

#[test]
fn reset_restores_current_and_target() {
    let mut store = ParamStore::new();
    store.set_value(ParamId::ParticleCount, 300_000.0);
    store.set_target(ParamId::Saturation, 1.0);
    store[ParamId::RotationX].set_value(-0.01);

    store.reset_to_initial();

    for (id, entry) in store.iter() {
        assert_eq!(entry.current(), id.initial());
        assert_eq!(entry.target(), id.initial());
    }
}

#[test]
fn overridden_startup_values_survive_reset() {
    let mut store = ParamStore::with_initial([
        (ParamId::ParticleCount, 2_000.0),
        (ParamId::NoiseStrength, 0.9),
    ]);
    assert_eq!(store.initial(ParamId::ParticleCount), 2_000.0);
    assert_eq!(store[ParamId::NoiseStrength].current(), 0.9);
    assert_eq!(store.initial(ParamId::Lightness), ParamId::Lightness.initial());

    store.set_value(ParamId::ParticleCount, 40_000.0);
    store.set_target(ParamId::NoiseStrength, 0.1);
    store.reset_to_initial();

    assert_eq!(store[ParamId::ParticleCount].current(), 2_000.0);
    assert_eq!(store[ParamId::NoiseStrength].target(), 0.9);
    assert_eq!(store[ParamId::Lightness].current(), 0.9);
}

// Host-side tests for the fixed-capacity point sphere: layout, level of
// detail, and the attach/sync/dispose hand-off.

use std::ops::Range;

use sphere_core::{
    fibonacci_point, fibonacci_sphere, resample_indices, ConstellationConfig, CoreError,
    Lifecycle, NoiseConfig, PointAttributes, PointBuffers, PointUniforms, QualityScaleTarget,
    SphereConfig, SpherePointCloud,
};

#[derive(Default)]
struct Recorder {
    attribute_writes: Vec<usize>,
    index_writes: Vec<Vec<u32>>,
    ranges: Vec<Range<u32>>,
    uniform_writes: usize,
    releases: usize,
}

impl PointBuffers for Recorder {
    fn write_attributes(&mut self, attributes: &PointAttributes) {
        self.attribute_writes.push(attributes.len());
    }

    fn write_indices(&mut self, indices: &[u32]) {
        self.index_writes.push(indices.to_vec());
    }

    fn set_draw_range(&mut self, range: Range<u32>) {
        self.ranges.push(range);
    }

    fn write_uniforms(&mut self, _uniforms: &PointUniforms) {
        self.uniform_writes += 1;
    }

    fn release(&mut self) {
        self.releases += 1;
    }
}

fn sphere(initial: u32, min: u32, max: u32) -> SpherePointCloud {
    let config = SphereConfig {
        initial_count: initial,
        min_count: min,
        max_count: max,
        ..SphereConfig::default()
    };
    SpherePointCloud::new(config, NoiseConfig::default(), ConstellationConfig::default(), 7)
        .expect("valid sphere config")
}

#[test]
fn fibonacci_layout_spans_pole_to_pole() {
    let r = 2.5;
    let points = fibonacci_sphere(1_000, r);
    assert_eq!(points.len(), 1_000);
    assert!((points[0].y - r).abs() < 1e-5);
    assert!((points[999].y + r).abs() < 1e-5);
    for p in &points {
        assert!((p.length() - r).abs() < 1e-4, "point off sphere: {p}");
    }
}

#[test]
fn single_point_sits_at_the_north_pole() {
    let p = fibonacci_point(0, 1, 2.0);
    assert_eq!(p.to_array(), [0.0, 2.0, 0.0]);
}

#[test]
fn resampling_picks_evenly_spaced_indices() {
    let mut indices = vec![99u32; 5];
    resample_indices(&mut indices, 3);
    assert_eq!(&indices[..3], &[0, 1, 3]);
    assert_eq!(&indices[3..], &[99, 99], "inactive tail is untouched");
}

#[test]
fn resampling_at_capacity_is_identity() {
    let mut indices = vec![0u32; 1_000];
    resample_indices(&mut indices, 1_000);
    assert!(indices.iter().enumerate().all(|(i, &v)| v == i as u32));

    resample_indices(&mut indices, 5_000);
    assert!(indices.iter().enumerate().all(|(i, &v)| v == i as u32));
}

#[test]
fn resampled_prefix_is_strictly_increasing() {
    let mut indices = vec![0u32; 500_000];
    for n in [10_000u32, 40_000, 123_457, 499_999] {
        resample_indices(&mut indices, n);
        let prefix = &indices[..n as usize];
        assert!(prefix.windows(2).all(|w| w[0] < w[1]), "n = {n}");
        assert!(prefix.last().is_some_and(|&v| v < 500_000));
    }
}

#[test]
fn construction_rejects_bad_ranges() {
    let bad_capacity = SphereConfig {
        max_count: 0,
        ..SphereConfig::default()
    };
    let err = SpherePointCloud::new(
        bad_capacity,
        NoiseConfig::default(),
        ConstellationConfig::default(),
        1,
    )
    .err();
    assert_eq!(err, Some(CoreError::InvalidCapacity { max_count: 0 }));

    let inverted = SphereConfig {
        min_count: 20,
        max_count: 10,
        ..SphereConfig::default()
    };
    let err = SpherePointCloud::new(
        inverted,
        NoiseConfig::default(),
        ConstellationConfig::default(),
        1,
    )
    .err();
    assert_eq!(err, Some(CoreError::InvalidCountRange { min: 20, max: 10 }));
}

#[test]
fn zero_minimum_is_raised_to_one() {
    let mut cloud = sphere(3, 0, 5);
    assert_eq!(cloud.min_count(), 1);
    cloud.set_particle_count(0.0);
    assert_eq!(cloud.count(), 1);
}

#[test]
fn construction_allocates_capacity_and_draws_initial_count() {
    let cloud = sphere(3, 1, 5);
    assert_eq!(cloud.attributes().len(), 5);
    assert_eq!(cloud.index_buffer().len(), 5);
    assert_eq!(cloud.indices(), &[0, 1, 3]);
    assert_eq!(cloud.draw_range(), 0..3);
    assert_eq!(cloud.lifecycle(), Lifecycle::Pending);
}

#[test]
fn particle_count_is_rounded_and_clamped() {
    let mut cloud = sphere(50, 10, 100);
    cloud.set_particle_count(42.6);
    assert_eq!(cloud.count(), 43);
    cloud.set_particle_count(1e9);
    assert_eq!(cloud.count(), 100);
    cloud.set_particle_count(-5.0);
    assert_eq!(cloud.count(), 10);
    cloud.set_particle_count(f32::NAN);
    assert_eq!(cloud.count(), 10);
}

#[test]
fn quality_scale_multiplies_desired_count() {
    let mut cloud = SpherePointCloud::new(
        SphereConfig::default(),
        NoiseConfig::default(),
        ConstellationConfig::default(),
        3,
    )
    .expect("default sphere");
    assert_eq!(cloud.count(), 100_000);

    cloud.set_quality_scale(0.6);
    assert_eq!(cloud.count(), 60_000);
    assert_eq!(cloud.desired_count(), 100_000);

    cloud.set_quality_scale(0.0);
    assert_eq!(cloud.quality_scale(), 0.1);
    assert_eq!(cloud.count(), 10_000);

    cloud.set_quality_scale(f32::NAN);
    assert_eq!(cloud.quality_scale(), 0.1);

    cloud.set_quality_scale(7.0);
    assert_eq!(cloud.quality_scale(), 1.0);
    assert_eq!(cloud.count(), 100_000);

    // scaled below the floor clamps to the floor
    cloud.set_particle_count(10_000.0);
    cloud.set_quality_scale(0.4);
    assert_eq!(cloud.count(), 10_000);
    assert_eq!(cloud.effective_count(), 10_000);
}

#[test]
fn quality_target_trait_reaches_the_cloud() {
    let mut cloud = sphere(100, 1, 100);
    let target: &mut dyn QualityScaleTarget = &mut cloud;
    target.set_quality_scale(0.5);
    assert_eq!(cloud.count(), 50);
}

#[test]
fn attach_uploads_everything_recorded_so_far() {
    let mut cloud = sphere(3, 1, 5);
    cloud.set_particle_count(5.0);
    let mut gpu = Recorder::default();
    cloud.attach(&mut gpu).expect("attach");

    assert!(cloud.is_ready());
    assert_eq!(gpu.attribute_writes, [5]);
    assert_eq!(gpu.index_writes, [vec![0, 1, 2, 3, 4]]);
    assert_eq!(gpu.ranges, [0..5]);
    assert_eq!(gpu.uniform_writes, 1);
}

#[test]
fn sync_before_attach_is_rejected() {
    let mut cloud = sphere(3, 1, 5);
    let mut gpu = Recorder::default();
    assert_eq!(cloud.sync(&mut gpu), Err(CoreError::NotReady));
    assert!(gpu.index_writes.is_empty());
    assert_eq!(gpu.uniform_writes, 0);
}

#[test]
fn sync_uploads_indices_only_when_count_changes() {
    let mut cloud = sphere(3, 1, 5);
    let mut gpu = Recorder::default();
    cloud.attach(&mut gpu).expect("attach");

    cloud.sync(&mut gpu).expect("sync");
    assert_eq!(gpu.index_writes.len(), 1);
    assert_eq!(gpu.uniform_writes, 2);

    cloud.set_particle_count(3.0);
    cloud.sync(&mut gpu).expect("sync");
    assert_eq!(gpu.index_writes.len(), 1, "same count is a no-op");

    cloud.set_particle_count(2.0);
    cloud.sync(&mut gpu).expect("sync");
    assert_eq!(gpu.index_writes.last(), Some(&vec![0, 2]));
    assert_eq!(gpu.ranges.last(), Some(&(0..2)));
}

#[test]
fn dispose_is_idempotent_and_final() {
    let mut cloud = sphere(3, 1, 5);
    let mut gpu = Recorder::default();
    cloud.attach(&mut gpu).expect("attach");

    cloud.dispose(Some(&mut gpu));
    cloud.dispose(Some(&mut gpu));
    cloud.dispose(None);
    assert_eq!(gpu.releases, 1);
    assert_eq!(cloud.lifecycle(), Lifecycle::Disposed);
    assert!(cloud.attributes().is_empty());
    assert!(cloud.indices().is_empty());

    assert_eq!(cloud.sync(&mut gpu), Err(CoreError::Disposed));
    assert_eq!(cloud.attach(&mut gpu), Err(CoreError::Disposed));

    cloud.set_particle_count(5.0);
    cloud.set_quality_scale(0.5);
    cloud.update(1.0, 0.016);
    assert_eq!(cloud.count(), 3);
}

#[test]
fn dispose_before_attach_releases_nothing() {
    let mut cloud = sphere(3, 1, 5);
    let mut gpu = Recorder::default();
    cloud.dispose(Some(&mut gpu));
    assert_eq!(gpu.releases, 0);
    assert_eq!(cloud.lifecycle(), Lifecycle::Disposed);
}

#[test]
fn rotation_accumulates_per_nominal_frame() {
    let mut cloud = sphere(3, 1, 5);
    cloud.set_rotation(0.01, -0.02);
    cloud.update(0.0, 1.0 / 60.0);
    cloud.update(0.0, 1.0 / 60.0);
    let r = cloud.rotation();
    assert!((r.x - 0.02).abs() < 1e-6 && (r.y + 0.04).abs() < 1e-6, "{r}");
}

#[test]
fn appearance_setters_clamp() {
    let mut cloud = sphere(3, 1, 5);
    cloud.set_hsl(1.25, 2.0, -1.0);
    assert_eq!(cloud.hsl(), [0.25, 1.0, 0.0]);
    cloud.set_noise_strength(3.0);
    assert_eq!(cloud.noise_strength(), 1.0);
    cloud.set_color_cycle_speed(-1.0);
    assert_eq!(cloud.color_cycle_speed(), 0.0);
    cloud.set_color_cycle_speed(9.0);
    assert_eq!(cloud.color_cycle_speed(), 2.0);
    cloud.set_opacity(1.5);
    assert_eq!(cloud.uniforms().opacity, 1.0);
}

#[test]
fn hue_drifts_with_time_and_speed() {
    let mut cloud = sphere(3, 1, 5);
    cloud.set_hsl(0.0, 1.0, 0.5);
    cloud.set_color_cycle_speed(1.0);
    cloud.update(0.0, 0.0);
    let red = cloud.color();
    assert!((red[0] - 1.0).abs() < 1e-5 && red[1].abs() < 1e-5);

    // a third of the way round after 20 s at speed 1
    cloud.update(20.0, 0.0);
    let green = cloud.color();
    assert!((green[1] - 1.0).abs() < 1e-4 && green[0].abs() < 1e-4, "{green:?}");

    cloud.set_color_cycle_speed(0.0);
    cloud.update(20.0, 0.0);
    assert!((cloud.color()[0] - 1.0).abs() < 1e-5);
}

#[test]
fn star_attributes_are_seeded_and_in_range() {
    let a = sphere(100, 1, 2_000);
    let b = sphere(100, 1, 2_000);
    assert_eq!(a.attributes().color_classes, b.attributes().color_classes);
    assert_eq!(a.attributes().brightness, b.attributes().brightness);

    let attrs = a.attributes();
    assert!(attrs.color_classes.iter().all(|&c| c < 5));
    assert!(attrs.brightness.iter().all(|&v| (0.3..=1.0).contains(&v)));
    assert!(attrs.twinkle_phases.iter().all(|&v| (0.0..1.0).contains(&v)));
    // the most likely class shows up
    assert!(attrs.color_classes.iter().any(|&c| c == 2));
}

#[test]
fn uniform_block_layout() {
    assert_eq!(std::mem::size_of::<PointUniforms>(), 240);
    assert_eq!(std::mem::size_of::<PointUniforms>() % 16, 0);

    let mut cloud = sphere(3, 1, 5);
    cloud.set_opacity(0.25);
    cloud.update(4.0, 0.0);
    let u = cloud.uniforms();
    assert_eq!(u.opacity, 0.25);
    assert_eq!(u.time, 4.0);
    assert_eq!(u.noise_strength, 0.2);
}

use super::*;

#[test]
fn zero_elevation_has_zero_radius() {
    let r = blur_radius(0.0, 1.0).unwrap();
    assert_eq!(r, BlurRadius::ZERO);
    assert!(r.is_zero());
    assert_eq!(r.ceil_px(), 0);
}

#[test]
fn half_of_max_elevation_maps_to_half_radius() {
    let r = blur_radius(12.0, 1.0).unwrap();
    assert_eq!(r.get(), 12.5);
    assert_eq!(r.ceil_px(), 13);
    assert_eq!(r.trunc_px(), 12);
}

#[test]
fn radius_saturates_at_and_beyond_max_elevation() {
    for density in [1.0f32, 1.5, 2.0, 3.0] {
        for e in [24.0f32, 30.0, 100.0, 1.0e6] {
            let r = blur_radius(e * density, density).unwrap();
            assert_eq!(r.get(), MAX_BLUR_RADIUS, "e={e} density={density}");
        }
    }
}

#[test]
fn radius_is_monotonic_in_elevation() {
    let mut prev = BlurRadius::ZERO;
    for step in 0..=400 {
        let e = step as f32 * 0.125;
        let r = blur_radius(e, 2.0).unwrap();
        assert!(r >= prev, "radius decreased at e={e}");
        prev = r;
    }
}

#[test]
fn density_scales_the_saturation_point() {
    let r1 = blur_radius(24.0, 1.0).unwrap();
    let r2 = blur_radius(24.0, 2.0).unwrap();
    assert_eq!(r1.get(), 25.0);
    assert_eq!(r2.get(), 12.5);
}

#[test]
fn non_positive_density_is_rejected() {
    for d in [0.0f32, -1.0, f32::NAN, f32::INFINITY] {
        assert!(matches!(
            blur_radius(4.0, d),
            Err(ShadowError::InvalidDensity(_))
        ));
    }
    assert!(dp_to_px(1.0, 0.0).is_err());
    assert_eq!(dp_to_px(8.0, 2.5).unwrap(), 20.0);
}

#[test]
fn blur_radius_new_clamps_and_sanitizes() {
    assert_eq!(BlurRadius::new(-3.0), BlurRadius::ZERO);
    assert_eq!(BlurRadius::new(90.0).get(), MAX_BLUR_RADIUS);
    assert_eq!(BlurRadius::new(f32::NAN), BlurRadius::ZERO);
}

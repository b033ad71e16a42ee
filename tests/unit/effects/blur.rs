use super::*;

fn run(src: &[u8], w: u32, h: u32, radius: f32, parallel: bool) -> Vec<u8> {
    let kernel = gaussian_kernel_q16(BlurRadius::new(radius));
    let mut dst = vec![0u8; src.len()];
    let mut tmp = vec![0u8; src.len()];
    blur_rgba8_q16(src, &mut dst, &mut tmp, w, h, &kernel, parallel);
    dst
}

#[test]
fn kernel_sums_to_q16_one_for_every_supported_radius() {
    for tenths in 0..=250 {
        let r = BlurRadius::new(tenths as f32 / 10.0);
        let k = gaussian_kernel_q16(r);
        assert_eq!(k.len(), 2 * r.ceil_px() as usize + 1);
        assert_eq!(k.iter().map(|&v| u64::from(v)).sum::<u64>(), 65536);
    }
}

#[test]
fn kernel_is_symmetric_and_peaks_in_the_middle() {
    let k = gaussian_kernel_q16(BlurRadius::new(6.0));
    let mid = k.len() / 2;
    for i in 0..mid {
        assert!(k[i] <= k[i + 1]);
    }
    let mirrored: Vec<u32> = k.iter().rev().copied().collect();
    assert_eq!(k, mirrored);
}

#[test]
fn every_kernel_is_exactly_symmetric() {
    for tenths in 1..=250 {
        let r = BlurRadius::new(tenths as f32 / 10.0);
        let k = gaussian_kernel_q16(r);
        let mirrored: Vec<u32> = k.iter().rev().copied().collect();
        assert_eq!(k, mirrored, "r={}", r.get());
    }
}

#[test]
fn zero_radius_kernel_is_a_single_unit_tap() {
    assert_eq!(gaussian_kernel_q16(BlurRadius::ZERO), vec![65536]);
}

#[test]
fn sigma_follows_radius() {
    assert_eq!(sigma_for_radius(BlurRadius::ZERO), 0.6);
    assert!((sigma_for_radius(BlurRadius::new(10.0)) - 4.6).abs() < 1e-5);
}

#[test]
fn blur_radius_0_is_identity() {
    let src = vec![1u8, 2, 3, 4, 5, 6, 7, 8];
    assert_eq!(run(&src, 1, 2, 0.0, false), src);
}

#[test]
fn blur_constant_image_is_identity() {
    let (w, h) = (4u32, 3u32);
    let src = [10u8, 20, 30, 40].repeat((w * h) as usize);
    assert_eq!(run(&src, w, h, 3.0, false), src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let (w, h) = (9u32, 9u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    let center = ((4 * w + 4) * 4) as usize;
    src[center..center + 4].copy_from_slice(&[255, 255, 255, 255]);

    let out = run(&src, w, h, 1.5, false);

    let nonzero = out.chunks_exact(4).filter(|px| px[3] != 0).count();
    assert!(nonzero > 1);

    let sum_a: u32 = out.chunks_exact(4).map(|px| u32::from(px[3])).sum();
    assert!((sum_a as i32 - 255).abs() <= 8);
}

#[test]
fn parallel_rows_match_serial_output() {
    let (w, h) = (23u32, 17u32);
    let src: Vec<u8> = (0..w * h)
        .flat_map(|i| {
            let a = ((i * 37) % 256) as u8;
            [a / 3, a / 2, a / 4, a]
        })
        .collect();

    for r in [0.5f32, 2.0, 7.3, 25.0] {
        assert_eq!(run(&src, w, h, r, false), run(&src, w, h, r, true), "r={r}");
    }
}

#[test]
fn repeated_blur_is_bit_identical() {
    let (w, h) = (12u32, 8u32);
    let mut src = vec![0u8; (w * h * 4) as usize];
    for px in src.chunks_exact_mut(4).step_by(5) {
        px.copy_from_slice(&[0, 0, 0, 102]);
    }
    let a = run(&src, w, h, 4.2, true);
    let b = run(&src, w, h, 4.2, true);
    assert_eq!(a, b);
}

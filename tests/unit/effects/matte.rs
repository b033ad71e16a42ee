use super::*;
use crate::foundation::error::ShadowError;

fn solid(rgb: u8) -> Image {
    Image::filled(4, 4, [rgb, rgb, rgb, 255]).unwrap()
}

#[test]
fn opaque_mode_is_black_at_forty_percent_coverage() {
    for src in [solid(0), solid(255)] {
        let matte = extract_matte(&src, false).unwrap();
        assert_eq!((matte.width(), matte.height()), (4, 4));
        assert!(matte.data().chunks_exact(4).all(|p| p == [0, 0, 0, 102]));
    }
}

#[test]
fn translucent_mode_darkens_color_and_keeps_sixty_percent_coverage() {
    let matte = extract_matte(&solid(255), true).unwrap();
    assert!(
        matte
            .data()
            .chunks_exact(4)
            .all(|p| p == [102, 102, 102, 153])
    );

    let matte = extract_matte(&solid(0), true).unwrap();
    assert!(matte.data().chunks_exact(4).all(|p| p == [0, 0, 0, 153]));
}

#[test]
fn transparent_pixels_stay_transparent() {
    let src = Image::transparent(3, 2).unwrap();
    for translucent in [false, true] {
        let matte = extract_matte(&src, translucent).unwrap();
        assert!(matte.data().iter().all(|&b| b == 0));
    }
}

#[test]
fn coverage_scales_with_source_alpha() {
    let src = Image::filled(1, 1, [100, 50, 0, 200]).unwrap();
    let opaque = extract_matte(&src, false).unwrap();
    assert_eq!(opaque.pixel(0, 0), Some([0, 0, 0, 80]));

    let translucent = extract_matte(&src, true).unwrap();
    assert_eq!(translucent.pixel(0, 0), Some([40, 20, 0, 120]));
}

#[test]
fn non_rgba_source_is_unsupported() {
    let src = Image::from_raw(2, 1, PixelFormat::Rgb8, vec![0; 6]).unwrap();
    assert!(matches!(
        extract_matte(&src, false),
        Err(ShadowError::UnsupportedPixelFormat(PixelFormat::Rgb8))
    ));
}

#[test]
fn matrix_selection_follows_mode() {
    assert_eq!(ColorMatrix::for_mode(false), ColorMatrix::OPAQUE_SHADOW);
    assert_eq!(ColorMatrix::for_mode(true), ColorMatrix::TRANSLUCENT_SHADOW);
}

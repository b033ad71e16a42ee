use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ShadowError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        ShadowError::backend("x")
            .to_string()
            .contains("backend error:")
    );
    assert!(ShadowError::config("x").to_string().contains("config error:"));
    assert!(
        ShadowError::InvalidDensity(0.0)
            .to_string()
            .contains("invalid pixel density")
    );
    assert!(
        ShadowError::UnsupportedPixelFormat(PixelFormat::Rgb8)
            .to_string()
            .contains("Rgb8")
    );
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ShadowError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

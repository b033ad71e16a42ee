use super::*;

#[test]
fn transparent_src_is_noop() {
    let dst = [10, 20, 30, 40];
    assert_eq!(over(dst, [0, 0, 0, 0]), dst);
}

#[test]
fn opaque_src_replaces_dst() {
    let dst = [0, 0, 0, 255];
    let src = [255, 0, 0, 255];
    assert_eq!(over(dst, src), src);
}

#[test]
fn over_transparent_dst_keeps_src() {
    let src = [0, 0, 40, 80];
    assert_eq!(over([0, 0, 0, 0], src), src);
}

#[test]
fn shadow_over_white_darkens_without_tint() {
    let out = over([255, 255, 255, 255], [0, 0, 0, 102]);
    assert_eq!(out, [153, 153, 153, 255]);
}

#[test]
fn translucent_tint_over_white_keeps_hue() {
    let out = over([255, 255, 255, 255], [102, 0, 0, 153]);
    assert_eq!(out, [204, 102, 102, 255]);
}

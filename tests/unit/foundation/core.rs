use super::*;

#[test]
fn negative_inset_grows_on_every_side() {
    let r = IRect::new(10, 20, 110, 70).inset(-4, -4);
    assert_eq!(r, IRect::new(6, 16, 114, 74));
    assert_eq!(r.width(), 108);
    assert_eq!(r.height(), 58);
}

#[test]
fn intersect_collapses_disjoint_rects() {
    let a = IRect::new(0, 0, 10, 10);
    let b = IRect::new(10, 0, 20, 10);
    assert_eq!(a.intersect(b), IRect::EMPTY);
    assert!(a.intersect(b).is_empty());

    let c = IRect::new(5, 5, 15, 15);
    assert_eq!(a.intersect(c), IRect::new(5, 5, 10, 10));
}

#[test]
fn contains_is_half_open() {
    let r = IRect::from_size(4, 3);
    assert!(r.contains(0, 0));
    assert!(r.contains(3, 2));
    assert!(!r.contains(4, 2));
    assert!(!r.contains(3, 3));
    assert_eq!(r.to_rect(), Rect::new(0.0, 0.0, 4.0, 3.0));
}

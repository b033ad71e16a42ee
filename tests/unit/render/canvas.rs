use super::*;

#[test]
fn clip_starts_at_viewport_and_stacks() {
    let mut canvas = PixmapCanvas::new(20, 20, IRect::new(5, 5, 15, 15)).unwrap();
    assert_eq!(canvas.clip_bounds(), IRect::new(5, 5, 15, 15));

    canvas.save();
    canvas.clip_rect(IRect::new(0, 0, 10, 10));
    assert_eq!(canvas.clip_bounds(), IRect::new(5, 5, 10, 10));
    assert_eq!(canvas.save_depth(), 1);

    canvas.restore();
    assert_eq!(canvas.clip_bounds(), IRect::new(5, 5, 15, 15));
    canvas.restore();
    assert_eq!(canvas.save_depth(), 0);
}

#[test]
fn growing_clip_rect_cannot_escape_current_clip() {
    let mut canvas = PixmapCanvas::new(20, 20, IRect::new(5, 5, 15, 15)).unwrap();
    canvas.clip_rect(IRect::new(5, 5, 15, 15).inset(-4, -4));
    assert_eq!(canvas.clip_bounds(), IRect::new(5, 5, 15, 15));
}

#[test]
fn unclipped_children_expose_whole_surface() {
    let mut canvas = PixmapCanvas::new(20, 12, IRect::new(5, 5, 15, 10)).unwrap();
    canvas.set_clip_children(false);
    assert_eq!(canvas.clip_bounds(), IRect::from_size(20, 12));
    canvas.set_clip_children(true);
    assert_eq!(canvas.clip_bounds(), IRect::new(5, 5, 15, 10));
}

#[test]
fn draws_respect_clip() {
    let mut canvas = PixmapCanvas::new(4, 4, IRect::new(0, 0, 2, 4)).unwrap();
    let img = Image::filled(4, 4, [0, 0, 0, 255]).unwrap();
    canvas.draw_image(&img, Affine::IDENTITY).unwrap();

    let out = canvas.into_image();
    assert_eq!(out.pixel(1, 3), Some([0, 0, 0, 255]));
    assert_eq!(out.pixel(2, 0), Some([0, 0, 0, 0]));
}

#[test]
fn clear_ignores_clip() {
    let mut canvas = PixmapCanvas::new(3, 3, IRect::new(1, 1, 2, 2)).unwrap();
    canvas.clear([255, 255, 255, 255]);
    assert!(
        canvas
            .image()
            .data()
            .chunks_exact(4)
            .all(|p| p == [255, 255, 255, 255])
    );
}

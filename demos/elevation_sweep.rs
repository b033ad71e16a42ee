//! Sweeps elevation from 0 to 24dp and writes one PNG per step and shadow style.
//!
//! Usage: `cargo run --example elevation_sweep [input.png] [out_dir]`
//!
//! Without an input image a round icon is generated. Set `RUST_LOG=elevation_shadow=debug` to
//! watch matte generation and cache invalidation.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;
use elevation_shadow::{
    Affine, BackendSettings, IRect, Image, MAX_ELEVATION_DP, PixelFormat, PixmapCanvas,
    ShadowCanvas, ShadowCompositor, ShadowConfig, SourceLayout, Vec2,
};

const MARGIN: u32 = 48;
const BACKGROUND: [u8; 4] = [236, 239, 241, 255];

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    if let Err(e) = try_main() {
        eprintln!("{e:?}");
        std::process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => {
            let bytes = std::fs::read(&path).with_context(|| format!("read image '{path}'"))?;
            Image::decode(&bytes)?
        }
        None => round_icon(128, [33, 150, 243, 255])?,
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "assets/shadows".to_string()));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("create output dir '{}'", out_dir.display()))?;

    let source = source.into_shared();
    let styles = [
        ("opaque", ShadowConfig::default()),
        (
            "translucent",
            ShadowConfig {
                translucent: true,
                ..ShadowConfig::default()
            },
        ),
        (
            "force_clip",
            ShadowConfig {
                force_clip: true,
                backend: BackendSettings {
                    parallel_rows: true,
                    ..BackendSettings::default()
                },
                ..ShadowConfig::default()
            },
        ),
    ];

    for (name, config) in styles {
        let mut compositor = ShadowCompositor::from_config(&config)?;
        let (canvas_w, canvas_h, layout) = layout_for(&source);
        compositor.set_source(Some(Arc::clone(&source)), layout);

        for dp in 0..=MAX_ELEVATION_DP as u32 {
            compositor.set_elevation_dp(dp as f32, config.density)?;

            // The view occupies the padded area; force_clip lets the shadow reach the margin.
            let viewport = IRect::new(
                MARGIN as i32 / 2,
                MARGIN as i32 / 2,
                (canvas_w - MARGIN / 2) as i32,
                (canvas_h - MARGIN / 2) as i32,
            );
            let mut canvas = PixmapCanvas::new(canvas_w, canvas_h, viewport)?;
            canvas.clear(BACKGROUND);
            compositor.attach(&mut canvas);
            compositor.render(&mut canvas)?;
            canvas.draw_image(
                &source,
                Affine::translate(Vec2::new(f64::from(MARGIN), f64::from(MARGIN))),
            )?;

            let out_path = out_dir.join(format!("{name}_{dp:02}dp.png"));
            canvas
                .into_image()
                .to_rgba_image()?
                .save(&out_path)
                .with_context(|| format!("write '{}'", out_path.display()))?;
        }

        let stats = compositor.stats();
        eprintln!(
            "{name}: generated {} mattes, drew {} shadows",
            stats.generated, stats.drawn
        );
    }

    eprintln!("wrote {}", out_dir.display());
    Ok(())
}

/// Canvas size and a view layout that pads the image by `MARGIN` on every side.
fn layout_for(source: &Image) -> (u32, u32, SourceLayout) {
    let w = source.width() + 2 * MARGIN;
    let h = source.height() + 2 * MARGIN;
    let layout = SourceLayout {
        view_width: w as i32,
        view_height: h as i32,
        padding_left: f64::from(MARGIN),
        padding_top: f64::from(MARGIN),
        image_matrix: Affine::IDENTITY,
        bounds: IRect::from_size(w, h),
    };
    (w, h, layout)
}

/// Anti-aliased filled circle on a transparent background.
fn round_icon(size: u32, premul_rgba: [u8; 4]) -> anyhow::Result<Image> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    let c = f64::from(size) / 2.0;
    let radius = c - 4.0;
    for y in 0..size {
        for x in 0..size {
            let dx = f64::from(x) + 0.5 - c;
            let dy = f64::from(y) + 0.5 - c;
            let coverage = (radius - (dx * dx + dy * dy).sqrt() + 0.5).clamp(0.0, 1.0);
            data.extend(premul_rgba.map(|ch| (f64::from(ch) * coverage).round() as u8));
        }
    }
    Ok(Image::from_raw(size, size, PixelFormat::Rgba8Premul, data)?)
}

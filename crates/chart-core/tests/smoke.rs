// File: crates/chart-core/tests/smoke.rs
// Purpose: Basic end-to-end render smoke test writing a PNG.

use chart_core::{Axis, Chart, RenderOptions, Series};
use skia_safe::Color;

fn small_opts() -> RenderOptions {
    // 12x8 inch figure at 40 dpi keeps the surface small
    RenderOptions::for_figure(12.0, 8.0, 40)
}

#[test]
fn render_smoke_png() {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    chart.title = Some("Smoke".into());
    chart.legend_title = Some("Legend".into());
    chart.add_series(Series::line(
        "wave",
        vec![(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.5), (4.0, 2.5)],
    ));

    let opts = small_opts();
    let out = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join("smoke.png");

    chart.render_to_png(&opts, &out).expect("render should succeed");
    let meta = std::fs::metadata(&out).expect("output exists");
    assert!(meta.len() > 0, "png should be non-empty");

    // Also verify in-memory API works
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!((img.width(), img.height()), (480, 320));
}

#[test]
fn empty_chart_renders_without_legend() {
    let mut chart = Chart::new();
    chart.legend_title = Some("Legend".into());
    chart.autoscale_axes(0.05);
    assert!(chart.legend_entries().is_empty());

    let mut opts = small_opts();
    opts.draw_labels = false;
    assert!(chart.layout(&opts, None).legend.is_none());
    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    // top-left corner is figure background
    assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255, 255]);
}

#[test]
fn missing_parent_directory_is_an_error() {
    let chart = Chart::new();
    let mut opts = small_opts();
    opts.draw_labels = false;
    let out = std::path::PathBuf::from(env!("CARGO_TARGET_TMPDIR"))
        .join("no-such-dir")
        .join("chart.png");
    assert!(chart.render_to_png(&opts, &out).is_err());
    assert!(!out.exists());
}

#[test]
fn explicit_color_overrides_palette() {
    let mut chart = Chart::new();
    chart.x_axis = Axis::new("X", 0.0, 4.0);
    chart.y_axis = Axis::new("Y", 0.0, 4.0);
    let green = Color::from_rgb(0, 128, 0);
    chart.add_series(Series::line("green", vec![(2.0, 2.0)]).with_color(green));

    let mut opts = small_opts();
    opts.draw_labels = false;
    let plot = chart.layout(&opts, None).plot;
    let cx = ((plot.left + plot.right) * 0.5).floor() as u32;
    let cy = ((plot.top + plot.bottom) * 0.5).floor() as u32;

    let bytes = chart.render_to_png_bytes(&opts).expect("render bytes");
    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(img.get_pixel(cx, cy).0, [0, 128, 0, 255]);
}

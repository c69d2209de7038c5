// File: crates/chart-core/src/chart.rs
// Summary: Chart struct and headless PNG rendering pipeline using Skia CPU raster surfaces.

use anyhow::Result;
use skia_safe as skia;
use tracing::debug;

use crate::axis::DEFAULT_TICK_TARGET;
use crate::geometry::RectF;
use crate::series::{Marker, Series};
use crate::text::TextShaper;
use crate::theme::Theme;
use crate::types::{
    figure_pixels, DEFAULT_DPI, FIGURE_HEIGHT_IN, FIGURE_WIDTH_IN, POINTS_PER_INCH,
};
use crate::{Axis, ViewState};

// Sizes in typographic points; scaled by `RenderOptions::px_per_pt`.
const FONT_PT: f32 = 10.0;
const TITLE_PT: f32 = 12.0;
const LINE_PT: f32 = 1.5;
const MARKER_PT: f32 = 6.0;
const GRID_PT: f32 = 0.8;
const SPINE_PT: f32 = 0.8;
const TICK_LEN_PT: f32 = 3.5;
const TICK_PAD_PT: f32 = 3.5;
const LABEL_PAD_PT: f32 = 4.0;
const TITLE_PAD_PT: f32 = 6.0;
const LEGEND_PAD_PT: f32 = 4.0;
const LEGEND_HANDLE_PT: f32 = 20.0;
const LEGEND_GAP_PT: f32 = 8.0;
const ROW_SPACING: f32 = 1.4;

pub struct RenderOptions {
    pub width: i32,
    pub height: i32,
    /// Pixels per typographic point (`dpi / 72`).
    pub px_per_pt: f32,
    /// Figure-edge padding in points.
    pub padding_pt: f32,
    pub theme: Theme,
    /// When false no text is measured or drawn (deterministic output across font setups).
    pub draw_labels: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::for_figure(FIGURE_WIDTH_IN, FIGURE_HEIGHT_IN, DEFAULT_DPI)
    }
}

impl RenderOptions {
    /// Options for a `width_in` x `height_in` inch figure rasterized at `dpi`.
    pub fn for_figure(width_in: f32, height_in: f32, dpi: u32) -> Self {
        let (width, height) = figure_pixels(width_in, height_in, dpi);
        Self {
            width,
            height,
            px_per_pt: dpi.max(1) as f32 / POINTS_PER_INCH,
            padding_pt: 6.0,
            theme: Theme::light(),
            draw_labels: true,
        }
    }

    #[inline]
    fn pt(&self, v: f32) -> f32 { v * self.px_per_pt }
}

/// Resolved pixel rectangles for one render.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub figure: RectF,
    pub plot: RectF,
    /// Legend box; absent when no series carries a label.
    pub legend: Option<RectF>,
}

pub struct Chart {
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub title: Option<String>,
    pub legend_title: Option<String>,
    /// Legend's top-left corner in axes fractions; (1.05, 1.0) sits just right of the plot.
    pub legend_anchor: (f32, f32),
    pub show_grid: bool,
}

impl Default for Chart {
    fn default() -> Self { Self::new() }
}

impl Chart {
    pub fn new() -> Self {
        Self {
            series: Vec::new(),
            x_axis: Axis::default_x(),
            y_axis: Axis::default_y(),
            title: None,
            legend_title: None,
            legend_anchor: (1.05, 1.0),
            show_grid: true,
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Legend labels in series order.
    pub fn legend_entries(&self) -> Vec<&str> {
        self.series.iter().filter_map(|s| s.label.as_deref()).collect()
    }

    /// Fit both axes to the data, padded by `margin` (fraction of span).
    pub fn autoscale_axes(&mut self, margin: f64) {
        ViewState::from_chart(self, margin).apply_to_chart(self);
    }

    /// Compute plot and legend rectangles so that every label fits inside the figure.
    pub fn layout(&self, opts: &RenderOptions, shaper: Option<&TextShaper>) -> Layout {
        let measure = |text: &str, size: f32| -> (f32, f32) {
            match shaper {
                Some(s) if opts.draw_labels => s.measure(text, size),
                _ => (0.0, 0.0),
            }
        };
        let font = opts.pt(FONT_PT);
        let w = opts.width as f32;
        let h = opts.height as f32;
        let pad = opts.pt(opts.padding_pt);
        let figure = RectF::from_ltrb(0.0, 0.0, w, h);

        let y_tick_w = self
            .y_axis
            .ticks(DEFAULT_TICK_TARGET)
            .iter()
            .map(|(_, s)| measure(s, font).0)
            .fold(0.0f32, f32::max);
        let x_ticks = self.x_axis.ticks(DEFAULT_TICK_TARGET);
        let (x_tick_w, x_tick_h) = x_ticks
            .iter()
            .map(|(_, s)| measure(s, font))
            .fold((0.0f32, 0.0f32), |(aw, ah), (tw, th)| (aw.max(tw), ah.max(th)));
        let x_label_h = measure(&self.x_axis.label, font).1;
        let y_label_h = measure(&self.y_axis.label, font).1;
        let title_h = self.title.as_deref().map_or(0.0, |t| measure(t, opts.pt(TITLE_PT)).1);

        let tick_band = opts.pt(TICK_LEN_PT) + opts.pt(TICK_PAD_PT);
        let left = pad + y_label_h + opts.pt(LABEL_PAD_PT) + y_tick_w + tick_band;
        let bottom = pad + x_label_h + opts.pt(LABEL_PAD_PT) + x_tick_h + tick_band;
        let top = pad + if title_h > 0.0 { title_h + opts.pt(TITLE_PAD_PT) } else { 0.0 };
        let plot_h = (h - top - bottom).max(1.0);

        let entries = self.legend_entries();
        let legend_size = if entries.is_empty() {
            None
        } else {
            let row_h = entries
                .iter()
                .map(|e| measure(e, font).1)
                .fold(font * ROW_SPACING, f32::max);
            let label_w = entries.iter().map(|e| measure(e, font).0).fold(0.0f32, f32::max);
            let title_w = self.legend_title.as_deref().map_or(0.0, |t| measure(t, font).0);
            let title_rows = if self.legend_title.is_some() { 1.0 } else { 0.0 };
            let lpad = opts.pt(LEGEND_PAD_PT);
            let body_w = opts.pt(LEGEND_HANDLE_PT) + opts.pt(LEGEND_GAP_PT) + label_w;
            Some((
                2.0 * lpad + body_w.max(title_w),
                2.0 * lpad + row_h * (title_rows + entries.len() as f32),
            ))
        };

        let (ax, ay) = self.legend_anchor;
        let avail = w - pad - left;
        let plot_w = match legend_size {
            // legend right edge: left + ax * plot_w + legend_w
            Some((lw, _)) if ax > 0.0 => avail.min((avail - lw) / ax),
            Some((lw, _)) => avail.min(avail - lw),
            None => avail - x_tick_w * 0.5,
        }
        .max(1.0);

        let plot = RectF::from_ltwh(left, top, plot_w, plot_h);
        let legend = legend_size.map(|(lw, lh)| {
            let lx = plot.left + ax * plot.width();
            let ly = plot.top + (1.0 - ay) * plot.height();
            RectF::from_ltwh(lx, ly, lw, lh)
        });
        Layout { figure, plot, legend }
    }

    /// Render to encoded PNG bytes using a CPU raster surface.
    pub fn render_to_png_bytes(&self, opts: &RenderOptions) -> Result<Vec<u8>> {
        let shaper = opts.draw_labels.then(TextShaper::new);
        let layout = self.layout(opts, shaper.as_ref());
        debug!(
            width = opts.width,
            height = opts.height,
            series = self.series.len(),
            "rendering chart; plot area {:?}",
            layout.plot
        );

        // Create raster surface
        let mut surface = skia::surfaces::raster_n32_premul((opts.width, opts.height))
            .ok_or_else(|| {
                anyhow::anyhow!("failed to create {}x{} raster surface", opts.width, opts.height)
            })?;
        let canvas = surface.canvas();
        let theme = &opts.theme;

        canvas.clear(theme.background);
        let mut bg = skia::Paint::default();
        bg.set_color(theme.plot_background);
        canvas.draw_rect(layout.plot.to_skia(), &bg);

        let x_ticks = self.x_axis.ticks(DEFAULT_TICK_TARGET);
        let y_ticks = self.y_axis.ticks(DEFAULT_TICK_TARGET);
        let map = Mapper::new(&layout.plot, &self.x_axis, &self.y_axis);

        if self.show_grid {
            draw_grid(canvas, opts, &layout.plot, &map, &x_ticks, &y_ticks);
        }

        canvas.save();
        canvas.clip_rect(layout.plot.to_skia(), skia::ClipOp::Intersect, true);
        for (i, s) in self.series.iter().enumerate() {
            let color = s.color.unwrap_or_else(|| theme.series_color(i));
            draw_line_series(canvas, opts, &map, s, color);
        }
        canvas.restore();

        draw_frame(canvas, opts, &layout.plot, &map, &x_ticks, &y_ticks);

        if let Some(shaper) = shaper.as_ref() {
            draw_labels(canvas, opts, shaper, self, &layout, &map, &x_ticks, &y_ticks);
        }
        if let Some(rect) = layout.legend {
            draw_legend(canvas, opts, shaper.as_ref(), self, &rect);
        }

        // Snapshot and encode PNG
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow::anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the chart to a PNG at `output_png_path`. The parent directory must exist.
    pub fn render_to_png(
        &self,
        opts: &RenderOptions,
        output_png_path: impl AsRef<std::path::Path>,
    ) -> Result<()> {
        let bytes = self.render_to_png_bytes(opts)?;
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }
}

// ---- helpers ----------------------------------------------------------------

/// Data-to-pixel transform for one plot rectangle.
struct Mapper<'a> {
    plot: RectF,
    x: &'a Axis,
    y: &'a Axis,
}

impl<'a> Mapper<'a> {
    fn new(plot: &RectF, x: &'a Axis, y: &'a Axis) -> Self {
        Self { plot: *plot, x, y }
    }
    fn sx(&self, x: f64) -> f32 {
        self.plot.left + self.x.fraction(x) as f32 * self.plot.width()
    }
    fn sy(&self, y: f64) -> f32 {
        self.plot.bottom - self.y.fraction(y) as f32 * self.plot.height()
    }
}

fn stroke_paint(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint.set_color(color);
    paint
}

fn fill_paint(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(color);
    paint
}

fn draw_grid(
    canvas: &skia::Canvas,
    opts: &RenderOptions,
    plot: &RectF,
    map: &Mapper,
    x_ticks: &[(f64, String)],
    y_ticks: &[(f64, String)],
) {
    let paint = stroke_paint(opts.theme.grid, opts.pt(GRID_PT));
    for (x, _) in x_ticks {
        let px = map.sx(*x);
        canvas.draw_line((px, plot.top), (px, plot.bottom), &paint);
    }
    for (y, _) in y_ticks {
        let py = map.sy(*y);
        canvas.draw_line((plot.left, py), (plot.right, py), &paint);
    }
}

fn draw_frame(
    canvas: &skia::Canvas,
    opts: &RenderOptions,
    plot: &RectF,
    map: &Mapper,
    x_ticks: &[(f64, String)],
    y_ticks: &[(f64, String)],
) {
    let spine = stroke_paint(opts.theme.axis_line, opts.pt(SPINE_PT));
    canvas.draw_rect(plot.to_skia(), &spine);

    let tick = stroke_paint(opts.theme.tick, opts.pt(SPINE_PT));
    let len = opts.pt(TICK_LEN_PT);
    for (x, _) in x_ticks {
        let px = map.sx(*x);
        canvas.draw_line((px, plot.bottom), (px, plot.bottom + len), &tick);
    }
    for (y, _) in y_ticks {
        let py = map.sy(*y);
        canvas.draw_line((plot.left - len, py), (plot.left, py), &tick);
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_labels(
    canvas: &skia::Canvas,
    opts: &RenderOptions,
    shaper: &TextShaper,
    chart: &Chart,
    layout: &Layout,
    map: &Mapper,
    x_ticks: &[(f64, String)],
    y_ticks: &[(f64, String)],
) {
    let plot = &layout.plot;
    let font = opts.pt(FONT_PT);
    let color = opts.theme.axis_label;
    let tick_band = opts.pt(TICK_LEN_PT) + opts.pt(TICK_PAD_PT);

    let mut tick_h = 0.0f32;
    for (x, s) in x_ticks {
        tick_h = tick_h.max(shaper.measure(s, font).1);
        shaper.draw_centered(canvas, s, map.sx(*x), plot.bottom + tick_band, font, color);
    }
    let mut tick_w = 0.0f32;
    for (y, s) in y_ticks {
        tick_w = tick_w.max(shaper.measure(s, font).0);
        shaper.draw_right_middle(canvas, s, plot.left - tick_band, map.sy(*y), font, color);
    }

    let cx = (plot.left + plot.right) * 0.5;
    let x_label_top = plot.bottom + tick_band + tick_h + opts.pt(LABEL_PAD_PT);
    shaper.draw_centered(canvas, &chart.x_axis.label, cx, x_label_top, font, color);

    let y_label_h = shaper.measure(&chart.y_axis.label, font).1;
    let y_label_cx = plot.left - tick_band - tick_w - opts.pt(LABEL_PAD_PT) - y_label_h * 0.5;
    let cy = (plot.top + plot.bottom) * 0.5;
    shaper.draw_vertical(canvas, &chart.y_axis.label, y_label_cx, cy, font, color);

    if let Some(title) = chart.title.as_deref() {
        let size = opts.pt(TITLE_PT);
        let h = shaper.measure(title, size).1;
        shaper.draw_centered(canvas, title, cx, plot.top - opts.pt(TITLE_PAD_PT) - h, size, color);
    }
}

fn draw_line_series(
    canvas: &skia::Canvas,
    opts: &RenderOptions,
    map: &Mapper,
    series: &Series,
    color: skia::Color,
) {
    let data = &series.data_xy;
    if data.is_empty() {
        return;
    }

    if data.len() >= 2 {
        let mut path = skia::Path::new();
        let (x0, y0) = data[0];
        path.move_to((map.sx(x0), map.sy(y0)));
        for &(x, y) in data.iter().skip(1) {
            path.line_to((map.sx(x), map.sy(y)));
        }
        let mut stroke = stroke_paint(color, opts.pt(LINE_PT));
        stroke.set_stroke_join(skia::paint::Join::Round);
        canvas.draw_path(&path, &stroke);
    }

    if series.marker == Marker::Circle {
        let dot = fill_paint(color);
        let r = opts.pt(MARKER_PT) * 0.5;
        for &(x, y) in data {
            canvas.draw_circle((map.sx(x), map.sy(y)), r, &dot);
        }
    }
}

fn draw_legend(
    canvas: &skia::Canvas,
    opts: &RenderOptions,
    shaper: Option<&TextShaper>,
    chart: &Chart,
    rect: &RectF,
) {
    let theme = &opts.theme;
    let font = opts.pt(FONT_PT);
    let lpad = opts.pt(LEGEND_PAD_PT);
    let corner = opts.pt(2.0);

    canvas.draw_round_rect(rect.to_skia(), corner, corner, &fill_paint(theme.legend_fill));
    let frame = stroke_paint(theme.legend_frame, opts.pt(SPINE_PT));
    canvas.draw_round_rect(rect.to_skia(), corner, corner, &frame);

    let labelled: Vec<(usize, &Series)> = chart
        .series
        .iter()
        .enumerate()
        .filter(|(_, s)| s.label.is_some())
        .collect();
    let row_h = match shaper {
        Some(sh) => labelled
            .iter()
            .filter_map(|(_, s)| s.label.as_deref())
            .map(|l| sh.measure(l, font).1)
            .fold(font * ROW_SPACING, f32::max),
        None => font * ROW_SPACING,
    };

    let mut y = rect.top + lpad;
    if let Some(title) = chart.legend_title.as_deref() {
        if let Some(sh) = shaper {
            let cx = (rect.left + rect.right) * 0.5;
            let ty = y + (row_h - sh.measure(title, font).1) * 0.5;
            sh.draw_centered(canvas, title, cx, ty, font, theme.axis_label);
        }
        y += row_h;
    }

    let handle_l = rect.left + lpad;
    let handle_r = handle_l + opts.pt(LEGEND_HANDLE_PT);
    for (i, s) in labelled {
        let color = s.color.unwrap_or_else(|| theme.series_color(i));
        let cy = y + row_h * 0.5;
        canvas.draw_line((handle_l, cy), (handle_r, cy), &stroke_paint(color, opts.pt(LINE_PT)));
        if s.marker == Marker::Circle {
            let center = ((handle_l + handle_r) * 0.5, cy);
            canvas.draw_circle(center, opts.pt(MARKER_PT) * 0.5, &fill_paint(color));
        }
        if let (Some(sh), Some(label)) = (shaper, s.label.as_deref()) {
            let lx = handle_r + opts.pt(LEGEND_GAP_PT);
            sh.draw_left_middle(canvas, label, lx, cy, font, theme.axis_label);
        }
        y += row_h;
    }
}

// File: crates/chart-core/src/text.rs
// Summary: Simple text shaper/renderer using Skia textlayout with sensible defaults.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextStyle};

pub struct TextShaper {
    fonts: FontCollection,
}

impl Default for TextShaper {
    fn default() -> Self { Self::new() }
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        // Use system manager fallback
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(size: f32, color: skia::Color) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(size.max(1.0));
        ts.set_color(color);
        ts.set_font_families(&[
            "DejaVu Sans",
            "Segoe UI",
            "Arial",
            "Helvetica",
            "Roboto",
            "sans-serif",
        ]);
        ts
    }

    pub fn layout(&self, text: &str, size: f32, color: skia::Color) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(skia::textlayout::TextAlign::Left);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        let style = Self::make_style(size, color);
        builder.push_style(&style);
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(100_000.0);
        paragraph
    }

    /// Width of the longest line and total height, in pixels.
    pub fn measure(&self, text: &str, size: f32) -> (f32, f32) {
        let p = self.layout(text, size, skia::Color::from_argb(0, 0, 0, 0));
        (p.longest_line(), p.height())
    }

    /// Draw horizontally centered on `cx`, top edge at `y`.
    pub fn draw_centered(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        cx: f32,
        y: f32,
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        p.paint(canvas, (cx - p.longest_line() * 0.5, y));
    }

    /// Draw starting at `left`, vertically centered on `cy`.
    pub fn draw_left_middle(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        left: f32,
        cy: f32,
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        p.paint(canvas, (left, cy - p.height() * 0.5));
    }

    /// Draw right-aligned to `right`, vertically centered on `cy`.
    pub fn draw_right_middle(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        right: f32,
        cy: f32,
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        p.paint(canvas, (right - p.longest_line(), cy - p.height() * 0.5));
    }

    /// Draw rotated 90 degrees counter-clockwise, centered on `(cx, cy)`.
    pub fn draw_vertical(
        &self,
        canvas: &skia::Canvas,
        text: &str,
        cx: f32,
        cy: f32,
        size: f32,
        color: skia::Color,
    ) {
        let p = self.layout(text, size, color);
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(-90.0, None);
        p.paint(canvas, (-p.longest_line() * 0.5, -p.height() * 0.5));
        canvas.restore();
    }
}

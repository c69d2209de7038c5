// File: crates/chart-core/src/types.rs
// Summary: Shared constants for figure size and resolution.

/// Default figure width in inches.
pub const FIGURE_WIDTH_IN: f32 = 12.0;
/// Default figure height in inches.
pub const FIGURE_HEIGHT_IN: f32 = 8.0;
/// Default output resolution in dots per inch.
pub const DEFAULT_DPI: u32 = 400;
/// Typographic points per inch; sizes in points scale by `dpi / POINTS_PER_INCH`.
pub const POINTS_PER_INCH: f32 = 72.0;

/// Pixel size of a figure of `width_in` x `height_in` inches at `dpi`.
pub fn figure_pixels(width_in: f32, height_in: f32, dpi: u32) -> (i32, i32) {
    let dpi = dpi.max(1) as f32;
    let w = (width_in * dpi).round().max(1.0) as i32;
    let h = (height_in * dpi).round().max(1.0) as i32;
    (w, h)
}

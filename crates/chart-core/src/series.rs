// File: crates/chart-core/src/series.rs
// Summary: Labelled line series model with optional point markers.

use skia_safe as skia;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Marker {
    None,
    Circle,
}

#[derive(Clone, Debug)]
pub struct Series {
    /// Legend text; `None` keeps the series out of the legend.
    pub label: Option<String>,
    /// Points in draw order; the line connects them as given.
    pub data_xy: Vec<(f64, f64)>,
    pub marker: Marker,
    /// Explicit stroke color; `None` takes the next palette color.
    pub color: Option<skia::Color>,
}

impl Series {
    pub fn with_data(data: Vec<(f64, f64)>) -> Self {
        Self { label: None, data_xy: data, marker: Marker::None, color: None }
    }

    /// A labelled line with circular point markers.
    pub fn line(label: impl Into<String>, data: Vec<(f64, f64)>) -> Self {
        Self { label: Some(label.into()), data_xy: data, marker: Marker::Circle, color: None }
    }

    pub fn with_marker(mut self, marker: Marker) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_color(mut self, color: skia::Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn len(&self) -> usize { self.data_xy.len() }

    pub fn is_empty(&self) -> bool { self.data_xy.is_empty() }
}

// File: crates/chart-core/src/grid.rs
// Summary: Simple grid/tick layout helpers.

/// Step between "nice" ticks (1, 2, 2.5, 5 times a power of ten) for roughly
/// `target` intervals across `[min, max]`.
pub fn nice_step(min: f64, max: f64, target: usize) -> f64 {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }
    let raw = span / target.max(1) as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let mult = [1.0, 2.0, 2.5, 5.0]
        .into_iter()
        .find(|&m| norm <= m + 1e-9)
        .unwrap_or(10.0);
    mult * mag
}

/// Tick positions inside `[min, max]` at a nice step.
///
/// Falls back to the two endpoints when the span overflows or the step is
/// too small to move either endpoint.
pub fn nice_ticks(min: f64, max: f64, target: usize) -> Vec<f64> {
    if !min.is_finite() || !max.is_finite() || max <= min {
        return vec![min];
    }
    let step = nice_step(min, max, target);
    if !(max - min).is_finite() || min + step == min || max - step == max {
        return vec![min, max];
    }
    let first = (min / step).ceil() * step;
    let eps = step * 1e-9;
    let limit = target.max(1) * 4 + 1;
    let mut ticks = Vec::new();
    for i in 0..limit {
        let v = first + step * i as f64;
        if v > max + eps { break; }
        // snap -0.0 and float dust to zero
        ticks.push(if v.abs() < eps { 0.0 } else { v });
    }
    ticks
}

/// Format a tick value with just enough decimals for `step`.
pub fn format_tick(value: f64, step: f64) -> String {
    let mut decimals = if step > 0.0 && step.is_finite() {
        (-step.log10().floor()).max(0.0) as usize
    } else {
        0
    };
    let scaled = step * 10f64.powi(decimals as i32);
    if (scaled - scaled.round()).abs() > 1e-6 {
        decimals += 1;
    }
    if value.abs() >= 1e15 {
        return format!("{value:e}");
    }
    format!("{:.*}", decimals, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_ticks_cover_range_evenly() {
        let t = nice_ticks(3.2, 16.8, 6);
        assert_eq!(t, vec![5.0, 7.5, 10.0, 12.5, 15.0]);
        let t = nice_ticks(0.0, 10.0, 5);
        assert_eq!(t, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
    }

    #[test]
    fn quarter_steps_keep_two_decimals() {
        assert!((nice_step(0.0, 1.0, 4) - 0.25).abs() < 1e-12);
        assert_eq!(format_tick(0.75, 0.25), "0.75");
        assert_eq!(format_tick(10.0, 2.5), "10.0");
        assert_eq!(format_tick(12.0, 2.0), "12");
    }

    #[test]
    fn degenerate_range_yields_single_tick() {
        assert_eq!(nice_ticks(5.0, 5.0, 6), vec![5.0]);
    }

    #[test]
    fn overflowing_span_falls_back_to_endpoints() {
        assert!((9.35e307f64 - -9.35e307).is_infinite());
        assert_eq!(nice_ticks(-9.35e307, 9.35e307, 8), vec![-9.35e307, 9.35e307]);
        assert_eq!(nice_ticks(f64::MIN, f64::MAX, 8), vec![f64::MIN, f64::MAX]);
    }

    #[test]
    fn step_below_endpoint_precision_falls_back_to_endpoints() {
        // 1e16 has an ulp of 2, so a 0.5 step cannot advance
        assert_eq!(nice_ticks(1e16, 1e16 + 4.0, 8), vec![1e16, 1e16 + 4.0]);
    }

    #[test]
    fn tick_count_stays_near_target() {
        for target in [1, 3, 8, 20] {
            let t = nice_ticks(-0.37, 123.4, target);
            assert!(t.len() <= target * 4 + 1, "{} ticks for target {target}", t.len());
            assert!(!t.is_empty());
        }
    }

    #[test]
    fn huge_values_format_in_scientific_notation() {
        assert_eq!(format_tick(9.35e307, 1.0), "9.35e307");
        assert_eq!(format_tick(-2e15, 1e14), "-2e15");
    }
}

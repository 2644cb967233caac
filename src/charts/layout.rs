//! Geometry shared by the chart kinds
//!
//! Categorical axes are laid out on a continuous range `-0.5..n - 0.5` with
//! one unit per category, so category `i` is centered on the integer `i`.
//! Asking the mesh for `n` labels on that range yields exactly those integers.

use std::ops::Range;

/// Fraction of a category slot covered by its bar group
pub const GROUP_WIDTH: f64 = 0.8;

/// Top of the value axis: 10% headroom over the largest finite value
///
/// Falls back to 1.0 when there is nothing positive to show.
pub fn axis_upper_bound(values: impl IntoIterator<Item = f64>) -> f64 {
    let max = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold(f64::NEG_INFINITY, f64::max);

    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// X range holding `n` category slots (at least one)
pub fn category_axis(n: usize) -> Range<f64> {
    -0.5..n.max(1) as f64 - 0.5
}

/// Label for an axis position; empty unless `x` is a category center
pub fn category_label(categories: &[String], x: f64) -> String {
    let slot = x.round();
    if slot < 0.0 || (x - slot).abs() > 1e-6 {
        return String::new();
    }
    categories.get(slot as usize).cloned().unwrap_or_default()
}

/// Horizontal extent of one bar within a group
pub fn bar_span(category: usize, series: usize, n_series: usize) -> (f64, f64) {
    let n_series = n_series.max(1);
    let bar_width = GROUP_WIDTH / n_series as f64;
    let left = category as f64 - GROUP_WIDTH / 2.0 + series as f64 * bar_width;
    (left, left + bar_width)
}

/// One donut wedge, angles in degrees counterclockwise from 3 o'clock
#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub sweep: f64,
    pub percent: f64,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        self.start + self.sweep / 2.0
    }
}

/// Split the circle proportionally to `values`
///
/// Negative and non-finite values count as zero. Returns no wedges when the
/// total is zero.
pub fn donut_wedges(values: &[f64], start_angle: f64) -> Vec<Wedge> {
    let clean: Vec<f64> = values
        .iter()
        .map(|v| if v.is_finite() && *v > 0.0 { *v } else { 0.0 })
        .collect();
    let total: f64 = clean.iter().sum();
    if total <= 0.0 {
        return Vec::new();
    }

    let mut angle = start_angle;
    clean
        .iter()
        .map(|value| {
            let fraction = value / total;
            let wedge = Wedge {
                start: angle,
                sweep: fraction * 360.0,
                percent: fraction * 100.0,
            };
            angle += wedge.sweep;
            wedge
        })
        .collect()
}

/// Pixel position at `radius` and `angle` degrees around `center` (y grows down)
pub fn polar_point(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    let rad = angle.to_radians();
    (
        center.0 + (radius * rad.cos()).round() as i32,
        center.1 - (radius * rad.sin()).round() as i32,
    )
}

/// Outline of a ring segment: outer arc forward, inner arc back
pub fn wedge_polygon(center: (i32, i32), outer: f64, inner: f64, wedge: &Wedge) -> Vec<(i32, i32)> {
    let steps = (wedge.sweep.abs().ceil() as usize).max(1);
    let angle_at = |i: usize| wedge.start + wedge.sweep * i as f64 / steps as f64;

    let mut points: Vec<(i32, i32)> = (0..=steps)
        .map(|i| polar_point(center, outer, angle_at(i)))
        .collect();
    points.extend((0..=steps).rev().map(|i| polar_point(center, inner, angle_at(i))));
    points
}

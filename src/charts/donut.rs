use std::path::Path;

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{layout, palette, ChartLayout, FONT};
use crate::nutrition::{NutritionError, Result};

/// First wedge starts here, counterclockwise from 3 o'clock
const START_ANGLE: f64 = 140.0;

/// Ring thickness as a fraction of the outer radius
const RING_WIDTH: f64 = 0.4;

/// Donut chart with labels outside the ring and percentages on it
pub(super) fn draw_donut(path: &Path, spec: &ChartLayout, labels: &[String], values: &[f64]) -> Result<()> {
    let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(NutritionError::render)?;
    let area = root
        .titled(&spec.title, (FONT, 22))
        .map_err(NutritionError::render)?;

    let (width, height) = area.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let outer = width.min(height) as f64 * 0.36;
    let inner = outer * (1.0 - RING_WIDTH);

    let wedges = layout::donut_wedges(values, START_ANGLE);
    if wedges.is_empty() {
        area.draw(&Text::new("No data", center, centered(16)))
            .map_err(NutritionError::render)?;
    }

    for (idx, (wedge, label)) in wedges.iter().zip(labels).enumerate() {
        if wedge.sweep <= 0.0 {
            continue;
        }

        let ring = layout::wedge_polygon(center, outer, inner, wedge);
        area.draw(&Polygon::new(ring, palette::categorical_color(idx).filled()))
            .map_err(NutritionError::render)?;

        let label_pos = layout::polar_point(center, outer * 1.15, wedge.mid_angle());
        area.draw(&Text::new(label.clone(), label_pos, centered(15)))
            .map_err(NutritionError::render)?;

        let percent_pos = layout::polar_point(center, (outer + inner) / 2.0, wedge.mid_angle());
        area.draw(&Text::new(format!("{:.1}%", wedge.percent), percent_pos, centered(13)))
            .map_err(NutritionError::render)?;
    }

    root.present().map_err(NutritionError::render)?;
    Ok(())
}

fn centered(size: i32) -> TextStyle<'static> {
    TextStyle::from((FONT, size).into_font()).pos(Pos::new(HPos::Center, VPos::Center))
}

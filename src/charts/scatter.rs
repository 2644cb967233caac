use std::path::Path;

use plotters::prelude::*;

use super::{layout, palette, ChartLayout, FONT};
use crate::nutrition::{NutritionError, Result};

const MARKER_RADIUS: i32 = 10;

/// Scatter of one value per label, labels spread along a categorical x axis
pub(super) fn draw_scatter(
    path: &Path,
    spec: &ChartLayout,
    labels: &[String],
    values: &[f64],
) -> Result<()> {
    let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(NutritionError::render)?;

    let n = labels.len().max(1);
    let y_max = layout::axis_upper_bound(values.iter().copied());

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, (FONT, 24).into_font().style(FontStyle::Bold))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .build_cartesian_2d(layout::category_axis(n), 0f64..y_max)
        .map_err(NutritionError::render)?;

    chart
        .configure_mesh()
        .bold_line_style(palette::GRID_COLOR)
        .light_line_style(WHITE)
        .x_labels(n)
        .x_label_formatter(&|x| layout::category_label(labels, *x))
        .x_desc(spec.x_label.clone().unwrap_or_default())
        .y_desc(spec.y_label.clone().unwrap_or_default())
        .label_style((FONT, 13))
        .axis_desc_style((FONT, 16))
        .draw()
        .map_err(NutritionError::render)?;

    let points: Vec<(f64, f64)> = values
        .iter()
        .enumerate()
        .filter(|(_, value)| value.is_finite())
        .map(|(idx, value)| (idx as f64, *value))
        .collect();

    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, MARKER_RADIUS, palette::SCATTER_FILL.filled())),
        )
        .map_err(NutritionError::render)?;
    chart
        .draw_series(
            points
                .iter()
                .map(|&point| Circle::new(point, MARKER_RADIUS, BLACK.stroke_width(1))),
        )
        .map_err(NutritionError::render)?;

    root.present().map_err(NutritionError::render)?;
    Ok(())
}

use std::path::Path;

use plotters::prelude::*;

use super::{layout, palette, ChartLayout, Series, FONT};
use crate::nutrition::{NutritionError, Result};

/// Grouped bar chart: one group per category, one bar per series
///
/// Non-finite values (e.g. the mean of an empty category) leave a gap.
pub(super) fn draw_grouped_bars(
    path: &Path,
    spec: &ChartLayout,
    categories: &[String],
    series: &[Series],
) -> Result<()> {
    let root = BitMapBackend::new(path, (spec.width, spec.height)).into_drawing_area();
    root.fill(&WHITE).map_err(NutritionError::render)?;

    let n_categories = categories.len().max(1);
    let y_max = layout::axis_upper_bound(series.iter().flat_map(|s| s.values.iter().copied()));

    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, (FONT, 22))
        .margin(15)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(layout::category_axis(n_categories), 0f64..y_max)
        .map_err(NutritionError::render)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .bold_line_style(palette::GRID_COLOR)
        .light_line_style(WHITE)
        .x_labels(n_categories)
        .x_label_formatter(&|x| layout::category_label(categories, *x))
        .x_desc(spec.x_label.clone().unwrap_or_default())
        .y_desc(spec.y_label.clone().unwrap_or_default())
        .label_style((FONT, 13))
        .axis_desc_style((FONT, 15))
        .draw()
        .map_err(NutritionError::render)?;

    // Legend heading: a label-only entry ahead of the real series
    if let Some(ref title) = spec.legend_title {
        chart
            .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())
            .map_err(NutritionError::render)?
            .label(title.as_str());
    }

    let n_series = series.len();
    for (series_idx, s) in series.iter().enumerate() {
        let color = palette::categorical_color(series_idx);
        let bars = s
            .values
            .iter()
            .enumerate()
            .filter(|(_, value)| value.is_finite())
            .map(|(category_idx, value)| {
                let (left, right) = layout::bar_span(category_idx, series_idx, n_series);
                Rectangle::new([(left, 0.0), (right, *value)], color.filled())
            });

        chart
            .draw_series(bars)
            .map_err(NutritionError::render)?
            .label(s.name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 10, y + 5)], color.filled()));
    }

    if !series.is_empty() {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .label_font((FONT, 13))
            .draw()
            .map_err(NutritionError::render)?;
    }

    root.present().map_err(NutritionError::render)?;
    Ok(())
}

//! Static chart rendering
//!
//! Each chart is a pure rendering policy: a prepared data view and a layout
//! go in, a PNG file comes out. Axis and label selection has already been
//! decided by the caller.
//!
//! Structure:
//! - `bar.rs`: grouped bar chart
//! - `donut.rs`: donut (ring pie) chart
//! - `scatter.rs`: categorical scatter chart
//! - `layout.rs`: shared geometry
//! - `palette.rs`: colors

mod bar;
mod donut;
pub mod layout;
pub mod palette;
mod scatter;

use std::path::Path;

use crate::nutrition::{NutritionError, Result};

/// Chart kinds produced by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    GroupedBar,
    Donut,
    Scatter,
}

/// Text and size of a chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLayout {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    /// Heading of the series legend (bar charts only)
    pub legend_title: Option<String>,
    pub width: u32,
    pub height: u32,
}

impl ChartLayout {
    pub fn new(title: impl Into<String>, size: (u32, u32)) -> Self {
        Self {
            title: title.into(),
            x_label: None,
            y_label: None,
            legend_title: None,
            width: size.0,
            height: size.1,
        }
    }

    pub fn x_label(mut self, label: impl Into<String>) -> Self {
        self.x_label = Some(label.into());
        self
    }

    pub fn y_label(mut self, label: impl Into<String>) -> Self {
        self.y_label = Some(label.into());
        self
    }

    pub fn legend_title(mut self, title: impl Into<String>) -> Self {
        self.legend_title = Some(title.into());
        self
    }
}

/// One bar series: a value per category
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

/// Data prepared for one chart kind
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Categories on x, one bar per series inside each category
    GroupedBar {
        categories: Vec<String>,
        series: Vec<Series>,
    },
    /// Wedge per label, proportional to its value
    Donut { labels: Vec<String>, values: Vec<f64> },
    /// Point per label at its value
    Scatter { labels: Vec<String>, values: Vec<f64> },
}

impl ChartData {
    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::GroupedBar { .. } => ChartKind::GroupedBar,
            ChartData::Donut { .. } => ChartKind::Donut,
            ChartData::Scatter { .. } => ChartKind::Scatter,
        }
    }
}

/// Render a chart to a PNG file, replacing any existing file at `path`
pub fn render_chart(layout: &ChartLayout, data: &ChartData, path: &Path) -> Result<()> {
    tracing::debug!(
        kind = ?data.kind(),
        path = %path.display(),
        width = layout.width,
        height = layout.height,
        "rendering chart"
    );

    // Checked up front: the bitmap backend only reports a bad path when saving
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.is_dir() {
            return Err(NutritionError::Render(format!(
                "output directory {} does not exist",
                parent.display()
            )));
        }
    }

    match data {
        ChartData::GroupedBar { categories, series } => {
            bar::draw_grouped_bars(path, layout, categories, series)
        }
        ChartData::Donut { labels, values } => donut::draw_donut(path, layout, labels, values),
        ChartData::Scatter { labels, values } => scatter::draw_scatter(path, layout, labels, values),
    }
}

/// Font family used for every text element
pub(crate) const FONT: &str = "sans-serif";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_builder() {
        let layout = ChartLayout::new("Top 5", (1000, 600))
            .y_label("Jumlah")
            .legend_title("Kandungan Gizi");
        assert_eq!(layout.title, "Top 5");
        assert_eq!(layout.width, 1000);
        assert_eq!(layout.height, 600);
        assert_eq!(layout.x_label, None);
        assert_eq!(layout.y_label.as_deref(), Some("Jumlah"));
        assert_eq!(layout.legend_title.as_deref(), Some("Kandungan Gizi"));
    }

    #[test]
    fn test_chart_data_kind() {
        let donut = ChartData::Donut {
            labels: vec![],
            values: vec![],
        };
        assert_eq!(donut.kind(), ChartKind::Donut);
    }

    const PNG_SIGNATURE: &[u8] = b"\x89PNG";

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Render into a temp dir and return the file bytes
    fn render_bytes(data: &ChartData) -> Vec<u8> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let layout = ChartLayout::new("Chart", (400, 300))
            .x_label("Nama Makanan")
            .y_label("Jumlah");
        render_chart(&layout, data, &path).unwrap();
        std::fs::read(&path).unwrap()
    }

    #[test]
    fn test_render_grouped_bar() {
        let data = ChartData::GroupedBar {
            categories: names(&["calories", "fat", "carbohydrate", "proteins"]),
            series: vec![
                Series {
                    name: "Abon".to_string(),
                    values: vec![210.0, 11.0, 10.0, 5.0],
                },
                Series {
                    name: "Ayam".to_string(),
                    values: vec![160.0, f64::NAN, 10.0, 5.0],
                },
            ],
        };
        assert!(render_bytes(&data).starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_grouped_bar_without_data() {
        let empty = ChartData::GroupedBar {
            categories: vec![],
            series: vec![],
        };
        assert!(render_bytes(&empty).starts_with(PNG_SIGNATURE));

        let all_nan = ChartData::GroupedBar {
            categories: names(&["calories", "fat"]),
            series: vec![Series {
                name: "Abon".to_string(),
                values: vec![f64::NAN, f64::NAN],
            }],
        };
        assert!(render_bytes(&all_nan).starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_donut() {
        let data = ChartData::Donut {
            labels: names(&["Abon", "Ayam", "Tahu"]),
            values: vec![200.0, 150.0, 156.0],
        };
        assert!(render_bytes(&data).starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_donut_without_data() {
        let empty = ChartData::Donut {
            labels: vec![],
            values: vec![],
        };
        assert!(render_bytes(&empty).starts_with(PNG_SIGNATURE));

        let all_nan = ChartData::Donut {
            labels: names(&["Abon", "Ayam"]),
            values: vec![f64::NAN, f64::NAN],
        };
        assert!(render_bytes(&all_nan).starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_scatter() {
        let data = ChartData::Scatter {
            labels: names(&["Abon Sapi", "Tahu", "Tahu"]),
            values: vec![12.0, 7.0, 5.0],
        };
        assert!(render_bytes(&data).starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_scatter_without_data() {
        let empty = ChartData::Scatter {
            labels: vec![],
            values: vec![],
        };
        assert!(render_bytes(&empty).starts_with(PNG_SIGNATURE));

        let all_nan = ChartData::Scatter {
            labels: names(&["Abon"]),
            values: vec![f64::NAN],
        };
        assert!(render_bytes(&all_nan).starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_render_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        std::fs::write(&path, b"stale").unwrap();

        let data = ChartData::Scatter {
            labels: names(&["Tahu"]),
            values: vec![5.0],
        };
        render_chart(&ChartLayout::new("t", (300, 200)), &data, &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_unwritable_output_is_render_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("chart.png");
        let data = ChartData::Scatter {
            labels: vec!["Tahu".to_string()],
            values: vec![5.0],
        };

        let err = render_chart(&ChartLayout::new("t", (200, 200)), &data, &path).unwrap_err();
        assert!(matches!(err, crate::nutrition::NutritionError::Render(_)));
    }
}

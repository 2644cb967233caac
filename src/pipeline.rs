//! Startup pipeline: load → aggregate → render
//!
//! Runs once, synchronously, before the page server binds. The four derived
//! views are computed from the dataset, turned into chart data and written
//! to the output directory under fixed filenames.
//!
//! There is no partial-failure isolation: the first chart that fails aborts
//! the remaining ones.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::charts::{self, ChartData, ChartLayout, Series};
use crate::config::DashboardConfig;
use crate::nutrition::{
    compare_categories, grouped_sum, top_n, ComparisonTable, Dataset, GroupedSumTable,
    NutrientField, RankingTable, Result,
};

/// Y axis description shared by the bar charts
const AMOUNT_LABEL: &str = "Jumlah (gram atau kkal)";

/// The four chart artifacts published by the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    CategoryComparison,
    TopCalories,
    PopularFoodCalories,
    TopFat,
}

impl Artifact {
    /// Render and display order
    pub const ALL: [Artifact; 4] = [
        Artifact::CategoryComparison,
        Artifact::TopCalories,
        Artifact::PopularFoodCalories,
        Artifact::TopFat,
    ];

    /// Stable key of the artifact on the page
    pub fn key(&self) -> &'static str {
        match self {
            Artifact::CategoryComparison => "abon_ayam",
            Artifact::TopCalories => "top5_kalori",
            Artifact::PopularFoodCalories => "pie_kalori",
            Artifact::TopFat => "top5_lemak",
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            Artifact::CategoryComparison => "perbandingan_abon_ayam.png",
            Artifact::TopCalories => "top5_kalori.png",
            Artifact::PopularFoodCalories => "perbandingan_5_makanan_pie.png",
            Artifact::TopFat => "top5_lemak.png",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Artifact::CategoryComparison => "Perbandingan Kandungan Gizi: Abon vs Ayam",
            Artifact::TopCalories => "Top 5 Makanan dengan Kalori Tertinggi dan Kandungan Gizinya",
            Artifact::PopularFoodCalories => "Perbandingan Kalori 5 Makanan Populer",
            Artifact::TopFat => "5 Makanan dengan Lemak Tertinggi",
        }
    }

    /// Chart size when no override is configured
    pub fn default_size(&self) -> (u32, u32) {
        match self {
            Artifact::CategoryComparison => (800, 500),
            Artifact::TopCalories => (1000, 600),
            Artifact::PopularFoodCalories => (600, 600),
            Artifact::TopFat => (800, 600),
        }
    }
}

/// A rendered chart file
#[derive(Debug, Clone, PartialEq)]
pub struct ChartArtifact {
    pub artifact: Artifact,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// The four derived tables behind the charts
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardViews {
    pub comparison: ComparisonTable,
    pub top_calories: RankingTable,
    pub popular_foods: GroupedSumTable,
    pub top_fat: RankingTable,
}

impl DashboardViews {
    pub fn compute(dataset: &Dataset, config: &DashboardConfig) -> Result<Self> {
        Ok(Self {
            comparison: compare_categories(dataset, &config.categories)?,
            top_calories: top_n(dataset, NutrientField::Calories, config.top_n)?,
            popular_foods: grouped_sum(dataset, &config.popular_foods)?,
            top_fat: top_n(dataset, NutrientField::Fat, config.top_n)?,
        })
    }

    /// Chart data and axis text for one artifact
    pub fn chart(&self, artifact: Artifact, size: (u32, u32)) -> (ChartLayout, ChartData) {
        let layout = ChartLayout::new(artifact.title(), size);
        match artifact {
            Artifact::CategoryComparison => (
                layout.y_label(AMOUNT_LABEL).legend_title("Makanan"),
                comparison_bars(&self.comparison),
            ),
            Artifact::TopCalories => (
                layout.y_label(AMOUNT_LABEL).legend_title("Kandungan Gizi"),
                ranking_bars(&self.top_calories),
            ),
            Artifact::PopularFoodCalories => (layout, calories_donut(&self.popular_foods)),
            Artifact::TopFat => (
                layout.x_label("Nama Makanan").y_label("Lemak (gram)"),
                ranking_scatter(&self.top_fat),
            ),
        }
    }
}

/// Nutrients on x, one series per category
fn comparison_bars(table: &ComparisonTable) -> ChartData {
    ChartData::GroupedBar {
        categories: NutrientField::ALL.iter().map(|f| f.column().to_string()).collect(),
        series: table
            .categories
            .iter()
            .map(|category| Series {
                name: category.label.clone(),
                values: NutrientField::ALL.iter().map(|f| category.means.get(*f)).collect(),
            })
            .collect(),
    }
}

/// Foods on x, one series per nutrient
fn ranking_bars(table: &RankingTable) -> ChartData {
    ChartData::GroupedBar {
        categories: table.records.iter().map(|r| r.name.clone()).collect(),
        series: NutrientField::ALL
            .iter()
            .map(|field| Series {
                name: field.column().to_string(),
                values: table.records.iter().map(|r| r.value(*field)).collect(),
            })
            .collect(),
    }
}

fn calories_donut(table: &GroupedSumTable) -> ChartData {
    ChartData::Donut {
        labels: table.totals.iter().map(|r| r.name.clone()).collect(),
        values: table.totals.iter().map(|r| r.nutrients.calories).collect(),
    }
}

fn ranking_scatter(table: &RankingTable) -> ChartData {
    ChartData::Scatter {
        labels: table.records.iter().map(|r| r.name.clone()).collect(),
        values: table.records.iter().map(|r| r.value(table.field)).collect(),
    }
}

/// Render the four charts into `config.output_dir`, creating it if needed
pub fn generate_charts(views: &DashboardViews, config: &DashboardConfig) -> Result<Vec<ChartArtifact>> {
    std::fs::create_dir_all(&config.output_dir)?;

    let mut artifacts = Vec::with_capacity(Artifact::ALL.len());
    for artifact in Artifact::ALL {
        let t0 = Instant::now();
        let (width, height) = config.resolve_dimensions(artifact.default_size());
        let path = artifact_path(&config.output_dir, artifact);

        let (layout, data) = views.chart(artifact, (width, height));
        if let Err(e) = charts::render_chart(&layout, &data, &path) {
            if !artifacts.is_empty() {
                tracing::warn!(
                    written = artifacts.len(),
                    "chart generation aborted, earlier charts of this run remain on disk"
                );
            }
            return Err(e);
        }

        tracing::info!(
            file = artifact.filename(),
            width,
            height,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "chart written"
        );

        artifacts.push(ChartArtifact {
            artifact,
            path,
            width,
            height,
        });
    }

    Ok(artifacts)
}

pub fn artifact_path(output_dir: &Path, artifact: Artifact) -> PathBuf {
    output_dir.join(artifact.filename())
}

/// Result of a successful startup run
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub views: DashboardViews,
    pub artifacts: Vec<ChartArtifact>,
}

/// Load the dataset, compute the views and render every chart
pub fn run(config: &DashboardConfig) -> Result<PipelineOutput> {
    let t0 = Instant::now();

    tracing::info!(path = %config.input_path.display(), "[1/3] loading dataset");
    let dataset = Dataset::load_csv(&config.input_path)?;
    tracing::info!(rows = dataset.len(), "dataset loaded");

    tracing::info!("[2/3] computing views");
    let views = DashboardViews::compute(&dataset, config)?;

    tracing::info!(dir = %config.output_dir.display(), "[3/3] rendering charts");
    let artifacts = generate_charts(&views, config)?;

    tracing::info!(
        charts = artifacts.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "all charts generated"
    );

    Ok(PipelineOutput { views, artifacts })
}

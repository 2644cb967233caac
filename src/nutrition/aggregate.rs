//! Descriptive aggregates over the nutrition table
//!
//! Three views, none of which mutate the dataset:
//! - `compare_categories`: mean nutrients per substring-matched category
//! - `top_n`: highest rows by one nutrient, stable on ties
//! - `grouped_sum`: per-name totals for a whitelist of names

use polars::prelude::*;
use serde::Deserialize;

use super::data::{
    records_from_frame, Dataset, FoodRecord, NutrientField, NutrientValues, NAME_COLUMN,
};
use super::error::{NutritionError, Result};

/// A category matched by case-insensitive substring on the food name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryPattern {
    pub label: String,
    pub pattern: String,
}

impl CategoryPattern {
    pub fn new(label: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            pattern: pattern.into(),
        }
    }
}

/// Mean nutrients of one category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMeans {
    pub label: String,
    /// Number of rows whose name matched the pattern
    pub matched: usize,
    /// NaN for every field when nothing matched
    pub means: NutrientValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonTable {
    pub categories: Vec<CategoryMeans>,
}

impl ComparisonTable {
    pub fn get(&self, label: &str) -> Option<&CategoryMeans> {
        self.categories.iter().find(|c| c.label == label)
    }
}

/// Top rows by one nutrient, highest first
#[derive(Debug, Clone, PartialEq)]
pub struct RankingTable {
    pub field: NutrientField,
    pub records: Vec<FoodRecord>,
}

/// Per-name nutrient totals, ordered by name
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSumTable {
    pub totals: Vec<FoodRecord>,
}

impl GroupedSumTable {
    pub fn get(&self, name: &str) -> Option<&FoodRecord> {
        self.totals.iter().find(|r| r.name == name)
    }
}

/// Mean of each nutrient over the rows matching each category
///
/// Matching is a case-insensitive substring test on `name`; null names never
/// match. Categories are not mutually exclusive, so one row may contribute
/// to several means.
pub fn compare_categories(
    dataset: &Dataset,
    patterns: &[CategoryPattern],
) -> Result<ComparisonTable> {
    let names = dataset.names()?;
    let mut categories = Vec::with_capacity(patterns.len());

    for pattern in patterns {
        let needle = pattern.pattern.to_lowercase();
        let mask: BooleanChunked = names
            .into_iter()
            .map(|name| name.is_some_and(|n| n.to_lowercase().contains(&needle)))
            .collect();

        let matched = dataset.frame().filter(&mask)?;

        let mut means = NutrientValues::default();
        for field in NutrientField::ALL {
            let mean = matched
                .column(field.column())?
                .as_materialized_series()
                .mean()
                .unwrap_or(f64::NAN);
            means.set(field, mean);
        }

        tracing::debug!(
            label = %pattern.label,
            pattern = %pattern.pattern,
            matched = matched.height(),
            "category means computed"
        );

        categories.push(CategoryMeans {
            label: pattern.label.clone(),
            matched: matched.height(),
            means,
        });
    }

    Ok(ComparisonTable { categories })
}

/// The `n` rows with the largest `field`, descending
///
/// Ties keep their input order and missing values sort last. Asking for
/// more rows than exist returns them all.
pub fn top_n(dataset: &Dataset, field: NutrientField, n: usize) -> Result<RankingTable> {
    if n == 0 && dataset.is_empty() {
        return Err(NutritionError::EmptyInput(format!(
            "top 0 by {} requested against an empty dataset",
            field.column()
        )));
    }

    let sorted = dataset.frame().sort(
        [field.column()],
        SortMultipleOptions::default()
            .with_order_descending(true)
            .with_nulls_last(true)
            .with_maintain_order(true),
    )?;
    // Polars orders NaN above every number, so move NaN rows behind real values
    let (mut records, missing): (Vec<FoodRecord>, Vec<FoodRecord>) = records_from_frame(&sorted)?
        .into_iter()
        .partition(|r| !r.value(field).is_nan());
    records.extend(missing);
    records.truncate(n);

    Ok(RankingTable { field, records })
}

/// Sum nutrients per name for rows whose name is in `names`
///
/// Matching is exact. Whitelisted names without rows are left out.
pub fn grouped_sum(dataset: &Dataset, names: &[String]) -> Result<GroupedSumTable> {
    let mask: BooleanChunked = dataset
        .names()?
        .into_iter()
        .map(|name| name.is_some_and(|n| names.iter().any(|w| w == n)))
        .collect();

    let filtered = dataset.frame().filter(&mask)?;

    let sums: Vec<Expr> = NutrientField::ALL
        .iter()
        .map(|field| col(field.column()).sum())
        .collect();

    let grouped = filtered
        .lazy()
        .group_by([col(NAME_COLUMN)])
        .agg(sums)
        .sort([NAME_COLUMN], SortMultipleOptions::default())
        .collect()?;

    Ok(GroupedSumTable {
        totals: records_from_frame(&grouped)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn food(name: &str, calories: f64, fat: f64) -> FoodRecord {
        FoodRecord::new(
            name,
            NutrientValues {
                calories,
                fat,
                carbohydrate: 1.0,
                proteins: 2.0,
            },
        )
    }

    /// Six rows: two Abon, two Ayam, two unrelated
    fn fixture() -> Dataset {
        Dataset::from_records(&[
            food("Abon Sapi", 200.0, 10.0),
            food("Ayam Goreng", 150.0, 8.0),
            food("abon ikan", 220.0, 12.0),
            food("Tempe", 190.0, 4.0),
            food("AYAM bakar", 170.0, 6.0),
            food("Nasi", 180.0, 0.5),
        ])
        .unwrap()
    }

    fn default_patterns() -> Vec<CategoryPattern> {
        vec![
            CategoryPattern::new("Abon", "Abon"),
            CategoryPattern::new("Ayam", "Ayam"),
        ]
    }

    #[test]
    fn test_compare_categories_means() {
        let table = compare_categories(&fixture(), &default_patterns()).unwrap();

        let abon = table.get("Abon").unwrap();
        assert_eq!(abon.matched, 2);
        assert_eq!(abon.means.calories, 210.0);
        assert_eq!(abon.means.fat, 11.0);

        let ayam = table.get("Ayam").unwrap();
        assert_eq!(ayam.matched, 2);
        assert_eq!(ayam.means.calories, 160.0);
        assert_eq!(ayam.means.proteins, 2.0);
    }

    #[test]
    fn test_compare_categories_keeps_pattern_order() {
        let table = compare_categories(&fixture(), &default_patterns()).unwrap();
        let labels: Vec<&str> = table.categories.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Abon", "Ayam"]);
    }

    #[test]
    fn test_compare_categories_no_match_is_nan() {
        let patterns = vec![CategoryPattern::new("Sate", "sate")];
        let table = compare_categories(&fixture(), &patterns).unwrap();

        let sate = table.get("Sate").unwrap();
        assert_eq!(sate.matched, 0);
        assert!(sate.means.calories.is_nan());
        assert!(sate.means.fat.is_nan());
    }

    #[test]
    fn test_compare_categories_allows_overlap() {
        let dataset = Dataset::from_records(&[
            food("Abon Ayam", 300.0, 20.0),
            food("Ayam Kukus", 100.0, 2.0),
        ])
        .unwrap();

        let table = compare_categories(&dataset, &default_patterns()).unwrap();
        assert_eq!(table.get("Abon").unwrap().matched, 1);
        assert_eq!(table.get("Abon").unwrap().means.calories, 300.0);
        assert_eq!(table.get("Ayam").unwrap().matched, 2);
        assert_eq!(table.get("Ayam").unwrap().means.calories, 200.0);
    }

    #[test]
    fn test_top_n_stable_on_ties() {
        let dataset = Dataset::from_records(&[
            food("A", 10.0, 0.0),
            food("B", 30.0, 0.0),
            food("C", 30.0, 0.0),
            food("D", 5.0, 0.0),
        ])
        .unwrap();

        let top = top_n(&dataset, NutrientField::Calories, 2).unwrap();
        let names: Vec<&str> = top.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["B", "C"]);
        assert_eq!(top.field, NutrientField::Calories);
    }

    #[test]
    fn test_top_n_descending() {
        let top = top_n(&fixture(), NutrientField::Fat, 5).unwrap();
        assert_eq!(top.records.len(), 5);
        for pair in top.records.windows(2) {
            assert!(pair[0].nutrients.fat >= pair[1].nutrients.fat);
        }
        assert_eq!(top.records[0].name, "abon ikan");
    }

    #[test]
    fn test_top_n_more_than_available() {
        let top = top_n(&fixture(), NutrientField::Calories, 50).unwrap();
        assert_eq!(top.records.len(), 6);
    }

    #[test]
    fn test_top_n_zero() {
        let top = top_n(&fixture(), NutrientField::Calories, 0).unwrap();
        assert!(top.records.is_empty());

        let empty = Dataset::from_records(&[]).unwrap();
        let err = top_n(&empty, NutrientField::Calories, 0).unwrap_err();
        assert!(matches!(err, NutritionError::EmptyInput(_)));

        let top = top_n(&empty, NutrientField::Calories, 5).unwrap();
        assert!(top.records.is_empty());
    }

    #[test]
    fn test_top_n_missing_values_last() {
        let dataset = Dataset::from_records(&[
            food("A", f64::NAN, 0.0),
            food("B", 30.0, 0.0),
            food("C", 40.0, 0.0),
        ])
        .unwrap();

        let top = top_n(&dataset, NutrientField::Calories, 2).unwrap();
        let names: Vec<&str> = top.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["C", "B"]);
    }

    #[test]
    fn test_grouped_sum_adds_duplicates() {
        let dataset = Dataset::from_records(&[
            food("Tahu", 80.0, 5.0),
            food("Telur", 154.0, 10.0),
            food("Tahu", 76.0, 7.0),
            food("Tahu Goreng", 115.0, 9.0),
        ])
        .unwrap();
        let whitelist: Vec<String> = ["Abon", "Ayam", "Telur", "Ikan", "Tahu"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let table = grouped_sum(&dataset, &whitelist).unwrap();

        let tahu = table.get("Tahu").unwrap();
        assert_eq!(tahu.nutrients.fat, 12.0);
        assert_eq!(tahu.nutrients.calories, 156.0);
        assert_eq!(tahu.nutrients.proteins, 4.0);

        // exact match only, absent names are not zero-filled
        assert!(table.get("Tahu Goreng").is_none());
        assert!(table.get("Abon").is_none());

        let names: Vec<&str> = table.totals.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Tahu", "Telur"]);
    }

    #[test]
    fn test_aggregates_are_deterministic() {
        let dataset = fixture();
        let first = compare_categories(&dataset, &default_patterns()).unwrap();
        let second = compare_categories(&dataset, &default_patterns()).unwrap();
        assert_eq!(first, second);

        let first = top_n(&dataset, NutrientField::Calories, 5).unwrap();
        let second = top_n(&dataset, NutrientField::Calories, 5).unwrap();
        assert_eq!(first, second);
    }
}

//! Nutrition dataset module
//!
//! Structure:
//! - `data.rs`: CSV loading, schema normalization, `FoodRecord`
//! - `aggregate.rs`: comparison means, top-N rankings, grouped sums
//! - `error.rs`: Error types

pub mod aggregate;
pub mod data;
pub mod error;

pub use aggregate::{
    compare_categories, grouped_sum, top_n, CategoryMeans, CategoryPattern, ComparisonTable,
    GroupedSumTable, RankingTable,
};
pub use data::{Dataset, FoodRecord, NutrientField, NutrientValues};
pub use error::{ErrorKind, NutritionError, Result};

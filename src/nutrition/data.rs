//! Nutrition table loading
//!
//! Reads the CSV with Polars and normalizes it to a fixed schema:
//! `name` as String and the four nutrient columns as Float64.
//! Extra columns in the file are dropped.

use std::path::Path;

use polars::prelude::*;

use super::error::{NutritionError, Result};

/// Column holding the food identifier
pub const NAME_COLUMN: &str = "name";

/// Numeric nutrient columns of the dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    Calories,
    Fat,
    Carbohydrate,
    Proteins,
}

impl NutrientField {
    pub const ALL: [NutrientField; 4] = [
        NutrientField::Calories,
        NutrientField::Fat,
        NutrientField::Carbohydrate,
        NutrientField::Proteins,
    ];

    /// Column name in the CSV
    pub fn column(&self) -> &'static str {
        match self {
            NutrientField::Calories => "calories",
            NutrientField::Fat => "fat",
            NutrientField::Carbohydrate => "carbohydrate",
            NutrientField::Proteins => "proteins",
        }
    }
}

/// The four nutrient measurements of one food (or an aggregate of several)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutrientValues {
    pub calories: f64,
    pub fat: f64,
    pub carbohydrate: f64,
    pub proteins: f64,
}

impl NutrientValues {
    pub fn get(&self, field: NutrientField) -> f64 {
        match field {
            NutrientField::Calories => self.calories,
            NutrientField::Fat => self.fat,
            NutrientField::Carbohydrate => self.carbohydrate,
            NutrientField::Proteins => self.proteins,
        }
    }

    pub(crate) fn set(&mut self, field: NutrientField, value: f64) {
        match field {
            NutrientField::Calories => self.calories = value,
            NutrientField::Fat => self.fat = value,
            NutrientField::Carbohydrate => self.carbohydrate = value,
            NutrientField::Proteins => self.proteins = value,
        }
    }
}

/// One row of the nutrition dataset
#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecord {
    pub name: String,
    pub nutrients: NutrientValues,
}

impl FoodRecord {
    pub fn new(name: impl Into<String>, nutrients: NutrientValues) -> Self {
        Self {
            name: name.into(),
            nutrients,
        }
    }

    pub fn value(&self, field: NutrientField) -> f64 {
        self.nutrients.get(field)
    }
}

/// Loaded nutrition table, immutable for the process lifetime
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: DataFrame,
}

impl Dataset {
    /// Load the dataset from a CSV file with a header row
    pub fn load_csv(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(NutritionError::MissingInputFile(path.to_path_buf()));
        }

        let raw = CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?;

        tracing::debug!(
            path = %path.display(),
            rows = raw.height(),
            columns = raw.width(),
            "read nutrition csv"
        );

        Self::from_dataframe(raw)
    }

    /// Normalize an arbitrary DataFrame to the nutrition schema
    ///
    /// Nutrient columns are cast strictly, so a column holding text that
    /// does not parse as a number is a processing error.
    pub fn from_dataframe(raw: DataFrame) -> Result<Self> {
        let present: Vec<String> = raw
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();

        let required =
            std::iter::once(NAME_COLUMN).chain(NutrientField::ALL.iter().map(|f| f.column()));
        for column in required {
            if !present.iter().any(|p| p == column) {
                return Err(NutritionError::Processing(format!(
                    "required column '{}' not found (columns: {})",
                    column,
                    present.join(", ")
                )));
            }
        }

        let mut exprs = vec![col(NAME_COLUMN).strict_cast(DataType::String)];
        exprs.extend(
            NutrientField::ALL
                .iter()
                .map(|field| col(field.column()).strict_cast(DataType::Float64)),
        );

        let frame = raw.lazy().select(exprs).collect()?;
        Ok(Self { frame })
    }

    /// Build a dataset from in-memory records
    pub fn from_records(records: &[FoodRecord]) -> Result<Self> {
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        let values_of = |field: NutrientField| -> Vec<f64> {
            records.iter().map(|r| r.value(field)).collect()
        };

        let frame = df! {
            NAME_COLUMN => names,
            NutrientField::Calories.column() => values_of(NutrientField::Calories),
            NutrientField::Fat.column() => values_of(NutrientField::Fat),
            NutrientField::Carbohydrate.column() => values_of(NutrientField::Carbohydrate),
            NutrientField::Proteins.column() => values_of(NutrientField::Proteins)
        }?;

        Ok(Self { frame })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    /// Name column as a string array
    pub fn names(&self) -> Result<&StringChunked> {
        Ok(self.frame.column(NAME_COLUMN)?.as_materialized_series().str()?)
    }

    pub fn records(&self) -> Result<Vec<FoodRecord>> {
        records_from_frame(&self.frame)
    }
}

/// Convert a frame with the nutrition schema back into records
///
/// Null names become empty strings and null nutrients become NaN.
pub(crate) fn records_from_frame(frame: &DataFrame) -> Result<Vec<FoodRecord>> {
    let names = frame.column(NAME_COLUMN)?.as_materialized_series().str()?;

    let mut records: Vec<FoodRecord> = names
        .into_iter()
        .map(|name| FoodRecord::new(name.unwrap_or_default(), NutrientValues::default()))
        .collect();

    for field in NutrientField::ALL {
        let values = frame.column(field.column())?.as_materialized_series().f64()?;
        for (record, value) in records.iter_mut().zip(values.into_iter()) {
            record.nutrients.set(field, value.unwrap_or(f64::NAN));
        }
    }

    Ok(records)
}

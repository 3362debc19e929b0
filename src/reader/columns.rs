//! Column extraction from Arrow record batches
//!
//! Converts record batches with the birth-record schema into `Observation`s.
//! Columns are looked up by name and cast to the expected type; a value that
//! cannot be cast, a null, or a value outside its coding is an error naming the
//! column and the row.

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Schema};
use arrow::record_batch::RecordBatch;
use rustc_hash::FxHashMap;

use crate::error::{AnalysisError, Result};
use crate::models::{Education, Exposure, InfantSex, Observation, Race};

pub const MATERNAL_AGE: &str = "maternal_age";
pub const EDUCATION: &str = "education";
pub const INFANT_SEX: &str = "infant_sex";
pub const BIRTH_WEIGHT: &str = "birth_weight";
pub const PRETERM: &str = "preterm";
pub const RACE: &str = "race";
pub const BLACK_CARBON: &str = "black_carbon";

/// Every column the loader requires
pub const REQUIRED_COLUMNS: [&str; 7] = [
    MATERNAL_AGE,
    EDUCATION,
    INFANT_SEX,
    BIRTH_WEIGHT,
    PRETERM,
    RACE,
    BLACK_CARBON,
];

/// Check that every required column is present, naming all that are not
pub fn check_required_columns(schema: &Schema) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|&&name| schema.index_of(name).is_err())
        .map(|&name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::MissingColumns { columns: missing })
    }
}

/// Tally of race cells that carried none of the six codes
pub type UnclassifiedRaces = FxHashMap<String, usize>;

/// Get a column from a record batch, cast to `expected_type`
///
/// Returns the original column (for distinguishing nulls from failed casts)
/// together with the cast column.
pub fn get_column(
    batch: &RecordBatch,
    column_name: &str,
    expected_type: &DataType,
) -> Result<(ArrayRef, ArrayRef)> {
    let Ok(idx) = batch.schema().index_of(column_name) else {
        return Err(AnalysisError::MissingColumns {
            columns: vec![column_name.to_string()],
        });
    };

    let column = batch.column(idx).clone();
    if column.data_type() == expected_type {
        return Ok((column.clone(), column));
    }

    log::debug!(
        "Casting column '{column_name}' from {} to {expected_type}",
        column.data_type()
    );
    let converted = cast(&column, expected_type)?;
    Ok((column, converted))
}

/// Numeric view of a column, with every row required to be present and finite
struct NumericColumn {
    name: &'static str,
    original: ArrayRef,
    values: Float64Array,
}

impl NumericColumn {
    fn new(batch: &RecordBatch, name: &'static str) -> Result<Self> {
        let (original, converted) = get_column(batch, name, &DataType::Float64)?;
        let values = converted
            .as_any()
            .downcast_ref::<Float64Array>()
            .cloned()
            .ok_or_else(|| AnalysisError::invalid_value(name, 0, "column is not numeric"))?;
        Ok(Self {
            name,
            original,
            values,
        })
    }

    fn value(&self, row: usize, row_offset: usize) -> Result<f64> {
        if self.original.is_null(row) {
            return Err(AnalysisError::invalid_value(
                self.name,
                row_offset + row,
                "missing value",
            ));
        }
        if self.values.is_null(row) {
            return Err(AnalysisError::invalid_value(
                self.name,
                row_offset + row,
                "value is not numeric",
            ));
        }
        let value = self.values.value(row);
        if !value.is_finite() {
            return Err(AnalysisError::invalid_value(
                self.name,
                row_offset + row,
                format!("non-finite value {value}"),
            ));
        }
        Ok(value)
    }

    /// Value as an integer code; fractional values are rejected
    fn code(&self, row: usize, row_offset: usize) -> Result<i64> {
        let value = self.value(row, row_offset)?;
        if value.fract() != 0.0 {
            return Err(AnalysisError::invalid_value(
                self.name,
                row_offset + row,
                format!("expected an integer code, got {value}"),
            ));
        }
        Ok(value as i64)
    }
}

fn decode<T>(
    column: &NumericColumn,
    row: usize,
    row_offset: usize,
    allowed: &str,
    parse: fn(i64) -> Option<T>,
) -> Result<T> {
    let code = column.code(row, row_offset)?;
    parse(code).ok_or_else(|| {
        AnalysisError::invalid_value(
            column.name,
            row_offset + row,
            format!("code {code} outside {allowed}"),
        )
    })
}

/// Convert one record batch into observations
///
/// `row_offset` is the index of the batch's first row in the whole input and is
/// only used in error messages.
pub fn batch_to_observations(
    batch: &RecordBatch,
    row_offset: usize,
    unclassified: &mut UnclassifiedRaces,
) -> Result<Vec<Observation>> {
    check_required_columns(&batch.schema())?;

    let maternal_age = NumericColumn::new(batch, MATERNAL_AGE)?;
    let education = NumericColumn::new(batch, EDUCATION)?;
    let infant_sex = NumericColumn::new(batch, INFANT_SEX)?;
    let birth_weight = NumericColumn::new(batch, BIRTH_WEIGHT)?;
    let preterm = NumericColumn::new(batch, PRETERM)?;
    let black_carbon = NumericColumn::new(batch, BLACK_CARBON)?;

    let (_, race_array) = get_column(batch, RACE, &DataType::Utf8)?;
    let races = race_array
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| AnalysisError::invalid_value(RACE, row_offset, "column is not text"))?;

    let mut observations = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let race = if races.is_null(row) {
            *unclassified.entry(String::new()).or_insert(0) += 1;
            None
        } else {
            let code = races.value(row);
            let race = Race::from_code(code);
            if race.is_none() {
                *unclassified.entry(code.trim().to_string()).or_insert(0) += 1;
            }
            race
        };

        let preterm = decode(&preterm, row, row_offset, "{0, 1}", |c| match c {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        })?;

        observations.push(Observation {
            maternal_age: maternal_age.value(row, row_offset)?,
            education: decode(&education, row, row_offset, "1-5", Education::from_code)?,
            infant_sex: decode(&infant_sex, row, row_offset, "{0, 1}", InfantSex::from_code)?,
            birth_weight: birth_weight.value(row, row_offset)?,
            preterm,
            race,
            black_carbon: decode(&black_carbon, row, row_offset, "{0, 1}", Exposure::from_code)?,
        });
    }

    Ok(observations)
}

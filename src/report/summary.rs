//! Summary table across population slices

use std::fmt;
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, StringArray, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::report::record::EstimateRecord;

/// A population whose analysis failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceFailure {
    pub population: String,
    pub error: String,
}

/// Estimates for every population that could be analysed, plus the failures
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub records: Vec<EstimateRecord>,
    pub failures: Vec<SliceFailure>,
}

impl Summary {
    /// True when no population failed
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Record for a population label
    #[must_use]
    pub fn record(&self, population: &str) -> Option<&EstimateRecord> {
        self.records.iter().find(|r| r.population == population)
    }

    /// Arrow schema of the summary table
    #[must_use]
    pub fn table_schema() -> Schema {
        Schema::new(vec![
            Field::new("population", DataType::Utf8, false),
            Field::new("n", DataType::UInt64, false),
            Field::new("estimate", DataType::Float64, false),
            Field::new("lower", DataType::Float64, false),
            Field::new("upper", DataType::Float64, false),
        ])
    }

    /// The summary table as a record batch, estimates rounded for reporting
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let rounded: Vec<_> = self.records.iter().map(EstimateRecord::rounded).collect();

        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from_iter_values(
                self.records.iter().map(|r| r.population.as_str()),
            )),
            Arc::new(UInt64Array::from_iter_values(
                self.records.iter().map(|r| r.n as u64),
            )),
            Arc::new(Float64Array::from_iter_values(rounded.iter().map(|r| r.0))),
            Arc::new(Float64Array::from_iter_values(rounded.iter().map(|r| r.1))),
            Arc::new(Float64Array::from_iter_values(rounded.iter().map(|r| r.2))),
        ];

        Ok(RecordBatch::try_new(Arc::new(Self::table_schema()), columns)?)
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<34} {:>10} {:>10} {:>10} {:>10}",
            "Population", "N", "Estimate", "Lower", "Upper"
        )?;
        writeln!(f, "{}", "-".repeat(78))?;
        for record in &self.records {
            let (estimate, lower, upper) = record.rounded();
            writeln!(
                f,
                "{:<34} {:>10} {:>10.4} {:>10.4} {:>10.4}",
                record.population, record.n, estimate, lower, upper
            )?;
        }
        for failure in &self.failures {
            writeln!(f, "{:<34} failed: {}", failure.population, failure.error)?;
        }
        Ok(())
    }
}

//! Tests for the summary table and report writers

use arrow::array::{Array, Float64Array, StringArray, UInt64Array};
use bc_gcomp::report::{AnalysisReport, SliceFailure, write_json_report, write_summary_csv};
use bc_gcomp::{EstimateRecord, Summary};

use crate::utils::{temp_path, test_config};

fn record(population: &str, n: usize, estimate: f64, lower: f64, upper: f64) -> EstimateRecord {
    EstimateRecord {
        population: population.to_string(),
        n,
        estimate,
        lower,
        upper,
        current_risk: 0.112_345,
        low_exposure_risk: 0.112_345 + estimate,
        replications: 500,
        exposure_identified: true,
    }
}

fn summary() -> Summary {
    Summary {
        records: vec![
            record("Total", 12_000, -0.012_345_6, -0.020_111_2, -0.004_999_9),
            record("Black", 1_900, -0.031_25, -0.061_77, 0.000_04),
        ],
        failures: vec![SliceFailure {
            population: "Native Hawaiian/Pacific Islander".to_string(),
            error: "Insufficient data: 3 births for 9 parameters".to_string(),
        }],
    }
}

#[test]
fn test_record_batch_is_rounded() {
    let batch = summary().to_record_batch().unwrap();
    assert_eq!(batch.num_rows(), 2);
    assert_eq!(batch.schema(), std::sync::Arc::new(Summary::table_schema()));

    let population = batch
        .column(0)
        .as_any()
        .downcast_ref::<StringArray>()
        .unwrap();
    let n = batch
        .column(1)
        .as_any()
        .downcast_ref::<UInt64Array>()
        .unwrap();
    let column = |i: usize| {
        batch
            .column(i)
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap()
            .clone()
    };
    let (estimate, lower, upper) = (column(2), column(3), column(4));

    assert_eq!(population.value(0), "Total");
    assert_eq!(n.value(0), 12_000);
    assert_eq!(estimate.value(0), -0.0123);
    assert_eq!(lower.value(0), -0.0201);
    assert_eq!(upper.value(0), -0.005);
    assert_eq!(estimate.value(1), -0.0313);
    assert_eq!(upper.value(1), 0.0);
    assert_eq!(lower.null_count(), 0);
}

#[test]
fn test_summary_csv_has_header_and_rows() {
    let path = temp_path("out/summary.csv");
    write_summary_csv(&summary(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "population,n,estimate,lower,upper");
    assert!(lines[1].starts_with("Total,12000,-0.0123,"));
    assert!(lines[2].starts_with("Black,1900,"));
}

#[test]
fn test_json_report_keeps_full_precision() {
    let config = test_config(500, 1234);
    let report = AnalysisReport::new(summary(), config.clone(), None);
    let path = temp_path("report.json");
    write_json_report(&report, &path).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["config"]["replications"], 500);
    assert_eq!(value["config"]["seed"], 1234);
    assert_eq!(value["records"][0]["estimate"], -0.012_345_6);
    assert_eq!(value["records"].as_array().unwrap().len(), 2);
    assert_eq!(
        value["failures"][0]["population"],
        "Native Hawaiian/Pacific Islander"
    );
    assert!(value["generated_at"].is_string());

    let parsed: AnalysisReport = serde_json::from_value(value).unwrap();
    assert_eq!(parsed.summary, report.summary);
    assert_eq!(parsed.config, config);
}

#[test]
fn test_display_lists_records_and_failures() {
    let text = summary().to_string();
    assert!(text.contains("Population"));
    assert!(text.contains("-0.0123"));
    assert!(text.contains("Native Hawaiian/Pacific Islander"));
    assert!(text.contains("failed: Insufficient data"));
}

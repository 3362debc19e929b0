//! Tests for population slices and the per-slice pipeline

use bc_gcomp::algorithm::population::FilterCriteria;
use bc_gcomp::config::AnalysisConfigBuilder;
use bc_gcomp::{
    AnalysisError, Dataset, FitOptions, Observation, PopulationSlice, Race, analyze_slice,
    run_analysis, run_slices,
};

use crate::utils::{synthetic_cohort, test_config};

#[test]
fn test_slices_are_total_then_each_race() {
    let slices = PopulationSlice::all();
    let labels: Vec<_> = slices.iter().map(|s| s.label()).collect();

    assert_eq!(
        labels,
        vec![
            "Total",
            "American Indian/Alaska Native",
            "Asian",
            "Black",
            "Native Hawaiian/Pacific Islander",
            "White",
            "Hispanic",
        ]
    );
    assert_eq!(slices[0], PopulationSlice::Total);
}

#[test]
fn test_race_slice_selects_matching_rows() {
    let data = synthetic_cohort(2_000, 3);

    for race in Race::ALL {
        let slice = PopulationSlice::Race(race);
        let rows = slice.select(&data);
        assert_eq!(rows.len(), data.iter().filter(|o| o.race == Some(race)).count());
        assert!(rows.iter().all(|o| slice.meets_criteria(o)));
    }

    let unclassified = data.iter().filter(|o| o.race.is_none()).count();
    assert!(unclassified > 0);
    assert!(PopulationSlice::Total.select(&data).len() == data.len());
}

#[test]
fn test_full_analysis_reports_every_population() {
    let data = synthetic_cohort(6_000, 11);
    let summary = run_analysis(&data, &test_config(40, 2024));

    assert!(summary.is_complete(), "failures: {:?}", summary.failures);
    assert_eq!(summary.records.len(), 7);

    let total = summary.record("Total").unwrap();
    assert_eq!(total.n, data.len());

    let subgroup_n: usize = summary.records[1..].iter().map(|r| r.n).sum();
    assert!(subgroup_n < total.n, "unclassified rows belong to the total only");

    for race in Race::ALL {
        let record = summary.record(race.label()).unwrap();
        assert_eq!(record.n, data.filter_race(race).len());
    }

    for record in &summary.records {
        assert_eq!(record.replications, 40);
        assert!(record.lower <= record.upper, "{}", record.population);
        assert!((-1.0..=1.0).contains(&record.estimate));
        assert!(
            (0.0..=1.0).contains(&record.current_risk)
                && (0.0..=1.0).contains(&record.low_exposure_risk)
        );
    }
}

#[test]
fn test_failed_population_does_not_stop_the_others() {
    // Keep only three American Indian births, none of them preterm
    let mut kept_ai = 0;
    let observations: Vec<Observation> = synthetic_cohort(4_000, 12)
        .iter()
        .map(|obs| {
            if obs.race == Some(Race::AmericanIndian) {
                kept_ai += 1;
                if kept_ai > 3 {
                    return Observation {
                        race: Some(Race::White),
                        ..*obs
                    };
                }
                return Observation {
                    preterm: false,
                    ..*obs
                };
            }
            *obs
        })
        .collect();
    let data = Dataset::new(observations);
    assert_eq!(data.filter_race(Race::AmericanIndian).len(), 3);

    let summary = run_analysis(&data, &test_config(20, 7));

    assert!(!summary.is_complete());
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].population, Race::AmericanIndian.label());
    assert_eq!(summary.records.len(), 6);
    assert!(summary.record(Race::AmericanIndian.label()).is_none());
    assert!(summary.record("Total").is_some());
}

#[test]
fn test_non_converging_fit_fails_its_population() {
    let data = synthetic_cohort(3_000, 14);
    let config = AnalysisConfigBuilder::from_config(test_config(20, 8))
        .fit(FitOptions {
            max_iterations: 1,
            ..FitOptions::default()
        })
        .build()
        .unwrap();

    let err = analyze_slice(&data, PopulationSlice::Race(Race::Black), &config).unwrap_err();
    assert!(matches!(err, AnalysisError::NonConvergence { iterations: 1, .. }));

    // Every population is still attempted, in order, after the first failure
    let summary = run_analysis(&data, &config);
    assert!(summary.records.is_empty());
    let failed: Vec<_> = summary.failures.iter().map(|f| f.population.as_str()).collect();
    let expected: Vec<_> = PopulationSlice::all().iter().map(|s| s.label()).collect();
    assert_eq!(failed, expected);
    for failure in &summary.failures {
        assert!(
            failure.error.contains("did not converge after 1 iterations"),
            "{}: {}",
            failure.population,
            failure.error
        );
    }
    assert!(summary.to_string().contains("failed: Outcome model did not converge"));
}

#[test]
fn test_slices_are_independent_of_order() {
    let data = synthetic_cohort(3_000, 13);
    let config = test_config(20, 77);

    let forward = run_slices(
        &data,
        &[PopulationSlice::Race(Race::White), PopulationSlice::Total],
        &config,
    );
    let single = run_slices(&data, &[PopulationSlice::Total], &config);

    assert_eq!(forward.record("Total"), single.record("Total"));
}

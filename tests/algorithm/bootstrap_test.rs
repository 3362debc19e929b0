//! Tests for the percentile bootstrap of the risk difference

use bc_gcomp::algorithm::bootstrap::{draw_indices, replication_rng, resample, run_replications};
use bc_gcomp::config::AnalysisConfigBuilder;
use bc_gcomp::{Dataset, PopulationSlice, analyze_slice, estimate_contrast};

use crate::utils::{synthetic_cohort, test_config};

#[test]
fn test_same_seed_gives_identical_results() {
    let data = synthetic_cohort(600, 17);
    let config = test_config(60, 99);

    let first = analyze_slice(&data, PopulationSlice::Total, &config).unwrap();
    let second = analyze_slice(&data, PopulationSlice::Total, &config).unwrap();

    assert_eq!(first.record, second.record);
    assert_eq!(first.bootstrap.replicates, second.bootstrap.replicates);
}

#[test]
fn test_worker_count_does_not_change_results() {
    let data = synthetic_cohort(600, 18);
    let base = test_config(40, 5);

    let sequential = AnalysisConfigBuilder::from_config(base.clone())
        .use_parallel(false)
        .build()
        .unwrap();
    let two = AnalysisConfigBuilder::from_config(base.clone())
        .threads(2)
        .build()
        .unwrap();
    let four = AnalysisConfigBuilder::from_config(base)
        .threads(4)
        .build()
        .unwrap();

    let a = analyze_slice(&data, PopulationSlice::Total, &sequential).unwrap();
    let b = analyze_slice(&data, PopulationSlice::Total, &two).unwrap();
    let c = analyze_slice(&data, PopulationSlice::Total, &four).unwrap();

    assert_eq!(a.bootstrap.replicates, b.bootstrap.replicates);
    assert_eq!(a.bootstrap.replicates, c.bootstrap.replicates);
    assert_eq!(a.record, c.record);
}

#[test]
fn test_each_replication_refits_on_its_draw() {
    let data = synthetic_cohort(500, 23);
    let config = test_config(10, 314);
    let estimate = analyze_slice(&data, PopulationSlice::Total, &config).unwrap();

    for (replication, &value) in estimate.bootstrap.replicates.iter().enumerate() {
        let draw = resample(&data, &mut replication_rng(config.seed, replication));
        let (_, contrast) = estimate_contrast(&draw, &config.fit).unwrap();
        assert_eq!(value, contrast.risk_difference);
    }

    let distinct = estimate
        .bootstrap
        .replicates
        .iter()
        .filter(|&&v| v != estimate.record.estimate)
        .count();
    assert!(distinct > 0, "replicates should differ from the point estimate");
}

#[test]
fn test_point_estimate_uses_unresampled_data() {
    let data = synthetic_cohort(500, 29);
    let config = test_config(20, 1);
    let estimate = analyze_slice(&data, PopulationSlice::Total, &config).unwrap();
    let (_, contrast) = estimate_contrast(&data, &config.fit).unwrap();

    assert_eq!(estimate.record.estimate, contrast.risk_difference);
    assert_eq!(estimate.bootstrap.point_estimate, contrast.risk_difference);
}

#[test]
fn test_interval_covers_point_estimate_across_reseedings() {
    const REPLICATIONS: usize = 1_000;
    // Replication r draws from seed + r, so base seeds this far apart share no streams
    const SEED_STRIDE: u64 = 1_000_003;
    assert!(SEED_STRIDE > REPLICATIONS as u64);

    let data = synthetic_cohort(400, 31);
    let reseedings: u64 = 20;

    let covered = (0..reseedings)
        .filter(|&k| {
            let config = test_config(REPLICATIONS, k * SEED_STRIDE);
            let estimate = analyze_slice(&data, PopulationSlice::Total, &config).unwrap();
            assert_eq!(estimate.bootstrap.replications(), REPLICATIONS);
            estimate.record.covers_point_estimate()
        })
        .count();

    assert!(
        covered as f64 >= 0.95 * reseedings as f64,
        "interval covered the point estimate in {covered} of {reseedings} reseedings"
    );
}

#[test]
fn test_neighbouring_seeds_overlap_but_strided_seeds_do_not() {
    let data = synthetic_cohort(300, 32);
    let mean_age = |draw: &Dataset| -> bc_gcomp::Result<f64> {
        Ok(draw.iter().map(|o| o.maternal_age).sum::<f64>() / draw.len() as f64)
    };
    let run = |seed| run_replications(&data, &test_config(50, seed), "test", &mean_age).unwrap();

    let base = run(1_000);
    let next = run(1_001);
    assert_eq!(&base[1..], &next[..49]);

    let draws = |seed| -> Vec<Vec<usize>> {
        (0..50)
            .map(|r| draw_indices(data.len(), &mut replication_rng(seed, r)))
            .collect()
    };
    let base_draws = draws(1_000);
    let strided_draws = draws(1_000 + 1_000_003);
    assert!(strided_draws.iter().all(|d| !base_draws.contains(d)));
}

#[test]
fn test_different_seeds_give_different_draws() {
    let data = synthetic_cohort(400, 37);
    let a = analyze_slice(&data, PopulationSlice::Total, &test_config(20, 1)).unwrap();
    let b = analyze_slice(&data, PopulationSlice::Total, &test_config(20, 2)).unwrap();

    assert_eq!(a.record.estimate, b.record.estimate);
    assert_ne!(a.bootstrap.replicates, b.bootstrap.replicates);
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use bc_gcomp::algorithm::outcome::N_TERMS;
use bc_gcomp::{
    AnalysisConfig, Dataset, Education, Exposure, InfantSex, LogisticFit, Observation, Race,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Coefficients used to simulate outcomes, in design-column order
pub const TRUE_BETA: [f64; N_TERMS] = [-1.2, 0.6, 0.01, -0.1, -0.2, -0.3, -0.4, 0.05, -0.15];

/// Race shares in simulated cohorts; the remainder is unclassified
const RACE_SHARES: [(Race, f64); 6] = [
    (Race::AmericanIndian, 0.06),
    (Race::Asian, 0.10),
    (Race::Black, 0.16),
    (Race::PacificIslander, 0.06),
    (Race::White, 0.35),
    (Race::Hispanic, 0.22),
];

fn draw_race(rng: &mut StdRng) -> Option<Race> {
    let u: f64 = rng.random();
    let mut acc = 0.0;
    for (race, share) in RACE_SHARES {
        acc += share;
        if u < acc {
            return Some(race);
        }
    }
    None
}

/// Simulate a cohort whose outcomes follow [`TRUE_BETA`]
#[must_use]
pub fn synthetic_cohort(n: usize, seed: u64) -> Dataset {
    let truth = LogisticFit::with_coefficients(TRUE_BETA);
    let mut rng = StdRng::seed_from_u64(seed);

    let observations = (0..n)
        .map(|_| {
            let obs = Observation {
                maternal_age: (rng.random_range(16.0..45.0_f64) * 10.0).round() / 10.0,
                education: Education::ALL[rng.random_range(0..5)],
                infant_sex: if rng.random_bool(0.51) {
                    InfantSex::Male
                } else {
                    InfantSex::Female
                },
                birth_weight: (rng.random_range(4.5..10.0_f64) * 100.0).round() / 100.0,
                preterm: false,
                race: draw_race(&mut rng),
                black_carbon: if rng.random_bool(0.45) {
                    Exposure::High
                } else {
                    Exposure::Low
                },
            };
            let p = truth.predict_one(&obs);
            Observation {
                preterm: rng.random_bool(p),
                ..obs
            }
        })
        .collect();

    Dataset::new(observations)
}

/// Test configuration: few replications, no progress bars
#[must_use]
pub fn test_config(replications: usize, seed: u64) -> AnalysisConfig {
    AnalysisConfig::builder()
        .replications(replications)
        .seed(seed)
        .show_progress(false)
        .build()
        .unwrap()
}

/// A fresh path under the system temp directory
#[must_use]
pub fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("bc-gcomp-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

/// Encode a dataset with the input-file schema; `race` comes first to check
/// that column order does not matter
#[must_use]
pub fn dataset_to_batch(dataset: &Dataset) -> RecordBatch {
    let obs = dataset.observations();
    let schema = Schema::new(vec![
        Field::new("race", DataType::Utf8, true),
        Field::new("maternal_age", DataType::Float64, false),
        Field::new("education", DataType::Int64, false),
        Field::new("infant_sex", DataType::Int64, false),
        Field::new("birth_weight", DataType::Float64, false),
        Field::new("preterm", DataType::Int64, false),
        Field::new("black_carbon", DataType::Int64, false),
        Field::new("county", DataType::Utf8, false),
    ]);
    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter(obs.iter().map(|o| o.race.map(Race::code)))),
        Arc::new(Float64Array::from_iter_values(obs.iter().map(|o| o.maternal_age))),
        Arc::new(Int64Array::from_iter_values(obs.iter().map(|o| i64::from(o.education.code())))),
        Arc::new(Int64Array::from_iter_values(obs.iter().map(|o| o.infant_sex as i64))),
        Arc::new(Float64Array::from_iter_values(obs.iter().map(|o| o.birth_weight))),
        Arc::new(Int64Array::from_iter_values(obs.iter().map(|o| i64::from(o.preterm)))),
        Arc::new(Int64Array::from_iter_values(obs.iter().map(|o| o.black_carbon as i64))),
        Arc::new(StringArray::from_iter_values(obs.iter().map(|_| "Fresno"))),
    ];
    RecordBatch::try_new(Arc::new(schema), columns).unwrap()
}

/// Write a dataset as CSV with a header row
pub fn write_csv(dataset: &Dataset, path: &Path) {
    let file = std::fs::File::create(path).unwrap();
    let mut writer = arrow::csv::WriterBuilder::new().with_header(true).build(file);
    writer.write(&dataset_to_batch(dataset)).unwrap();
}

/// Write a dataset as a Parquet file
pub fn write_parquet(dataset: &Dataset, path: &Path) {
    let batch = dataset_to_batch(dataset);
    let file = std::fs::File::create(path).unwrap();
    let mut writer = parquet::arrow::ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
}

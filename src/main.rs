use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, bail};
use bc_gcomp::config::AnalysisConfigBuilder;
use bc_gcomp::report::{AnalysisReport, write_json_report, write_summary_csv};
use bc_gcomp::{AnalysisConfig, load_dataset, run_analysis};
use clap::Parser;
use log::info;

#[derive(Parser)]
#[command(name = "bc-gcomp")]
#[command(about = "G-computation of black-carbon effects on preterm birth, by race/ethnicity")]
#[command(version)]
struct Cli {
    /// Birth records (.csv with header, or .parquet)
    #[arg(short, long)]
    input: PathBuf,

    /// Summary table output (CSV). Printed to stdout only when omitted.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Full-precision JSON report
    #[arg(long)]
    json: Option<PathBuf>,

    /// JSON configuration file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bootstrap replications per population
    #[arg(short = 'r', long)]
    replications: Option<usize>,

    /// Base seed of the resampling sequence
    #[arg(long)]
    seed: Option<u64>,

    /// Worker threads (0 = all cores)
    #[arg(long)]
    threads: Option<usize>,

    /// Confidence level of the percentile interval
    #[arg(long)]
    confidence: Option<f64>,

    /// Run replications on a single thread
    #[arg(long)]
    sequential: bool,

    /// Disable progress bars
    #[arg(long)]
    no_progress: bool,

    /// Log filter (trace, debug, info, warn, error); RUST_LOG takes precedence
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Cli {
    fn analysis_config(&self) -> anyhow::Result<AnalysisConfig> {
        let base = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?,
            None => AnalysisConfig::default(),
        };

        let mut builder = AnalysisConfigBuilder::from_config(base);
        if let Some(replications) = self.replications {
            builder = builder.replications(replications);
        }
        if let Some(seed) = self.seed {
            builder = builder.seed(seed);
        }
        if let Some(threads) = self.threads {
            builder = builder.threads(threads);
        }
        if let Some(level) = self.confidence {
            builder = builder.confidence_level(level);
        }
        if self.sequential {
            builder = builder.use_parallel(false);
        }
        if self.no_progress {
            builder = builder.show_progress(false);
        }

        Ok(builder.build()?)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    let config = cli.analysis_config()?;
    info!("{config}");

    let start = Instant::now();
    let dataset = load_dataset(&cli.input)
        .with_context(|| format!("Failed to load birth records from {}", cli.input.display()))?;

    let summary = run_analysis(&dataset, &config);
    println!("{summary}");

    if let Some(path) = &cli.output {
        write_summary_csv(&summary, path)
            .with_context(|| format!("Failed to write summary table {}", path.display()))?;
    }
    if let Some(path) = &cli.json {
        let report = AnalysisReport::new(summary.clone(), config, Some(&cli.input));
        write_json_report(&report, path)
            .with_context(|| format!("Failed to write JSON report {}", path.display()))?;
    }

    info!("Analysis finished in {:?}", start.elapsed());

    if !summary.is_complete() {
        bail!(
            "{} of {} populations failed: {}",
            summary.failures.len(),
            summary.failures.len() + summary.records.len(),
            summary
                .failures
                .iter()
                .map(|f| f.population.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    Ok(())
}

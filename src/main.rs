use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use log::info;
use plaque_synth::utils::logging::console::print_sample_records;
use plaque_synth::utils::logging::{create_spinner, finish_progress_bar};
use plaque_synth::{
    DatasetGenerator, DatasetSummary, GeneratorConfig, RuleSet, SamplingConfig, StreamMode,
    write_dataset,
};

/// Generate a synthetic cardiovascular-risk cohort
#[derive(Debug, Parser)]
#[command(name = "plaque-synth", version, about)]
struct Cli {
    /// Number of records to generate
    #[arg(short = 'n', long = "n", visible_alias = "records", default_value_t = 1000)]
    records: usize,

    /// Seed of the pseudo-random stream
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Output file (.csv or .parquet); only the summary is logged when omitted
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// JSON rule table replacing the built-in scoring and staging rules
    #[arg(long, conflicts_with = "legacy_rules")]
    rules: Option<PathBuf>,

    /// Use the earlier scoring and staging rule revision
    #[arg(long)]
    legacy_rules: bool,

    /// JSON sampling configuration (missing fields keep their defaults)
    #[arg(long)]
    sampling: Option<PathBuf>,

    /// Give every record its own random substream
    #[arg(long)]
    per_record: bool,

    /// Generate in parallel (implies --per-record)
    #[arg(long)]
    parallel: bool,

    /// Show a progress bar
    #[arg(long)]
    progress: bool,

    /// Print the first N records to stdout
    #[arg(long, value_name = "N")]
    preview: Option<usize>,

    /// Print the selected rule table as JSON and exit
    #[arg(long)]
    dump_rules: bool,
}

fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let rules = match (&cli.rules, cli.legacy_rules) {
        (Some(path), _) => RuleSet::from_json_file(path)
            .with_context(|| format!("Failed to load rule table {}", path.display()))?,
        (None, true) => RuleSet::legacy(),
        (None, false) => RuleSet::current(),
    };

    if cli.dump_rules {
        println!("{}", rules.to_json_string()?);
        return Ok(());
    }

    let sampling = match &cli.sampling {
        Some(path) => SamplingConfig::from_json_file(path)
            .with_context(|| format!("Failed to load sampling configuration {}", path.display()))?,
        None => SamplingConfig::default(),
    };

    let stream_mode = if cli.per_record || cli.parallel {
        StreamMode::PerRecord
    } else {
        StreamMode::Sequential
    };

    let config = GeneratorConfig::builder()
        .n(cli.records)
        .seed(cli.seed)
        .stream_mode(stream_mode)
        .rules(rules)
        .sampling(sampling)
        .show_progress(cli.progress)
        .build();

    let start = Instant::now();
    let generator = DatasetGenerator::new(config).context("Invalid generator configuration")?;
    let records = if cli.parallel {
        generator.generate_parallel()?
    } else {
        generator.generate()?
    };

    info!("\n{}", DatasetSummary::from_records(&records));

    if let Some(rows) = cli.preview {
        print_sample_records(&records, rows);
    }

    if let Some(path) = &cli.out {
        let spinner = create_spinner(Some("Writing dataset"));
        write_dataset(&records, path)
            .with_context(|| format!("Failed to write dataset to {}", path.display()))?;
        finish_progress_bar(&spinner, Some("Dataset written"));
    }

    info!("Finished in {:?}", start.elapsed());
    Ok(())
}

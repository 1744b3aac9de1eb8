//! `rock`: categorical clustering using ROCK (RObust Clustering using linKs).
//!
//! ```bash
//! rock -i profile.tsv -k 3 -t 0.4 --row-names patients.txt --col-names attributes.txt
//! ```
//!
//! Writes `<out-dir>/<data-name>/parameters_<data-name>.txt` and
//! `final_output_<data-name>.txt`. Set `RUST_LOG=debug` to trace every merge.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use rock::config::default_data_name;
use rock::io::{load_profile, write_report};
use rock::{ClusterReport, Metric, Rock, RockConfig};

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "rock")]
#[command(about = "Categorical classification using ROCK (RObust Clustering using linKs)")]
struct Args {
    /// Number of clusters to expect.
    #[arg(short, long, default_value_t = 2)]
    kclusters: usize,

    /// Tab-delimited matrix file (rows = records, columns = attributes).
    #[arg(short, long)]
    input: PathBuf,

    /// Output directory.
    #[arg(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Similarity metric: JC (Jaccard) or SMC (simple matching).
    #[arg(short = 'm', long, default_value = "JC")]
    sim_metric: Metric,

    /// Minimum similarity for two records to be neighbors, in [0, 1].
    #[arg(short, long, default_value_t = 0.5)]
    threshold: f64,

    /// Dataset name used for output files (default: current UTC time).
    #[arg(long)]
    data_name: Option<String>,

    /// File with attribute names, one per line, in column order.
    #[arg(long)]
    col_names: Option<PathBuf>,

    /// File with record names, one per line, in row order.
    #[arg(long)]
    row_names: Option<PathBuf>,

    /// Field delimiter of the matrix file.
    #[arg(long, default_value_t = '\t')]
    delimiter: char,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let config = RockConfig::default()
        .with_kclusters(args.kclusters)
        .with_metric(args.sim_metric)
        .with_threshold(args.threshold)
        .with_data_name(args.data_name.unwrap_or_else(default_data_name));
    config.validate().context("invalid configuration")?;

    let profile = load_profile(
        &args.input,
        args.row_names.as_deref(),
        args.col_names.as_deref(),
        args.delimiter,
    )
    .context("failed to load input")?;

    let fit = Rock::from_config(&config)
        .fit_profile(&profile)
        .context("clustering failed")?;
    let report = ClusterReport::build(&fit, &profile).context("failed to summarize clusters")?;

    let dir = write_report(&args.out_dir, &config, &report).context("failed to write report")?;
    info!(dir = %dir.display(), "done");
    println!("{}", dir.display());

    Ok(())
}

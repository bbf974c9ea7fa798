//! Command-line front end
//!
//! Loads a JSON catalog of parts, runs the matcher, and produces JSON for
//! stdout. Logging goes to stderr.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use partmatch_core::{DimensionSet, PartDescriptor};
use partmatch_similarity::{MatcherConfig, RankResponse, SimilarityMatcher};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Detect near-duplicate parts by comparing their dimensions
#[derive(Parser, Debug)]
#[command(name = "partmatch")]
#[command(about = "Detect near-duplicate parts by comparing dimensions", long_about = None)]
pub struct Cli {
    /// Log level
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Path to a JSON matcher configuration
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Similarity a match must exceed (overrides the config file)
    #[arg(long, global = true)]
    pub threshold: Option<f64>,

    /// Maximum number of ranked matches (overrides the config file)
    #[arg(long, global = true)]
    pub limit: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the best match for a part, or null
    Find(QueryArgs),
    /// Print every match above the threshold, most similar first
    Rank(QueryArgs),
    /// Print a per-field comparison of two dimension sets
    Compare {
        /// Dimension of the first set, as name=value
        #[arg(long = "dim-a", required = true)]
        dim_a: Vec<String>,

        /// Dimension of the second set, as name=value
        #[arg(long = "dim-b", required = true)]
        dim_b: Vec<String>,
    },
}

#[derive(clap::Args, Debug)]
pub struct QueryArgs {
    /// Path to a JSON array of parts
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Type tag of the query part, e.g. "Knob"
    #[arg(short = 't', long = "type")]
    pub part_type: String,

    /// Dimension of the query part, as name=value
    #[arg(short, long = "dim")]
    pub dims: Vec<String>,
}

/// Filter directives for the subscriber: `RUST_LOG` when set, else the level
/// from `--log-level` (unknown levels fall back to `info`)
pub fn log_directives(log_level: &str, rust_log: Option<String>) -> String {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        return directives;
    }

    let log_level = match log_level {
        "trace" | "debug" | "info" | "warn" | "error" => log_level,
        _ => "info",
    };
    log_level.to_string()
}

/// Install the global tracing subscriber, writing to stderr
pub fn init_logging(log_level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(log_directives(log_level, std::env::var("RUST_LOG").ok()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

/// Build the matcher configuration from the optional file and flag overrides
pub fn load_config(cli: &Cli) -> anyhow::Result<MatcherConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            MatcherConfig::from_json(&json)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => MatcherConfig::default(),
    };

    if let Some(threshold) = cli.threshold {
        config.threshold = threshold;
    }
    if let Some(limit) = cli.limit {
        config.limit = Some(limit);
    }

    config.validate()?;
    Ok(config)
}

/// Read a JSON array of parts
pub fn load_catalog(path: &Path) -> anyhow::Result<Vec<PartDescriptor>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("failed to read catalog {}", path.display()))?;
    let parts = PartDescriptor::catalog_from_json(&json)
        .with_context(|| format!("failed to parse catalog {}", path.display()))?;
    info!("Loaded {} parts from {}", parts.len(), path.display());
    Ok(parts)
}

fn parse_dims(args: &[String]) -> anyhow::Result<DimensionSet> {
    Ok(DimensionSet::from_args(args)?)
}

/// Execute the parsed command and return the JSON to print
pub fn run(cli: &Cli) -> anyhow::Result<Value> {
    let config = load_config(cli)?;
    let matcher = SimilarityMatcher::new(config)?;
    debug!("Matcher config: {:?}", matcher.config());

    match &cli.command {
        Command::Find(query) => {
            let catalog = load_catalog(&query.catalog)?;
            let dims = parse_dims(&query.dims)?;
            let found = matcher.find(&query.part_type, &dims, &catalog);
            Ok(serde_json::to_value(found)?)
        }
        Command::Rank(query) => {
            let catalog = load_catalog(&query.catalog)?;
            let dims = parse_dims(&query.dims)?;
            let ranked = matcher.rank(&query.part_type, &dims, &catalog);
            let same_type = catalog
                .iter()
                .filter(|p| p.type_tag == query.part_type)
                .count();
            let response = RankResponse::new(ranked, catalog.len(), same_type);
            Ok(serde_json::to_value(response)?)
        }
        Command::Compare { dim_a, dim_b } => {
            let a = parse_dims(dim_a)?;
            let b = parse_dims(dim_b)?;
            if a.is_empty() {
                bail!("--dim-a needs at least one dimension");
            }
            Ok(serde_json::to_value(matcher.explain(&a, &b))?)
        }
    }
}

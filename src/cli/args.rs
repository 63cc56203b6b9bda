//! Command-line argument definitions using clap

use clap::Parser;
use std::path::{Path, PathBuf};

/// Fraudscore - Prepare a tabular extract and score it with the fraud model
#[derive(Parser, Debug)]
#[command(name = "fraudscore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Scoring artifact path (JSON document produced by the training run)
    #[arg(short = 'a', long)]
    pub artifact: PathBuf,

    /// Pipeline configuration file (JSON).
    /// Built-in defaults are used when omitted.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Output file path (CSV or Parquet, determined by extension).
    /// Defaults to input directory with '_scored' suffix (e.g. data.csv → data_scored.csv).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Decision threshold override (0.0 to 1.0).
    /// Falls back to the config file, then the artifact's recommendation, then 0.565.
    #[arg(long, value_parser = validate_threshold)]
    pub threshold: Option<f64>,

    /// Recompute medians from the scored batch instead of using the
    /// training-time medians stored in the artifact
    #[arg(long, default_value = "false")]
    pub batch_medians: bool,

    /// Write a JSON scoring report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,

    /// Skip interactive confirmation prompts
    #[arg(long, default_value = "false")]
    pub no_confirm: bool,

    /// Number of rows to use for schema inference (CSV only).
    /// Higher values improve type detection for ambiguous columns but may be slower.
    /// Use 0 for full table scan (very slow for large files).
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Get the output path, deriving from input if not explicitly provided.
    /// The derived path will be in the same directory as the input with a '_scored' suffix.
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            let parent = self.input.parent().unwrap_or_else(|| Path::new("."));
            let stem = self
                .input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("output");
            let extension = self
                .input
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("csv");
            parent.join(format!("{}_scored.{}", stem, extension))
        })
    }
}

/// Validator for the threshold parameter
fn validate_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;

    if !(0.0..=1.0).contains(&value) {
        Err(format!(
            "threshold must be between 0.0 and 1.0, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

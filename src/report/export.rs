//! Scoring report export functionality

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

use super::summary::ScoringSummary;

/// Metadata about the scoring run
#[derive(Serialize)]
pub struct ReportMetadata {
    /// Timestamp of the run (ISO 8601 format)
    pub timestamp: String,
    /// Fraudscore version
    pub fraudscore_version: String,
    /// Input file path
    pub input_file: String,
    /// Scoring artifact path
    pub artifact_file: String,
    /// Model identifier from the artifact (if present)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    /// Decision threshold used
    pub threshold: f64,
    /// Median policy used ("stored" or "batch-local")
    pub median_policy: String,
}

/// Summary numbers of the scoring run
#[derive(Serialize)]
pub struct ReportSummary {
    /// Rows in the batch
    pub rows: usize,
    /// Whether scoring succeeded (false = passthrough)
    pub scored: bool,
    /// Failure reason when scoring degraded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_reason: Option<String>,
    /// Rows flagged as fraud
    pub flagged: usize,
    /// Share of rows flagged
    pub flag_rate: f64,
    /// Mean fraud probability over the batch
    pub mean_probability: f64,
}

/// Complete scoring report
#[derive(Serialize)]
pub struct ScoringReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
}

/// Parameters for the report export
pub struct ReportParams<'a> {
    pub input_file: &'a str,
    pub artifact_file: &'a str,
    pub model_id: Option<&'a str>,
    pub batch_medians: bool,
}

/// Export a scoring run to a JSON file
pub fn export_scoring_report(
    summary: &ScoringSummary,
    params: &ReportParams,
    output_path: &Path,
) -> Result<()> {
    let report = ScoringReport {
        metadata: ReportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            fraudscore_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: params.input_file.to_string(),
            artifact_file: params.artifact_file.to_string(),
            model_id: params.model_id.map(|s| s.to_string()),
            threshold: summary.threshold,
            median_policy: if params.batch_medians {
                "batch-local".to_string()
            } else {
                "stored".to_string()
            },
        },
        summary: ReportSummary {
            rows: summary.rows,
            scored: summary.scored,
            failure_reason: summary.failure_reason().map(|s| s.to_string()),
            flagged: summary.flagged,
            flag_rate: summary.flag_rate(),
            mean_probability: summary.mean_probability,
        },
    };

    let json = serde_json::to_string_pretty(&report)
        .context("Failed to serialize scoring report to JSON")?;

    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write scoring report to {}", output_path.display()))?;

    Ok(())
}

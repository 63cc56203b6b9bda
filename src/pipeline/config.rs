//! Pipeline configuration
//!
//! Everything the pipeline needs beyond the table itself is carried in a
//! [`ScoringConfig`] passed explicitly into each run - there is no
//! process-wide state. `Default` reproduces the production fraud model's
//! constants; a JSON file can override any field.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default decision threshold for flagging a row as fraud.
pub const DEFAULT_THRESHOLD: f64 = 0.565;

/// Reference label for collapsed long-tail categories.
pub const DEFAULT_REFERENCE_CATEGORY: &str = "OTROS";

/// The fixed variable set consumed by the fraud model.
pub fn default_variables() -> Vec<String> {
    [
        "A", "B", "C", "D", "E", "H", "J", "M", "N", "O", "P", "Q", "R", "S", "Monto",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

/// How one categorical column is collapsed and one-hot encoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoricalSpec {
    /// Source column name
    pub column: String,
    /// Categories preserved verbatim; everything else collapses into the
    /// reference label. This list also fixes the indicator-column set, so
    /// the output schema is stable across batches.
    pub categories: Vec<String>,
    /// Baseline category: no indicator column is emitted for it
    #[serde(default = "default_reference")]
    pub reference: String,
}

fn default_reference() -> String {
    DEFAULT_REFERENCE_CATEGORY.to_string()
}

/// Column lists and policies for one scoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Columns the model requires, in model order
    pub required_columns: Vec<String>,
    /// Columns holding numeric data as text (thousands separators etc.)
    pub numeric_text_columns: Vec<String>,
    /// Columns whose negative values are replaced by the median
    pub negative_correction_columns: Vec<String>,
    /// Columns whose missing values are median-imputed
    pub impute_columns: Vec<String>,
    /// Categorical columns to collapse and one-hot encode
    pub categoricals: Vec<CategoricalSpec>,
    /// Binarized with cut at 0 (1 if value > 0)
    pub cut_at_zero: Vec<String>,
    /// Binarized with cut at 1 (1 if value > 1)
    pub cut_at_one: Vec<String>,
    /// Columns compressed via square root
    pub sqrt_columns: Vec<String>,
    /// Re-impute the sqrt columns after the root transform so negative
    /// inputs (mapped to missing) do not leak into the scored table
    pub impute_after_root: bool,
    /// Decision threshold; `None` defers to the artifact's recommendation
    /// or [`DEFAULT_THRESHOLD`]
    pub threshold: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            required_columns: default_variables(),
            numeric_text_columns: Vec::new(),
            negative_correction_columns: Vec::new(),
            impute_columns: Vec::new(),
            categoricals: Vec::new(),
            cut_at_zero: Vec::new(),
            cut_at_one: Vec::new(),
            sqrt_columns: Vec::new(),
            impute_after_root: true,
            threshold: None,
        }
    }
}

impl ScoringConfig {
    /// Load a configuration from a JSON file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read pipeline config: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse pipeline config: {}", path.display()))
    }
}

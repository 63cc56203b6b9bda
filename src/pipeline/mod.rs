//! Pipeline module - orchestrates the feature preparation steps

pub mod binarize;
pub mod config;
pub mod correct;
pub mod encode;
pub mod impute;
pub mod loader;
pub mod normalize;
pub mod select;
pub mod stats;
pub mod transform;

pub use binarize::*;
pub use config::*;
pub use correct::*;
pub use encode::*;
pub use impute::*;
pub use loader::*;
pub use normalize::*;
pub use select::*;
pub use stats::*;
pub use transform::*;

use anyhow::Result;
use polars::prelude::DataFrame;

/// Run the full feature-preparation sequence over a raw table.
///
/// Stages run strictly in order, each consuming the previous stage's table:
/// column selection, numeric normalization, negative correction, median
/// imputation, categorical collapsing, binarization, square-root compression.
/// When `impute_after_root` is set, the root-transformed columns get a final
/// imputation pass so the scored table carries no missing values.
pub fn prepare_features(
    df: DataFrame,
    config: &ScoringConfig,
    medians: &MedianSource,
) -> Result<DataFrame> {
    let df = select_columns(&df, &config.required_columns)?;
    let df = normalize_numeric_text(df, &config.numeric_text_columns)?;
    let df = correct_negatives(df, &config.negative_correction_columns, medians)?;
    let mut df = impute_missing(df, &config.impute_columns, medians)?;

    for spec in &config.categoricals {
        df = collapse_categories(df, spec)?;
    }

    let df = binarize(df, &config.cut_at_zero, &config.cut_at_one)?;
    let df = sqrt_transform(df, &config.sqrt_columns)?;

    // Stored medians describe raw-scale columns; any fill after the root
    // transform is necessarily batch-local.
    if config.impute_after_root {
        return impute_missing(df, &config.sqrt_columns, &MedianSource::BatchLocal);
    }

    Ok(df)
}

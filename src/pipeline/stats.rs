//! Per-column median statistics and the median policy
//!
//! Medians can come from two places: recomputed from whatever the table
//! holds at the current pipeline stage (batch-local), or looked up from
//! training-time constants persisted inside the scoring artifact (stored).
//! Stored is the reproducible-scoring default; batch-local is the opt-in
//! legacy behavior.

use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use polars::prelude::*;

/// Where median statistics come from during correction and imputation.
#[derive(Debug, Clone)]
pub enum MedianSource {
    /// Recompute the median from the in-flight table at each stage.
    BatchLocal,
    /// Use persisted training-time medians keyed by column name.
    /// A processed column with no entry is a configuration error.
    Stored(HashMap<String, f64>),
}

impl MedianSource {
    /// Median used to fill missing values in `column`.
    ///
    /// Batch-local: median over all non-missing values. Returns `Ok(None)`
    /// when the column has no usable values (the caller skips the column and
    /// missing markers propagate).
    pub fn fill_value(&self, df: &DataFrame, column: &str) -> Result<Option<f64>> {
        match self {
            MedianSource::BatchLocal => column_median(df, column),
            MedianSource::Stored(map) => Ok(Some(self.stored_value(map, column)?)),
        }
    }

    /// Median used to replace out-of-domain negative values in `column`.
    ///
    /// Batch-local: median over the in-domain (non-negative, non-missing)
    /// values, so the replacement statistic is not dragged down by the very
    /// values being corrected.
    pub fn correction_value(&self, df: &DataFrame, column: &str) -> Result<Option<f64>> {
        match self {
            MedianSource::BatchLocal => {
                let values = numeric_values(df, column)?;
                Ok(median_of(values.into_iter().flatten().filter(|v| *v >= 0.0)))
            }
            MedianSource::Stored(map) => Ok(Some(self.stored_value(map, column)?)),
        }
    }

    fn stored_value(&self, map: &HashMap<String, f64>, column: &str) -> Result<f64> {
        match map.get(column) {
            Some(value) => Ok(*value),
            None => bail!(
                "no stored median for column '{}'; rerun with batch-local medians or fix the artifact",
                column
            ),
        }
    }
}

/// Extract a column as `Vec<Option<f64>>`, casting from any numeric dtype.
pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>> {
    let col = df
        .column(column)
        .with_context(|| format!("column '{}' not found in table", column))?;
    let cast = col
        .cast(&DataType::Float64)
        .with_context(|| format!("column '{}' is not numeric", column))?;
    Ok(cast.f64()?.into_iter().collect())
}

/// Median of all non-missing values in a column, `None` if there are none.
/// NaN cells count as missing.
pub fn column_median(df: &DataFrame, column: &str) -> Result<Option<f64>> {
    let values = numeric_values(df, column)?;
    Ok(median_of(values.into_iter().flatten()))
}

/// Median of a value stream: middle element for odd counts, mean of the two
/// middle elements for even counts. NaN inputs are discarded.
pub fn median_of(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut values: Vec<f64> = values.filter(|v| !v.is_nan()).collect();
    if values.is_empty() {
        return None;
    }

    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let mid = values.len() / 2;
    if values.len() % 2 == 1 {
        Some(values[mid])
    } else {
        Some((values[mid - 1] + values[mid]) / 2.0)
    }
}

//! Median imputation of missing values

use anyhow::Result;
use polars::prelude::*;

use super::stats::{numeric_values, MedianSource};

/// Fill missing values in the listed columns with the column median per the
/// active [`MedianSource`]. Non-missing values are untouched; a column with
/// no missing values comes through unchanged. NaN cells count as missing and
/// are filled too.
///
/// A column that is entirely missing under the batch-local policy has no
/// defined median: it is skipped and its missing markers propagate.
pub fn impute_missing(
    mut df: DataFrame,
    columns: &[String],
    medians: &MedianSource,
) -> Result<DataFrame> {
    for name in columns {
        let Some(median) = medians.fill_value(&df, name)? else {
            continue;
        };

        let values: Vec<f64> = numeric_values(&df, name)?
            .into_iter()
            .map(|opt| match opt {
                Some(v) if !v.is_nan() => v,
                _ => median,
            })
            .collect();

        df.with_column(Column::new(name.as_str().into(), values))?;
    }

    Ok(df)
}

//! Negative value correction
//!
//! The model's numeric domain is non-negative: a strictly negative value is
//! out of domain and gets replaced with the column median. Missing values are
//! left alone here, imputation is a separate stage.

use anyhow::Result;
use polars::prelude::*;

use super::stats::{numeric_values, MedianSource};

/// Replace every strictly negative value in the listed columns with the
/// column median per the active [`MedianSource`]. Values `>= 0` and missing
/// values are unchanged. Columns are independent, so list order is
/// irrelevant. A column with no usable values under the batch-local policy
/// is skipped.
pub fn correct_negatives(
    mut df: DataFrame,
    columns: &[String],
    medians: &MedianSource,
) -> Result<DataFrame> {
    for name in columns {
        let Some(median) = medians.correction_value(&df, name)? else {
            continue;
        };

        let values: Vec<Option<f64>> = numeric_values(&df, name)?
            .into_iter()
            .map(|opt| match opt {
                Some(v) if v < 0.0 => Some(median),
                other => other,
            })
            .collect();

        df.with_column(Column::new(name.as_str().into(), values))?;
    }

    Ok(df)
}

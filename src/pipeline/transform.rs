//! Square-root compression of skewed numeric columns

use anyhow::Result;
use polars::prelude::*;

use super::stats::numeric_values;

/// Replace each value `v` in the listed columns with `sqrt(v)` when
/// `v >= 0`, and with the missing marker otherwise. Missing stays missing.
///
/// This stage can reintroduce missing values downstream of imputation;
/// sequencing (or a follow-up fill) is the pipeline assembler's call.
pub fn sqrt_transform(mut df: DataFrame, columns: &[String]) -> Result<DataFrame> {
    for name in columns {
        let values: Vec<Option<f64>> = numeric_values(&df, name)?
            .into_iter()
            .map(|opt| match opt {
                Some(v) if v >= 0.0 => Some(v.sqrt()),
                _ => None,
            })
            .collect();

        df.with_column(Column::new(name.as_str().into(), values))?;
    }

    Ok(df)
}

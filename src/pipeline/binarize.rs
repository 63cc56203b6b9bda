//! Binarization of numeric columns against fixed cuts

use anyhow::{Context, Result};
use polars::prelude::*;

/// Binarize two groups of columns: cut-at-0 columns become 1 when
/// `value > 0`, cut-at-1 columns become 1 when `value > 1`, 0 otherwise.
///
/// Missing values compare false under both policies and resolve to 0.
/// Listed columns absent from the table are silently skipped; these lists
/// cover optional fields that not every extract carries.
pub fn binarize(df: DataFrame, cut_at_zero: &[String], cut_at_one: &[String]) -> Result<DataFrame> {
    let df = apply_cut(df, cut_at_zero, 0.0)?;
    apply_cut(df, cut_at_one, 1.0)
}

fn apply_cut(mut df: DataFrame, columns: &[String], cut: f64) -> Result<DataFrame> {
    for name in columns {
        let Ok(col) = df.column(name) else {
            continue;
        };

        let cast = col
            .cast(&DataType::Float64)
            .with_context(|| format!("column '{}' is not numeric", name))?;

        let flags: Vec<i32> = cast
            .f64()?
            .into_iter()
            .map(|opt| match opt {
                Some(v) if v > cut => 1,
                _ => 0,
            })
            .collect();

        df.with_column(Column::new(name.as_str().into(), flags))?;
    }

    Ok(df)
}

//! Numeric normalization of text-formatted columns

use anyhow::{Context, Result};
use polars::prelude::*;

/// Strip thousands separators and whitespace from the listed columns and
/// coerce them to Float64. Example of corrected values: `"1,234.8"` → 1234.8.
///
/// Cells that still fail to parse become null rather than raising: one
/// malformed cell must not abort a batch. Columns not listed are untouched;
/// a listed column absent from the table is a structural error.
pub fn normalize_numeric_text(mut df: DataFrame, columns: &[String]) -> Result<DataFrame> {
    for name in columns {
        let col = df
            .column(name)
            .with_context(|| format!("column '{}' not found in table", name))?;

        // Render every cell to text so numeric and string inputs take the
        // same path; re-normalizing an already-numeric column is a no-op.
        let cast = col
            .cast(&DataType::String)
            .with_context(|| format!("column '{}' cannot be rendered as text", name))?;

        let values: Vec<Option<f64>> = cast
            .str()?
            .into_iter()
            .map(|opt| opt.and_then(parse_numeric_cell))
            .collect();

        df.with_column(Column::new(name.as_str().into(), values))?;
    }

    Ok(df)
}

fn parse_numeric_cell(raw: &str) -> Option<f64> {
    raw.replace(',', "").trim().parse::<f64>().ok()
}

//! Categorical collapsing and one-hot encoding
//!
//! Long-tail categories are grouped into a reference label, then one
//! indicator column is emitted per configured category. The indicator set
//! comes from the configuration, never from the categories present in the
//! batch: a category that happens not to occur still yields a zero-filled
//! indicator, so the output schema is identical across batches. The
//! reference category gets no indicator - it is the implicit baseline of the
//! downstream linear model.

use anyhow::{Context, Result};
use polars::prelude::*;

use super::config::CategoricalSpec;

/// Collapse a categorical column per `spec` and replace it with indicator
/// columns named `{column}_{category}`.
///
/// Values outside the preserve list (nulls included) are rewritten to the
/// reference label first; indicators are computed against the rewritten
/// values and the source column is dropped.
pub fn collapse_categories(df: DataFrame, spec: &CategoricalSpec) -> Result<DataFrame> {
    let col = df
        .column(&spec.column)
        .with_context(|| format!("categorical column '{}' not found in table", spec.column))?;
    let cast = col
        .cast(&DataType::String)
        .with_context(|| format!("categorical column '{}' cannot be read as text", spec.column))?;

    let rewritten: Vec<String> = cast
        .str()?
        .into_iter()
        .map(|opt| match opt {
            Some(v) if spec.categories.iter().any(|c| c == v) => v.to_string(),
            _ => spec.reference.clone(),
        })
        .collect();

    let mut out = df;
    for category in spec.categories.iter().filter(|c| **c != spec.reference) {
        let name = format!("{}_{}", spec.column, category);
        let flags: Vec<i32> = rewritten
            .iter()
            .map(|v| i32::from(v == category))
            .collect();
        out.with_column(Column::new(name.into(), flags))?;
    }

    Ok(out.drop(&spec.column)?)
}

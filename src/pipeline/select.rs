//! Column selection against the model's required variable set

use polars::prelude::*;
use thiserror::Error;

/// Errors raised when a table does not match the expected column schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// One or more required columns are absent from the table.
    #[error("missing required column(s): {}", .missing.join(", "))]
    MissingColumns {
        /// Every requested column that was not found, in request order
        missing: Vec<String>,
    },

    /// Underlying Polars failure while projecting the table.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Project a table down to exactly the given columns, in the given order.
///
/// All other columns are dropped. Fails with [`SchemaError::MissingColumns`]
/// naming every absent column, not just the first one encountered.
pub fn select_columns(df: &DataFrame, columns: &[String]) -> Result<DataFrame, SchemaError> {
    let present: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();

    let missing: Vec<String> = columns
        .iter()
        .filter(|c| !present.contains(&c.as_str()))
        .cloned()
        .collect();

    if !missing.is_empty() {
        return Err(SchemaError::MissingColumns { missing });
    }

    Ok(df.select(columns.iter().map(|s| s.as_str()))?)
}

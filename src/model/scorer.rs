//! Scoring stage: probabilities and thresholded decisions
//!
//! The scorer never raises across its boundary. Structural problems were the
//! earlier stages' job to surface; here a failing model degrades to
//! passthrough so one bad batch element cannot abort a scheduled run. The
//! degrade is explicit in the return type - callers match on the outcome
//! instead of probing the table for column absence.

use polars::prelude::*;

use super::artifact::ProbabilityModel;

/// Appended probability column.
pub const PROBABILITY_COLUMN: &str = "PROB_FRAUDE";
/// Appended thresholded-decision column.
pub const PREDICTION_COLUMN: &str = "PRED_FRAUDE";

/// What came out of a scoring attempt.
#[derive(Debug)]
pub enum ScoreOutcome {
    /// The table with `PROB_FRAUDE` and `PRED_FRAUDE` appended.
    Scored(DataFrame),
    /// Scoring failed; the original table is returned untouched.
    Failed {
        /// The input table, exactly as given
        table: DataFrame,
        /// Human-readable failure reason
        reason: String,
    },
}

impl ScoreOutcome {
    /// True when scoring succeeded.
    pub fn is_scored(&self) -> bool {
        matches!(self, ScoreOutcome::Scored(_))
    }

    /// The resulting table either way - scored or passthrough.
    pub fn into_table(self) -> DataFrame {
        match self {
            ScoreOutcome::Scored(table) => table,
            ScoreOutcome::Failed { table, .. } => table,
        }
    }
}

/// Score every row of `df` with `model` and append `PROB_FRAUDE` (positive
/// class probability) and `PRED_FRAUDE` (1 when the probability is `>=`
/// `threshold`, else 0).
///
/// Any scoring-time failure - schema mismatch, missing cells, a model that
/// returns the wrong number of probabilities - yields
/// [`ScoreOutcome::Failed`] carrying the unchanged input table.
pub fn score(model: &dyn ProbabilityModel, df: DataFrame, threshold: f64) -> ScoreOutcome {
    let probabilities = match model.predict_proba(&df) {
        Ok(p) => p,
        Err(e) => {
            return ScoreOutcome::Failed {
                table: df,
                reason: e.to_string(),
            }
        }
    };

    if probabilities.len() != df.height() {
        let reason = format!(
            "model returned {} probabilities for {} rows",
            probabilities.len(),
            df.height()
        );
        return ScoreOutcome::Failed { table: df, reason };
    }

    let predictions: Vec<i32> = probabilities
        .iter()
        .map(|p| i32::from(*p >= threshold))
        .collect();

    // Append onto a clone so the original survives intact if either append
    // fails.
    let mut scored = df.clone();
    let appended = scored
        .with_column(Column::new(PROBABILITY_COLUMN.into(), probabilities))
        .and_then(|df| df.with_column(Column::new(PREDICTION_COLUMN.into(), predictions)))
        .map(|_| ());

    match appended {
        Ok(()) => ScoreOutcome::Scored(scored),
        Err(e) => ScoreOutcome::Failed {
            table: df,
            reason: e.to_string(),
        },
    }
}

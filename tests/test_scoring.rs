//! Tests for artifact loading and the scoring stage

use fraudscore::model::{
    score, Artifact, ArtifactError, ProbabilityModel, ScoreOutcome, PREDICTION_COLUMN,
    PROBABILITY_COLUMN,
};
use polars::prelude::*;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_load_missing_artifact_is_not_found() {
    let dir = TempDir::new().unwrap();
    let err = Artifact::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(err, ArtifactError::NotFound { .. }));
    assert!(err.to_string().contains("not found"));
}

#[test]
fn test_load_malformed_json_is_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    std::fs::write(&path, "{ not json").unwrap();

    let err = Artifact::load(&path).unwrap_err();
    assert!(matches!(err, ArtifactError::Parse { .. }));
}

#[test]
fn test_load_wrong_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    let doc = serde_json::json!({
        "format_version": 2,
        "features": ["A"],
        "coefficients": [0.1],
        "intercept": 0.0,
    });
    std::fs::write(&path, doc.to_string()).unwrap();

    let err = Artifact::load(&path).unwrap_err();
    assert!(matches!(
        err,
        ArtifactError::UnsupportedVersion {
            found: 2,
            expected: 1
        }
    ));
}

#[test]
fn test_load_coefficient_mismatch_is_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    let doc = serde_json::json!({
        "format_version": 1,
        "features": ["A", "B"],
        "coefficients": [0.1],
        "intercept": 0.0,
    });
    std::fs::write(&path, doc.to_string()).unwrap();

    let err = Artifact::load(&path).unwrap_err();
    assert!(matches!(err, ArtifactError::Invalid { .. }));
}

#[test]
fn test_load_valid_artifact() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &["A", "B"], 0.25, Some(0.6));

    let artifact = Artifact::load(&path).unwrap();
    assert_eq!(artifact.feature_count(), 2);
    assert_eq!(artifact.threshold, Some(0.6));
    assert_eq!(artifact.model_id.as_deref(), Some("fraude-lr-test"));
}

#[test]
fn test_score_above_and_below_threshold() {
    let dir = TempDir::new().unwrap();

    // Zero coefficients: every row scores sigmoid(intercept)
    let path = write_artifact(&dir, &["A"], intercept_for_probability(0.6), None);
    let artifact = Artifact::load(&path).unwrap();

    let df = df! {
        "A" => [1.0f64, 2.0],
    }
    .unwrap();

    let outcome = score(&artifact, df, 0.565);
    let table = outcome.into_table();

    let probs = float_values(&table, PROBABILITY_COLUMN);
    assert!((probs[0] - 0.6).abs() < 1e-9);

    let preds: Vec<i32> = table
        .column(PREDICTION_COLUMN)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(preds, vec![1, 1]);

    // Probability 0.5 with the same threshold stays legitimate
    let path = write_artifact(&dir, &["A"], intercept_for_probability(0.5), None);
    let artifact = Artifact::load(&path).unwrap();
    let df = df! {
        "A" => [1.0f64],
    }
    .unwrap();

    let table = score(&artifact, df, 0.565).into_table();
    let preds: Vec<i32> = table
        .column(PREDICTION_COLUMN)
        .unwrap()
        .i32()
        .unwrap()
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(preds, vec![0]);
}

#[test]
fn test_schema_mismatch_degrades_to_passthrough() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &["A", "MISSING_FEATURE"], 0.0, None);
    let artifact = Artifact::load(&path).unwrap();

    let df = df! {
        "A" => [1.0f64, 2.0],
    }
    .unwrap();

    match score(&artifact, df, 0.565) {
        ScoreOutcome::Failed { table, reason } => {
            // Original table back, no score columns appended
            assert_eq!(table.shape(), (2, 1));
            assert!(table.column(PROBABILITY_COLUMN).is_err());
            assert!(reason.contains("MISSING_FEATURE"));
        }
        ScoreOutcome::Scored(_) => panic!("expected passthrough on schema mismatch"),
    }
}

#[test]
fn test_null_feature_cell_degrades_to_passthrough() {
    let dir = TempDir::new().unwrap();
    let path = write_artifact(&dir, &["A"], 0.0, None);
    let artifact = Artifact::load(&path).unwrap();

    let df = df! {
        "A" => [Some(1.0f64), None],
    }
    .unwrap();

    let outcome = score(&artifact, df, 0.565);
    assert!(!outcome.is_scored());
}

#[test]
fn test_artifact_medians_feed_the_stored_policy() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("model.json");
    let doc = serde_json::json!({
        "format_version": 1,
        "features": ["A"],
        "coefficients": [0.0],
        "intercept": 0.0,
        "training_medians": { "A": 12.5 },
    });
    std::fs::write(&path, doc.to_string()).unwrap();

    let artifact = Artifact::load(&path).unwrap();
    let medians = artifact.training_medians.unwrap();
    assert_eq!(medians.get("A"), Some(&12.5));
}

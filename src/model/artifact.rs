//! The serialized scoring artifact and its probability contract
//!
//! The artifact is a JSON document produced by the training side: an ordered
//! feature list, logistic-regression coefficients and intercept, and
//! optionally the training-time medians and a recommended threshold. This
//! crate never trains or mutates it; everything downstream consumes it only
//! through [`ProbabilityModel`].

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::error::ArtifactError;

/// Artifact format version this build reads.
pub const ARTIFACT_FORMAT_VERSION: u32 = 1;

/// The capability the pipeline needs from a trained classifier: one
/// positive-class probability in [0,1] per row of a fully-prepared table.
pub trait ProbabilityModel {
    /// Number of feature columns the model expects.
    fn feature_count(&self) -> usize;

    /// Score every row of `df`. Errors on schema mismatch (missing or
    /// non-numeric feature column), missing cells, or non-finite output -
    /// the scorer turns any of these into a degraded outcome.
    fn predict_proba(&self, df: &DataFrame) -> Result<Vec<f64>>;
}

/// A pre-trained logistic fraud classifier, loaded from JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    /// Document format version, checked at load time
    pub format_version: u32,
    /// Free-form model identifier from the training run
    #[serde(default)]
    pub model_id: Option<String>,
    /// Feature column names in model order
    pub features: Vec<String>,
    /// One coefficient per feature
    pub coefficients: Vec<f64>,
    /// Intercept term
    pub intercept: f64,
    /// Training-time medians per raw column, used by the stored-median policy
    #[serde(default)]
    pub training_medians: Option<HashMap<String, f64>>,
    /// Threshold recommended by the training run
    #[serde(default)]
    pub threshold: Option<f64>,
}

impl Artifact {
    /// Load and validate an artifact from `path`.
    ///
    /// A missing file is [`ArtifactError::NotFound`]; every other failure is
    /// one of the load-failure variants. Column-schema compatibility with a
    /// particular table is NOT checked here - that surfaces at scoring time.
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        if !path.is_file() {
            return Err(ArtifactError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let artifact: Artifact =
            serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        artifact.validate()?;
        Ok(artifact)
    }

    fn validate(&self) -> Result<(), ArtifactError> {
        if self.format_version != ARTIFACT_FORMAT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                found: self.format_version,
                expected: ARTIFACT_FORMAT_VERSION,
            });
        }

        if self.features.is_empty() {
            return Err(ArtifactError::Invalid {
                message: "empty feature list".to_string(),
            });
        }

        if self.coefficients.len() != self.features.len() {
            return Err(ArtifactError::Invalid {
                message: format!(
                    "{} coefficients for {} features",
                    self.coefficients.len(),
                    self.features.len()
                ),
            });
        }

        if !self.intercept.is_finite() || self.coefficients.iter().any(|c| !c.is_finite()) {
            return Err(ArtifactError::Invalid {
                message: "non-finite coefficient or intercept".to_string(),
            });
        }

        if let Some(t) = self.threshold {
            if !(0.0..=1.0).contains(&t) {
                return Err(ArtifactError::Invalid {
                    message: format!("recommended threshold {} outside [0, 1]", t),
                });
            }
        }

        Ok(())
    }
}

impl ProbabilityModel for Artifact {
    fn feature_count(&self) -> usize {
        self.features.len()
    }

    fn predict_proba(&self, df: &DataFrame) -> Result<Vec<f64>> {
        let mut z = vec![self.intercept; df.height()];

        for (name, coefficient) in self.features.iter().zip(&self.coefficients) {
            let col = df.column(name).map_err(|_| {
                anyhow::anyhow!("model feature '{}' missing from prepared table", name)
            })?;
            let cast = col
                .cast(&DataType::Float64)
                .with_context(|| format!("model feature '{}' is not numeric", name))?;

            for (row, (acc, value)) in z.iter_mut().zip(cast.f64()?.into_iter()).enumerate() {
                match value {
                    Some(v) => *acc += coefficient * v,
                    None => bail!("model feature '{}' has a missing value at row {}", name, row),
                }
            }
        }

        let probabilities: Vec<f64> = z.into_iter().map(sigmoid).collect();

        if probabilities.iter().any(|p| !p.is_finite()) {
            bail!("model produced a non-finite probability");
        }

        Ok(probabilities)
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_artifact() -> Artifact {
        Artifact {
            format_version: ARTIFACT_FORMAT_VERSION,
            model_id: Some("fraude-lr-test".to_string()),
            features: vec!["a".to_string(), "b".to_string()],
            coefficients: vec![1.0, -0.5],
            intercept: 0.0,
            training_medians: None,
            threshold: None,
        }
    }

    #[test]
    fn test_sigmoid_bounds() {
        assert!((sigmoid(0.0) - 0.5).abs() < 1e-12);
        assert!(sigmoid(50.0) > 0.999);
        assert!(sigmoid(-50.0) < 0.001);
    }

    #[test]
    fn test_predict_proba_linear_combination() {
        let artifact = test_artifact();
        let df = df! {
            "a" => [0.0f64, 1.0],
            "b" => [0.0f64, 2.0],
        }
        .unwrap();

        let probs = artifact.predict_proba(&df).unwrap();
        assert_eq!(probs.len(), 2);
        // z = 0 -> 0.5
        assert!((probs[0] - 0.5).abs() < 1e-12);
        // z = 1*1 + (-0.5)*2 = 0 -> 0.5
        assert!((probs[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_predict_proba_missing_feature_column() {
        let artifact = test_artifact();
        let df = df! {
            "a" => [1.0f64],
        }
        .unwrap();

        let err = artifact.predict_proba(&df).unwrap_err();
        assert!(err.to_string().contains("model feature 'b' missing"));
    }

    #[test]
    fn test_predict_proba_null_cell() {
        let artifact = test_artifact();
        let df = df! {
            "a" => [Some(1.0f64), None],
            "b" => [1.0f64, 1.0],
        }
        .unwrap();

        let err = artifact.predict_proba(&df).unwrap_err();
        assert!(err.to_string().contains("missing value at row 1"));
    }

    #[test]
    fn test_validate_coefficient_mismatch() {
        let mut artifact = test_artifact();
        artifact.coefficients.push(3.0);

        let err = artifact.validate().unwrap_err();
        assert!(matches!(err, ArtifactError::Invalid { .. }));
        assert!(err.to_string().contains("3 coefficients for 2 features"));
    }

    #[test]
    fn test_validate_version_mismatch() {
        let mut artifact = test_artifact();
        artifact.format_version = 99;

        let err = artifact.validate().unwrap_err();
        assert!(matches!(
            err,
            ArtifactError::UnsupportedVersion {
                found: 99,
                expected: ARTIFACT_FORMAT_VERSION
            }
        ));
    }

    #[test]
    fn test_validate_threshold_range() {
        let mut artifact = test_artifact();
        artifact.threshold = Some(1.5);

        assert!(artifact.validate().is_err());
    }
}

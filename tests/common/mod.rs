//! Shared test utilities and fixture generators

use polars::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// Create a small raw extract with the shapes the pipeline has to handle:
///
/// - `A`: clean numeric with one out-of-domain negative value
/// - `B`: numeric with one missing value
/// - `C`: numeric spanning the cut-at-0 boundary
/// - `Monto`: amounts as text with thousands separators and stray whitespace
/// - `extra`: a column the selector must drop
pub fn create_raw_extract() -> DataFrame {
    df! {
        "A" => [1.0f64, -3.0, 2.0],
        "B" => [Some(1.0f64), None, Some(3.0)],
        "C" => [-1.0f64, 0.0, 5.0],
        "Monto" => ["1,000", "2,500.5", " 10 "],
        "extra" => [9i32, 9, 9],
    }
    .unwrap()
}

/// Create a larger extract for stress tests
pub fn create_large_extract(rows: usize) -> DataFrame {
    use rand::Rng;
    let mut rng = rand::thread_rng();

    let a: Vec<f64> = (0..rows).map(|_| rng.gen_range(-10.0..100.0)).collect();
    let b: Vec<f64> = (0..rows).map(|_| rng.gen::<f64>()).collect();
    let c: Vec<f64> = (0..rows).map(|_| rng.gen_range(0.0..3.0)).collect();
    let monto: Vec<f64> = (0..rows).map(|_| rng.gen_range(0.0..10_000.0)).collect();

    df! {
        "A" => a,
        "B" => b,
        "C" => c,
        "Monto" => monto,
    }
    .unwrap()
}

/// Create a temporary directory with a test CSV file
pub fn create_temp_csv(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("test_data.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    CsvWriter::new(&mut file).finish(df).unwrap();

    (temp_dir, csv_path)
}

/// Create a temporary directory with a test Parquet file
pub fn create_temp_parquet(df: &mut DataFrame) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let parquet_path = temp_dir.path().join("test_data.parquet");

    let file = std::fs::File::create(&parquet_path).unwrap();
    ParquetWriter::new(file).finish(df).unwrap();

    (temp_dir, parquet_path)
}

/// Write a minimal valid logistic artifact to `dir`.
///
/// With all-zero coefficients the probability is `sigmoid(intercept)` for
/// every row, which makes assertions on `PROB_FRAUDE`/`PRED_FRAUDE` exact.
pub fn write_artifact(
    dir: &TempDir,
    features: &[&str],
    intercept: f64,
    threshold: Option<f64>,
) -> PathBuf {
    let path = dir.path().join("model.json");
    let artifact = serde_json::json!({
        "format_version": 1,
        "model_id": "fraude-lr-test",
        "features": features,
        "coefficients": vec![0.0; features.len()],
        "intercept": intercept,
        "threshold": threshold,
    });
    std::fs::write(&path, serde_json::to_string_pretty(&artifact).unwrap()).unwrap();
    path
}

/// Intercept that makes a zero-coefficient artifact emit probability `p`.
pub fn intercept_for_probability(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

/// Assert that a DataFrame contains all the given columns
pub fn assert_has_columns(df: &DataFrame, columns: &[&str]) {
    for col in columns {
        assert!(
            df.column(col).is_ok(),
            "Expected column '{}' in {:?}",
            col,
            df.get_column_names()
        );
    }
}

/// Assert that a DataFrame contains none of the given columns
pub fn assert_missing_columns(df: &DataFrame, columns: &[&str]) {
    for col in columns {
        assert!(
            df.column(col).is_err(),
            "Expected column '{}' to be absent",
            col
        );
    }
}

/// Extract a column as `Vec<f64>`, panicking on nulls
pub fn float_values(df: &DataFrame, name: &str) -> Vec<f64> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .map(|v| v.expect("unexpected null"))
        .collect()
}

/// Extract a column as `Vec<Option<f64>>`
pub fn optional_float_values(df: &DataFrame, name: &str) -> Vec<Option<f64>> {
    df.column(name)
        .unwrap()
        .cast(&DataType::Float64)
        .unwrap()
        .f64()
        .unwrap()
        .into_iter()
        .collect()
}

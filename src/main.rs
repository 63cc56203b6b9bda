//! Fraudscore: Batch Scoring CLI
//!
//! Prepares a tabular extract and scores it with a pre-trained
//! binary fraud-classification model.

mod cli;
mod model;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::Result;
use clap::Parser;

use cli::{confirm_scoring, Cli};
use model::{score, Artifact, ProbabilityModel, ScoreOutcome, PREDICTION_COLUMN, PROBABILITY_COLUMN};
use pipeline::{
    load_dataset, prepare_features, save_dataset, MedianSource, ScoringConfig, DEFAULT_THRESHOLD,
};
use report::{export_scoring_report, ReportParams, ScoringSummary};
use utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
    print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ScoringConfig::from_path(path)?,
        None => ScoringConfig::default(),
    };

    let output_path = cli.output_path();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");
    let step_start = Instant::now();
    let spinner = create_spinner("Loading dataset...");
    let (df, rows, cols, memory_mb) = load_dataset(&cli.input, cli.infer_schema_length)?;
    finish_with_success(&spinner, "Dataset loaded");
    println!("      Rows: {}", rows);
    println!("      Columns: {}", cols);
    println!("      Estimated memory: {:.2} MB", memory_mb);
    let load_elapsed = step_start.elapsed();
    print_step_time(load_elapsed);

    // Step 2: Load scoring artifact
    print_step_header(2, "Load Scoring Artifact");
    let step_start = Instant::now();
    let artifact = Artifact::load(&cli.artifact)?;
    print_success("Artifact loaded");
    if let Some(id) = &artifact.model_id {
        print_info(&format!("Model: {}", id));
    }
    print_info(&format!("Model features: {}", artifact.feature_count()));

    // Threshold precedence: CLI flag, then config file, then the artifact's
    // recommendation, then the built-in default.
    let threshold = cli
        .threshold
        .or(config.threshold)
        .or(artifact.threshold)
        .unwrap_or(DEFAULT_THRESHOLD);

    let medians = if cli.batch_medians {
        print_info("Median policy: batch-local (recomputed from this batch)");
        MedianSource::BatchLocal
    } else if let Some(stored) = artifact.training_medians.clone() {
        print_info("Median policy: stored training medians");
        MedianSource::Stored(stored)
    } else {
        print_info("Artifact carries no stored medians, falling back to batch-local");
        MedianSource::BatchLocal
    };
    print_step_time(step_start.elapsed());

    // Print configuration card now that the threshold is resolved
    println!();
    print_config(&cli.input, &cli.artifact, &output_path, threshold);

    if !cli.no_confirm && !confirm_scoring(rows, threshold)? {
        println!("Cancelled by user.");
        return Ok(());
    }

    let mut summary = ScoringSummary::new(rows, threshold);
    summary.set_load_time(load_elapsed);

    // Step 3: Prepare features
    print_step_header(3, "Prepare Features");
    let step_start = Instant::now();
    let spinner = create_spinner("Applying column transforms...");
    let prepared = prepare_features(df, &config, &medians)?;
    finish_with_success(&spinner, "Features prepared");
    print_count("prepared column(s)", prepared.width(), None);
    let prepare_elapsed = step_start.elapsed();
    summary.set_prepare_time(prepare_elapsed);
    print_step_time(prepare_elapsed);

    // Step 4: Score
    print_step_header(4, "Score");
    let step_start = Instant::now();
    let spinner = create_spinner("Scoring rows...");
    let mut table = match score(&artifact, prepared, threshold) {
        ScoreOutcome::Scored(table) => {
            finish_with_success(&spinner, "Scoring complete");

            let flagged = table
                .column(PREDICTION_COLUMN)?
                .i32()?
                .into_iter()
                .flatten()
                .filter(|p| *p == 1)
                .count();
            let mean_probability = table
                .column(PROBABILITY_COLUMN)?
                .f64()?
                .into_iter()
                .flatten()
                .sum::<f64>()
                / rows.max(1) as f64;

            summary.record_scores(flagged, mean_probability);
            print_count(
                "row(s) flagged as fraud",
                flagged,
                Some(&format!("(threshold {:.3})", threshold)),
            );
            table
        }
        ScoreOutcome::Failed { table, reason } => {
            finish_with_warning(&spinner, "Scoring failed, keeping unscored table");
            print_warning(&reason);
            summary.record_failure(reason);
            table
        }
    };
    let score_elapsed = step_start.elapsed();
    summary.set_score_time(score_elapsed);
    print_step_time(score_elapsed);

    // Step 5: Save output
    print_step_header(5, "Save Results");
    let step_start = Instant::now();
    let spinner = create_spinner("Writing output file...");
    save_dataset(&mut table, &output_path)?;
    finish_with_success(&spinner, &format!("Saved to {}", output_path.display()));
    let save_elapsed = step_start.elapsed();
    summary.set_save_time(save_elapsed);
    print_step_time(save_elapsed);

    // Display summary
    summary.display();

    if let Some(report_path) = &cli.report {
        let input_file = cli.input.display().to_string();
        let artifact_file = cli.artifact.display().to_string();
        let params = ReportParams {
            input_file: &input_file,
            artifact_file: &artifact_file,
            model_id: artifact.model_id.as_deref(),
            batch_medians: matches!(medians, MedianSource::BatchLocal),
        };
        export_scoring_report(&summary, &params, report_path)?;
        print_info(&format!("Report written to {}", report_path.display()));
    }

    print_completion();

    // A degraded run still writes the passthrough table, but the process
    // must not exit clean: schedulers have to notice.
    if let Some(reason) = summary.failure_reason() {
        anyhow::bail!("scoring degraded to passthrough: {}", reason);
    }

    Ok(())
}

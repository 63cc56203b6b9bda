//! Scoring summary report generation

use std::time::Duration;

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Summary of one batch scoring run
#[derive(Debug, Default)]
pub struct ScoringSummary {
    pub rows: usize,
    pub threshold: f64,
    pub scored: bool,
    pub flagged: usize,
    pub mean_probability: f64,
    failure_reason: Option<String>,
    load_time: Duration,
    prepare_time: Duration,
    score_time: Duration,
    save_time: Duration,
}

impl ScoringSummary {
    pub fn new(rows: usize, threshold: f64) -> Self {
        Self {
            rows,
            threshold,
            ..Default::default()
        }
    }

    pub fn record_scores(&mut self, flagged: usize, mean_probability: f64) {
        self.scored = true;
        self.flagged = flagged;
        self.mean_probability = mean_probability;
    }

    pub fn record_failure(&mut self, reason: String) {
        self.scored = false;
        self.failure_reason = Some(reason);
    }

    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Share of rows flagged as fraud
    pub fn flag_rate(&self) -> f64 {
        if self.rows == 0 {
            0.0
        } else {
            self.flagged as f64 / self.rows as f64
        }
    }

    pub fn set_load_time(&mut self, d: Duration) {
        self.load_time = d;
    }

    pub fn set_prepare_time(&mut self, d: Duration) {
        self.prepare_time = d;
    }

    pub fn set_score_time(&mut self, d: Duration) {
        self.score_time = d;
    }

    pub fn set_save_time(&mut self, d: Duration) {
        self.save_time = d;
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("SCORING SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📦 Rows"), Cell::new(self.rows)]);

        table.add_row(vec![
            Cell::new("🎯 Threshold"),
            Cell::new(format!("{:.3}", self.threshold)),
        ]);

        let status = if self.scored {
            Cell::new("SCORED")
                .fg(Color::Green)
                .add_attribute(Attribute::Bold)
        } else {
            Cell::new("PASSTHROUGH")
                .fg(Color::Red)
                .add_attribute(Attribute::Bold)
        };
        table.add_row(vec![Cell::new("⚙️  Status"), status]);

        table.add_row(vec![
            Cell::new("🚩 Flagged as Fraud"),
            Cell::new(self.flagged).fg(if self.flagged == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);

        table.add_row(vec![
            Cell::new("📉 Flag Rate"),
            Cell::new(format!("{:.1}%", self.flag_rate() * 100.0)),
        ]);

        table.add_row(vec![
            Cell::new("📊 Mean Probability"),
            Cell::new(format!("{:.3}", self.mean_probability)),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if let Some(reason) = &self.failure_reason {
            println!();
            println!(
                "      {} {}",
                style("Scoring failed:").yellow().bold(),
                style(reason).yellow()
            );
        }

        println!();
        println!(
            "    {}",
            style(format!(
                "load {:.2}s · prepare {:.2}s · score {:.2}s · save {:.2}s",
                self.load_time.as_secs_f64(),
                self.prepare_time.as_secs_f64(),
                self.score_time.as_secs_f64(),
                self.save_time.as_secs_f64()
            ))
            .dim()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_rate() {
        let mut summary = ScoringSummary::new(200, 0.565);
        summary.record_scores(10, 0.2);
        assert!((summary.flag_rate() - 0.05).abs() < 1e-12);
        assert!(summary.scored);
    }

    #[test]
    fn test_flag_rate_empty_batch() {
        let summary = ScoringSummary::new(0, 0.565);
        assert_eq!(summary.flag_rate(), 0.0);
    }

    #[test]
    fn test_record_failure() {
        let mut summary = ScoringSummary::new(5, 0.565);
        summary.record_failure("schema mismatch".to_string());
        assert!(!summary.scored);
        assert_eq!(summary.failure_reason(), Some("schema mismatch"));
    }
}

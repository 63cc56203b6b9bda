//! Interactive prompts using dialoguer

use anyhow::Result;
use dialoguer::Confirm;

/// Prompt user to confirm proceeding with an action
pub fn confirm_step(message: &str) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(true)
        .interact()?;
    Ok(confirmed)
}

/// Prompt user to confirm scoring a batch
pub fn confirm_scoring(rows: usize, threshold: f64) -> Result<bool> {
    let message = format!("Score {} row(s) at threshold {:.3}?", rows, threshold);
    confirm_step(&message)
}

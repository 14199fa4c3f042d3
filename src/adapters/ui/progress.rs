//! Spinner shown while the analysis job is pending.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

pub fn analysis_spinner(symptom_count: usize) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.cyan} {msg} [{elapsed}]")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(format!(
        "Analyzing {} symptom(s) against the condition rules...",
        symptom_count
    ));
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

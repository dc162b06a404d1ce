use crate::domain::model::{JobState, JobStatus, UsageSnapshot};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// `count/limit (NN%)`, or `(undefined)` when the account has no limit.
pub fn format_usage(usage: &UsageSnapshot) -> String {
    let pct = match usage.percent_used() {
        Some(p) => format!("{}%", p),
        None => "undefined".to_string(),
    };
    format!("{}/{} ({})", usage.character_count, usage.character_limit, pct)
}

pub fn status_message(status: &JobStatus) -> String {
    match (status.status, status.seconds_remaining) {
        (JobState::Queued, _) => "Queued, waiting for a translation slot...".to_string(),
        (JobState::Translating, Some(secs)) if secs > 0 => {
            format!("Translating, about {}s remaining...", secs)
        }
        (JobState::Translating, _) => "Translating...".to_string(),
        (JobState::Done, _) => "Translation done".to_string(),
        (JobState::Error, _) => "Translation failed".to_string(),
    }
}

/// Spinner shown while the job is polled
pub struct PollProgress {
    bar: ProgressBar,
}

impl PollProgress {
    pub fn new(enabled: bool) -> Self {
        let bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            bar.set_style(style);
        }
        if enabled {
            bar.enable_steady_tick(Duration::from_millis(120));
        }
        // Statuses only arrive once the upload has been accepted
        bar.set_message("Uploading file...");
        Self { bar }
    }

    pub fn update(&self, status: &JobStatus) {
        self.bar.set_message(status_message(status));
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

pub fn print_step(msg: &str) {
    println!("{} {}", "›".cyan(), msg);
}

pub fn print_success(msg: &str) {
    println!("{} {}", "✔".green(), msg.green());
}

pub fn print_warning(msg: &str) {
    eprintln!("{}", format!("⚠️  {}", msg).yellow());
}

pub fn print_error(msg: &str) {
    eprintln!("{}", format!("✘ {}", msg).red());
}

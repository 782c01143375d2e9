//! Progress display module
//!
//! Status lines, the per-file progress bar and the statistics summary.

use crate::worker::FileSummary;

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Print a section header
pub fn print_header(text: &str) {
    println!("\n{} {}", "▶".green(), text.green().bold());
}

/// Print an info message
pub fn print_info(text: &str) {
    println!("  {} {}", "ℹ".cyan(), text);
}

/// Print a success message
pub fn print_success(text: &str) {
    println!("{}", text.green());
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("  {} {}", "⚠".yellow(), text.yellow());
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".red(), text.red());
}

/// Create a styled progress bar counting files
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);

    // The template is a literal; fall back to the default style rather than fail.
    let style = ProgressStyle::default_bar()
        .template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} files {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Merge statistics, accumulated on the driver thread from worker events
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MergeStats {
    pub files: u64,
    pub bytes: u64,
    pub tokens: u64,
    /// Sum of each worker's own unique words, before the union
    pub worker_unique: u64,
}

impl MergeStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_file(&mut self, summary: &FileSummary) {
        self.files += 1;
        self.bytes += summary.bytes;
        self.tokens += summary.tokens;
        self.worker_unique += summary.new_words;
    }

    /// Tokens dropped as duplicates given the final unique count
    pub fn duplicates(&self, unique: u64) -> u64 {
        self.tokens.saturating_sub(unique)
    }

    pub fn tokens_per_second(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.tokens as f64 / secs
        } else {
            0.0
        }
    }

    pub fn bytes_per_second(&self, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs > 0.0 {
            self.bytes as f64 / secs
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self, unique: u64, elapsed: Duration) {
        println!();
        println!("{}", "═".repeat(60).green());
        println!("{}", "                      MERGE COMPLETE".green().bold());
        println!("{}", "═".repeat(60).green());
        println!();

        println!("  {} {}", "Files read:     ".green(), format_number(self.files));
        println!("  {} {}", "Data read:      ".green(), ByteSize(self.bytes));
        println!();

        println!("  {} {}", "Total words:    ".green(), format_number(self.tokens));
        println!("  {} {}", "Duplicates:     ".yellow(), format_number(self.duplicates(unique)));
        println!(
            "  {} {}",
            "Per-worker uniq:".green(),
            format_number(self.worker_unique)
        );
        println!(
            "  {} {}",
            "Unique output:  ".green().bold(),
            format_number(unique).green().bold()
        );

        println!();
        println!("  {} {}", "Duration:       ".green(), format_duration(elapsed));
        println!(
            "  {} {:.2} words/sec",
            "Throughput:     ".green(),
            self.tokens_per_second(elapsed)
        );
        println!(
            "  {} {}/sec",
            "Speed:          ".green(),
            ByteSize(self.bytes_per_second(elapsed) as u64)
        );
        println!();
        println!("{}", "═".repeat(60).green());
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    let chars: Vec<char> = s.chars().collect();

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

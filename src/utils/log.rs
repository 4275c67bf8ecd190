// src/utils/log.rs

//! Terminal section formatting for command output.
//!
//! Diagnostics go through the `log` facade; these helpers print the
//! user-facing sections (headers, separators, summaries) on stdout.

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Local;

/// Suppresses decorative output when set
static QUIET: AtomicBool = AtomicBool::new(false);

/// Configure decorative output.
pub fn init(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

fn enabled() -> bool {
    !QUIET.load(Ordering::Relaxed)
}

/// Format a header block.
pub fn format_header(title: &str) -> String {
    let border = "═".repeat(60);
    format!("{border}\n  {title}\n{border}")
}

/// Format a summary block with a timestamped title line.
pub fn format_summary(title: &str, items: &[(&str, String)]) -> String {
    let mut out = format!("[{}] [SUMMARY] {}", Local::now().format("%H:%M:%S"), title);
    for (key, value) in items {
        out.push_str(&format!("\n    {key}: {value}"));
    }
    out
}

/// Print a header
pub fn header(title: &str) {
    if enabled() {
        println!("{}", format_header(title));
    }
}

/// Print a separator line
pub fn separator() {
    if enabled() {
        println!("{}", "─".repeat(60));
    }
}

/// Print a sub-item (indented)
pub fn sub_item(message: &str) {
    if enabled() {
        println!("    {}", message);
    }
}

/// Print a summary section
pub fn summary(title: &str, items: &[(&str, String)]) {
    if enabled() {
        println!();
        println!("{}", format_summary(title, items));
    }
}

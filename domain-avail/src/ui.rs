//! Terminal display logic for the domain-avail CLI.
//!
//! Table header and rows, the footer summary, verbose listings and the
//! transient progress bar. Everything here writes to stdout; logging goes to
//! stderr through tracing.

use console::{style, Term};
use domain_avail_lib::{BatchSummary, DomainVerdict, ProgressReporter};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const TABLE_WIDTH: usize = 80;
const DOMAIN_WIDTH: usize = 40;
const STATUS_WIDTH: usize = 12;
const COST_WIDTH: usize = 12;

// ── Progress ─────────────────────────────────────────────────────────────────

/// Progress bar drawn on stdout while a batch runs.
///
/// Prints a `Checking N domains...` line above the bar. Both are erased when
/// the batch finishes so the table continues directly under the header.
pub struct TerminalProgress {
    term: Term,
    bar: Option<ProgressBar>,
}

impl TerminalProgress {
    /// Create a reporter if stdout is an interactive terminal.
    pub fn for_stdout() -> Option<Self> {
        let term = Term::stdout();
        if term.is_term() {
            Some(Self { term, bar: None })
        } else {
            None
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("Progress: [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl ProgressReporter for TerminalProgress {
    fn on_start(&mut self, total: usize) {
        let _ = self.term.write_line(&checking_line(total));

        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
        bar.set_style(Self::bar_style());
        self.bar = Some(bar);
    }

    fn on_item(&mut self, completed: usize, _total: usize, domain: &str) {
        if let Some(bar) = &self.bar {
            bar.set_position(completed as u64);
            bar.set_message(domain.to_string());
        }
    }

    fn on_finish(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
        // The bar clears its own line; this removes the "Checking" line.
        let _ = self.term.clear_last_lines(1);
    }
}

/// Line shown above the progress bar.
pub fn checking_line(total: usize) -> String {
    format!("Checking {} domains...", total)
}

// ── Table ────────────────────────────────────────────────────────────────────

/// Lines printed before any results.
pub fn header_lines() -> Vec<String> {
    vec![
        "Domain Availability Checker".to_string(),
        "=".repeat(TABLE_WIDTH),
        format!(
            "{:<dw$} | {:<sw$} | {:<cw$}",
            "Domain",
            "Status",
            "Minimum Cost",
            dw = DOMAIN_WIDTH,
            sw = STATUS_WIDTH,
            cw = COST_WIDTH
        ),
        "-".repeat(TABLE_WIDTH),
    ]
}

pub fn print_header() {
    for line in header_lines() {
        println!("{}", line);
    }
}

/// Format a single table row.
///
/// Columns are padded on the plain text first so colour codes never affect
/// alignment.
pub fn format_result(verdict: &DomainVerdict) -> String {
    let status = if verdict.is_available {
        "✅ AVAILABLE"
    } else {
        "❌ TAKEN"
    };
    let padded_status = format!("{:<width$}", status, width = STATUS_WIDTH);
    let styled_status = if verdict.is_available {
        style(padded_status).green().bold()
    } else {
        style(padded_status).red()
    };

    format!(
        "{:<dw$} | {} | {:<cw$}",
        verdict.domain,
        styled_status,
        verdict.minimum_cost,
        dw = DOMAIN_WIDTH,
        cw = COST_WIDTH
    )
}

/// Print rows for available verdicts only, in the order given.
pub fn print_results(verdicts: &[DomainVerdict]) {
    for verdict in verdicts.iter().filter(|v| v.is_available) {
        println!("{}", format_result(verdict));
    }
}

pub fn print_footer(summary: &BatchSummary, verbose: bool) {
    println!("{}", "-".repeat(TABLE_WIDTH));
    println!("{}", summary.summary_line());

    if verbose {
        for line in verbose_lines(summary) {
            println!("{}", line);
        }
    }
}

/// Comma-joined domain listings for verbose mode.
///
/// The available listing is preceded by a blank line; empty listings are
/// left out.
pub fn verbose_lines(summary: &BatchSummary) -> Vec<String> {
    let mut lines = Vec::new();

    if !summary.available_domains.is_empty() {
        lines.push(String::new());
        lines.push(format!(
            "Available domains: {}",
            summary.available_domains.join(", ")
        ));
    }
    if !summary.taken_domains.is_empty() {
        lines.push(format!("Taken domains: {}", summary.taken_domains.join(", ")));
    }

    lines
}

//! Output formatting

use console::{style, Style, Term};
use std::time::Duration;
use storefront_probe::{Locator, RunSummary, Scenario, ScenarioOutcome};

/// Status lines on stderr, tables on stdout
#[derive(Debug)]
pub struct Reporter {
    err: Term,
    out: Term,
    /// Whether to use colors
    pub use_color: bool,
    /// Quiet mode
    pub quiet: bool,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new(true, false)
    }
}

impl Reporter {
    /// Create a new reporter
    #[must_use]
    pub fn new(use_color: bool, quiet: bool) -> Self {
        Self {
            err: Term::stderr(),
            out: Term::stdout(),
            use_color,
            quiet,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("✓").green().bold().to_string()
        } else {
            "PASS".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a failure message
    pub fn failure(&self, message: &str) {
        // Always print failures, even in quiet mode
        let prefix = if self.use_color {
            style("✗").red().bold().to_string()
        } else {
            "FAIL".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print a warning message
    pub fn warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("⚠").yellow().bold().to_string()
        } else {
            "WARN".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.quiet {
            return;
        }
        let prefix = if self.use_color {
            style("ℹ").blue().bold().to_string()
        } else {
            "INFO".to_string()
        };
        let _ = self.err.write_line(&format!("{prefix} {message}"));
    }

    /// One line per finished scenario
    pub fn outcome(&self, outcome: &ScenarioOutcome) {
        let line = format!("{} ({})", outcome.id, format_duration(outcome.duration));
        if outcome.passed {
            self.success(&line);
        } else {
            self.failure(&line);
            if let Some(error) = &outcome.error {
                let _ = self.err.write_line(&format!("    {error}"));
            }
        }
    }

    /// Print the run summary
    pub fn summary(&self, summary: &RunSummary) {
        let failed = summary.failed_count();
        if self.quiet && failed == 0 {
            return;
        }
        let _ = self.err.write_line("");
        let line = summary_line(summary);
        let line = if !self.use_color {
            line
        } else if failed > 0 || summary.skipped > 0 {
            Style::new().red().bold().apply_to(line).to_string()
        } else {
            Style::new().green().bold().apply_to(line).to_string()
        };
        let _ = self.err.write_line(&line);
    }

    /// Write a line to stdout
    pub fn print(&self, line: &str) -> std::io::Result<()> {
        self.out.write_line(line)
    }
}

/// `PASSED 7 scenarios in 1.20s (7 passed, 0 failed, 0 skipped)`
#[must_use]
pub fn summary_line(summary: &RunSummary) -> String {
    let status = if summary.all_passed() { "PASSED" } else { "FAILED" };
    format!(
        "{status} {} scenarios in {} ({} passed, {} failed, {} skipped)",
        summary.total() + summary.skipped,
        format_duration(summary.duration),
        summary.passed_count(),
        summary.failed_count(),
        summary.skipped,
    )
}

/// Seconds with two decimals
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

/// `suite::name  summary`, padded to the longest id
#[must_use]
pub fn scenario_table(scenarios: &[&Scenario]) -> Vec<String> {
    let ids: Vec<String> = scenarios.iter().map(|s| s.id()).collect();
    let width = ids.iter().map(String::len).max().unwrap_or(0);
    ids.iter()
        .zip(scenarios)
        .map(|(id, s)| format!("{id:<width$}  {}", s.summary))
        .collect()
}

/// `name  strategy  expression`, padded per column
#[must_use]
pub fn locator_table(locators: &[Locator]) -> Vec<String> {
    let width = locators.iter().map(|l| l.name().len()).max().unwrap_or(0);
    locators
        .iter()
        .map(|l| {
            format!(
                "{:<width$}  {:<5}  {}",
                l.name(),
                l.strategy().as_str(),
                l.expression()
            )
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use storefront_probe::{locators, scenarios};

    mod reporter_tests {
        use super::*;

        #[test]
        fn test_new_reporter() {
            let reporter = Reporter::new(true, false);
            assert!(reporter.use_color);
            assert!(!reporter.quiet);
        }

        #[test]
        fn test_quiet_reporter_still_reports_failures() {
            let reporter = Reporter::new(false, true);
            reporter.success("hidden");
            reporter.info("hidden");
            reporter.warning("hidden");
            reporter.outcome(&ScenarioOutcome::fail("cart::open_cart", "timed out"));
        }
    }

    #[test]
    fn test_summary_line() {
        let summary = RunSummary {
            outcomes: vec![
                ScenarioOutcome::pass("a"),
                ScenarioOutcome::fail("b", "boom"),
            ],
            skipped: 3,
            duration: Duration::from_millis(1500),
        };
        assert_eq!(
            summary_line(&summary),
            "FAILED 5 scenarios in 1.50s (1 passed, 1 failed, 3 skipped)"
        );
    }

    #[test]
    fn test_scenario_table_aligns_ids() {
        let selected = scenarios::select("order");
        let lines = scenario_table(&selected);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("order::open_order       "));
        assert!(lines[1].starts_with("order::back_from_order  "));
    }

    #[test]
    fn test_locator_table() {
        let lines = locator_table(locators::login::ALL);
        assert_eq!(lines.len(), locators::login::ALL.len());
        assert!(lines[0].starts_with("login.username"));
        assert!(lines[0].contains("xpath"));
        assert!(lines[0].ends_with("//input[@id='user-name']"));
    }
}

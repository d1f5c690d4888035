//! Scenario runner.
//!
//! Runs each selected scenario in a fresh session, logs the start banner and
//! the outcome, and collects the results.

use crate::config::SessionConfig;
use crate::logging;
use crate::scenarios::{self, Scenario};
use crate::session::{with_session, Backend};
use serde::Serialize;
use std::time::{Duration, Instant};

/// Result of one scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    /// `suite::name`
    pub id: String,
    /// Whether every check passed
    pub passed: bool,
    /// Error message if failed
    pub error: Option<String>,
    /// Wall time including browser start and close
    #[serde(with = "millis")]
    pub duration: Duration,
}

impl ScenarioOutcome {
    /// Create a passing outcome
    #[must_use]
    pub fn pass(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: true,
            error: None,
            duration: Duration::ZERO,
        }
    }

    /// Create a failing outcome
    #[must_use]
    pub fn fail(id: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: false,
            error: Some(error.into()),
            duration: Duration::ZERO,
        }
    }

    /// Set duration
    #[must_use]
    pub const fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Outcomes of a run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// One entry per scenario that ran, in run order
    pub outcomes: Vec<ScenarioOutcome>,
    /// Scenarios selected but not run after a fail-fast stop
    pub skipped: usize,
    /// Total duration
    #[serde(with = "millis")]
    pub duration: Duration,
}

impl RunSummary {
    /// Check if all scenarios passed
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.skipped == 0 && self.outcomes.iter().all(|o| o.passed)
    }

    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.passed).count()
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    /// Failed outcomes
    #[must_use]
    pub fn failures(&self) -> Vec<&ScenarioOutcome> {
        self.outcomes.iter().filter(|o| !o.passed).collect()
    }
}

/// Runs scenarios one session at a time
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    backend: Backend,
    config: SessionConfig,
    filter: String,
    fail_fast: bool,
}

impl ScenarioRunner {
    /// Runner over every scenario
    #[must_use]
    pub fn new(backend: Backend, config: SessionConfig) -> Self {
        Self {
            backend,
            config,
            filter: String::new(),
            fail_fast: false,
        }
    }

    /// Only run scenarios matching `filter` (suite, name or id substring)
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = filter.into();
        self
    }

    /// Stop after the first failure
    #[must_use]
    pub const fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Scenarios this runner would run
    #[must_use]
    pub fn selected(&self) -> Vec<&'static Scenario> {
        scenarios::select(&self.filter)
    }

    /// Run one scenario in its own session
    #[must_use]
    pub fn run_one(&self, scenario: &Scenario) -> ScenarioOutcome {
        let id = scenario.id();
        logging::test_started(&id, &scenario.params());
        let start = Instant::now();

        let result = with_session(self.backend, self.config.clone(), |session| {
            scenario.run(session)
        });

        let outcome = match result {
            Ok(()) => ScenarioOutcome::pass(&id),
            Err(e) => {
                tracing::error!(scenario = %id, error = %e, "scenario failed");
                ScenarioOutcome::fail(&id, e.to_string())
            }
        };
        logging::test_finished(&id, outcome.passed);
        outcome.with_duration(start.elapsed())
    }

    /// Run every selected scenario
    #[must_use]
    pub fn run(&self) -> RunSummary {
        self.run_with(|_| {})
    }

    /// Run every selected scenario, handing each outcome to `on_outcome`
    /// as soon as it is known
    pub fn run_with<F>(&self, mut on_outcome: F) -> RunSummary
    where
        F: FnMut(&ScenarioOutcome),
    {
        let start = Instant::now();
        let selected = self.selected();
        tracing::info!(
            backend = %self.backend,
            count = selected.len(),
            "running scenarios"
        );

        let mut summary = RunSummary::default();
        for (i, scenario) in selected.iter().enumerate() {
            let outcome = self.run_one(scenario);
            on_outcome(&outcome);
            let failed = !outcome.passed;
            summary.outcomes.push(outcome);
            if failed && self.fail_fast {
                summary.skipped = selected.len() - i - 1;
                tracing::warn!(skipped = summary.skipped, "stopping after first failure");
                break;
            }
        }

        summary.duration = start.elapsed();
        tracing::info!(
            passed = summary.passed_count(),
            failed = summary.failed_count(),
            skipped = summary.skipped,
            "run finished"
        );
        summary
    }
}

mod millis {
    use serde::Serializer;
    use std::time::Duration;

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
    }
}

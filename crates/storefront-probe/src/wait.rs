//! Bounded polling waits.
//!
//! Every wait in the interaction layer goes through [`poll_until`]: probe,
//! return on success, fail with [`ProbeError::Timeout`] once the deadline has
//! passed, otherwise sleep for the poll interval and try again. The calling
//! thread blocks for the whole wait.

use crate::driver::ElementHandle;
use crate::locator::Locator;
use crate::result::{ProbeError, ProbeResult};
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};

// =============================================================================
// CONSTANTS
// =============================================================================

/// Default timeout for element waits (15 seconds)
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 15_000;

/// Default polling interval (300ms)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 300;

// =============================================================================
// WAIT OPTIONS
// =============================================================================

/// Timeout and poll interval of a wait
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WaitOptions {
    /// Timeout in milliseconds
    pub timeout_ms: u64,
    /// Polling interval in milliseconds
    pub poll_interval_ms: u64,
}

impl Default for WaitOptions {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }
}

impl WaitOptions {
    /// Create new wait options with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set timeout in milliseconds
    #[must_use]
    pub const fn with_timeout(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set polling interval in milliseconds
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval_ms: u64) -> Self {
        self.poll_interval_ms = poll_interval_ms;
        self
    }

    /// Get timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Get poll interval as Duration
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

// =============================================================================
// CONDITIONS
// =============================================================================

/// Element condition a wait blocks on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// The first match is rendered and displayed
    Visible,
    /// At least one match, and every match is displayed
    AllVisible,
    /// The first match is attached to the DOM
    Present,
    /// At least one match is attached to the DOM
    AllPresent,
    /// The first match is displayed and enabled
    Clickable,
    /// Nothing matches, or the first match is hidden
    Invisible,
}

impl Condition {
    /// Name used in logs and timeout errors
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visible => "visible",
            Self::AllVisible => "all visible",
            Self::Present => "present",
            Self::AllPresent => "all present",
            Self::Clickable => "clickable",
            Self::Invisible => "invisible",
        }
    }

    /// Whether the condition holds for a snapshot of the matches
    #[must_use]
    pub fn holds(&self, found: &[ElementHandle]) -> bool {
        match self {
            Self::Visible => found.first().is_some_and(|e| e.displayed),
            Self::AllVisible => !found.is_empty() && found.iter().all(|e| e.displayed),
            Self::Present | Self::AllPresent => !found.is_empty(),
            Self::Clickable => found.first().is_some_and(|e| e.displayed && e.enabled),
            Self::Invisible => found.first().map_or(true, |e| !e.displayed),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// POLLING LOOP
// =============================================================================

/// Poll `probe` until it yields a value or the deadline passes
///
/// `probe` returns `Ok(None)` for "not yet". A [`ProbeError::StaleElement`]
/// also counts as "not yet" since the next poll re-resolves the locator. Any
/// other error aborts the wait.
pub fn poll_until<T, F>(
    locator: &Locator,
    condition: Condition,
    options: &WaitOptions,
    mut probe: F,
) -> ProbeResult<T>
where
    F: FnMut() -> ProbeResult<Option<T>>,
{
    let start = Instant::now();
    let timeout = options.timeout();
    let mut attempts = 0_u32;

    loop {
        attempts += 1;
        match probe() {
            Ok(Some(value)) => {
                tracing::trace!(
                    locator = locator.name(),
                    %condition,
                    attempts,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "wait satisfied"
                );
                return Ok(value);
            }
            Ok(None) => {}
            Err(e) if e.is_stale() => {
                tracing::trace!(locator = locator.name(), "stale element while polling");
            }
            Err(e) => return Err(e),
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            tracing::error!(
                locator = locator.name(),
                %condition,
                timeout_ms = options.timeout_ms,
                attempts,
                "wait timed out"
            );
            return Err(ProbeError::Timeout {
                locator: locator.name().to_string(),
                condition: condition.as_str().to_string(),
                ms: options.timeout_ms,
            });
        }
        std::thread::sleep(options.poll_interval().min(timeout - elapsed));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::driver::ElementHandle;

    const TARGET: Locator = Locator::css("test.target", "#target");

    fn handle(displayed: bool, enabled: bool) -> ElementHandle {
        ElementHandle::new(TARGET, "test.target:0", 0, "div")
            .with_displayed(displayed)
            .with_enabled(enabled)
    }

    mod wait_options_tests {
        use super::*;

        #[test]
        fn test_defaults_match_suite_policy() {
            let opts = WaitOptions::default();
            assert_eq!(opts.timeout_ms, 15_000);
            assert_eq!(opts.poll_interval_ms, 300);
            assert_eq!(opts.timeout(), Duration::from_secs(15));
        }

        #[test]
        fn test_builders() {
            let opts = WaitOptions::new().with_timeout(50).with_poll_interval(5);
            assert_eq!(opts.timeout(), Duration::from_millis(50));
            assert_eq!(opts.poll_interval(), Duration::from_millis(5));
        }
    }

    mod condition_tests {
        use super::*;

        #[test]
        fn test_visible_uses_first_match() {
            assert!(Condition::Visible.holds(&[handle(true, true), handle(false, true)]));
            assert!(!Condition::Visible.holds(&[handle(false, true), handle(true, true)]));
            assert!(!Condition::Visible.holds(&[]));
        }

        #[test]
        fn test_all_visible_requires_every_match() {
            assert!(Condition::AllVisible.holds(&[handle(true, true), handle(true, false)]));
            assert!(!Condition::AllVisible.holds(&[handle(true, true), handle(false, true)]));
            assert!(!Condition::AllVisible.holds(&[]));
        }

        #[test]
        fn test_present_ignores_display() {
            assert!(Condition::Present.holds(&[handle(false, false)]));
            assert!(Condition::AllPresent.holds(&[handle(false, false)]));
            assert!(!Condition::Present.holds(&[]));
        }

        #[test]
        fn test_clickable_requires_enabled() {
            assert!(Condition::Clickable.holds(&[handle(true, true)]));
            assert!(!Condition::Clickable.holds(&[handle(true, false)]));
        }

        #[test]
        fn test_invisible() {
            assert!(Condition::Invisible.holds(&[]));
            assert!(Condition::Invisible.holds(&[handle(false, true)]));
            assert!(!Condition::Invisible.holds(&[handle(true, true)]));
        }
    }

    mod poll_tests {
        use super::*;

        #[test]
        fn test_returns_first_success() {
            let mut calls = 0;
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let value = poll_until(&TARGET, Condition::Visible, &opts, || {
                calls += 1;
                Ok((calls == 3).then_some(calls))
            })
            .unwrap();
            assert_eq!(value, 3);
        }

        #[test]
        fn test_times_out_with_context() {
            let opts = WaitOptions::new().with_timeout(20).with_poll_interval(5);
            let start = Instant::now();
            let err = poll_until::<(), _>(&TARGET, Condition::Clickable, &opts, || Ok(None))
                .unwrap_err();
            assert!(start.elapsed() >= Duration::from_millis(20));
            match err {
                ProbeError::Timeout {
                    locator,
                    condition,
                    ms,
                } => {
                    assert_eq!(locator, "test.target");
                    assert_eq!(condition, "clickable");
                    assert_eq!(ms, 20);
                }
                other => panic!("unexpected {other:?}"),
            }
        }

        #[test]
        fn test_stale_counts_as_not_yet() {
            let mut calls = 0;
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let value = poll_until(&TARGET, Condition::Present, &opts, || {
                calls += 1;
                if calls == 1 {
                    Err(ProbeError::StaleElement {
                        locator: "test.target".to_string(),
                        node_id: "x".to_string(),
                    })
                } else {
                    Ok(Some("ok"))
                }
            })
            .unwrap();
            assert_eq!(value, "ok");
        }

        #[test]
        fn test_other_errors_abort() {
            let mut calls = 0;
            let opts = WaitOptions::new().with_timeout(1_000).with_poll_interval(1);
            let err = poll_until::<(), _>(&TARGET, Condition::Visible, &opts, || {
                calls += 1;
                Err(ProbeError::driver("gone"))
            })
            .unwrap_err();
            assert_eq!(calls, 1);
            assert!(err.to_string().contains("gone"));
        }

        #[test]
        fn test_zero_timeout_probes_once() {
            let mut calls = 0;
            let opts = WaitOptions::new().with_timeout(0);
            let err = poll_until::<(), _>(&TARGET, Condition::Visible, &opts, || {
                calls += 1;
                Ok(None)
            });
            assert!(err.unwrap_err().is_timeout());
            assert_eq!(calls, 1);
        }
    }
}

//! Checks used by scenarios.
//!
//! Every check logs the expected and actual value through
//! [`crate::logging::assertion`] and fails with
//! [`ProbeError::AssertionMismatch`] instead of panicking, so a scenario
//! stops at its first failed check and still closes its session.

use crate::logging;
use crate::pricing;
use crate::result::{ProbeError, ProbeResult};
use serde::Serialize;
use std::fmt::{Debug, Display};

/// Required ordering of a sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Direction {
    /// Non-decreasing
    Ascending,
    /// Non-increasing
    Descending,
}

impl Direction {
    fn holds<T: PartialOrd>(self, a: &T, b: &T) -> bool {
        match self {
            Self::Ascending => a <= b,
            Self::Descending => a >= b,
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// `actual == expected`
pub fn expect_eq<T>(what: &str, expected: &T, actual: &T) -> ProbeResult<()>
where
    T: PartialEq + Debug + ?Sized,
{
    let passed = expected == actual;
    logging::assertion(&Shown(expected), &Shown(actual), what, passed);
    if passed {
        Ok(())
    } else {
        Err(ProbeError::mismatch(what, Shown(expected), Shown(actual)))
    }
}

/// `condition` holds
pub fn expect_true(what: &str, condition: bool) -> ProbeResult<()> {
    logging::assertion(&true, &condition, what, condition);
    if condition {
        Ok(())
    } else {
        Err(ProbeError::mismatch(what, true, false))
    }
}

/// Element-wise `|e - a| <= rel * max(|e|, |a|)`, lengths equal
pub fn expect_approx(what: &str, expected: &[f64], actual: &[f64], rel: f64) -> ProbeResult<()> {
    let passed = expected.len() == actual.len()
        && expected
            .iter()
            .zip(actual)
            .all(|(e, a)| pricing::approx_eq(*e, *a, rel));
    expect_outcome(what, &Shown(expected), &Shown(actual), passed)
}

/// Every adjacent pair of `values` follows `direction`
pub fn expect_ordered<T>(what: &str, values: &[T], direction: Direction) -> ProbeResult<()>
where
    T: PartialOrd + Debug,
{
    let passed = values.windows(2).all(|w| direction.holds(&w[0], &w[1]));
    expect_outcome(what, &direction.as_str(), &Shown(values), passed)
}

fn expect_outcome(
    what: &str,
    expected: &dyn Display,
    actual: &dyn Display,
    passed: bool,
) -> ProbeResult<()> {
    logging::assertion(expected, actual, what, passed);
    if passed {
        Ok(())
    } else {
        Err(ProbeError::mismatch(what, expected, actual))
    }
}

/// `Debug` rendering for log lines and mismatch errors; strings are shown bare
struct Shown<'a, T: ?Sized>(&'a T);

impl<T: Debug + ?Sized> Display for Shown<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rendered = format!("{:?}", self.0);
        match rendered.strip_prefix('"').and_then(|r| r.strip_suffix('"')) {
            Some(bare) if !bare.contains('"') => f.write_str(bare),
            _ => f.write_str(&rendered),
        }
    }
}

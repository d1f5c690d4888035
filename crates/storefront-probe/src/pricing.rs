//! Price reconciliation.
//!
//! The cart and overview pages are cross-checked through two independent
//! paths: a [`PriceTriple`] derived from scraped line-item prices, and one
//! observed from the storefront's own summary labels. Tax is rounded to the
//! cent before it is added to the subtotal, and the total is rounded again.

use crate::result::{ProbeError, ProbeResult};
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

/// Sales tax applied at checkout
pub const TAX_RATE: f64 = 0.08;

/// Default relative tolerance for comparing price triples
pub const DEFAULT_REL_TOLERANCE: f64 = 1e-9;

fn amount_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"\d+\.\d+").ok())
        .as_ref()
}

/// Parse a rendered price such as `$29.99`
pub fn parse_price(text: &str) -> ProbeResult<f64> {
    text.trim()
        .replace('$', "")
        .parse()
        .map_err(|_| ProbeError::PriceParse {
            text: text.to_string(),
        })
}

/// First decimal amount inside a label such as `Tax: $2.40`
pub fn extract_amount(text: &str) -> ProbeResult<f64> {
    amount_pattern()
        .and_then(|re| re.find(text))
        .and_then(|m| m.as_str().parse().ok())
        .ok_or_else(|| ProbeError::PriceParse {
            text: text.to_string(),
        })
}

/// Round half away from zero to two decimals
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Relative closeness, `|a - b| <= rel * max(|a|, |b|)`
#[must_use]
pub fn approx_eq(a: f64, b: f64, rel: f64) -> bool {
    a == b || (a - b).abs() <= rel * a.abs().max(b.abs())
}

/// Subtotal, tax and total of an order
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceTriple {
    /// Sum of line items
    pub subtotal: f64,
    /// Tax on the subtotal
    pub tax: f64,
    /// Subtotal plus tax
    pub total: f64,
}

impl PriceTriple {
    /// Derive the triple from line-item prices
    ///
    /// The subtotal is the plain sum. Tax is `round2(subtotal * 8 / 100)` and
    /// the total is `round2(subtotal + tax)`.
    #[must_use]
    pub fn from_line_items(prices: &[f64]) -> Self {
        let subtotal: f64 = prices.iter().sum();
        let tax = round2(subtotal * 8.0 / 100.0);
        let total = round2(subtotal + tax);
        Self {
            subtotal,
            tax,
            total,
        }
    }

    /// Triple as rendered by the storefront
    #[must_use]
    pub const fn observed(subtotal: f64, tax: f64, total: f64) -> Self {
        Self {
            subtotal,
            tax,
            total,
        }
    }

    /// Parse the three summary labels
    pub fn from_labels(subtotal: &str, tax: &str, total: &str) -> ProbeResult<Self> {
        Ok(Self::observed(
            extract_amount(subtotal)?,
            extract_amount(tax)?,
            extract_amount(total)?,
        ))
    }

    /// The three values in ascending order
    #[must_use]
    pub fn sorted(&self) -> [f64; 3] {
        let mut values = [self.subtotal, self.tax, self.total];
        values.sort_by(f64::total_cmp);
        values
    }

    /// Element-wise comparison of the sorted values within `rel`
    #[must_use]
    pub fn approx_eq(&self, other: &Self, rel: f64) -> bool {
        self.sorted()
            .iter()
            .zip(other.sorted())
            .all(|(a, b)| approx_eq(*a, b, rel))
    }

    /// Whether tax and total follow from the subtotal
    #[must_use]
    pub fn holds_invariant(&self) -> bool {
        let tax = round2(self.subtotal * TAX_RATE);
        let total = round2(self.subtotal + tax);
        approx_eq(self.tax, tax, DEFAULT_REL_TOLERANCE)
            && approx_eq(self.total, total, DEFAULT_REL_TOLERANCE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const CATALOG_PRICES: [f64; 6] = [29.99, 9.99, 15.99, 49.99, 7.99, 15.99];

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_price() {
            assert_eq!(parse_price("$9.99").unwrap(), 9.99);
            assert_eq!(parse_price(" $49.99 ").unwrap(), 49.99);
            assert!(parse_price("free").is_err());
        }

        #[test]
        fn test_extract_amount() {
            assert_eq!(extract_amount("Tax: $2.40").unwrap(), 2.40);
            assert_eq!(extract_amount("Item total: $129.94").unwrap(), 129.94);
            assert!(matches!(
                extract_amount("Total: $"),
                Err(ProbeError::PriceParse { .. })
            ));
        }

        #[test]
        fn test_extract_takes_first_amount() {
            assert_eq!(extract_amount("1.50 then 2.50").unwrap(), 1.50);
        }
    }

    mod triple_tests {
        use super::*;

        #[test]
        fn test_single_backpack() {
            let triple = PriceTriple::from_line_items(&[29.99]);
            assert_eq!(triple.tax, 2.40);
            assert_eq!(triple.total, 32.39);
            assert!(triple.holds_invariant());
        }

        #[test]
        fn test_whole_catalog() {
            let triple = PriceTriple::from_line_items(&CATALOG_PRICES);
            assert!(approx_eq(triple.subtotal, 129.94, DEFAULT_REL_TOLERANCE));
            assert_eq!(triple.tax, 10.40);
            assert_eq!(triple.total, 140.34);
            let observed =
                PriceTriple::from_labels("Item total: $129.94", "Tax: $10.40", "Total: $140.34")
                    .unwrap();
            assert!(triple.approx_eq(&observed, DEFAULT_REL_TOLERANCE));
        }

        #[test]
        fn test_empty_cart() {
            let triple = PriceTriple::from_line_items(&[]);
            assert_eq!(triple.sorted(), [0.0, 0.0, 0.0]);
            assert!(triple.holds_invariant());
        }

        #[test]
        fn test_sorted_is_ascending() {
            let triple = PriceTriple::observed(10.0, 0.8, 10.8);
            assert_eq!(triple.sorted(), [0.8, 10.0, 10.8]);
        }

        #[test]
        fn test_wrong_tax_breaks_invariant() {
            assert!(!PriceTriple::observed(29.99, 2.39, 32.38).holds_invariant());
            assert!(!PriceTriple::observed(29.99, 2.40, 32.40).holds_invariant());
        }

        #[test]
        fn test_unrounded_total_is_within_tolerance() {
            let rounded = PriceTriple::from_line_items(&[15.99, 7.99]);
            let raw = PriceTriple::observed(
                rounded.subtotal,
                rounded.tax,
                rounded.subtotal + rounded.tax,
            );
            assert!(rounded.approx_eq(&raw, 1e-6));
        }
    }

    proptest! {
        #[test]
        fn prop_derived_triple_holds_invariant(
            picks in proptest::collection::vec(0usize..6, 0..12)
        ) {
            let prices: Vec<f64> = picks.iter().map(|i| CATALOG_PRICES[*i]).collect();
            let triple = PriceTriple::from_line_items(&prices);
            prop_assert!(triple.holds_invariant());
            prop_assert!(triple.total >= triple.subtotal);
        }

        #[test]
        fn prop_sorted_is_non_decreasing(
            a in 0.0f64..1000.0, b in 0.0f64..1000.0, c in 0.0f64..1000.0
        ) {
            let s = PriceTriple::observed(a, b, c).sorted();
            prop_assert!(s[0] <= s[1] && s[1] <= s[2]);
        }

        #[test]
        fn prop_tax_matches_cent_arithmetic(cents in 0u32..100_000) {
            let subtotal = f64::from(cents) / 100.0;
            let triple = PriceTriple::from_line_items(&[subtotal]);
            let tax_cents = (cents * 8 + 50) / 100;
            prop_assert!(approx_eq(triple.tax, f64::from(tax_cents) / 100.0, 1e-9));
        }
    }
}

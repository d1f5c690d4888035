//! Locator abstraction for element selection.
//!
//! A [`Locator`] is an immutable `(strategy, expression)` pair with a stable
//! semantic name such as `login.username`. Locators are `const`-constructible
//! so the whole registry in [`crate::locators`] is defined at compile time.
//!
//! Locators never hold element references. Every wait or action resolves the
//! locator again against the live DOM.

use serde::Serialize;
use std::fmt;

/// Strategy used to resolve a locator expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// XPath 1.0 expression
    XPath,
    /// CSS selector
    Css,
    /// Element id attribute
    Id,
}

impl Strategy {
    /// Short name used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::XPath => "xpath",
            Self::Css => "css",
            Self::Id => "id",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named `(strategy, expression)` pair identifying zero or more elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Locator {
    name: &'static str,
    strategy: Strategy,
    expression: &'static str,
}

impl Locator {
    /// Create an XPath locator
    #[must_use]
    pub const fn xpath(name: &'static str, expression: &'static str) -> Self {
        Self {
            name,
            strategy: Strategy::XPath,
            expression,
        }
    }

    /// Create a CSS locator
    #[must_use]
    pub const fn css(name: &'static str, expression: &'static str) -> Self {
        Self {
            name,
            strategy: Strategy::Css,
            expression,
        }
    }

    /// Create an id locator
    #[must_use]
    pub const fn id(name: &'static str, expression: &'static str) -> Self {
        Self {
            name,
            strategy: Strategy::Id,
            expression,
        }
    }

    /// Semantic name, unique across the registry
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Resolution strategy
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Raw selector expression
    #[must_use]
    pub const fn expression(&self) -> &'static str {
        self.expression
    }

    /// JavaScript expression evaluating to an array of every matching element
    #[must_use]
    pub fn to_query_all(&self) -> String {
        let expr = self.expression;
        match self.strategy {
            Strategy::XPath => format!(
                "(() => {{ const r = document.evaluate({expr:?}, document, null, \
                 XPathResult.ORDERED_NODE_SNAPSHOT_TYPE, null); const out = []; \
                 for (let i = 0; i < r.snapshotLength; i++) {{ out.push(r.snapshotItem(i)); }} \
                 return out; }})()"
            ),
            Strategy::Css => format!("Array.from(document.querySelectorAll({expr:?}))"),
            Strategy::Id => format!("[document.getElementById({expr:?})].filter(Boolean)"),
        }
    }

    /// JavaScript expression evaluating to the number of matches
    #[must_use]
    pub fn to_count_query(&self) -> String {
        format!("{}.length", self.to_query_all())
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}: {})", self.name, self.strategy, self.expression)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BUTTON: Locator = Locator::xpath("test.button", "//button[@id='go']");

    mod constructor_tests {
        use super::*;

        #[test]
        fn test_const_construction() {
            assert_eq!(BUTTON.name(), "test.button");
            assert_eq!(BUTTON.strategy(), Strategy::XPath);
            assert_eq!(BUTTON.expression(), "//button[@id='go']");
        }

        #[test]
        fn test_css_and_id() {
            let css = Locator::css("test.css", "div.item");
            let id = Locator::id("test.id", "checkout");
            assert_eq!(css.strategy(), Strategy::Css);
            assert_eq!(id.strategy(), Strategy::Id);
        }

        #[test]
        fn test_display() {
            assert_eq!(
                BUTTON.to_string(),
                "test.button (xpath: //button[@id='go'])"
            );
        }
    }

    mod query_tests {
        use super::*;

        #[test]
        fn test_xpath_query_uses_snapshot() {
            let q = BUTTON.to_query_all();
            assert!(q.contains("document.evaluate(\"//button[@id='go']\""));
            assert!(q.contains("ORDERED_NODE_SNAPSHOT_TYPE"));
        }

        #[test]
        fn test_css_query() {
            let q = Locator::css("x", "div.cart_item").to_query_all();
            assert_eq!(q, "Array.from(document.querySelectorAll(\"div.cart_item\"))");
        }

        #[test]
        fn test_id_query() {
            let q = Locator::id("x", "finish").to_query_all();
            assert_eq!(q, "[document.getElementById(\"finish\")].filter(Boolean)");
        }

        #[test]
        fn test_count_query() {
            let q = Locator::css("x", "a").to_count_query();
            assert!(q.ends_with(".length"));
        }
    }
}

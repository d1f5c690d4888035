//! Browser driver boundary.
//!
//! The interaction layer talks to a browser only through [`BrowserDriver`].
//! Two implementations ship with the crate:
//!
//! - [`crate::mock::MockDriver`] simulates the storefront in memory
//! - `ChromiumDriver` (feature `browser`) drives Chromium over CDP
//!
//! Element lookups return [`ElementHandle`] snapshots. A handle carries a
//! driver-assigned node id, and every element operation re-resolves that id
//! before acting. A node that is no longer rendered yields
//! [`crate::ProbeError::StaleElement`].

use crate::locator::Locator;
use crate::result::ProbeResult;
use serde::Serialize;
use std::path::PathBuf;

/// Snapshot of one element matched by a locator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ElementHandle {
    /// Locator the element was found with
    pub locator: Locator,
    /// Driver-assigned identity, stable while the node stays rendered
    pub node_id: String,
    /// Position among the locator's matches at lookup time
    pub index: usize,
    /// Lower-case tag name
    pub tag_name: String,
    /// Rendered text at lookup time
    pub text: String,
    /// Whether the element was displayed at lookup time
    pub displayed: bool,
    /// Whether the element was enabled at lookup time
    pub enabled: bool,
}

impl ElementHandle {
    /// Create a displayed, enabled handle with empty text
    #[must_use]
    pub fn new(
        locator: Locator,
        node_id: impl Into<String>,
        index: usize,
        tag_name: impl Into<String>,
    ) -> Self {
        Self {
            locator,
            node_id: node_id.into(),
            index,
            tag_name: tag_name.into(),
            text: String::new(),
            displayed: true,
            enabled: true,
        }
    }

    /// Set the text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the displayed flag
    #[must_use]
    pub const fn with_displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }

    /// Set the enabled flag
    #[must_use]
    pub const fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Pointer gesture performed on an element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    /// Left click
    Click,
    /// Left double click
    DoubleClick,
    /// Right click
    ContextClick,
    /// Move the pointer over the element
    Hover,
}

impl PointerAction {
    /// Name used in logs
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::DoubleClick => "double_click",
            Self::ContextClick => "context_click",
            Self::Hover => "hover",
        }
    }
}

/// Drop target of a drag gesture
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DragTarget {
    /// Release at an offset from the element centre, in CSS pixels
    Offset {
        /// Horizontal offset
        dx: f64,
        /// Vertical offset
        dy: f64,
    },
    /// Release over the centre of another element
    Element(ElementHandle),
}

/// Browser launch configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriverConfig {
    /// Run without a visible window
    pub headless: bool,
    /// Window width
    pub window_width: u32,
    /// Window height
    pub window_height: u32,
    /// Browser executable override
    pub executable_path: Option<PathBuf>,
    /// Extra command-line arguments, appended after the defaults
    pub extra_args: Vec<String>,
}

/// Arguments passed to every launched browser
pub const BASE_BROWSER_ARGS: &[&str] = &[
    "--no-sandbox",
    "--disable-dev-shm-usage",
    "--disable-features=PasswordCheck,PasswordLeakDetection,SafetyTipUI,PasswordManagerOnboarding",
    "--disable-save-password-bubble",
    "--disable-notifications",
    "--disable-infobars",
    "--disable-extensions",
    "--disable-blink-features=AutomationControlled",
    "--no-first-run",
    "--disable-search-engine-choice-screen",
];

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            headless: true,
            window_width: 1920,
            window_height: 1080,
            executable_path: None,
            extra_args: Vec::new(),
        }
    }
}

impl DriverConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set headless mode
    #[must_use]
    pub const fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Set window dimensions
    #[must_use]
    pub const fn window(mut self, width: u32, height: u32) -> Self {
        self.window_width = width;
        self.window_height = height;
        self
    }

    /// Set the browser executable
    #[must_use]
    pub fn executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable_path = Some(path.into());
        self
    }

    /// Append a browser argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.extra_args.push(arg.into());
        self
    }

    /// Full argument list for the browser process
    ///
    /// The headless switch itself is left to the driver.
    #[must_use]
    pub fn browser_args(&self) -> Vec<String> {
        let mut args = vec![format!(
            "--window-size={},{}",
            self.window_width, self.window_height
        )];
        if self.headless {
            args.push("--disable-gpu".to_string());
        }
        args.extend(BASE_BROWSER_ARGS.iter().map(|a| (*a).to_string()));
        args.extend(self.extra_args.iter().cloned());
        args
    }
}

/// Synchronous browser automation boundary
///
/// Every method blocks until the browser has answered. Element methods take a
/// handle from [`BrowserDriver::find_elements`] and re-resolve its node id
/// first, failing with `StaleElement` when the node is gone.
pub trait BrowserDriver: Send {
    /// Short driver name for logs
    fn name(&self) -> &'static str;

    /// Navigate to `url` and wait for the load to finish
    fn navigate(&mut self, url: &str) -> ProbeResult<()>;

    /// Current page URL
    fn current_url(&mut self) -> ProbeResult<String>;

    /// Evaluate a JavaScript expression and return its JSON value
    fn execute_script(&mut self, script: &str) -> ProbeResult<serde_json::Value>;

    /// Snapshot every element currently matching `locator`, in document order
    fn find_elements(&mut self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>>;

    /// Fresh snapshot of an element by node id
    fn resolve(&mut self, element: &ElementHandle) -> ProbeResult<ElementHandle>;

    /// Perform a pointer gesture on an element
    fn pointer(&mut self, element: &ElementHandle, action: PointerAction) -> ProbeResult<()>;

    /// Type `text` into an element
    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()>;

    /// Clear an input element
    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()>;

    /// Current rendered text of an element
    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String>;

    /// Attribute or property value of an element
    ///
    /// `value` reads the live property so typed input is visible.
    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>>;

    /// Press on an element, move to `target`, release
    fn drag(&mut self, element: &ElementHandle, target: &DragTarget) -> ProbeResult<()>;

    /// Scroll an element into the viewport
    fn scroll_into_view(&mut self, element: &ElementHandle) -> ProbeResult<()>;

    /// Tint an element briefly so a watcher can follow the run
    fn highlight(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        let _ = element;
        Ok(())
    }

    /// Shut the browser down
    ///
    /// Calling `close` more than once is not an error.
    fn close(&mut self) -> ProbeResult<()>;
}

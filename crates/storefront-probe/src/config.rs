//! Session configuration.
//!
//! [`SessionConfig`] is built in code with the `with_*` methods or read from
//! the environment:
//!
//! | variable | effect |
//! |----------|--------|
//! | `HEADLESS` | `ui` opens a visible window, anything else stays headless |
//! | `CHROME_PATH` | browser executable |
//! | `STOREFRONT_BASE_URL` | storefront under test |
//! | `STOREFRONT_WAIT_TIMEOUT_MS` | element wait timeout |
//! | `STOREFRONT_POLL_MS` | element wait poll interval |
//! | `STOREFRONT_HIGHLIGHT` | `1`/`true` tints elements before acting |
//! | `STOREFRONT_SEED` | seed for generated data |

use crate::data::{StoreUrls, DEFAULT_BASE_URL};
use crate::driver::DriverConfig;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::WaitOptions;
use std::str::FromStr;

/// Environment variable names
pub mod env {
    pub const HEADLESS: &str = "HEADLESS";
    pub const CHROME_PATH: &str = "CHROME_PATH";
    pub const BASE_URL: &str = "STOREFRONT_BASE_URL";
    pub const WAIT_TIMEOUT_MS: &str = "STOREFRONT_WAIT_TIMEOUT_MS";
    pub const POLL_MS: &str = "STOREFRONT_POLL_MS";
    pub const HIGHLIGHT: &str = "STOREFRONT_HIGHLIGHT";
    pub const SEED: &str = "STOREFRONT_SEED";
}

/// Everything a session needs besides the driver itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Storefront under test
    pub base_url: String,
    /// Browser launch settings
    pub driver: DriverConfig,
    /// Element wait policy
    pub wait: WaitOptions,
    /// Tint elements before acting on them
    pub highlight: bool,
    /// Seed for generated data; unseeded when unset
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            driver: DriverConfig::default(),
            wait: WaitOptions::default(),
            highlight: false,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Create new config with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the process environment
    pub fn from_env() -> ProbeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a key lookup, starting from the defaults
    ///
    /// Unset keys keep their default. A set key that does not parse is an
    /// error.
    pub fn from_lookup<F>(lookup: F) -> ProbeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup(env::HEADLESS) {
            config.driver.headless = !mode.trim().eq_ignore_ascii_case("ui");
        }
        if let Some(path) = lookup(env::CHROME_PATH).filter(|p| !p.trim().is_empty()) {
            config.driver.executable_path = Some(path.trim().into());
        }
        if let Some(url) = lookup(env::BASE_URL).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(ms) = parsed::<u64, _>(&lookup, env::WAIT_TIMEOUT_MS)? {
            config.wait.timeout_ms = ms;
        }
        if let Some(ms) = parsed::<u64, _>(&lookup, env::POLL_MS)? {
            if ms == 0 {
                return Err(ProbeError::config(format!(
                    "{}: poll interval must be positive",
                    env::POLL_MS
                )));
            }
            config.wait.poll_interval_ms = ms;
        }
        if let Some(flag) = lookup(env::HIGHLIGHT) {
            config.highlight = parse_flag(env::HIGHLIGHT, &flag)?;
        }
        config.seed = parsed::<u64, _>(&lookup, env::SEED)?;

        Ok(config)
    }

    /// Set the storefront base URL
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set browser launch settings
    #[must_use]
    pub fn with_driver(mut self, driver: DriverConfig) -> Self {
        self.driver = driver;
        self
    }

    /// Set the wait policy
    #[must_use]
    pub const fn with_wait(mut self, wait: WaitOptions) -> Self {
        self.wait = wait;
        self
    }

    /// Enable element highlighting
    #[must_use]
    pub const fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Seed generated data
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Page URLs under the base URL
    #[must_use]
    pub fn urls(&self) -> StoreUrls {
        StoreUrls::new(self.base_url.as_str())
    }
}

fn parsed<T, F>(lookup: &F, key: &str) -> ProbeResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ProbeError::config(format!("{key}: cannot parse '{v}'")))
        })
        .transpose()
}

fn parse_flag(key: &str, value: &str) -> ProbeResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ProbeError::config(format!("{key}: expected a boolean, got '{value}'"))),
    }
}

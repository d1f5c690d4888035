//! One browser session per scenario.
//!
//! A [`Session`] owns the interaction layer, its configuration and the data
//! generator. Page objects are borrowed from it one at a time. Dropping the
//! session closes the browser; [`Session::close`] does the same and reports
//! the error instead of logging it.

use crate::config::SessionConfig;
use crate::data::{DataGenerator, StoreUrls};
use crate::driver::BrowserDriver;
use crate::interaction::Interaction;
use crate::mock::MockDriver;
use crate::pages::{
    CartPage, CheckoutPage, Header, InventoryPage, LoginPage, OrderPage, OverviewPage,
    ProductPage,
};
use crate::result::ProbeResult;
use serde::Serialize;
use std::fmt;

/// Which driver backs a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// In-memory storefront simulation
    #[default]
    Simulated,
    /// Chromium over CDP
    Chromium,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simulated => write!(f, "simulated"),
            Self::Chromium => write!(f, "chromium"),
        }
    }
}

/// A browser session with its page objects
#[derive(Debug)]
pub struct Session {
    ui: Interaction,
    data: DataGenerator,
    config: SessionConfig,
    closed: bool,
}

impl Session {
    /// Wrap an already launched driver
    #[must_use]
    pub fn new(driver: Box<dyn BrowserDriver>, config: SessionConfig) -> Self {
        let ui = Interaction::new(driver, config.urls(), config.wait)
            .with_highlight(config.highlight);
        Self {
            ui,
            data: DataGenerator::from_seed(config.seed),
            config,
            closed: false,
        }
    }

    /// Session against the in-memory storefront
    #[must_use]
    pub fn simulated(config: SessionConfig) -> Self {
        let driver = MockDriver::with_base_url(&config.base_url);
        Self::new(Box::new(driver), config)
    }

    /// Launch Chromium and wrap it
    #[cfg(feature = "browser")]
    pub fn launch(config: SessionConfig) -> ProbeResult<Self> {
        let driver = crate::browser::ChromiumDriver::launch(&config.driver)?;
        Ok(Self::new(Box::new(driver), config))
    }

    /// Start a session on `backend`
    pub fn start(backend: Backend, config: SessionConfig) -> ProbeResult<Self> {
        tracing::debug!(%backend, base_url = %config.base_url, "starting session");
        match backend {
            Backend::Simulated => Ok(Self::simulated(config)),
            #[cfg(feature = "browser")]
            Backend::Chromium => Self::launch(config),
            #[cfg(not(feature = "browser"))]
            Backend::Chromium => Err(crate::result::ProbeError::BrowserLaunch {
                message: "built without the `browser` feature".to_string(),
            }),
        }
    }

    /// Configuration the session was started with
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Page URLs of the storefront under test
    #[must_use]
    pub const fn urls(&self) -> &StoreUrls {
        self.ui.urls()
    }

    /// Interaction layer
    pub fn ui(&mut self) -> &mut Interaction {
        &mut self.ui
    }

    /// Test data generator
    pub fn data(&mut self) -> &mut DataGenerator {
        &mut self.data
    }

    pub fn login_page(&mut self) -> LoginPage<'_> {
        LoginPage::new(&mut self.ui)
    }

    pub fn header(&mut self) -> Header<'_> {
        Header::new(&mut self.ui)
    }

    pub fn inventory_page(&mut self) -> InventoryPage<'_> {
        InventoryPage::new(&mut self.ui, &mut self.data)
    }

    pub fn product_page(&mut self) -> ProductPage<'_> {
        ProductPage::new(&mut self.ui)
    }

    pub fn cart_page(&mut self) -> CartPage<'_> {
        CartPage::new(&mut self.ui)
    }

    pub fn checkout_page(&mut self) -> CheckoutPage<'_> {
        CheckoutPage::new(&mut self.ui)
    }

    pub fn overview_page(&mut self) -> OverviewPage<'_> {
        OverviewPage::new(&mut self.ui)
    }

    pub fn order_page(&mut self) -> OrderPage<'_> {
        OrderPage::new(&mut self.ui)
    }

    /// Close the browser
    pub fn close(mut self) -> ProbeResult<()> {
        self.closed = true;
        self.ui.close()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.ui.close() {
                tracing::warn!(error = %e, "failed to close browser session");
            }
        }
    }
}

/// Run `f` against a fresh session and close it on every exit path
///
/// An error from `f` takes precedence over an error from closing.
pub fn with_session<T, F>(backend: Backend, config: SessionConfig, f: F) -> ProbeResult<T>
where
    F: FnOnce(&mut Session) -> ProbeResult<T>,
{
    let mut session = Session::start(backend, config)?;
    let result = f(&mut session);
    let closed = session.close();
    let value = result?;
    closed?;
    Ok(value)
}

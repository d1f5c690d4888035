//! storefront-probe: page-object end-to-end suite for the Swag Labs demo store
//!
//! The crate models the storefront as page objects over a synchronous
//! browser boundary and ships the scenario catalog that exercises it.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌──────────────┐   ┌──────────────┐
//! │  Scenarios   │──►│ Page objects │──►│ Interaction  │──►│ BrowserDriver│
//! │  + Runner    │   │ (borrowed)   │   │ waits/actions│   │ mock|chromium│
//! └──────────────┘   └──────────────┘   └──────────────┘   └──────────────┘
//! ```
//!
//! Every scenario gets its own [`Session`]. The simulated backend renders the
//! storefront in memory; the `browser` feature adds `ChromiumDriver`.

pub mod assertion;
#[cfg(feature = "browser")]
mod browser;
pub mod config;
mod data;
mod driver;
mod interaction;
mod locator;
pub mod locators;
pub mod logging;
pub mod mock;
pub mod pages;
pub mod pricing;
mod result;
pub mod runner;
pub mod scenarios;
mod session;
mod state;
mod wait;

pub use assertion::{expect_approx, expect_eq, expect_ordered, expect_true, Direction};
#[cfg(feature = "browser")]
pub use browser::ChromiumDriver;
pub use config::SessionConfig;
pub use data::{
    errors, order, titles, users, CheckoutInfo, Credentials, DataGenerator, StoreUrls,
    DEFAULT_BASE_URL, MENU_LINKS,
};
pub use driver::{
    BrowserDriver, DragTarget, DriverConfig, ElementHandle, PointerAction, BASE_BROWSER_ARGS,
};
pub use interaction::Interaction;
pub use locator::{Locator, Strategy};
pub use logging::{LogConfig, LogContext, LogFormat};
pub use mock::MockDriver;
pub use pages::{
    CartPage, CheckoutPage, Header, InventoryPage, LoginPage, OrderPage, OverviewPage, PageObject,
    ProductPage, SortOrder,
};
pub use pricing::{PriceTriple, TAX_RATE};
pub use result::{ProbeError, ProbeResult};
pub use runner::{RunSummary, ScenarioOutcome, ScenarioRunner};
pub use scenarios::{Scenario, Suite};
pub use session::{with_session, Backend, Session};
pub use state::{StoreAction, StoreState};
pub use wait::{
    poll_until, Condition, WaitOptions, DEFAULT_POLL_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS,
};

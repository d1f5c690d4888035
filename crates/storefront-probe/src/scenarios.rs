//! End-to-end scenarios.
//!
//! Each scenario drives one [`Session`] from the login page to the state
//! under test and checks it with [`crate::assertion`]. Scenarios are plain
//! functions grouped by [`Suite`]; [`catalog`] lists all of them for the
//! runner and the CLI.

use crate::assertion::{expect_approx, expect_eq, expect_ordered, expect_true, Direction};
use crate::data::{errors, order, titles, users, CheckoutInfo, Credentials, MENU_LINKS};
use crate::pages::{PageObject, SortOrder};
use crate::pricing::DEFAULT_REL_TOLERANCE;
use crate::result::ProbeResult;
use crate::session::Session;
use serde::Serialize;
use std::fmt;

/// Group of scenarios sharing a starting page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Suite {
    Login,
    Inventory,
    Product,
    Cart,
    Checkout,
    Overview,
    Order,
}

impl Suite {
    /// Every suite, in run order
    pub const ALL: [Self; 7] = [
        Self::Login,
        Self::Inventory,
        Self::Product,
        Self::Cart,
        Self::Checkout,
        Self::Overview,
        Self::Order,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Inventory => "inventory",
            Self::Product => "product",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Overview => "overview",
            Self::Order => "order",
        }
    }

    /// Suite by name, ignoring case
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Suite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Steps = fn(&mut Session, &Credentials) -> ProbeResult<()>;

/// A named end-to-end check
#[derive(Clone, Copy)]
pub struct Scenario {
    /// Suite the scenario belongs to
    pub suite: Suite,
    /// Name, unique within the suite
    pub name: &'static str,
    /// One-line description
    pub summary: &'static str,
    /// Account the scenario logs in with
    pub credentials: Credentials,
    steps: Steps,
}

impl fmt::Debug for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scenario")
            .field("suite", &self.suite)
            .field("name", &self.name)
            .field("username", &self.credentials.username)
            .finish_non_exhaustive()
    }
}

impl Scenario {
    const fn new(
        suite: Suite,
        name: &'static str,
        summary: &'static str,
        credentials: Credentials,
        steps: Steps,
    ) -> Self {
        Self {
            suite,
            name,
            summary,
            credentials,
            steps,
        }
    }

    /// `suite::name`
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}::{}", self.suite, self.name)
    }

    /// Parameters logged at the start of a run; the password is masked
    #[must_use]
    pub fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "username": self.credentials.username,
            "password": "***",
        })
    }

    /// Whether `filter` selects this scenario
    ///
    /// A suite name selects that whole suite. Anything else matches a
    /// scenario name or a substring of the id.
    #[must_use]
    pub fn matches(&self, filter: &str) -> bool {
        let filter = filter.trim().to_ascii_lowercase();
        if let Some(suite) = Suite::parse(&filter) {
            return self.suite == suite;
        }
        filter.is_empty() || self.name == filter || self.id().contains(&filter)
    }

    /// Run the steps against `session`
    pub fn run(&self, session: &mut Session) -> ProbeResult<()> {
        (self.steps)(session, &self.credentials)
    }
}

/// Every scenario, grouped by suite in run order
#[must_use]
pub fn catalog() -> &'static [Scenario] {
    CATALOG
}

/// Scenarios selected by `filter`
#[must_use]
pub fn select(filter: &str) -> Vec<&'static Scenario> {
    CATALOG.iter().filter(|s| s.matches(filter)).collect()
}

const STANDARD: Credentials = users::STANDARD;

const CATALOG: &[Scenario] = &[
    // login
    Scenario::new(
        Suite::Login,
        "invalid_login",
        "unknown account shows an error",
        users::WRONG,
        login::invalid_login,
    ),
    Scenario::new(
        Suite::Login,
        "valid_login",
        "standard user reaches the products page",
        STANDARD,
        login::valid_login,
    ),
    Scenario::new(
        Suite::Login,
        "login_by_locked_user",
        "locked out user is refused",
        users::LOCKED_OUT,
        login::locked_user,
    ),
    Scenario::new(
        Suite::Login,
        "logout",
        "logout returns to the login form",
        STANDARD,
        login::logout,
    ),
    Scenario::new(
        Suite::Login,
        "mandatory_password",
        "empty password is rejected",
        Credentials::new("standard_user", users::EMPTY),
        login::mandatory_password,
    ),
    Scenario::new(
        Suite::Login,
        "mandatory_username",
        "empty username is rejected",
        Credentials::new(users::EMPTY, users::PASSWORD),
        login::mandatory_username,
    ),
    Scenario::new(
        Suite::Login,
        "close_error_message",
        "login error can be dismissed",
        STANDARD,
        login::close_error,
    ),
    // inventory
    Scenario::new(
        Suite::Inventory,
        "check_menu_links",
        "side menu lists its links",
        STANDARD,
        inventory::check_menu_links,
    ),
    Scenario::new(
        Suite::Inventory,
        "purchase_one_item",
        "buy one random product",
        STANDARD,
        inventory::purchase_one_item,
    ),
    Scenario::new(
        Suite::Inventory,
        "purchase_all_item",
        "buy the whole catalog",
        STANDARD,
        inventory::purchase_all_items,
    ),
    Scenario::new(
        Suite::Inventory,
        "add_to_cart",
        "add all then remove all from the listing",
        STANDARD,
        inventory::add_to_cart,
    ),
    Scenario::new(
        Suite::Inventory,
        "sort_a_to_z",
        "sort by name ascending",
        STANDARD,
        inventory::sort_a_to_z,
    ),
    Scenario::new(
        Suite::Inventory,
        "sort_z_to_a",
        "sort by name descending",
        STANDARD,
        inventory::sort_z_to_a,
    ),
    Scenario::new(
        Suite::Inventory,
        "sort_low_to_high",
        "sort by price ascending",
        STANDARD,
        inventory::sort_low_to_high,
    ),
    Scenario::new(
        Suite::Inventory,
        "sort_high_to_low",
        "sort by price descending",
        STANDARD,
        inventory::sort_high_to_low,
    ),
    // product
    Scenario::new(
        Suite::Product,
        "open_product",
        "random product matches the listing",
        STANDARD,
        product::open_product,
    ),
    Scenario::new(
        Suite::Product,
        "add_product_to_cart",
        "product page adds to the cart",
        STANDARD,
        product::add_product_to_cart,
    ),
    Scenario::new(
        Suite::Product,
        "remove_product_from_cart",
        "product page removes from the cart",
        STANDARD,
        product::remove_product_from_cart,
    ),
    Scenario::new(
        Suite::Product,
        "back_to_products",
        "back button returns to the listing",
        STANDARD,
        product::back_to_products,
    ),
    // cart
    Scenario::new(Suite::Cart, "open_cart", "cart icon opens the cart", STANDARD, cart::open_cart),
    Scenario::new(
        Suite::Cart,
        "click_continue_shopping",
        "continue shopping returns to the listing",
        STANDARD,
        cart::continue_shopping,
    ),
    Scenario::new(
        Suite::Cart,
        "remove_all_from_cart",
        "emptying the cart removes the badge",
        STANDARD,
        cart::remove_all,
    ),
    // checkout
    Scenario::new(
        Suite::Checkout,
        "open_checkout",
        "cart checkout opens the form",
        STANDARD,
        checkout::open_checkout,
    ),
    Scenario::new(
        Suite::Checkout,
        "cancel_checkout",
        "cancel returns to the cart",
        STANDARD,
        checkout::cancel_checkout,
    ),
    Scenario::new(
        Suite::Checkout,
        "fill_checkout",
        "filled form reaches the overview",
        STANDARD,
        checkout::fill_checkout,
    ),
    Scenario::new(
        Suite::Checkout,
        "mandatory_first_name",
        "first name is required",
        STANDARD,
        checkout::mandatory_first_name,
    ),
    Scenario::new(
        Suite::Checkout,
        "mandatory_last_name",
        "last name is required",
        STANDARD,
        checkout::mandatory_last_name,
    ),
    Scenario::new(
        Suite::Checkout,
        "mandatory_zip_code",
        "zip code is required",
        STANDARD,
        checkout::mandatory_zip_code,
    ),
    Scenario::new(
        Suite::Checkout,
        "close_error_message",
        "checkout error can be dismissed",
        STANDARD,
        checkout::close_error,
    ),
    // overview
    Scenario::new(
        Suite::Overview,
        "open_overview",
        "continue opens the overview",
        STANDARD,
        overview::open_overview,
    ),
    Scenario::new(
        Suite::Overview,
        "cancel_overview",
        "cancel returns to the listing",
        STANDARD,
        overview::cancel_overview,
    ),
    Scenario::new(
        Suite::Overview,
        "finish_overview",
        "finish confirms the order",
        STANDARD,
        overview::finish_overview,
    ),
    // order
    Scenario::new(
        Suite::Order,
        "open_order",
        "random product order end to end",
        STANDARD,
        order_suite::open_order,
    ),
    Scenario::new(
        Suite::Order,
        "back_from_order",
        "back home returns to the listing",
        STANDARD,
        order_suite::back_from_order,
    ),
];

// =============================================================================
// SHARED STEPS
// =============================================================================

fn log_in(s: &mut Session, credentials: &Credentials) -> ProbeResult<()> {
    let mut page = s.login_page();
    page.open()?;
    page.login_as(credentials)
}

/// Title and URL of the page the browser shows
fn expect_location(s: &mut Session, title: &str, url: &str) -> ProbeResult<()> {
    let actual_title = s.header().title()?;
    expect_eq("page title", title, actual_title.as_str())?;
    let actual_url = s.ui().current_url()?;
    expect_eq("page url", url, actual_url.as_str())
}

/// Log in, open the cart and press checkout
fn to_checkout(s: &mut Session, credentials: &Credentials) -> ProbeResult<()> {
    log_in(s, credentials)?;
    s.header().open_cart()?;
    s.cart_page().checkout()
}

/// Fill the checkout form with generated data and continue
fn to_overview(s: &mut Session) -> ProbeResult<CheckoutInfo> {
    let info = s.data().checkout_info();
    let mut page = s.checkout_page();
    page.fill_form(&info)?;
    page.click_continue()?;
    Ok(info)
}

/// Cart triple, then checkout, then both overview checks, then finish
fn reconcile_and_finish(s: &mut Session) -> ProbeResult<()> {
    let cart_triple = s.cart_page().price_triple()?;
    s.cart_page().checkout()?;
    to_overview(s)?;

    let observed = s.overview_page().observed_triple()?;
    let computed = s.overview_page().computed_triple()?;
    expect_approx(
        "cart prices match overview prices",
        &cart_triple.sorted(),
        &observed.sorted(),
        DEFAULT_REL_TOLERANCE,
    )?;
    expect_approx(
        "overview calc prices match total prices",
        &computed.sorted(),
        &observed.sorted(),
        DEFAULT_REL_TOLERANCE,
    )?;

    s.overview_page().finish()?;
    s.header().badge_absent()
}

// =============================================================================
// SUITES
// =============================================================================

mod login {
    use super::*;

    fn rejected(s: &mut Session, credentials: &Credentials, message: &str) -> ProbeResult<()> {
        log_in(s, credentials)?;
        let actual = s.login_page().error_message()?;
        expect_eq("login error", message, actual.as_str())
    }

    pub(super) fn invalid_login(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        rejected(s, c, errors::WRONG_LOGIN)
    }

    pub(super) fn valid_login(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        let url = s.ui().current_url()?;
        let expected = s.urls().products();
        expect_eq("url after login", expected.as_str(), url.as_str())
    }

    pub(super) fn locked_user(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        rejected(s, c, errors::LOCKED_LOGIN)
    }

    pub(super) fn logout(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.header().logout()?;
        s.login_page().wait_for_form()?;
        let url = s.ui().current_url()?;
        let expected = s.urls().login();
        expect_eq("url after logout", expected.as_str(), url.as_str())
    }

    /// The form is submitted once by `login` and once more by hand
    fn mandatory(s: &mut Session, c: &Credentials, message: &str) -> ProbeResult<()> {
        log_in(s, c)?;
        s.login_page().click_login()?;
        let actual = s.login_page().error_message()?;
        expect_eq("login error", message, actual.as_str())
    }

    pub(super) fn mandatory_password(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        mandatory(s, c, errors::MANDATORY_PASSWORD)
    }

    pub(super) fn mandatory_username(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        mandatory(s, c, errors::MANDATORY_USERNAME)
    }

    pub(super) fn close_error(s: &mut Session, _: &Credentials) -> ProbeResult<()> {
        let mut page = s.login_page();
        page.open()?;
        page.click_login()?;
        page.error_message()?;
        page.close_error()?;
        page.error_absent()
    }
}

mod inventory {
    use super::*;

    pub(super) fn check_menu_links(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        let links = s.header().menu_links()?;
        let labels: Vec<&str> = links.iter().map(String::as_str).collect();
        expect_eq("menu links", &MENU_LINKS[..], &labels[..])
    }

    pub(super) fn purchase_one_item(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().open_random_product()?;
        let price = s.product_page().price()?;
        s.product_page().add_to_cart()?;
        s.header().open_cart()?;
        let cart_prices = s.cart_page().prices()?;
        expect_true(
            "product price is in the cart",
            cart_prices.iter().any(|p| crate::pricing::approx_eq(*p, price, DEFAULT_REL_TOLERANCE)),
        )?;
        reconcile_and_finish(s)
    }

    pub(super) fn purchase_all_items(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        let names = s.inventory_page().names()?;
        let prices = s.inventory_page().prices()?;
        expect_true("products are listed", !names.is_empty())?;

        s.inventory_page().add_all()?;
        s.header().open_cart()?;
        let cart_names = s.cart_page().names()?;
        let cart_prices = s.cart_page().prices()?;
        expect_eq("product names match cart item names", &names, &cart_names)?;
        expect_approx(
            "product prices match cart item prices",
            &prices,
            &cart_prices,
            DEFAULT_REL_TOLERANCE,
        )?;
        reconcile_and_finish(s)
    }

    pub(super) fn add_to_cart(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().add_all()?;
        let products = s.inventory_page().product_count()?;
        let badge = s.header().cart_count()?;
        expect_eq("cart count", &products, &badge)?;
        s.inventory_page().remove_all()?;
        s.header().badge_absent()
    }

    fn sorted_names(
        s: &mut Session,
        c: &Credentials,
        order: SortOrder,
        direction: Direction,
    ) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().sort(order)?;
        let names = s.inventory_page().names()?;
        expect_ordered("product names", &names, direction)
    }

    fn sorted_prices(
        s: &mut Session,
        c: &Credentials,
        order: SortOrder,
        direction: Direction,
    ) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().sort(order)?;
        let prices = s.inventory_page().prices()?;
        expect_ordered("product prices", &prices, direction)
    }

    pub(super) fn sort_a_to_z(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        sorted_names(s, c, SortOrder::NameAsc, Direction::Ascending)
    }

    pub(super) fn sort_z_to_a(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        sorted_names(s, c, SortOrder::NameDesc, Direction::Descending)
    }

    pub(super) fn sort_low_to_high(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        sorted_prices(s, c, SortOrder::PriceAsc, Direction::Ascending)
    }

    pub(super) fn sort_high_to_low(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        sorted_prices(s, c, SortOrder::PriceDesc, Direction::Descending)
    }
}

mod product {
    use super::*;

    pub(super) fn open_product(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        let names = s.inventory_page().names()?;
        let prices = s.inventory_page().prices()?;
        s.inventory_page().open_random_product()?;
        let name = s.product_page().name()?;
        let price = s.product_page().price()?;
        expect_true("product name is listed", names.contains(&name))?;
        expect_true("product price is listed", prices.contains(&price))
    }

    pub(super) fn add_product_to_cart(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().open_random_product()?;
        let name = s.product_page().name()?;
        let price = s.product_page().price()?;
        s.product_page().add_to_cart()?;
        s.header().open_cart()?;
        let count = s.cart_page().item_count()?;
        expect_eq("cart item count", &1, &count)?;
        let names = s.cart_page().names()?;
        let prices = s.cart_page().prices()?;
        expect_true("product name is in the cart", names.contains(&name))?;
        expect_true("product price is in the cart", prices.contains(&price))
    }

    pub(super) fn remove_product_from_cart(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().open_random_product()?;
        s.product_page().add_to_cart()?;
        let badge = s.header().cart_count()?;
        expect_eq("cart badge", &1, &badge)?;
        s.product_page().remove_from_cart()?;
        s.header().open_cart()?;
        s.cart_page().wait_until_empty()?;
        s.header().badge_absent()
    }

    pub(super) fn back_to_products(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().open_random_product()?;
        s.product_page().back_to_products()?;
        let url = s.urls().products();
        expect_location(s, titles::PRODUCTS, &url)
    }
}

mod cart {
    use super::*;

    pub(super) fn open_cart(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.header().open_cart()?;
        let url = s.urls().cart();
        expect_location(s, titles::CART, &url)
    }

    pub(super) fn continue_shopping(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.header().open_cart()?;
        s.cart_page().continue_shopping()?;
        let url = s.urls().products();
        expect_location(s, titles::PRODUCTS, &url)
    }

    pub(super) fn remove_all(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().add_all()?;
        let products = s.inventory_page().product_count()?;
        let badge = s.header().cart_count()?;
        expect_eq("cart count", &products, &badge)?;
        s.header().open_cart()?;
        s.cart_page().remove_all()?;
        s.cart_page().wait_until_empty()?;
        s.header().badge_absent()
    }
}

mod checkout {
    use super::*;

    pub(super) fn open_checkout(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        to_checkout(s, c)?;
        let url = s.urls().checkout();
        expect_location(s, titles::CHECKOUT, &url)
    }

    pub(super) fn cancel_checkout(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        to_checkout(s, c)?;
        s.checkout_page().cancel()?;
        let url = s.urls().cart();
        expect_location(s, titles::CART, &url)
    }

    pub(super) fn fill_checkout(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        to_checkout(s, c)?;
        s.checkout_page().wait_for_form()?;
        let info = s.data().checkout_info();
        s.checkout_page().fill_form(&info)?;
        let values = s.checkout_page().form_values()?;
        expect_eq("checkout form values", &info, &values)?;
        s.checkout_page().click_continue()?;
        let url = s.urls().overview();
        expect_location(s, titles::OVERVIEW, &url)
    }

    /// Fill every field except one, continue, read the error
    fn missing(s: &mut Session, c: &Credentials, skip: Field, message: &str) -> ProbeResult<()> {
        to_checkout(s, c)?;
        let info = s.data().checkout_info();
        let mut page = s.checkout_page();
        if skip != Field::FirstName {
            page.enter_first_name(&info.first_name)?;
        }
        if skip != Field::LastName {
            page.enter_last_name(&info.last_name)?;
        }
        if skip != Field::ZipCode {
            page.enter_zip_code(&info.zip_code)?;
        }
        page.click_continue()?;
        let actual = page.error_message()?;
        expect_eq("checkout error", message, actual.as_str())
    }

    #[derive(PartialEq, Eq)]
    enum Field {
        FirstName,
        LastName,
        ZipCode,
    }

    pub(super) fn mandatory_first_name(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        missing(s, c, Field::FirstName, errors::MANDATORY_FIRST_NAME)
    }

    pub(super) fn mandatory_last_name(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        missing(s, c, Field::LastName, errors::MANDATORY_LAST_NAME)
    }

    pub(super) fn mandatory_zip_code(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        missing(s, c, Field::ZipCode, errors::MANDATORY_ZIP)
    }

    pub(super) fn close_error(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        to_checkout(s, c)?;
        let mut page = s.checkout_page();
        page.click_continue()?;
        page.error_message()?;
        page.close_error()?;
        page.error_absent()
    }
}

mod overview {
    use super::*;

    pub(super) fn open_overview(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        to_checkout(s, c)?;
        to_overview(s)?;
        expect_true("overview is shown", s.overview_page().is_loaded()?)?;
        let url = s.urls().overview();
        expect_location(s, titles::OVERVIEW, &url)
    }

    pub(super) fn cancel_overview(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        to_checkout(s, c)?;
        to_overview(s)?;
        s.overview_page().cancel()?;
        let url = s.urls().products();
        expect_location(s, titles::PRODUCTS, &url)
    }

    pub(super) fn finish_overview(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        to_checkout(s, c)?;
        to_overview(s)?;
        s.overview_page().finish()?;
        let url = s.urls().order();
        expect_location(s, titles::ORDER, &url)
    }
}

mod order_suite {
    use super::*;

    /// Random product through checkout to the confirmation page
    fn place_order(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        log_in(s, c)?;
        s.inventory_page().open_random_product()?;
        s.product_page().add_to_cart()?;
        s.header().open_cart()?;
        s.cart_page().checkout()?;
        to_overview(s)?;
        s.overview_page().finish()
    }

    pub(super) fn open_order(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        place_order(s, c)?;
        s.header().badge_absent()?;
        let url = s.urls().order();
        expect_location(s, titles::ORDER, &url)?;
        let subtitle = s.order_page().subtitle()?;
        expect_eq("order subtitle", order::SUBTITLE, subtitle.as_str())?;
        let text = s.order_page().text()?;
        expect_eq("order text", order::TEXT, text.as_str())
    }

    pub(super) fn back_from_order(s: &mut Session, c: &Credentials) -> ProbeResult<()> {
        place_order(s, c)?;
        s.order_page().back_to_products()?;
        let url = s.urls().products();
        expect_location(s, titles::PRODUCTS, &url)
    }
}

//! Scenario catalog against the simulated storefront.
//!
//! Every scenario runs in its own session exactly as the CLI would run it.
//! The parametrized cases below repeat the login and checkout rejections with
//! their expected banners.

use proptest::prelude::*;
use rstest::rstest;
use storefront_probe::{
    errors, scenarios, users, with_session, Backend, Credentials, Direction, MockDriver,
    ProbeResult, ScenarioRunner, Session, SessionConfig, SortOrder, Suite, WaitOptions,
};

fn config() -> SessionConfig {
    SessionConfig::new().with_wait(WaitOptions::new().with_timeout(250).with_poll_interval(5))
}

fn session() -> Session {
    Session::simulated(config())
}

fn logged_in() -> Session {
    let mut s = session();
    s.login_page().open().unwrap();
    s.login_page().login_as(&users::STANDARD).unwrap();
    s
}

// =============================================================================
// CATALOG
// =============================================================================

#[rstest]
#[case::login(Suite::Login, 7)]
#[case::inventory(Suite::Inventory, 8)]
#[case::product(Suite::Product, 4)]
#[case::cart(Suite::Cart, 3)]
#[case::checkout(Suite::Checkout, 7)]
#[case::overview(Suite::Overview, 3)]
#[case::order(Suite::Order, 2)]
fn suite_passes_on_simulator(#[case] suite: Suite, #[case] expected: usize) {
    let summary = ScenarioRunner::new(Backend::Simulated, config())
        .with_filter(suite.as_str())
        .run();
    assert_eq!(summary.total(), expected);
    assert!(summary.all_passed(), "failures: {:#?}", summary.failures());
}

#[test]
fn whole_catalog_passes_with_seed() {
    let summary = ScenarioRunner::new(Backend::Simulated, config().with_seed(Some(2024))).run();
    assert_eq!(summary.total(), scenarios::catalog().len());
    assert_eq!(summary.failed_count(), 0, "{:#?}", summary.failures());
}

#[test]
fn fail_fast_without_failures_runs_everything() {
    let summary = ScenarioRunner::new(Backend::Simulated, config())
        .with_filter("order")
        .with_fail_fast(true)
        .run();
    assert_eq!(summary.total(), 2);
    assert_eq!(summary.skipped, 0);
}

// =============================================================================
// LOGIN
// =============================================================================

#[rstest]
#[case::wrong_user(users::WRONG, errors::WRONG_LOGIN)]
#[case::locked_out(users::LOCKED_OUT, errors::LOCKED_LOGIN)]
#[case::no_password(Credentials::new("standard_user", ""), errors::MANDATORY_PASSWORD)]
#[case::no_username(Credentials::new("", "secret_sauce"), errors::MANDATORY_USERNAME)]
fn login_is_rejected(#[case] credentials: Credentials, #[case] banner: &str) {
    let mut s = session();
    s.login_page().open().unwrap();
    s.login_page().login_as(&credentials).unwrap();
    assert_eq!(s.login_page().error_message().unwrap(), banner);
    assert_eq!(s.ui().current_url().unwrap(), s.urls().login());
}

#[rstest]
#[case("problem_user")]
#[case("performance_glitch_user")]
#[case("error_user")]
#[case("visual_user")]
fn accepted_accounts_reach_products(#[case] username: &'static str) {
    let mut s = session();
    s.login_page().open().unwrap();
    s.login_page().login(username, users::PASSWORD).unwrap();
    assert_eq!(s.header().title().unwrap(), "Products");
}

#[test]
fn logout_keeps_the_cart() {
    let mut s = logged_in();
    s.inventory_page().add_product("Sauce Labs Onesie").unwrap();
    s.header().logout().unwrap();
    s.login_page().wait_for_form().unwrap();
    s.login_page().login_as(&users::STANDARD).unwrap();
    assert_eq!(s.header().cart_count().unwrap(), 1);
}

// =============================================================================
// INVENTORY AND CART
// =============================================================================

#[rstest]
#[case(SortOrder::NameAsc, Direction::Ascending)]
#[case(SortOrder::NameDesc, Direction::Descending)]
fn names_follow_sort(#[case] order: SortOrder, #[case] direction: Direction) {
    let mut s = logged_in();
    s.inventory_page().sort(order).unwrap();
    let names = s.inventory_page().names().unwrap();
    storefront_probe::expect_ordered("names", &names, direction).unwrap();
}

#[rstest]
#[case(SortOrder::PriceAsc, Direction::Ascending)]
#[case(SortOrder::PriceDesc, Direction::Descending)]
fn prices_follow_sort(#[case] order: SortOrder, #[case] direction: Direction) {
    let mut s = logged_in();
    s.inventory_page().sort(order).unwrap();
    let prices = s.inventory_page().prices().unwrap();
    storefront_probe::expect_ordered("prices", &prices, direction).unwrap();
}

#[test]
fn sort_waits_for_a_visible_dropdown() {
    let driver = MockDriver::new().hide(&storefront_probe::locators::inventory::SORT_MENU);
    let mut s = Session::new(Box::new(driver), config());
    s.login_page().open().unwrap();
    s.login_page().login_as(&users::STANDARD).unwrap();
    let err = s.inventory_page().sort(SortOrder::PriceDesc).unwrap_err();
    assert!(err.is_timeout(), "{err}");
}

#[test]
fn cart_keeps_listing_order() {
    let mut s = logged_in();
    s.inventory_page().add_product("Sauce Labs Onesie").unwrap();
    s.inventory_page().add_product("Sauce Labs Backpack").unwrap();
    s.header().open_cart().unwrap();
    assert_eq!(
        s.cart_page().names().unwrap(),
        vec!["Sauce Labs Onesie", "Sauce Labs Backpack"]
    );
}

#[test]
fn empty_cart_counts_zero() {
    let mut s = logged_in();
    s.header().open_cart().unwrap();
    assert_eq!(s.cart_page().item_count().unwrap(), 0);
    s.header().badge_absent().unwrap();
}

#[test]
fn adding_twice_is_a_mismatch() {
    let mut s = logged_in();
    s.inventory_page().add_product("Sauce Labs Bike Light").unwrap();
    let err = s.inventory_page().add_product("Sauce Labs Bike Light").unwrap_err();
    assert!(err.to_string().contains("Add to cart"), "{err}");
}

// =============================================================================
// CHECKOUT
// =============================================================================

#[rstest]
#[case::first_name("", "Doe", "10001", errors::MANDATORY_FIRST_NAME)]
#[case::last_name("Jane", "", "10001", errors::MANDATORY_LAST_NAME)]
#[case::zip_code("Jane", "Doe", "", errors::MANDATORY_ZIP)]
fn checkout_field_is_required(
    #[case] first: &str,
    #[case] last: &str,
    #[case] zip: &str,
    #[case] banner: &str,
) {
    let mut s = logged_in();
    s.header().open_cart().unwrap();
    s.cart_page().checkout().unwrap();
    let mut page = s.checkout_page();
    page.enter_first_name(first).unwrap();
    page.enter_last_name(last).unwrap();
    page.enter_zip_code(zip).unwrap();
    page.click_continue().unwrap();
    assert_eq!(page.error_message().unwrap(), banner);
}

#[test]
fn order_totals_reconcile() {
    let mut s = logged_in();
    s.inventory_page().add_all().unwrap();
    s.header().open_cart().unwrap();
    let cart = s.cart_page().price_triple().unwrap();
    s.cart_page().checkout().unwrap();
    let info = s.data().checkout_info();
    s.checkout_page().fill_form(&info).unwrap();
    s.checkout_page().click_continue().unwrap();
    let observed = s.overview_page().observed_triple().unwrap();
    assert!(cart.approx_eq(&observed, 1e-9), "{cart:?} vs {observed:?}");
    assert!(observed.holds_invariant());
    assert_eq!(observed.total, 140.34);
}

#[test]
fn with_session_closes_on_error() {
    let result: ProbeResult<()> = with_session(Backend::Simulated, config(), |s| {
        s.login_page().open()?;
        s.cart_page().checkout()
    });
    assert!(result.unwrap_err().is_timeout());
}

#[test]
fn stale_handle_after_navigation() {
    let mut s = logged_in();
    let button = s
        .ui()
        .element_visible(&storefront_probe::locators::header::CART_LINK)
        .unwrap();
    s.header().open_cart().unwrap();
    s.cart_page().continue_shopping().unwrap();
    s.header().logout().unwrap();
    let err = s.ui().click_element(&button).unwrap_err();
    assert!(err.is_stale(), "{err}");
}

#[test]
fn custom_driver_session() {
    let driver = MockDriver::with_base_url("http://shop.local:8080");
    let mut s = Session::new(
        Box::new(driver),
        config().with_base_url("http://shop.local:8080"),
    );
    s.login_page().open().unwrap();
    s.login_page().login_as(&users::STANDARD).unwrap();
    assert_eq!(
        s.ui().current_url().unwrap(),
        "http://shop.local:8080/inventory.html"
    );
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn seeded_random_product_is_reproducible(seed in any::<u64>()) {
        let pick = |seed| {
            let mut s = Session::simulated(config().with_seed(Some(seed)));
            s.login_page().open().unwrap();
            s.login_page().login_as(&users::STANDARD).unwrap();
            s.inventory_page().open_random_product().unwrap()
        };
        prop_assert_eq!(pick(seed), pick(seed));
    }

    #[test]
    fn any_subset_reconciles(mask in 1u8..64) {
        let mut s = logged_in();
        let names = s.inventory_page().names().unwrap();
        for (i, name) in names.iter().enumerate() {
            if mask & (1 << i) != 0 {
                s.inventory_page().add_product(name).unwrap();
            }
        }
        s.header().open_cart().unwrap();
        prop_assert_eq!(s.cart_page().item_count().unwrap(), mask.count_ones() as usize);
        let cart = s.cart_page().price_triple().unwrap();
        prop_assert!(cart.holds_invariant());
    }
}

//! In-memory storefront simulator.
//!
//! [`MockDriver`] implements [`BrowserDriver`] without a browser. It keeps the
//! storefront state (session, cart, sort order, form fields, error banner)
//! and renders elements per locator name from that state, so the page objects
//! and scenarios run unchanged against it.
//!
//! Node ids have the form `<locator name>:<key>`, where the key is the product
//! id for per-product elements and `0` for singletons. A node id that no
//! longer renders is stale.

use crate::data::{self, errors, titles, users, StoreUrls};
use crate::driver::{BrowserDriver, DragTarget, ElementHandle, PointerAction};
use crate::locator::Locator;
use crate::pages::SortOrder;
use crate::result::{ProbeError, ProbeResult};
use crate::state::{StoreAction, StoreState};
use std::collections::{HashMap, HashSet, VecDeque};

// =============================================================================
// CATALOG
// =============================================================================

/// A product of the demo catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Product {
    /// Storefront product id
    pub id: u32,
    /// Display name
    pub name: &'static str,
    /// Description text
    pub description: &'static str,
    /// Price in cents
    pub price_cents: u32,
    /// Slug used in `data-test` attributes
    pub slug: &'static str,
}

impl Product {
    /// Price rendered the way the storefront does, `$29.99`
    #[must_use]
    pub fn price_label(&self) -> String {
        format!("${}", format_cents(self.price_cents))
    }
}

/// The six products of the demo storefront, in default (A to Z) order
pub const CATALOG: [Product; 6] = [
    Product {
        id: 4,
        name: "Sauce Labs Backpack",
        description: "carry.allTheThings() with the sleek, streamlined Sly Pack that melds uncompromising style with unequaled laptop and tablet protection.",
        price_cents: 2999,
        slug: "sauce-labs-backpack",
    },
    Product {
        id: 0,
        name: "Sauce Labs Bike Light",
        description: "A red light isn't the desired state in testing but it sure helps when riding your bike at night. Water-resistant with 3 lighting modes, 1 AAA battery included.",
        price_cents: 999,
        slug: "sauce-labs-bike-light",
    },
    Product {
        id: 1,
        name: "Sauce Labs Bolt T-Shirt",
        description: "Get your testing superhero on with the Sauce Labs bolt T-shirt. From American Apparel, 100% ringspun combed cotton, heather gray with red bolt.",
        price_cents: 1599,
        slug: "sauce-labs-bolt-t-shirt",
    },
    Product {
        id: 5,
        name: "Sauce Labs Fleece Jacket",
        description: "It's not every day that you come across a midweight quarter-zip fleece jacket capable of handling everything from a relaxing day outdoors to a busy day at the office.",
        price_cents: 4999,
        slug: "sauce-labs-fleece-jacket",
    },
    Product {
        id: 2,
        name: "Sauce Labs Onesie",
        description: "Rib snap infant onesie for the junior automation engineer in development. Reinforced 3-snap bottom closure, two-needle hemmed sleeved and bottom won't unravel.",
        price_cents: 799,
        slug: "sauce-labs-onesie",
    },
    Product {
        id: 3,
        name: "Test.allTheThings() T-Shirt (Red)",
        description: "This classic Sauce Labs t-shirt is perfect to wear when cheering on your team. Super-soft and comfy ringspun combed cotton.",
        price_cents: 1599,
        slug: "test.allthethings()-t-shirt-(red)",
    },
];

/// Catalog entry by product id
#[must_use]
pub fn product(id: u32) -> Option<&'static Product> {
    CATALOG.iter().find(|p| p.id == id)
}

/// Render cents as `12.34`
fn format_cents(cents: u32) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// 8% tax on a cent amount, rounded half up to the cent
const fn tax_cents(subtotal_cents: u32) -> u32 {
    (subtotal_cents * 8 + 50) / 100
}

/// Order the listing the way the sort dropdown does
fn sort_listing(order: SortOrder, products: &mut [Product]) {
    match order {
        SortOrder::NameAsc => products.sort_by(|a, b| a.name.cmp(b.name)),
        SortOrder::NameDesc => products.sort_by(|a, b| b.name.cmp(a.name)),
        SortOrder::PriceAsc => products.sort_by_key(|p| p.price_cents),
        SortOrder::PriceDesc => products.sort_by(|a, b| b.price_cents.cmp(&a.price_cents)),
    }
}

// =============================================================================
// STOREFRONT STATE
// =============================================================================

#[derive(Debug, Clone, Default)]
struct LoginForm {
    username: String,
    password: String,
}

#[derive(Debug, Clone, Default)]
struct CheckoutForm {
    first_name: String,
    last_name: String,
    zip_code: String,
}

/// A rendered element
#[derive(Debug, Clone)]
struct Node {
    key: String,
    tag: &'static str,
    text: String,
    displayed: bool,
    attrs: Vec<(&'static str, String)>,
}

impl Node {
    fn new(key: impl ToString, tag: &'static str, text: impl Into<String>) -> Self {
        Self {
            key: key.to_string(),
            tag,
            text: text.into(),
            displayed: true,
            attrs: Vec::new(),
        }
    }

    fn single(tag: &'static str, text: impl Into<String>) -> Vec<Self> {
        vec![Self::new(0, tag, text)]
    }

    fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attrs.push((name, value.into()));
        self
    }

    const fn displayed(mut self, displayed: bool) -> Self {
        self.displayed = displayed;
        self
    }
}

#[derive(Debug, Clone)]
struct Storefront {
    urls: StoreUrls,
    page: StoreState,
    user: Option<String>,
    product: Option<u32>,
    cart: Vec<u32>,
    sort: SortOrder,
    menu_open: bool,
    login: LoginForm,
    checkout: CheckoutForm,
    error: Option<String>,
}

impl Storefront {
    fn new(urls: StoreUrls) -> Self {
        Self {
            urls,
            page: StoreState::LoggedOut,
            user: None,
            product: None,
            cart: Vec::new(),
            sort: SortOrder::default(),
            menu_open: false,
            login: LoginForm::default(),
            checkout: CheckoutForm::default(),
            error: None,
        }
    }

    fn url(&self) -> String {
        match (self.page, self.product) {
            (StoreState::Product, Some(id)) => self.urls.product(id),
            (page, _) => self.urls.page(page),
        }
    }

    fn go(&mut self, page: StoreState) {
        self.page = page;
        self.menu_open = false;
        self.error = None;
        if page != StoreState::Product {
            self.product = None;
        }
        if page == StoreState::Checkout {
            self.checkout = CheckoutForm::default();
        }
    }

    /// Move along the navigation table; actions not offered on this page
    /// leave it unchanged
    fn apply(&mut self, action: StoreAction) -> bool {
        match self.page.next(action) {
            Some(page) => {
                self.go(page);
                true
            }
            None => {
                tracing::debug!(page = %self.page, ?action, "action not available");
                false
            }
        }
    }

    fn listing(&self) -> Vec<Product> {
        let mut products = CATALOG.to_vec();
        sort_listing(self.sort, &mut products);
        products
    }

    fn cart_products(&self) -> Vec<&'static Product> {
        self.cart.iter().filter_map(|id| product(*id)).collect()
    }

    fn in_cart(&self, id: u32) -> bool {
        self.cart.contains(&id)
    }

    fn add(&mut self, id: u32) {
        if !self.in_cart(id) {
            self.cart.push(id);
        }
    }

    fn remove(&mut self, id: u32) {
        self.cart.retain(|c| *c != id);
    }

    fn subtotal_cents(&self) -> u32 {
        self.cart_products().iter().map(|p| p.price_cents).sum()
    }

    fn title(&self) -> Option<&'static str> {
        match self.page {
            StoreState::Inventory => Some(titles::PRODUCTS),
            StoreState::Cart => Some(titles::CART),
            StoreState::Checkout => Some(titles::CHECKOUT),
            StoreState::Overview => Some(titles::OVERVIEW),
            StoreState::OrderComplete => Some(titles::ORDER),
            StoreState::LoggedOut | StoreState::Product => None,
        }
    }

    fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        let page = StoreState::from_url(url).ok_or_else(|| ProbeError::Navigation {
            url: url.to_string(),
            message: "no such page".to_string(),
        })?;

        if page == StoreState::LoggedOut {
            self.user = None;
            self.login = LoginForm::default();
            self.go(page);
            return Ok(());
        }
        if self.user.is_none() {
            self.go(StoreState::LoggedOut);
            self.error = Some(errors::login_required(page.path()));
            return Ok(());
        }
        if page == StoreState::Product {
            let id = query_id(url)
                .and_then(product)
                .map(|p| p.id)
                .ok_or_else(|| ProbeError::Navigation {
                    url: url.to_string(),
                    message: "unknown product".to_string(),
                })?;
            self.go(page);
            self.product = Some(id);
            return Ok(());
        }
        self.go(page);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    fn render(&self, name: &str) -> Vec<Node> {
        let (group, _) = name.split_once('.').unwrap_or((name, ""));
        match (group, self.page) {
            ("login", StoreState::LoggedOut) => self.render_login(name),
            ("header", page) if page.has_header() => self.render_header(name),
            ("inventory", StoreState::Inventory) => self.render_inventory(name),
            ("product", StoreState::Product) => self.render_product(name),
            ("cart", StoreState::Cart | StoreState::Overview) => self.render_cart(name),
            ("checkout", StoreState::Checkout) => self.render_checkout(name),
            ("overview", StoreState::Overview) => self.render_overview(name),
            ("order", StoreState::OrderComplete) => self.render_order(name),
            _ => Vec::new(),
        }
    }

    fn render_login(&self, name: &str) -> Vec<Node> {
        match name {
            "login.username" => vec![Node::new(0, "input", "").attr("value", &self.login.username)],
            "login.password" => vec![Node::new(0, "input", "").attr("value", &self.login.password)],
            "login.button" => vec![Node::new(0, "input", "").attr("value", "Login")],
            "login.error" => self.render_error(),
            "login.error_close" => self.render_error_close(),
            _ => Vec::new(),
        }
    }

    fn render_error(&self) -> Vec<Node> {
        self.error
            .iter()
            .map(|e| Node::new(0, "h3", e.as_str()).attr("data-test", "error"))
            .collect()
    }

    fn render_error_close(&self) -> Vec<Node> {
        self.error
            .iter()
            .map(|_| Node::new(0, "button", "").attr("class", "error-button"))
            .collect()
    }

    fn render_header(&self, name: &str) -> Vec<Node> {
        let menu_item = |key: usize, label: &str, id: &str| {
            Node::new(key, "a", label)
                .attr("id", id)
                .displayed(self.menu_open)
        };
        match name {
            "header.title" => self.title().map(|t| Node::single("span", t)).unwrap_or_default(),
            "header.menu_button" => Node::single("button", "Open Menu"),
            "header.menu_links" => {
                let ids = [
                    "inventory_sidebar_link",
                    "about_sidebar_link",
                    "logout_sidebar_link",
                    "reset_sidebar_link",
                ];
                data::MENU_LINKS
                    .iter()
                    .zip(ids)
                    .enumerate()
                    .map(|(i, (label, id))| menu_item(i, *label, id))
                    .collect()
            }
            "header.all_items" => vec![menu_item(0, data::MENU_LINKS[0], "inventory_sidebar_link")],
            "header.logout" => vec![menu_item(0, data::MENU_LINKS[2], "logout_sidebar_link")],
            "header.reset" => vec![menu_item(0, data::MENU_LINKS[3], "reset_sidebar_link")],
            "header.cart_link" => {
                vec![Node::new(0, "a", self.badge_text()).attr("class", "shopping_cart_link")]
            }
            "header.cart_badge" => {
                if self.cart.is_empty() {
                    Vec::new()
                } else {
                    Node::single("span", self.badge_text())
                }
            }
            _ => Vec::new(),
        }
    }

    fn badge_text(&self) -> String {
        if self.cart.is_empty() {
            String::new()
        } else {
            self.cart.len().to_string()
        }
    }

    fn render_inventory(&self, name: &str) -> Vec<Node> {
        let listing = self.listing();
        let per_product = |f: &dyn Fn(&Product) -> Option<Node>| -> Vec<Node> {
            listing.iter().filter_map(f).collect()
        };
        match name {
            "inventory.item" => per_product(&|p| Some(Node::new(p.id, "div", p.name))),
            "inventory.item_link" => per_product(&|p| {
                Some(Node::new(p.id, "a", p.name).attr("id", format!("item_{}_title_link", p.id)))
            }),
            "inventory.item_name" => per_product(&|p| Some(Node::new(p.id, "div", p.name))),
            "inventory.item_desc" => per_product(&|p| Some(Node::new(p.id, "div", p.description))),
            "inventory.item_price" => {
                per_product(&|p| Some(Node::new(p.id, "div", p.price_label())))
            }
            "inventory.item_button" => per_product(&|p| Some(self.cart_button(p))),
            "inventory.add" => per_product(&|p| (!self.in_cart(p.id)).then(|| self.cart_button(p))),
            "inventory.remove" => per_product(&|p| self.in_cart(p.id).then(|| self.cart_button(p))),
            "inventory.sort_menu" => {
                vec![Node::new(0, "select", "").attr("value", self.sort.value())]
            }
            "inventory.sort_az" => Node::single("option", SortOrder::NameAsc.label()),
            "inventory.sort_za" => Node::single("option", SortOrder::NameDesc.label()),
            "inventory.sort_lohi" => Node::single("option", SortOrder::PriceAsc.label()),
            "inventory.sort_hilo" => Node::single("option", SortOrder::PriceDesc.label()),
            _ => Vec::new(),
        }
    }

    /// Dropdown holding the option rendered for `name`
    fn dropdown_of(name: &str) -> Option<&'static str> {
        matches!(
            name,
            "inventory.sort_az"
                | "inventory.sort_za"
                | "inventory.sort_lohi"
                | "inventory.sort_hilo"
        )
        .then_some("inventory.sort_menu")
    }

    fn cart_button(&self, p: &Product) -> Node {
        if self.in_cart(p.id) {
            Node::new(p.id, "button", "Remove").attr("data-test", format!("remove-{}", p.slug))
        } else {
            Node::new(p.id, "button", "Add to cart")
                .attr("data-test", format!("add-to-cart-{}", p.slug))
        }
    }

    fn render_product(&self, name: &str) -> Vec<Node> {
        let Some(p) = self.product.and_then(product) else {
            return Vec::new();
        };
        match name {
            "product.name" => Node::single("div", p.name),
            "product.desc" => Node::single("div", p.description),
            "product.price" => Node::single("div", p.price_label()),
            "product.add" if !self.in_cart(p.id) => vec![self.cart_button(p)],
            "product.remove" if self.in_cart(p.id) => vec![self.cart_button(p)],
            "product.back" => Node::single("button", "Back to products"),
            _ => Vec::new(),
        }
    }

    fn render_cart(&self, name: &str) -> Vec<Node> {
        let items = self.cart_products();
        let per_item = |f: &dyn Fn(&Product) -> Node| -> Vec<Node> {
            items.iter().map(|&p| f(p)).collect()
        };
        let on_cart = self.page == StoreState::Cart;
        match name {
            "cart.item" => per_item(&|p| Node::new(p.id, "div", p.name)),
            "cart.item_name" => per_item(&|p| Node::new(p.id, "div", p.name)),
            "cart.item_desc" => per_item(&|p| Node::new(p.id, "div", p.description)),
            "cart.item_price" => per_item(&|p| Node::new(p.id, "div", p.price_label())),
            "cart.remove" if on_cart => per_item(&|p| self.cart_button(p)),
            "cart.continue_shopping" if on_cart => Node::single("button", "Continue Shopping"),
            "cart.checkout" if on_cart => Node::single("button", "Checkout"),
            _ => Vec::new(),
        }
    }

    fn render_checkout(&self, name: &str) -> Vec<Node> {
        let input = |value: &str| vec![Node::new(0, "input", "").attr("value", value)];
        match name {
            "checkout.first_name" => input(self.checkout.first_name.as_str()),
            "checkout.last_name" => input(self.checkout.last_name.as_str()),
            "checkout.zip_code" => input(self.checkout.zip_code.as_str()),
            "checkout.cancel" => Node::single("button", "Cancel"),
            "checkout.continue" => vec![Node::new(0, "input", "").attr("value", "Continue")],
            "checkout.error" => self.render_error(),
            "checkout.error_close" => self.render_error_close(),
            _ => Vec::new(),
        }
    }

    fn render_overview(&self, name: &str) -> Vec<Node> {
        let subtotal = self.subtotal_cents();
        let tax = tax_cents(subtotal);
        match name {
            "overview.item_price" => self
                .cart_products()
                .iter()
                .map(|p| Node::new(p.id, "div", p.price_label()))
                .collect(),
            "overview.subtotal" => {
                Node::single("div", format!("Item total: ${}", format_cents(subtotal)))
            }
            "overview.tax" => Node::single("div", format!("Tax: ${}", format_cents(tax))),
            "overview.total" => {
                Node::single("div", format!("Total: ${}", format_cents(subtotal + tax)))
            }
            "overview.cancel" => Node::single("button", "Cancel"),
            "overview.finish" => Node::single("button", "Finish"),
            _ => Vec::new(),
        }
    }

    fn render_order(&self, name: &str) -> Vec<Node> {
        match name {
            "order.subtitle" => Node::single("h2", data::order::SUBTITLE),
            "order.text" => Node::single("div", data::order::TEXT),
            "order.back" => Node::single("button", "Back Home"),
            _ => Vec::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    fn click(&mut self, name: &str, key: &str) {
        let id = key.parse::<u32>().ok();
        match name {
            "login.button" => self.submit_login(),
            "login.error_close" | "checkout.error_close" => self.error = None,
            "header.menu_button" => self.menu_open = true,
            "header.all_items" => {
                self.apply(StoreAction::AllItems);
            }
            "header.logout" => self.logout(),
            "header.reset" => {
                self.cart.clear();
                self.sort = SortOrder::default();
            }
            "header.menu_links" => match key {
                "0" => self.click("header.all_items", "0"),
                "2" => self.click("header.logout", "0"),
                "3" => self.click("header.reset", "0"),
                _ => {}
            },
            "header.cart_link" => {
                self.apply(StoreAction::OpenCart);
            }
            "inventory.item_link" | "inventory.item_name" => {
                if let Some(id) = id {
                    if self.apply(StoreAction::OpenProduct) {
                        self.product = Some(id);
                    }
                }
            }
            "inventory.item_button" | "product.add" | "product.remove" | "inventory.add"
            | "inventory.remove" | "cart.remove" => {
                if let Some(id) = id.or(self.product) {
                    if self.in_cart(id) {
                        self.remove(id);
                    } else {
                        self.add(id);
                    }
                }
            }
            "inventory.sort_az" => self.sort = SortOrder::NameAsc,
            "inventory.sort_za" => self.sort = SortOrder::NameDesc,
            "inventory.sort_lohi" => self.sort = SortOrder::PriceAsc,
            "inventory.sort_hilo" => self.sort = SortOrder::PriceDesc,
            "product.back" | "order.back" => {
                self.apply(StoreAction::BackToProducts);
            }
            "cart.continue_shopping" => {
                self.apply(StoreAction::ContinueShopping);
            }
            "cart.checkout" => {
                self.apply(StoreAction::Checkout);
            }
            "checkout.cancel" => {
                self.apply(StoreAction::CancelCheckout);
            }
            "checkout.continue" => self.submit_checkout(),
            "overview.cancel" => {
                self.apply(StoreAction::CancelOverview);
            }
            "overview.finish" => {
                if self.apply(StoreAction::Finish) {
                    self.cart.clear();
                }
            }
            _ => {}
        }
    }

    fn logout(&mut self) {
        if self.apply(StoreAction::Logout) {
            self.user = None;
            self.login = LoginForm::default();
        }
    }

    fn submit_login(&mut self) {
        let LoginForm { username, password } = self.login.clone();
        let error = if username.is_empty() {
            Some(errors::MANDATORY_USERNAME)
        } else if password.is_empty() {
            Some(errors::MANDATORY_PASSWORD)
        } else if !users::ACCEPTED.contains(&username.as_str()) || password != users::PASSWORD {
            Some(errors::WRONG_LOGIN)
        } else if username == users::LOCKED_OUT.username {
            Some(errors::LOCKED_LOGIN)
        } else {
            None
        };
        match error {
            Some(message) => self.error = Some(message.to_string()),
            None => {
                if self.apply(StoreAction::Login) {
                    self.user = Some(username);
                    self.login = LoginForm::default();
                }
            }
        }
    }

    fn submit_checkout(&mut self) {
        let form = &self.checkout;
        let error = if form.first_name.is_empty() {
            Some(errors::MANDATORY_FIRST_NAME)
        } else if form.last_name.is_empty() {
            Some(errors::MANDATORY_LAST_NAME)
        } else if form.zip_code.is_empty() {
            Some(errors::MANDATORY_ZIP)
        } else {
            None
        };
        match error {
            Some(message) => self.error = Some(message.to_string()),
            None => {
                self.apply(StoreAction::ContinueCheckout);
            }
        }
    }

    fn field(&mut self, name: &str) -> Option<&mut String> {
        match (name, self.page) {
            ("login.username", StoreState::LoggedOut) => Some(&mut self.login.username),
            ("login.password", StoreState::LoggedOut) => Some(&mut self.login.password),
            ("checkout.first_name", StoreState::Checkout) => Some(&mut self.checkout.first_name),
            ("checkout.last_name", StoreState::Checkout) => Some(&mut self.checkout.last_name),
            ("checkout.zip_code", StoreState::Checkout) => Some(&mut self.checkout.zip_code),
            _ => None,
        }
    }
}

/// Numeric `id` query parameter of a URL
fn query_id(url: &str) -> Option<u32> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    query
        .split('&')
        .find_map(|pair| pair.strip_prefix("id="))
        .and_then(|v| v.parse().ok())
}

// =============================================================================
// DRIVER
// =============================================================================

/// Offline [`BrowserDriver`] backed by a simulated storefront
#[derive(Debug)]
pub struct MockDriver {
    store: Storefront,
    /// Call history for verification
    pub call_history: Vec<String>,
    script_results: VecDeque<serde_json::Value>,
    hidden: HashSet<String>,
    pending: HashMap<String, u32>,
    closed: bool,
}

impl Default for MockDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDriver {
    /// Simulator for the default base URL, on the login page
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(data::DEFAULT_BASE_URL)
    }

    /// Simulator serving pages under `base_url`
    #[must_use]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            store: Storefront::new(StoreUrls::new(base_url)),
            call_history: Vec::new(),
            script_results: VecDeque::new(),
            hidden: HashSet::new(),
            pending: HashMap::new(),
            closed: false,
        }
    }

    /// Render every element of `locator` as hidden
    #[must_use]
    pub fn hide(mut self, locator: &Locator) -> Self {
        self.hidden.insert(locator.name().to_string());
        self
    }

    /// Make `locator` match nothing for its next `lookups` lookups
    #[must_use]
    pub fn delay(mut self, locator: &Locator, lookups: u32) -> Self {
        self.pending.insert(locator.name().to_string(), lookups);
        self
    }

    /// Queue a result for the next `execute_script` call
    pub fn push_script_result(&mut self, value: serde_json::Value) {
        self.script_results.push_back(value);
    }

    /// Page currently shown
    #[must_use]
    pub const fn page(&self) -> StoreState {
        self.store.page
    }

    /// Product ids in the cart, in the order they were added
    #[must_use]
    pub fn cart(&self) -> &[u32] {
        &self.store.cart
    }

    /// Whether `close` has been called
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.closed
    }

    /// Get call history
    #[must_use]
    pub fn history(&self) -> &[String] {
        &self.call_history
    }

    /// Check if method was called
    #[must_use]
    pub fn was_called(&self, method: &str) -> bool {
        self.call_history.iter().any(|c| c.starts_with(method))
    }

    fn ensure_open(&self) -> ProbeResult<()> {
        if self.closed {
            Err(ProbeError::driver("browser session is closed"))
        } else {
            Ok(())
        }
    }

    fn record(&mut self, call: String) {
        tracing::trace!(driver = "mock", %call);
        self.call_history.push(call);
    }

    /// Whether `node` of `name` renders as displayed
    ///
    /// Options follow their dropdown, whatever their own flag says.
    fn is_displayed(&self, name: &str, node: &Node) -> bool {
        if self.hidden.contains(name) {
            return false;
        }
        match Storefront::dropdown_of(name) {
            Some(select) => {
                !self.hidden.contains(select)
                    && self.store.render(select).iter().any(|n| n.displayed)
            }
            None => node.displayed,
        }
    }

    fn snapshot(&self, locator: &Locator) -> Vec<ElementHandle> {
        self.store
            .render(locator.name())
            .into_iter()
            .enumerate()
            .map(|(index, node)| {
                ElementHandle::new(
                    *locator,
                    format!("{}:{}", locator.name(), node.key),
                    index,
                    node.tag,
                )
                .with_displayed(self.is_displayed(locator.name(), &node))
                .with_text(node.text)
            })
            .collect()
    }

    /// Current node behind a handle
    fn node(&self, element: &ElementHandle) -> ProbeResult<(usize, Node)> {
        let key = element
            .node_id
            .rsplit_once(':')
            .map(|(_, key)| key)
            .unwrap_or_default();
        self.store
            .render(element.locator.name())
            .into_iter()
            .enumerate()
            .find(|(_, n)| n.key == key)
            .ok_or_else(|| ProbeError::StaleElement {
                locator: element.locator.name().to_string(),
                node_id: element.node_id.clone(),
            })
    }

    fn interactable(&self, element: &ElementHandle) -> ProbeResult<Node> {
        let (_, node) = self.node(element)?;
        if self.is_displayed(element.locator.name(), &node) {
            Ok(node)
        } else {
            Err(ProbeError::driver(format!(
                "element not interactable: {}",
                element.node_id
            )))
        }
    }
}

impl BrowserDriver for MockDriver {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn navigate(&mut self, url: &str) -> ProbeResult<()> {
        self.ensure_open()?;
        self.record(format!("navigate:{url}"));
        self.store.navigate(url)
    }

    fn current_url(&mut self) -> ProbeResult<String> {
        self.ensure_open()?;
        Ok(self.store.url())
    }

    fn execute_script(&mut self, script: &str) -> ProbeResult<serde_json::Value> {
        self.ensure_open()?;
        self.record(format!("execute_script:{script}"));
        Ok(self
            .script_results
            .pop_front()
            .unwrap_or(serde_json::Value::Null))
    }

    fn find_elements(&mut self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        self.ensure_open()?;
        if let Some(remaining) = self.pending.get_mut(locator.name()) {
            if *remaining > 0 {
                *remaining -= 1;
                return Ok(Vec::new());
            }
        }
        Ok(self.snapshot(locator))
    }

    fn resolve(&mut self, element: &ElementHandle) -> ProbeResult<ElementHandle> {
        self.ensure_open()?;
        let (index, node) = self.node(element)?;
        let displayed = self.is_displayed(element.locator.name(), &node);
        Ok(
            ElementHandle::new(element.locator, element.node_id.clone(), index, node.tag)
                .with_text(node.text)
                .with_displayed(displayed),
        )
    }

    fn pointer(&mut self, element: &ElementHandle, action: PointerAction) -> ProbeResult<()> {
        self.ensure_open()?;
        self.interactable(element)?;
        self.record(format!("{}:{}", action.as_str(), element.node_id));
        if action == PointerAction::Click {
            let key = element
                .node_id
                .rsplit_once(':')
                .map(|(_, key)| key)
                .unwrap_or_default();
            self.store.click(element.locator.name(), key);
        }
        Ok(())
    }

    fn send_keys(&mut self, element: &ElementHandle, text: &str) -> ProbeResult<()> {
        self.ensure_open()?;
        self.interactable(element)?;
        self.record(format!("send_keys:{}", element.node_id));
        let field = self.store.field(element.locator.name()).ok_or_else(|| {
            ProbeError::driver(format!("element not editable: {}", element.node_id))
        })?;
        field.push_str(text);
        Ok(())
    }

    fn clear(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.ensure_open()?;
        self.interactable(element)?;
        self.record(format!("clear:{}", element.node_id));
        if let Some(field) = self.store.field(element.locator.name()) {
            field.clear();
        }
        Ok(())
    }

    fn text(&mut self, element: &ElementHandle) -> ProbeResult<String> {
        self.ensure_open()?;
        let (_, node) = self.node(element)?;
        Ok(node.text)
    }

    fn attribute(&mut self, element: &ElementHandle, name: &str) -> ProbeResult<Option<String>> {
        self.ensure_open()?;
        let (_, node) = self.node(element)?;
        Ok(node
            .attrs
            .into_iter()
            .find(|(attr, _)| *attr == name)
            .map(|(_, value)| value))
    }

    fn drag(&mut self, element: &ElementHandle, target: &DragTarget) -> ProbeResult<()> {
        self.ensure_open()?;
        self.interactable(element)?;
        let to = match target {
            DragTarget::Offset { dx, dy } => format!("{dx},{dy}"),
            DragTarget::Element(other) => {
                self.node(other)?;
                other.node_id.clone()
            }
        };
        self.record(format!("drag:{}->{to}", element.node_id));
        Ok(())
    }

    fn scroll_into_view(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.ensure_open()?;
        self.node(element)?;
        Ok(())
    }

    fn highlight(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.ensure_open()?;
        self.record(format!("highlight:{}", element.node_id));
        Ok(())
    }

    fn close(&mut self) -> ProbeResult<()> {
        if !self.closed {
            self.record("close".to_string());
            self.closed = true;
        }
        Ok(())
    }
}

//! Fixture data: URLs, credentials, expected strings and generated checkout
//! details.

use crate::state::StoreState;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Storefront the suite targets by default
pub const DEFAULT_BASE_URL: &str = "https://www.saucedemo.com/";

/// Absolute page URLs under a base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUrls {
    base: String,
}

impl Default for StoreUrls {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl StoreUrls {
    /// Create from a base URL; a trailing slash is optional
    #[must_use]
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    /// Base URL, always ending in `/`
    #[must_use]
    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of a page
    #[must_use]
    pub fn page(&self, state: StoreState) -> String {
        format!("{}{}", self.base, state.path().trim_start_matches('/'))
    }

    /// Login page, which is the base URL itself
    #[must_use]
    pub fn login(&self) -> String {
        self.page(StoreState::LoggedOut)
    }

    /// Product listing
    #[must_use]
    pub fn products(&self) -> String {
        self.page(StoreState::Inventory)
    }

    /// Cart
    #[must_use]
    pub fn cart(&self) -> String {
        self.page(StoreState::Cart)
    }

    /// Checkout information form
    #[must_use]
    pub fn checkout(&self) -> String {
        self.page(StoreState::Checkout)
    }

    /// Order summary
    #[must_use]
    pub fn overview(&self) -> String {
        self.page(StoreState::Overview)
    }

    /// Order confirmation
    #[must_use]
    pub fn order(&self) -> String {
        self.page(StoreState::OrderComplete)
    }

    /// Detail page of product `id`
    #[must_use]
    pub fn product(&self, id: u32) -> String {
        format!("{}?id={id}", self.page(StoreState::Product))
    }
}

/// A username/password pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Credentials {
    /// Username
    pub username: &'static str,
    /// Password
    pub password: &'static str,
}

impl Credentials {
    /// Create a credential pair
    #[must_use]
    pub const fn new(username: &'static str, password: &'static str) -> Self {
        Self { username, password }
    }
}

/// Known accounts
pub mod users {
    use super::Credentials;

    /// Password shared by every demo account
    pub const PASSWORD: &str = "secret_sauce";

    /// Regular shopper
    pub const STANDARD: Credentials = Credentials::new("standard_user", PASSWORD);
    /// Account the storefront refuses
    pub const LOCKED_OUT: Credentials = Credentials::new("locked_out_user", PASSWORD);
    /// Account that does not exist
    pub const WRONG: Credentials = Credentials::new("wrong_user", "wrong_password");
    /// Empty field value
    pub const EMPTY: &str = "";

    /// Every username the storefront accepts with [`PASSWORD`]
    pub const ACCEPTED: &[&str] = &[
        "standard_user",
        "locked_out_user",
        "problem_user",
        "performance_glitch_user",
        "error_user",
        "visual_user",
    ];
}

/// Error banners
pub mod errors {
    pub const WRONG_LOGIN: &str =
        "Epic sadface: Username and password do not match any user in this service";
    pub const LOCKED_LOGIN: &str = "Epic sadface: Sorry, this user has been locked out.";
    pub const MANDATORY_PASSWORD: &str = "Epic sadface: Password is required";
    pub const MANDATORY_USERNAME: &str = "Epic sadface: Username is required";
    pub const MANDATORY_FIRST_NAME: &str = "Error: First Name is required";
    pub const MANDATORY_LAST_NAME: &str = "Error: Last Name is required";
    pub const MANDATORY_ZIP: &str = "Error: Postal Code is required";

    /// Banner shown when a logged-in page is opened without a session
    #[must_use]
    pub fn login_required(path: &str) -> String {
        format!("Epic sadface: You can only access '{path}' when you are logged in.")
    }
}

/// Secondary header titles
pub mod titles {
    pub const PRODUCTS: &str = "Products";
    pub const CART: &str = "Your Cart";
    pub const CHECKOUT: &str = "Checkout: Your Information";
    pub const OVERVIEW: &str = "Checkout: Overview";
    pub const ORDER: &str = "Checkout: Complete!";
}

/// Order confirmation copy
pub mod order {
    pub const SUBTITLE: &str = "Thank you for your order!";
    pub const TEXT: &str =
        "Your order has been dispatched, and will arrive just as fast as the pony can get there!";
}

/// Side menu labels, in display order
pub const MENU_LINKS: [&str; 4] = ["All Items", "About", "Logout", "Reset App State"];

const FIRST_NAMES: &[&str] = &[
    "James", "Mary", "Robert", "Patricia", "John", "Jennifer", "Michael", "Linda", "David",
    "Elizabeth", "William", "Barbara", "Richard", "Susan", "Joseph", "Jessica", "Thomas", "Sarah",
    "Charles", "Karen", "Daniel", "Nancy", "Matthew", "Lisa", "Anthony", "Betty", "Mark", "Sandra",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Clark",
];

/// Generated checkout details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutInfo {
    pub first_name: String,
    pub last_name: String,
    pub zip_code: String,
}

/// Random test data, optionally seeded for reproducible runs
#[derive(Debug, Clone)]
pub struct DataGenerator {
    rng: StdRng,
}

impl Default for DataGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl DataGenerator {
    /// Unseeded generator
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Generator that replays the same sequence for the same seed
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded when `seed` is set, unseeded otherwise
    #[must_use]
    pub fn from_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::seeded)
    }

    /// Random first name
    pub fn first_name(&mut self) -> String {
        self.pick(FIRST_NAMES).to_string()
    }

    /// Random last name
    pub fn last_name(&mut self) -> String {
        self.pick(LAST_NAMES).to_string()
    }

    /// Random five digit postal code
    pub fn zip_code(&mut self) -> String {
        format!("{:05}", self.rng.gen_range(501..=99_950))
    }

    /// First name, last name and zip code in one go
    pub fn checkout_info(&mut self) -> CheckoutInfo {
        CheckoutInfo {
            first_name: self.first_name(),
            last_name: self.last_name(),
            zip_code: self.zip_code(),
        }
    }

    /// Uniform index into a list of `len` items, `None` when empty
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }

    fn pick(&mut self, list: &'static [&'static str]) -> &'static str {
        list.choose(&mut self.rng).copied().unwrap_or_default()
    }
}

//! Navigation model of the storefront.
//!
//! The storefront is a small page graph. Every page is a [`StoreState`] and
//! every user action that moves between pages is a [`StoreAction`].
//! [`StoreState::next`] is the transition table; actions that are not
//! available on a page return `None`.

use serde::Serialize;
use std::fmt;

/// A page of the storefront
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StoreState {
    /// Login form at the base URL
    LoggedOut,
    /// Product listing
    Inventory,
    /// Product detail
    Product,
    /// Cart
    Cart,
    /// Checkout information form
    Checkout,
    /// Order summary
    Overview,
    /// Order confirmation
    OrderComplete,
}

/// A user action that moves between pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StoreAction {
    /// Successful login
    Login,
    /// Open a product from the listing
    OpenProduct,
    /// "Back to products" on the detail or confirmation page
    BackToProducts,
    /// Cart icon in the header
    OpenCart,
    /// "Continue Shopping" in the cart
    ContinueShopping,
    /// "Checkout" in the cart
    Checkout,
    /// "Cancel" on the checkout form
    CancelCheckout,
    /// "Continue" on the checkout form with every field filled
    ContinueCheckout,
    /// "Cancel" on the overview
    CancelOverview,
    /// "Finish" on the overview
    Finish,
    /// "Logout" in the side menu
    Logout,
    /// "All Items" in the side menu
    AllItems,
}

impl StoreState {
    /// Every state, in navigation order
    pub const ALL: [Self; 7] = [
        Self::LoggedOut,
        Self::Inventory,
        Self::Product,
        Self::Cart,
        Self::Checkout,
        Self::Overview,
        Self::OrderComplete,
    ];

    /// URL path of the page, relative to the base URL
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::LoggedOut => "/",
            Self::Inventory => "/inventory.html",
            Self::Product => "/inventory-item.html",
            Self::Cart => "/cart.html",
            Self::Checkout => "/checkout-step-one.html",
            Self::Overview => "/checkout-step-two.html",
            Self::OrderComplete => "/checkout-complete.html",
        }
    }

    /// Short page name, matching the locator group of the page
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::LoggedOut => "login",
            Self::Inventory => "inventory",
            Self::Product => "product",
            Self::Cart => "cart",
            Self::Checkout => "checkout",
            Self::Overview => "overview",
            Self::OrderComplete => "order",
        }
    }

    /// Whether the page needs a logged-in user
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        !matches!(self, Self::LoggedOut)
    }

    /// Whether the shared header is rendered
    #[must_use]
    pub const fn has_header(&self) -> bool {
        self.requires_login()
    }

    /// Apply `action` to this state
    ///
    /// Returns `None` when the action is not available on this page.
    #[must_use]
    pub const fn next(self, action: StoreAction) -> Option<Self> {
        use StoreAction as A;
        let next = match (self, action) {
            (Self::LoggedOut, A::Login) => Self::Inventory,
            (Self::LoggedOut, _) => return None,
            (_, A::Logout) => Self::LoggedOut,
            (_, A::AllItems) => Self::Inventory,
            (_, A::OpenCart) => Self::Cart,
            (Self::Inventory, A::OpenProduct) => Self::Product,
            (Self::Product | Self::OrderComplete, A::BackToProducts) => Self::Inventory,
            (Self::Cart, A::ContinueShopping) => Self::Inventory,
            (Self::Cart, A::Checkout) => Self::Checkout,
            (Self::Checkout, A::CancelCheckout) => Self::Cart,
            (Self::Checkout, A::ContinueCheckout) => Self::Overview,
            (Self::Overview, A::CancelOverview) => Self::Inventory,
            (Self::Overview, A::Finish) => Self::OrderComplete,
            _ => return None,
        };
        Some(next)
    }

    /// Classify a URL by its path
    ///
    /// Scheme, host, query string and fragment are ignored, so
    /// `https://www.saucedemo.com/inventory-item.html?id=4` is
    /// [`StoreState::Product`].
    #[must_use]
    pub fn from_url(url: &str) -> Option<Self> {
        let path = url_path(url);
        let path = if path.is_empty() { "/" } else { path };
        Self::ALL.into_iter().find(|s| s.path() == path)
    }
}

impl fmt::Display for StoreState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path component of a URL, without query or fragment
fn url_path(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let rest = rest.split(['?', '#']).next().unwrap_or_default();
    if url.contains("://") {
        rest.find('/').map_or("", |i| &rest[i..])
    } else {
        rest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod transition_tests {
        use super::*;

        #[test]
        fn test_login_is_the_only_way_in() {
            assert_eq!(
                StoreState::LoggedOut.next(StoreAction::Login),
                Some(StoreState::Inventory)
            );
            assert_eq!(StoreState::LoggedOut.next(StoreAction::OpenCart), None);
            assert_eq!(StoreState::LoggedOut.next(StoreAction::Logout), None);
        }

        #[test]
        fn test_purchase_path() {
            let path = [
                StoreAction::OpenProduct,
                StoreAction::OpenCart,
                StoreAction::Checkout,
                StoreAction::ContinueCheckout,
                StoreAction::Finish,
            ];
            let end = path
                .iter()
                .try_fold(StoreState::Inventory, |s, a| s.next(*a));
            assert_eq!(end, Some(StoreState::OrderComplete));
        }

        #[test]
        fn test_order_complete_only_returns_to_inventory() {
            let s = StoreState::OrderComplete;
            assert_eq!(s.next(StoreAction::BackToProducts), Some(StoreState::Inventory));
            assert_eq!(s.next(StoreAction::Finish), None);
            assert_eq!(s.next(StoreAction::Checkout), None);
        }

        #[test]
        fn test_cancel_targets() {
            assert_eq!(
                StoreState::Checkout.next(StoreAction::CancelCheckout),
                Some(StoreState::Cart)
            );
            assert_eq!(
                StoreState::Overview.next(StoreAction::CancelOverview),
                Some(StoreState::Inventory)
            );
        }

        #[test]
        fn test_logout_from_any_logged_in_page() {
            for s in StoreState::ALL.into_iter().filter(StoreState::requires_login) {
                assert_eq!(s.next(StoreAction::Logout), Some(StoreState::LoggedOut));
            }
        }
    }

    mod url_tests {
        use super::*;

        #[test]
        fn test_from_url_ignores_host_and_query() {
            assert_eq!(
                StoreState::from_url("https://www.saucedemo.com/inventory-item.html?id=4"),
                Some(StoreState::Product)
            );
            assert_eq!(
                StoreState::from_url("http://localhost:8080/cart.html#top"),
                Some(StoreState::Cart)
            );
        }

        #[test]
        fn test_from_url_root() {
            assert_eq!(
                StoreState::from_url("https://www.saucedemo.com/"),
                Some(StoreState::LoggedOut)
            );
            assert_eq!(
                StoreState::from_url("https://www.saucedemo.com"),
                Some(StoreState::LoggedOut)
            );
        }

        #[test]
        fn test_from_url_bare_path() {
            assert_eq!(
                StoreState::from_url("/checkout-step-two.html"),
                Some(StoreState::Overview)
            );
            assert_eq!(StoreState::from_url("/unknown.html"), None);
        }

        #[test]
        fn test_path_round_trip() {
            for s in StoreState::ALL {
                assert_eq!(StoreState::from_url(s.path()), Some(s));
            }
        }
    }
}

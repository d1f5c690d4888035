//! Page objects.
//!
//! Each page is a short-lived borrow of the session's [`Interaction`] and
//! exposes only its own controls. Pages behind the login share the
//! [`Header`] component for the burger menu and the cart link.
//!
//! ```ignore
//! let mut session = Session::simulated(SessionConfig::default());
//! session.login_page().open()?;
//! session.login_page().login_as(&users::STANDARD)?;
//! session.inventory_page().add_all()?;
//! assert_eq!(session.header().cart_count()?, 6);
//! ```

mod cart;
mod checkout;
mod header;
mod inventory;
mod login;
mod order;
mod overview;
mod product;

pub use cart::CartPage;
pub use checkout::CheckoutPage;
pub use header::Header;
pub use inventory::{InventoryPage, SortOrder};
pub use login::LoginPage;
pub use order::OrderPage;
pub use overview::OverviewPage;
pub use product::ProductPage;

use crate::interaction::Interaction;
use crate::result::ProbeResult;
use crate::state::StoreState;

/// A page of the storefront
pub trait PageObject {
    /// Navigation state the page renders
    const STATE: StoreState;

    /// Interaction layer the page acts through
    fn ui(&mut self) -> &mut Interaction;

    /// Page name for logging
    fn page_name(&self) -> &'static str {
        Self::STATE.as_str()
    }

    /// Current URL
    fn url(&mut self) -> ProbeResult<String> {
        self.ui().current_url()
    }

    /// Whether the browser currently shows this page, judged by URL path
    fn is_loaded(&mut self) -> ProbeResult<bool> {
        let url = self.ui().current_url()?;
        Ok(StoreState::from_url(&url) == Some(Self::STATE))
    }
}

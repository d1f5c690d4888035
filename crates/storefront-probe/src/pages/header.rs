use crate::interaction::Interaction;
use crate::locators::header;
use crate::result::{ProbeError, ProbeResult};

/// Title bar, burger menu and cart link shared by every logged-in page
#[derive(Debug)]
pub struct Header<'a> {
    ui: &'a mut Interaction,
}

impl<'a> Header<'a> {
    /// Borrow the session's interaction layer
    pub fn new(ui: &'a mut Interaction) -> Self {
        Self { ui }
    }

    /// Secondary title, e.g. `Products`
    pub fn title(&mut self) -> ProbeResult<String> {
        self.ui.text(&header::TITLE)
    }

    /// Open the burger menu and wait for its links
    pub fn open_menu(&mut self) -> ProbeResult<()> {
        tracing::info!("opening side menu");
        self.ui.click(&header::MENU_BUTTON)?;
        self.ui.elements_visible(&header::MENU_LINKS).map(|_| ())
    }

    /// Labels of the side menu links, in display order
    pub fn menu_links(&mut self) -> ProbeResult<Vec<String>> {
        self.open_menu()?;
        let links = self.ui.elements_visible(&header::MENU_LINKS)?;
        self.ui.texts(&links)
    }

    /// Log out through the side menu
    pub fn logout(&mut self) -> ProbeResult<()> {
        self.open_menu()?;
        tracing::info!("logging out");
        self.ui.click(&header::LOGOUT)
    }

    /// Reset the app state through the side menu
    pub fn reset_app_state(&mut self) -> ProbeResult<()> {
        self.open_menu()?;
        tracing::info!("resetting app state");
        self.ui.click(&header::RESET)
    }

    /// Go to the product listing through the side menu
    pub fn all_items(&mut self) -> ProbeResult<()> {
        self.open_menu()?;
        tracing::info!("opening all items");
        self.ui.click(&header::ALL_ITEMS)
    }

    /// Click the cart icon
    pub fn open_cart(&mut self) -> ProbeResult<()> {
        tracing::info!("opening cart");
        self.ui.click(&header::CART_LINK)
    }

    /// Number shown on the cart badge
    pub fn cart_count(&mut self) -> ProbeResult<usize> {
        let text = self.ui.text(&header::CART_BADGE)?;
        text.trim()
            .parse()
            .map_err(|_| ProbeError::mismatch("cart badge", "a number", &text))
    }

    /// Whether the cart badge is shown right now
    pub fn has_badge(&mut self) -> ProbeResult<bool> {
        self.ui.is_visible_now(&header::CART_BADGE)
    }

    /// Wait until the cart badge is gone
    pub fn badge_absent(&mut self) -> ProbeResult<()> {
        self.ui.element_not_visible(&header::CART_BADGE)
    }
}

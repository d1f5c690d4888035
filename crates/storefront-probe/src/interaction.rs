//! Base interaction layer.
//!
//! [`Interaction`] wraps a [`BrowserDriver`] with the wait/act/read
//! primitives every page object is built from. Waits block the calling thread
//! through [`crate::wait::poll_until`]. Actions on an [`ElementHandle`]
//! re-resolve it by node id first, so a handle kept across a re-render fails
//! with `StaleElement` instead of acting on the wrong node.

use crate::data::StoreUrls;
use crate::driver::{BrowserDriver, DragTarget, ElementHandle, PointerAction};
use crate::locator::Locator;
use crate::result::{ProbeError, ProbeResult};
use crate::wait::{poll_until, Condition, WaitOptions};

/// Wait/act/read primitives over one browser session
pub struct Interaction {
    driver: Box<dyn BrowserDriver>,
    urls: StoreUrls,
    wait: WaitOptions,
    highlight: bool,
}

impl std::fmt::Debug for Interaction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interaction")
            .field("driver", &self.driver.name())
            .field("base_url", &self.urls.base())
            .field("wait", &self.wait)
            .field("highlight", &self.highlight)
            .finish()
    }
}

impl Interaction {
    /// Wrap a driver
    #[must_use]
    pub fn new(driver: Box<dyn BrowserDriver>, urls: StoreUrls, wait: WaitOptions) -> Self {
        Self {
            driver,
            urls,
            wait,
            highlight: false,
        }
    }

    /// Tint every element before acting on it
    #[must_use]
    pub fn with_highlight(mut self, highlight: bool) -> Self {
        self.highlight = highlight;
        self
    }

    /// Page URLs of the storefront under test
    #[must_use]
    pub const fn urls(&self) -> &StoreUrls {
        &self.urls
    }

    /// Wait policy
    #[must_use]
    pub const fn wait_options(&self) -> &WaitOptions {
        &self.wait
    }

    /// Underlying driver
    pub fn driver_mut(&mut self) -> &mut dyn BrowserDriver {
        self.driver.as_mut()
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Open the base URL
    pub fn open_base(&mut self) -> ProbeResult<()> {
        let url = self.urls.base().to_string();
        self.open(&url)
    }

    /// Open `url`
    pub fn open(&mut self, url: &str) -> ProbeResult<()> {
        tracing::info!(url, "opening URL");
        self.driver.navigate(url)
    }

    /// Current page URL
    pub fn current_url(&mut self) -> ProbeResult<String> {
        let url = self.driver.current_url()?;
        tracing::debug!(url = %url, "current URL");
        Ok(url)
    }

    /// Evaluate a script in the page
    pub fn execute_script(&mut self, script: &str) -> ProbeResult<serde_json::Value> {
        self.driver.execute_script(script)
    }

    // =========================================================================
    // Waits
    // =========================================================================

    fn wait_for(
        &mut self,
        locator: &Locator,
        condition: Condition,
    ) -> ProbeResult<Vec<ElementHandle>> {
        let options = self.wait;
        let driver = &mut self.driver;
        poll_until(locator, condition, &options, || {
            let found = driver.find_elements(locator)?;
            Ok(condition.holds(&found).then_some(found))
        })
    }

    fn first(locator: &Locator, found: Vec<ElementHandle>) -> ProbeResult<ElementHandle> {
        found
            .into_iter()
            .next()
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: locator.name().to_string(),
            })
    }

    /// Wait until the first match is displayed, scrolling it into view first
    pub fn element_visible(&mut self, locator: &Locator) -> ProbeResult<ElementHandle> {
        tracing::debug!(locator = locator.name(), "waiting for element to be visible");
        let present = self.element_present(locator)?;
        self.scroll_into_view(&present)?;
        let found = self.wait_for(locator, Condition::Visible)?;
        Self::first(locator, found)
    }

    /// Wait until at least one element matches and every match is displayed
    pub fn elements_visible(&mut self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        tracing::debug!(locator = locator.name(), "getting all visible elements");
        self.wait_for(locator, Condition::AllVisible)
    }

    /// Wait until the first match is attached to the DOM
    pub fn element_present(&mut self, locator: &Locator) -> ProbeResult<ElementHandle> {
        tracing::debug!(locator = locator.name(), "waiting for element to be present");
        let found = self.wait_for(locator, Condition::Present)?;
        Self::first(locator, found)
    }

    /// Wait until at least one element matches
    pub fn elements_present(&mut self, locator: &Locator) -> ProbeResult<Vec<ElementHandle>> {
        tracing::debug!(locator = locator.name(), "getting all present elements");
        self.wait_for(locator, Condition::AllPresent)
    }

    /// Wait until the first match is displayed and enabled
    pub fn element_clickable(&mut self, locator: &Locator) -> ProbeResult<ElementHandle> {
        tracing::debug!(locator = locator.name(), "waiting for element to be clickable");
        let found = self.wait_for(locator, Condition::Clickable)?;
        Self::first(locator, found)
    }

    /// Wait until nothing matches or the first match is hidden
    pub fn element_not_visible(&mut self, locator: &Locator) -> ProbeResult<()> {
        tracing::debug!(locator = locator.name(), "checking element is not visible");
        self.wait_for(locator, Condition::Invisible).map(|_| ())
    }

    /// Whether the first match is displayed right now, without waiting
    pub fn is_visible_now(&mut self, locator: &Locator) -> ProbeResult<bool> {
        let found = self.driver.find_elements(locator)?;
        Ok(Condition::Visible.holds(&found))
    }

    /// Whether anything matches right now, without waiting
    pub fn is_present_now(&mut self, locator: &Locator) -> ProbeResult<bool> {
        let found = self.driver.find_elements(locator)?;
        Ok(Condition::Present.holds(&found))
    }

    /// Number of matches right now, without waiting
    pub fn count_now(&mut self, locator: &Locator) -> ProbeResult<usize> {
        Ok(self.driver.find_elements(locator)?.len())
    }

    // =========================================================================
    // Actions
    // =========================================================================

    fn mark(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        if self.highlight {
            self.driver.highlight(element)?;
        }
        Ok(())
    }

    fn pointer(&mut self, element: &ElementHandle, action: PointerAction) -> ProbeResult<()> {
        let fresh = self.driver.resolve(element)?;
        self.mark(&fresh)?;
        tracing::debug!(
            locator = fresh.locator.name(),
            node = %fresh.node_id,
            action = action.as_str(),
            "pointer action"
        );
        self.driver.pointer(&fresh, action)
    }

    /// Wait for an element to be visible and left-click it
    pub fn click(&mut self, locator: &Locator) -> ProbeResult<()> {
        let element = self.element_visible(locator)?;
        self.click_element(&element)
    }

    /// Left-click a previously found element
    pub fn click_element(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        self.pointer(element, PointerAction::Click)
    }

    /// Left-click every element in order
    pub fn click_each(&mut self, elements: &[ElementHandle]) -> ProbeResult<()> {
        tracing::debug!(count = elements.len(), "clicking on elements");
        elements.iter().try_for_each(|e| self.click_element(e))
    }

    /// Double-click an element
    pub fn double_click(&mut self, locator: &Locator) -> ProbeResult<()> {
        let element = self.element_visible(locator)?;
        self.pointer(&element, PointerAction::DoubleClick)
    }

    /// Right-click an element
    pub fn right_click(&mut self, locator: &Locator) -> ProbeResult<()> {
        let element = self.element_visible(locator)?;
        self.pointer(&element, PointerAction::ContextClick)
    }

    /// Move the pointer over an element
    pub fn hover(&mut self, locator: &Locator) -> ProbeResult<()> {
        let element = self.element_visible(locator)?;
        self.pointer(&element, PointerAction::Hover)
    }

    /// Clear an input and type `text` into it
    pub fn fill(&mut self, locator: &Locator, text: &str) -> ProbeResult<()> {
        tracing::debug!(locator = locator.name(), chars = text.chars().count(), "filling text");
        let element = self.element_clickable(locator)?;
        let element = self.driver.resolve(&element)?;
        self.driver.clear(&element)?;
        self.mark(&element)?;
        self.driver.send_keys(&element, text)
    }

    /// Clear an input
    pub fn clear(&mut self, locator: &Locator) -> ProbeResult<()> {
        tracing::debug!(locator = locator.name(), "clearing text");
        let element = self.element_clickable(locator)?;
        let element = self.driver.resolve(&element)?;
        self.mark(&element)?;
        self.driver.clear(&element)
    }

    /// Drag an element by an offset in CSS pixels
    pub fn drag_by_offset(&mut self, locator: &Locator, dx: f64, dy: f64) -> ProbeResult<()> {
        tracing::debug!(locator = locator.name(), dx, dy, "dragging element by offset");
        let element = self.element_visible(locator)?;
        let element = self.driver.resolve(&element)?;
        self.driver.drag(&element, &DragTarget::Offset { dx, dy })
    }

    /// Drag one element onto another
    pub fn drag_to(&mut self, what: &Locator, target: &Locator) -> ProbeResult<()> {
        tracing::debug!(from = what.name(), to = target.name(), "dragging element to element");
        let element = self.element_visible(what)?;
        let target = self.element_visible(target)?;
        let element = self.driver.resolve(&element)?;
        self.driver.drag(&element, &DragTarget::Element(target))
    }

    /// Scroll the page to the bottom
    pub fn scroll_to_bottom(&mut self) -> ProbeResult<()> {
        tracing::debug!("scrolling to bottom of page");
        self.driver
            .execute_script("window.scrollTo(0, document.body.scrollHeight);")
            .map(|_| ())
    }

    /// Scroll an element into view
    ///
    /// An element that re-rendered in the meantime is skipped; the following
    /// wait resolves it again.
    pub fn scroll_into_view(&mut self, element: &ElementHandle) -> ProbeResult<()> {
        match self.driver.scroll_into_view(element) {
            Err(e) if e.is_stale() => Ok(()),
            other => other,
        }
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Wait for an element to be visible and read its text
    pub fn text(&mut self, locator: &Locator) -> ProbeResult<String> {
        let element = self.element_visible(locator)?;
        self.mark(&element)?;
        let text = self.driver.text(&element)?;
        tracing::debug!(locator = locator.name(), text = %text, "got text");
        Ok(text)
    }

    /// Current text of every element
    pub fn texts(&mut self, elements: &[ElementHandle]) -> ProbeResult<Vec<String>> {
        tracing::debug!(count = elements.len(), "getting text from elements");
        elements.iter().map(|e| self.driver.text(e)).collect()
    }

    /// Wait for an element to be visible and read an attribute
    pub fn attribute(&mut self, locator: &Locator, name: &str) -> ProbeResult<Option<String>> {
        tracing::debug!(locator = locator.name(), attribute = name, "getting attribute");
        let element = self.element_visible(locator)?;
        self.mark(&element)?;
        self.driver.attribute(&element, name)
    }

    /// Attribute of every element
    pub fn attributes(
        &mut self,
        elements: &[ElementHandle],
        name: &str,
    ) -> ProbeResult<Vec<Option<String>>> {
        tracing::debug!(
            count = elements.len(),
            attribute = name,
            "getting attribute from elements"
        );
        elements
            .iter()
            .map(|e| self.driver.attribute(e, name))
            .collect()
    }

    /// First element whose text equals `text`, ignoring case
    #[must_use]
    pub fn find_by_text<'e>(
        elements: &'e [ElementHandle],
        text: &str,
    ) -> Option<&'e ElementHandle> {
        tracing::debug!(text, "finding element by text");
        let wanted = text.to_lowercase();
        elements.iter().find(|e| e.text.to_lowercase() == wanted)
    }

    /// Shut the browser down
    pub fn close(&mut self) -> ProbeResult<()> {
        tracing::debug!(driver = self.driver.name(), "closing browser");
        self.driver.close()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::locators::{header, inventory, login};
    use crate::mock::MockDriver;

    fn fast() -> WaitOptions {
        WaitOptions::new().with_timeout(60).with_poll_interval(5)
    }

    fn ui(driver: MockDriver) -> Interaction {
        Interaction::new(Box::new(driver), StoreUrls::default(), fast())
    }

    fn logged_in() -> Interaction {
        let mut ui = ui(MockDriver::new());
        ui.open_base().unwrap();
        ui.fill(&login::USERNAME, "standard_user").unwrap();
        ui.fill(&login::PASSWORD, "secret_sauce").unwrap();
        ui.click(&login::BUTTON).unwrap();
        ui
    }

    mod wait_tests {
        use super::*;

        #[test]
        fn test_visible_after_delay() {
            let mut ui = ui(MockDriver::new().delay(&login::USERNAME, 2));
            let el = ui.element_visible(&login::USERNAME).unwrap();
            assert_eq!(el.node_id, "login.username:0");
        }

        #[test]
        fn test_hidden_element_times_out() {
            let mut ui = ui(MockDriver::new().hide(&login::BUTTON));
            let err = ui.element_visible(&login::BUTTON).unwrap_err();
            assert!(err.is_timeout());
            assert!(err.to_string().contains("login.button"));
            assert!(err.to_string().contains("visible"));
        }

        #[test]
        fn test_missing_element_times_out_on_presence() {
            let mut ui = ui(MockDriver::new());
            let err = ui.element_present(&inventory::ITEM).unwrap_err();
            assert!(err.to_string().contains("present"));
        }

        #[test]
        fn test_not_visible() {
            let mut ui = ui(MockDriver::new());
            ui.element_not_visible(&login::ERROR).unwrap();
            assert!(ui.element_not_visible(&login::USERNAME).unwrap_err().is_timeout());
        }

        #[test]
        fn test_immediate_probes() {
            let mut ui = logged_in();
            assert!(ui.is_visible_now(&header::MENU_BUTTON).unwrap());
            assert!(!ui.is_visible_now(&header::LOGOUT).unwrap());
            assert!(ui.is_present_now(&header::LOGOUT).unwrap());
            assert!(!ui.is_present_now(&header::CART_BADGE).unwrap());
        }
    }

    mod action_tests {
        use super::*;

        #[test]
        fn test_fill_replaces_existing_value() {
            let mut ui = ui(MockDriver::new());
            ui.fill(&login::USERNAME, "first").unwrap();
            ui.fill(&login::USERNAME, "second").unwrap();
            assert_eq!(
                ui.attribute(&login::USERNAME, "value").unwrap().as_deref(),
                Some("second")
            );
            ui.clear(&login::USERNAME).unwrap();
            assert_eq!(
                ui.attribute(&login::USERNAME, "value").unwrap().as_deref(),
                Some("")
            );
        }

        #[test]
        fn test_click_each_survives_reordering() {
            let mut ui = logged_in();
            let buttons = ui.elements_visible(&inventory::ADD).unwrap();
            ui.click_each(&buttons).unwrap();
            let removes = ui.elements_visible(&inventory::REMOVE).unwrap();
            assert_eq!(removes.len(), 6);
            ui.click_each(&removes).unwrap();
            ui.element_not_visible(&header::CART_BADGE).unwrap();
        }

        #[test]
        fn test_stale_handle_is_reported() {
            let mut ui = logged_in();
            let add = ui.element_visible(&inventory::ADD).unwrap();
            ui.click_element(&add).unwrap();
            assert!(ui.click_element(&add).unwrap_err().is_stale());
        }

        #[test]
        fn test_highlighted_actions_still_act() {
            let mut ui = ui(MockDriver::new()).with_highlight(true);
            ui.fill(&login::USERNAME, "standard_user").unwrap();
            ui.fill(&login::PASSWORD, "secret_sauce").unwrap();
            ui.click(&login::BUTTON).unwrap();
            assert_eq!(ui.text(&header::TITLE).unwrap(), "Products");
        }

        #[test]
        fn test_closed_driver_rejects_actions() {
            let mut ui = ui(MockDriver::new());
            ui.close().unwrap();
            ui.close().unwrap();
            assert!(ui.current_url().is_err());
        }

        #[test]
        fn test_gestures_and_scroll() {
            let mut ui = logged_in();
            ui.double_click(&inventory::ITEM_NAME).unwrap();
            ui.right_click(&inventory::ITEM_NAME).unwrap();
            ui.hover(&header::CART_LINK).unwrap();
            ui.drag_by_offset(&inventory::ITEM, 10.0, 0.0).unwrap();
            ui.drag_to(&inventory::ITEM, &header::CART_LINK).unwrap();
            ui.scroll_to_bottom().unwrap();
            assert_eq!(ui.current_url().unwrap(), "https://www.saucedemo.com/inventory.html");
        }
    }

    mod read_tests {
        use super::*;

        #[test]
        fn test_texts_and_find_by_text() {
            let mut ui = logged_in();
            let names = ui.elements_visible(&inventory::ITEM_NAME).unwrap();
            let texts = ui.texts(&names).unwrap();
            assert_eq!(texts.len(), 6);
            let found = Interaction::find_by_text(&names, "sauce labs ONESIE").unwrap();
            assert_eq!(found.text, "Sauce Labs Onesie");
            assert!(Interaction::find_by_text(&names, "nothing").is_none());
        }

        #[test]
        fn test_attributes() {
            let mut ui = logged_in();
            let links = ui.elements_present(&inventory::ITEM_LINK).unwrap();
            let ids = ui.attributes(&links, "id").unwrap();
            assert_eq!(ids[0].as_deref(), Some("item_4_title_link"));
        }

        #[test]
        fn test_text_of_title() {
            let mut ui = logged_in();
            assert_eq!(ui.text(&header::TITLE).unwrap(), "Products");
        }
    }
}

use super::{Header, PageObject};
use crate::data::CheckoutInfo;
use crate::interaction::Interaction;
use crate::locator::Locator;
use crate::locators::{checkout, header};
use crate::result::ProbeResult;
use crate::state::StoreState;

/// Checkout information form
#[derive(Debug)]
pub struct CheckoutPage<'a> {
    ui: &'a mut Interaction,
}

impl PageObject for CheckoutPage<'_> {
    const STATE: StoreState = StoreState::Checkout;

    fn ui(&mut self) -> &mut Interaction {
        self.ui
    }
}

impl<'a> CheckoutPage<'a> {
    /// Borrow the session's interaction layer
    pub fn new(ui: &'a mut Interaction) -> Self {
        Self { ui }
    }

    /// Shared header
    pub fn header(&mut self) -> Header<'_> {
        Header::new(self.ui)
    }

    pub fn title(&mut self) -> ProbeResult<String> {
        self.ui.text(&header::TITLE)
    }

    pub fn enter_first_name(&mut self, value: &str) -> ProbeResult<()> {
        tracing::info!(first_name = value, "entering first name");
        self.ui.fill(&checkout::FIRST_NAME, value)
    }

    pub fn enter_last_name(&mut self, value: &str) -> ProbeResult<()> {
        tracing::info!(last_name = value, "entering last name");
        self.ui.fill(&checkout::LAST_NAME, value)
    }

    pub fn enter_zip_code(&mut self, value: &str) -> ProbeResult<()> {
        tracing::info!(zip_code = value, "entering zip code");
        self.ui.fill(&checkout::ZIP_CODE, value)
    }

    /// Fill all three fields
    pub fn fill_form(&mut self, info: &CheckoutInfo) -> ProbeResult<()> {
        self.enter_first_name(&info.first_name)?;
        self.enter_last_name(&info.last_name)?;
        self.enter_zip_code(&info.zip_code)
    }

    pub fn clear_first_name(&mut self) -> ProbeResult<()> {
        self.ui.clear(&checkout::FIRST_NAME)
    }

    pub fn clear_last_name(&mut self) -> ProbeResult<()> {
        self.ui.clear(&checkout::LAST_NAME)
    }

    pub fn clear_zip_code(&mut self) -> ProbeResult<()> {
        self.ui.clear(&checkout::ZIP_CODE)
    }

    fn value(&mut self, locator: &Locator) -> ProbeResult<String> {
        Ok(self.ui.attribute(locator, "value")?.unwrap_or_default())
    }

    /// Current values of the three fields
    pub fn form_values(&mut self) -> ProbeResult<CheckoutInfo> {
        Ok(CheckoutInfo {
            first_name: self.value(&checkout::FIRST_NAME)?,
            last_name: self.value(&checkout::LAST_NAME)?,
            zip_code: self.value(&checkout::ZIP_CODE)?,
        })
    }

    /// Wait until the three fields and both buttons are visible
    pub fn wait_for_form(&mut self) -> ProbeResult<()> {
        for locator in [
            &checkout::FIRST_NAME,
            &checkout::LAST_NAME,
            &checkout::ZIP_CODE,
            &checkout::CANCEL,
            &checkout::CONTINUE,
        ] {
            self.ui.element_visible(locator)?;
        }
        Ok(())
    }

    pub fn error_message(&mut self) -> ProbeResult<String> {
        self.ui.text(&checkout::ERROR)
    }

    pub fn close_error(&mut self) -> ProbeResult<()> {
        tracing::info!("closing checkout error");
        self.ui.click(&checkout::ERROR_CLOSE)
    }

    /// Wait until no error banner is shown
    pub fn error_absent(&mut self) -> ProbeResult<()> {
        self.ui.element_not_visible(&checkout::ERROR)
    }

    /// Back to the cart
    pub fn cancel(&mut self) -> ProbeResult<()> {
        tracing::info!("cancelling checkout");
        self.ui.click(&checkout::CANCEL)
    }

    /// Submit the form
    pub fn click_continue(&mut self) -> ProbeResult<()> {
        tracing::info!("continuing checkout");
        self.ui.click(&checkout::CONTINUE)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::data::{errors, DataGenerator};
    use crate::pages::{testing, CartPage};

    fn on_checkout() -> Interaction {
        let mut ui = testing::logged_in();
        Header::new(&mut ui).open_cart().unwrap();
        CartPage::new(&mut ui).checkout().unwrap();
        ui
    }

    #[test]
    fn test_fill_and_read_back() {
        let mut ui = on_checkout();
        let info = DataGenerator::seeded(5).checkout_info();
        let mut page = CheckoutPage::new(&mut ui);
        assert!(page.is_loaded().unwrap());
        page.wait_for_form().unwrap();
        page.fill_form(&info).unwrap();
        assert_eq!(page.form_values().unwrap(), info);
        page.clear_zip_code().unwrap();
        assert!(page.form_values().unwrap().zip_code.is_empty());
        page.enter_zip_code(&info.zip_code).unwrap();
        page.click_continue().unwrap();
        assert_eq!(page.header().title().unwrap(), "Checkout: Overview");
    }

    #[test]
    fn test_missing_last_name() {
        let mut ui = on_checkout();
        let mut page = CheckoutPage::new(&mut ui);
        page.enter_first_name("Ada").unwrap();
        page.enter_zip_code("10001").unwrap();
        page.click_continue().unwrap();
        assert_eq!(page.error_message().unwrap(), errors::MANDATORY_LAST_NAME);
        page.close_error().unwrap();
        page.error_absent().unwrap();
    }

    #[test]
    fn test_cleared_fields_are_mandatory() {
        let mut ui = on_checkout();
        let mut page = CheckoutPage::new(&mut ui);
        page.fill_form(&DataGenerator::seeded(1).checkout_info()).unwrap();
        page.clear_first_name().unwrap();
        page.clear_last_name().unwrap();
        page.click_continue().unwrap();
        assert_eq!(page.error_message().unwrap(), errors::MANDATORY_FIRST_NAME);
    }

    #[test]
    fn test_cancel_returns_to_cart() {
        let mut ui = on_checkout();
        CheckoutPage::new(&mut ui).cancel().unwrap();
        assert!(CartPage::new(&mut ui).is_loaded().unwrap());
    }
}

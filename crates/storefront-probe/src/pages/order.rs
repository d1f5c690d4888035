use super::{Header, PageObject};
use crate::interaction::Interaction;
use crate::locators::{header, order};
use crate::result::ProbeResult;
use crate::state::StoreState;

/// Order confirmation
#[derive(Debug)]
pub struct OrderPage<'a> {
    ui: &'a mut Interaction,
}

impl PageObject for OrderPage<'_> {
    const STATE: StoreState = StoreState::OrderComplete;

    fn ui(&mut self) -> &mut Interaction {
        self.ui
    }
}

impl<'a> OrderPage<'a> {
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

    pub fn subtitle(&mut self) -> ProbeResult<String> {
        self.ui.text(&order::SUBTITLE)
    }

    pub fn text(&mut self) -> ProbeResult<String> {
        self.ui.text(&order::TEXT)
    }

    pub fn back_to_products(&mut self) -> ProbeResult<()> {
        tracing::info!("going back to products");
        self.ui.click(&order::BACK)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::data;
    use crate::pages::testing;

    #[test]
    fn test_confirmation_copy() {
        let mut ui = testing::logged_in();
        let url = ui.urls().order();
        ui.open(&url).unwrap();
        let mut page = OrderPage::new(&mut ui);
        assert!(page.is_loaded().unwrap());
        assert_eq!(page.title().unwrap(), data::titles::ORDER);
        assert_eq!(page.subtitle().unwrap(), data::order::SUBTITLE);
        assert_eq!(page.text().unwrap(), data::order::TEXT);
        page.back_to_products().unwrap();
        assert_eq!(page.header().title().unwrap(), data::titles::PRODUCTS);
    }
}

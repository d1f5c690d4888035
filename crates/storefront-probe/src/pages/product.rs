use super::{Header, PageObject};
use crate::interaction::Interaction;
use crate::locators::product;
use crate::pricing::parse_price;
use crate::result::ProbeResult;
use crate::state::StoreState;

/// Product detail page
#[derive(Debug)]
pub struct ProductPage<'a> {
    ui: &'a mut Interaction,
}

impl PageObject for ProductPage<'_> {
    const STATE: StoreState = StoreState::Product;

    fn ui(&mut self) -> &mut Interaction {
        self.ui
    }
}

impl<'a> ProductPage<'a> {
    /// Borrow the session's interaction layer
    pub fn new(ui: &'a mut Interaction) -> Self {
        Self { ui }
    }

    /// Shared header
    pub fn header(&mut self) -> Header<'_> {
        Header::new(self.ui)
    }

    pub fn name(&mut self) -> ProbeResult<String> {
        self.ui.text(&product::NAME)
    }

    pub fn description(&mut self) -> ProbeResult<String> {
        self.ui.text(&product::DESC)
    }

    pub fn price(&mut self) -> ProbeResult<f64> {
        parse_price(&self.ui.text(&product::PRICE)?)
    }

    pub fn add_to_cart(&mut self) -> ProbeResult<()> {
        tracing::info!("adding product to cart");
        self.ui.click(&product::ADD)
    }

    pub fn remove_from_cart(&mut self) -> ProbeResult<()> {
        tracing::info!("removing product from cart");
        self.ui.click(&product::REMOVE)
    }

    pub fn back_to_products(&mut self) -> ProbeResult<()> {
        tracing::info!("going back to products");
        self.ui.click(&product::BACK)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pages::testing;

    #[test]
    fn test_detail_and_cart_toggle() {
        let mut ui = testing::logged_in();
        let url = ui.urls().product(1);
        ui.open(&url).unwrap();
        let mut page = ProductPage::new(&mut ui);
        assert!(page.is_loaded().unwrap());
        assert_eq!(page.name().unwrap(), "Sauce Labs Bolt T-Shirt");
        assert_eq!(page.price().unwrap(), 15.99);
        assert!(page.description().unwrap().contains("bolt T-shirt"));
        page.add_to_cart().unwrap();
        assert_eq!(page.header().cart_count().unwrap(), 1);
        page.remove_from_cart().unwrap();
        page.header().badge_absent().unwrap();
        page.back_to_products().unwrap();
        assert_eq!(page.header().title().unwrap(), "Products");
    }
}

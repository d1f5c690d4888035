use super::{Header, PageObject};
use crate::interaction::Interaction;
use crate::locators::{cart, header};
use crate::pricing::{parse_price, PriceTriple};
use crate::result::ProbeResult;
use crate::state::StoreState;

/// Cart
#[derive(Debug)]
pub struct CartPage<'a> {
    ui: &'a mut Interaction,
}

impl PageObject for CartPage<'_> {
    const STATE: StoreState = StoreState::Cart;

    fn ui(&mut self) -> &mut Interaction {
        self.ui
    }
}

impl<'a> CartPage<'a> {
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

    /// Number of line items once the cart has rendered; zero for an empty cart
    pub fn item_count(&mut self) -> ProbeResult<usize> {
        self.ui.element_visible(&cart::CHECKOUT)?;
        self.ui.count_now(&cart::ITEM)
    }

    pub fn names(&mut self) -> ProbeResult<Vec<String>> {
        let elements = self.ui.elements_visible(&cart::ITEM_NAME)?;
        self.ui.texts(&elements)
    }

    pub fn descriptions(&mut self) -> ProbeResult<Vec<String>> {
        let elements = self.ui.elements_visible(&cart::ITEM_DESC)?;
        self.ui.texts(&elements)
    }

    pub fn prices(&mut self) -> ProbeResult<Vec<f64>> {
        let elements = self.ui.elements_visible(&cart::ITEM_PRICE)?;
        self.ui
            .texts(&elements)?
            .iter()
            .map(|t| parse_price(t))
            .collect()
    }

    /// Click every "Remove" button
    pub fn remove_all(&mut self) -> ProbeResult<()> {
        tracing::info!("removing all items from cart");
        let buttons = self.ui.elements_visible(&cart::REMOVE)?;
        self.ui.click_each(&buttons)
    }

    /// Wait until no line item is rendered
    pub fn wait_until_empty(&mut self) -> ProbeResult<()> {
        self.ui.element_not_visible(&cart::ITEM)
    }

    pub fn continue_shopping(&mut self) -> ProbeResult<()> {
        tracing::info!("continuing shopping");
        self.ui.click(&cart::CONTINUE_SHOPPING)
    }

    pub fn checkout(&mut self) -> ProbeResult<()> {
        tracing::info!("proceeding to checkout");
        self.ui.click(&cart::CHECKOUT)
    }

    /// Subtotal, tax and total derived from the line-item prices
    pub fn price_triple(&mut self) -> ProbeResult<PriceTriple> {
        let triple = PriceTriple::from_line_items(&self.prices()?);
        tracing::debug!(?triple, "computed cart prices");
        Ok(triple)
    }
}

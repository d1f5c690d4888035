use super::{Header, PageObject};
use crate::interaction::Interaction;
use crate::locators::{header, overview};
use crate::pricing::{parse_price, PriceTriple};
use crate::result::ProbeResult;
use crate::state::StoreState;

/// Order summary
#[derive(Debug)]
pub struct OverviewPage<'a> {
    ui: &'a mut Interaction,
}

impl PageObject for OverviewPage<'_> {
    const STATE: StoreState = StoreState::Overview;

    fn ui(&mut self) -> &mut Interaction {
        self.ui
    }
}

impl<'a> OverviewPage<'a> {
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

    /// Line-item prices of the order
    pub fn prices(&mut self) -> ProbeResult<Vec<f64>> {
        let elements = self.ui.elements_visible(&overview::ITEM_PRICE)?;
        self.ui
            .texts(&elements)?
            .iter()
            .map(|t| parse_price(t))
            .collect()
    }

    /// Subtotal, tax and total derived from the line-item prices
    pub fn computed_triple(&mut self) -> ProbeResult<PriceTriple> {
        let triple = PriceTriple::from_line_items(&self.prices()?);
        tracing::debug!(?triple, "computed overview prices");
        Ok(triple)
    }

    /// Subtotal, tax and total as rendered in the summary labels
    pub fn observed_triple(&mut self) -> ProbeResult<PriceTriple> {
        let subtotal = self.ui.text(&overview::SUBTOTAL)?;
        let tax = self.ui.text(&overview::TAX)?;
        let total = self.ui.text(&overview::TOTAL)?;
        let triple = PriceTriple::from_labels(&subtotal, &tax, &total)?;
        tracing::debug!(?triple, "observed overview prices");
        Ok(triple)
    }

    /// Back to the product listing
    pub fn cancel(&mut self) -> ProbeResult<()> {
        tracing::info!("cancelling order");
        self.ui.click(&overview::CANCEL)
    }

    /// Place the order
    pub fn finish(&mut self) -> ProbeResult<()> {
        tracing::info!("finishing order");
        self.ui.click(&overview::FINISH)
    }
}

use super::{Header, PageObject};
use crate::data::DataGenerator;
use crate::driver::ElementHandle;
use crate::interaction::Interaction;
use crate::locator::Locator;
use crate::locators::{header, inventory};
use crate::pricing::parse_price;
use crate::result::{ProbeError, ProbeResult};
use crate::state::StoreState;
use serde::Serialize;

/// Sort order of the product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Name (A to Z)
    #[default]
    NameAsc,
    /// Name (Z to A)
    NameDesc,
    /// Price (low to high)
    PriceAsc,
    /// Price (high to low)
    PriceDesc,
}

impl SortOrder {
    /// Every order, in dropdown order
    pub const ALL: [Self; 4] = [Self::NameAsc, Self::NameDesc, Self::PriceAsc, Self::PriceDesc];

    /// `<option>` value of the sort dropdown
    #[must_use]
    pub const fn value(&self) -> &'static str {
        match self {
            Self::NameAsc => "az",
            Self::NameDesc => "za",
            Self::PriceAsc => "lohi",
            Self::PriceDesc => "hilo",
        }
    }

    /// Visible label of the option
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::NameAsc => "Name (A to Z)",
            Self::NameDesc => "Name (Z to A)",
            Self::PriceAsc => "Price (low to high)",
            Self::PriceDesc => "Price (high to low)",
        }
    }

    /// Locator of the option
    #[must_use]
    pub const fn option(&self) -> &'static Locator {
        match self {
            Self::NameAsc => &inventory::SORT_AZ,
            Self::NameDesc => &inventory::SORT_ZA,
            Self::PriceAsc => &inventory::SORT_LOHI,
            Self::PriceDesc => &inventory::SORT_HILO,
        }
    }
}

const ADD_LABEL: &str = "Add to cart";
const REMOVE_LABEL: &str = "Remove";

/// Product listing
#[derive(Debug)]
pub struct InventoryPage<'a> {
    ui: &'a mut Interaction,
    data: &'a mut DataGenerator,
}

impl PageObject for InventoryPage<'_> {
    const STATE: StoreState = StoreState::Inventory;

    fn ui(&mut self) -> &mut Interaction {
        self.ui
    }
}

impl<'a> InventoryPage<'a> {
    /// Borrow the session's interaction layer and data generator
    pub fn new(ui: &'a mut Interaction, data: &'a mut DataGenerator) -> Self {
        Self { ui, data }
    }

    /// Shared header
    pub fn header(&mut self) -> Header<'_> {
        Header::new(self.ui)
    }

    /// Secondary title
    pub fn title(&mut self) -> ProbeResult<String> {
        self.ui.text(&header::TITLE)
    }

    /// Number of product cards
    pub fn product_count(&mut self) -> ProbeResult<usize> {
        Ok(self.ui.elements_visible(&inventory::ITEM)?.len())
    }

    /// Product names in listing order
    pub fn names(&mut self) -> ProbeResult<Vec<String>> {
        let elements = self.ui.elements_visible(&inventory::ITEM_NAME)?;
        self.ui.texts(&elements)
    }

    /// Product descriptions in listing order
    pub fn descriptions(&mut self) -> ProbeResult<Vec<String>> {
        let elements = self.ui.elements_visible(&inventory::ITEM_DESC)?;
        self.ui.texts(&elements)
    }

    /// Product prices in listing order
    pub fn prices(&mut self) -> ProbeResult<Vec<f64>> {
        let elements = self.ui.elements_visible(&inventory::ITEM_PRICE)?;
        self.ui
            .texts(&elements)?
            .iter()
            .map(|t| parse_price(t))
            .collect()
    }

    /// Detail page URLs in listing order
    ///
    /// Built from the `item_<id>_title_link` ids of the title links.
    pub fn product_urls(&mut self) -> ProbeResult<Vec<String>> {
        let links = self.ui.elements_present(&inventory::ITEM_LINK)?;
        let ids = self.ui.attributes(&links, "id")?;
        ids.into_iter()
            .map(|id| {
                let id = id.unwrap_or_default();
                product_id(&id)
                    .map(|n| self.ui.urls().product(n))
                    .ok_or_else(|| {
                        ProbeError::mismatch("product link id", "item_<id>_title_link", id)
                    })
            })
            .collect()
    }

    /// Add every product to the cart
    pub fn add_all(&mut self) -> ProbeResult<()> {
        tracing::info!("adding all products to cart");
        let buttons = self.ui.elements_visible(&inventory::ADD)?;
        self.ui.click_each(&buttons)
    }

    /// Remove every product from the cart
    pub fn remove_all(&mut self) -> ProbeResult<()> {
        tracing::info!("removing all products from cart");
        let buttons = self.ui.elements_visible(&inventory::REMOVE)?;
        self.ui.click_each(&buttons)
    }

    /// Add the product named `name` to the cart
    pub fn add_product(&mut self, name: &str) -> ProbeResult<()> {
        tracing::info!(product = name, "adding product to cart");
        let button = self.card_button(name)?;
        if button.text != ADD_LABEL {
            return Err(ProbeError::mismatch(
                format!("cart button of {name}"),
                ADD_LABEL,
                &button.text,
            ));
        }
        self.ui.click_element(&button)
    }

    /// Remove the product named `name` from the cart
    pub fn remove_product(&mut self, name: &str) -> ProbeResult<()> {
        tracing::info!(product = name, "removing product from cart");
        let button = self.card_button(name)?;
        if button.text != REMOVE_LABEL {
            return Err(ProbeError::mismatch(
                format!("cart button of {name}"),
                REMOVE_LABEL,
                &button.text,
            ));
        }
        self.ui.click_element(&button)
    }

    /// Cart button on the card of `name`
    fn card_button(&mut self, name: &str) -> ProbeResult<ElementHandle> {
        let names = self.ui.elements_visible(&inventory::ITEM_NAME)?;
        let index = Interaction::find_by_text(&names, name)
            .map(|e| e.index)
            .ok_or_else(|| not_listed(name))?;
        self.ui
            .elements_visible(&inventory::ITEM_BUTTON)?
            .into_iter()
            .nth(index)
            .ok_or_else(|| not_listed(name))
    }

    /// Open a uniformly picked product by URL and return the URL
    pub fn open_random_product(&mut self) -> ProbeResult<String> {
        let urls = self.product_urls()?;
        let index = self
            .data
            .pick_index(urls.len())
            .ok_or_else(|| ProbeError::ElementNotFound {
                locator: inventory::ITEM_LINK.name().to_string(),
            })?;
        let url = urls[index].clone();
        tracing::info!(url = %url, "opening random product");
        self.ui.open(&url)?;
        Ok(url)
    }

    /// Open the product named `name` by clicking its title
    pub fn open_product(&mut self, name: &str) -> ProbeResult<()> {
        tracing::info!(product = name, "opening product");
        let names = self.ui.elements_visible(&inventory::ITEM_NAME)?;
        let element = Interaction::find_by_text(&names, name)
            .cloned()
            .ok_or_else(|| not_listed(name))?;
        self.ui.click_element(&element)
    }

    /// Pick a sort order from the dropdown
    pub fn sort(&mut self, order: SortOrder) -> ProbeResult<()> {
        tracing::info!(order = order.label(), "sorting products");
        self.ui.click(&inventory::SORT_MENU)?;
        self.ui.click(order.option())
    }
}

fn not_listed(name: &str) -> ProbeError {
    ProbeError::ElementNotFound {
        locator: format!("{} '{name}'", inventory::ITEM_NAME.name()),
    }
}

/// Product id inside an `item_<id>_title_link` element id
fn product_id(element_id: &str) -> Option<u32> {
    element_id
        .strip_prefix("item_")?
        .strip_suffix("_title_link")?
        .parse()
        .ok()
}

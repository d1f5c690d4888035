//! Locator registry for every storefront page.
//!
//! Locators are grouped by page. The `header` group covers the chrome shared by
//! every logged-in page (title, burger menu, cart icon and badge).

use crate::locator::Locator;

/// Login form
pub mod login {
    use super::Locator;

    /// Username input
    pub const USERNAME: Locator = Locator::xpath("login.username", "//input[@id='user-name']");
    /// Password input
    pub const PASSWORD: Locator = Locator::xpath("login.password", "//input[@id='password']");
    /// Submit button
    pub const BUTTON: Locator = Locator::xpath("login.button", "//input[@id='login-button']");
    /// Error banner
    pub const ERROR: Locator = Locator::xpath("login.error", "//h3[@data-test='error']");
    /// Close button inside the error banner
    pub const ERROR_CLOSE: Locator = Locator::xpath(
        "login.error_close",
        "//div[@id='login_button_container']/div/form/div[3]/h3/button",
    );

    /// Every login locator
    pub const ALL: &[Locator] = &[USERNAME, PASSWORD, BUTTON, ERROR, ERROR_CLOSE];
}

/// Shared header and side menu
pub mod header {
    use super::Locator;

    /// Secondary header title ("Products", "Your Cart", ...)
    pub const TITLE: Locator =
        Locator::xpath("header.title", "//div[@id='header_container']/div[2]/span");
    /// Burger menu button
    pub const MENU_BUTTON: Locator =
        Locator::xpath("header.menu_button", "//button[@id='react-burger-menu-btn']");
    /// Links inside the opened side menu
    pub const MENU_LINKS: Locator = Locator::xpath(
        "header.menu_links",
        "//div[@id='menu_button_container']//nav//a[contains(@class,'bm-item')]",
    );
    /// "All Items" side menu link
    pub const ALL_ITEMS: Locator =
        Locator::xpath("header.all_items", "//a[@id='inventory_sidebar_link']");
    /// "Logout" side menu link
    pub const LOGOUT: Locator = Locator::xpath("header.logout", "//a[@id='logout_sidebar_link']");
    /// "Reset App State" side menu link
    pub const RESET: Locator = Locator::xpath("header.reset", "//a[@id='reset_sidebar_link']");
    /// Cart icon link
    pub const CART_LINK: Locator =
        Locator::xpath("header.cart_link", "//div[@id='shopping_cart_container']//a");
    /// Item count badge on the cart icon
    pub const CART_BADGE: Locator = Locator::xpath(
        "header.cart_badge",
        "//div[@id='shopping_cart_container']//span[contains(@class,'shopping_cart_badge')]",
    );

    /// Every header locator
    pub const ALL: &[Locator] = &[
        TITLE,
        MENU_BUTTON,
        MENU_LINKS,
        ALL_ITEMS,
        LOGOUT,
        RESET,
        CART_LINK,
        CART_BADGE,
    ];
}

/// Product listing
pub mod inventory {
    use super::Locator;

    /// Product card
    pub const ITEM: Locator = Locator::xpath("inventory.item", "//div[@class='inventory_item']");
    /// Product title link, id `item_<n>_title_link`
    pub const ITEM_LINK: Locator = Locator::xpath(
        "inventory.item_link",
        "//div[@class='inventory_list']//div[@class='inventory_item']//div[@class='inventory_item_label']//a[contains(@id,'title_link')]",
    );
    /// Product name
    pub const ITEM_NAME: Locator = Locator::xpath(
        "inventory.item_name",
        "//div[@class='inventory_list']//div[@class='inventory_item']//div[@class='inventory_item_label']//div[contains(@class,'inventory_item_name')]",
    );
    /// Product description
    pub const ITEM_DESC: Locator = Locator::xpath(
        "inventory.item_desc",
        "//div[@class='inventory_list']//div[@class='inventory_item']//div[@class='inventory_item_label']//div[@class='inventory_item_desc']",
    );
    /// Product price, rendered as `$29.99`
    pub const ITEM_PRICE: Locator = Locator::xpath(
        "inventory.item_price",
        "//div[@class='inventory_list']//div[@class='inventory_item']//div[contains(@class,'pricebar')]//div[contains(@class,'inventory_item_price')]",
    );
    /// The add/remove button of each card, one per product in listing order
    pub const ITEM_BUTTON: Locator = Locator::xpath(
        "inventory.item_button",
        "//div[@class='inventory_list']//div[@class='inventory_item']//div[contains(@class,'pricebar')]//button",
    );
    /// "Add to cart" buttons
    pub const ADD: Locator = Locator::xpath(
        "inventory.add",
        "//div[@class='inventory_list']//div[@class='inventory_item']//div[contains(@class,'pricebar')]//button[contains(@data-test,'add-to-cart')]",
    );
    /// "Remove" buttons
    pub const REMOVE: Locator = Locator::xpath(
        "inventory.remove",
        "//div[@class='inventory_list']//div[@class='inventory_item']//div[contains(@class,'pricebar')]//button[contains(@data-test,'remove')]",
    );
    /// Sort dropdown
    pub const SORT_MENU: Locator = Locator::xpath(
        "inventory.sort_menu",
        "//div[@id='header_container']/div[2]/div/span/select",
    );
    /// Name (A to Z) option
    pub const SORT_AZ: Locator = Locator::xpath(
        "inventory.sort_az",
        "//div[@id='header_container']/div[2]/div/span/select/option[@value='az']",
    );
    /// Name (Z to A) option
    pub const SORT_ZA: Locator = Locator::xpath(
        "inventory.sort_za",
        "//div[@id='header_container']/div[2]/div/span/select/option[@value='za']",
    );
    /// Price (low to high) option
    pub const SORT_LOHI: Locator = Locator::xpath(
        "inventory.sort_lohi",
        "//div[@id='header_container']/div[2]/div/span/select/option[@value='lohi']",
    );
    /// Price (high to low) option
    pub const SORT_HILO: Locator = Locator::xpath(
        "inventory.sort_hilo",
        "//div[@id='header_container']/div[2]/div/span/select/option[@value='hilo']",
    );

    /// Every inventory locator
    pub const ALL: &[Locator] = &[
        ITEM,
        ITEM_LINK,
        ITEM_NAME,
        ITEM_DESC,
        ITEM_PRICE,
        ITEM_BUTTON,
        ADD,
        REMOVE,
        SORT_MENU,
        SORT_AZ,
        SORT_ZA,
        SORT_LOHI,
        SORT_HILO,
    ];
}

/// Product detail page
pub mod product {
    use super::Locator;

    pub const NAME: Locator = Locator::xpath(
        "product.name",
        "//div[@id='inventory_item_container']//div[contains(@class,'inventory_details_name')]",
    );
    pub const DESC: Locator = Locator::xpath(
        "product.desc",
        "//div[@id='inventory_item_container']//div[contains(@class,'inventory_details_desc')]",
    );
    pub const PRICE: Locator = Locator::xpath(
        "product.price",
        "//div[@id='inventory_item_container']//div[contains(@class,'inventory_details_price')]",
    );
    pub const ADD: Locator = Locator::xpath(
        "product.add",
        "//div[@id='inventory_item_container']//button[contains(@data-test,'add-to-cart')]",
    );
    pub const REMOVE: Locator = Locator::xpath(
        "product.remove",
        "//div[@id='inventory_item_container']//button[contains(@data-test,'remove')]",
    );
    pub const BACK: Locator = Locator::xpath("product.back", "//button[@id='back-to-products']");

    /// Every product locator
    pub const ALL: &[Locator] = &[NAME, DESC, PRICE, ADD, REMOVE, BACK];
}

/// Cart page
pub mod cart {
    use super::Locator;

    pub const ITEM: Locator = Locator::xpath("cart.item", "//div[@class='cart_item']");
    pub const ITEM_NAME: Locator = Locator::xpath(
        "cart.item_name",
        "//div[@class='cart_list']//div[@class='cart_item']//div[@class='cart_item_label']//div[contains(@class,'inventory_item_name')]",
    );
    pub const ITEM_DESC: Locator = Locator::xpath(
        "cart.item_desc",
        "//div[@class='cart_list']//div[@class='cart_item']//div[@class='cart_item_label']//div[contains(@class,'inventory_item_desc')]",
    );
    pub const ITEM_PRICE: Locator = Locator::xpath(
        "cart.item_price",
        "//div[@class='cart_list']//div[@class='cart_item']//div[@class='cart_item_label']//div[@class='item_pricebar']//div[contains(@class,'inventory_item_price')]",
    );
    pub const REMOVE: Locator = Locator::xpath(
        "cart.remove",
        "//div[@class='cart_list']//div[@class='cart_item']//div[@class='item_pricebar']//button[contains(@data-test,'remove')]",
    );
    pub const CONTINUE_SHOPPING: Locator =
        Locator::xpath("cart.continue_shopping", "//button[@id='continue-shopping']");
    pub const CHECKOUT: Locator = Locator::xpath("cart.checkout", "//button[@id='checkout']");

    /// Every cart locator
    pub const ALL: &[Locator] = &[
        ITEM,
        ITEM_NAME,
        ITEM_DESC,
        ITEM_PRICE,
        REMOVE,
        CONTINUE_SHOPPING,
        CHECKOUT,
    ];
}

/// Checkout information form
pub mod checkout {
    use super::Locator;

    pub const FIRST_NAME: Locator =
        Locator::xpath("checkout.first_name", "//input[@data-test='firstName']");
    pub const LAST_NAME: Locator =
        Locator::xpath("checkout.last_name", "//input[@data-test='lastName']");
    pub const ZIP_CODE: Locator =
        Locator::xpath("checkout.zip_code", "//input[@data-test='postalCode']");
    pub const CANCEL: Locator = Locator::xpath("checkout.cancel", "//button[@id='cancel']");
    pub const CONTINUE: Locator = Locator::xpath("checkout.continue", "//input[@id='continue']");
    pub const ERROR: Locator = Locator::xpath("checkout.error", "//h3[@data-test='error']");
    pub const ERROR_CLOSE: Locator =
        Locator::xpath("checkout.error_close", "//h3[@data-test='error']/button");

    /// Every checkout locator
    pub const ALL: &[Locator] = &[
        FIRST_NAME,
        LAST_NAME,
        ZIP_CODE,
        CANCEL,
        CONTINUE,
        ERROR,
        ERROR_CLOSE,
    ];
}

/// Checkout overview (order summary)
pub mod overview {
    use super::Locator;

    pub const ITEM_PRICE: Locator = Locator::xpath(
        "overview.item_price",
        "//div[@class='cart_list']//div[@class='cart_item']//div[@class='cart_item_label']//div[@class='item_pricebar']//div[contains(@class,'inventory_item_price')]",
    );
    /// "Item total: $X"
    pub const SUBTOTAL: Locator = Locator::xpath(
        "overview.subtotal",
        "//div[@id='checkout_summary_container']//div[contains(@class,'summary_subtotal_label')]",
    );
    /// "Tax: $X"
    pub const TAX: Locator = Locator::xpath(
        "overview.tax",
        "//div[@id='checkout_summary_container']//div[contains(@class,'summary_tax_label')]",
    );
    /// "Total: $X"
    pub const TOTAL: Locator = Locator::xpath(
        "overview.total",
        "//div[@id='checkout_summary_container']//div[contains(@class,'summary_total_label')]",
    );
    pub const CANCEL: Locator = Locator::xpath("overview.cancel", "//button[@id='cancel']");
    pub const FINISH: Locator = Locator::xpath("overview.finish", "//button[@id='finish']");

    /// Every overview locator
    pub const ALL: &[Locator] = &[ITEM_PRICE, SUBTOTAL, TAX, TOTAL, CANCEL, FINISH];
}

/// Order confirmation
pub mod order {
    use super::Locator;

    pub const SUBTITLE: Locator = Locator::xpath(
        "order.subtitle",
        "//div[@id='checkout_complete_container']//h2[contains(@class,'complete-header')]",
    );
    pub const TEXT: Locator = Locator::xpath(
        "order.text",
        "//div[@id='checkout_complete_container']//div[contains(@class,'complete-text')]",
    );
    pub const BACK: Locator = Locator::xpath("order.back", "//button[@id='back-to-products']");

    /// Every order locator
    pub const ALL: &[Locator] = &[SUBTITLE, TEXT, BACK];
}

/// Page groups in navigation order
pub const GROUPS: &[(&str, &[Locator])] = &[
    ("login", login::ALL),
    ("header", header::ALL),
    ("inventory", inventory::ALL),
    ("product", product::ALL),
    ("cart", cart::ALL),
    ("checkout", checkout::ALL),
    ("overview", overview::ALL),
    ("order", order::ALL),
];

/// Locators of one page group, by group name
#[must_use]
pub fn group(name: &str) -> Option<&'static [Locator]> {
    GROUPS
        .iter()
        .find(|(group, _)| group.eq_ignore_ascii_case(name))
        .map(|(_, locators)| *locators)
}

/// Every registered locator
pub fn all() -> impl Iterator<Item = &'static Locator> {
    GROUPS.iter().flat_map(|(_, locators)| locators.iter())
}

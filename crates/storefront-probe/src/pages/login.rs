use super::PageObject;
use crate::data::Credentials;
use crate::interaction::Interaction;
use crate::locators::login;
use crate::result::ProbeResult;
use crate::state::StoreState;

/// Login form at the base URL
#[derive(Debug)]
pub struct LoginPage<'a> {
    ui: &'a mut Interaction,
}

impl PageObject for LoginPage<'_> {
    const STATE: StoreState = StoreState::LoggedOut;

    fn ui(&mut self) -> &mut Interaction {
        self.ui
    }
}

impl<'a> LoginPage<'a> {
    /// Borrow the session's interaction layer
    pub fn new(ui: &'a mut Interaction) -> Self {
        Self { ui }
    }

    /// Open the base URL
    pub fn open(&mut self) -> ProbeResult<()> {
        tracing::info!("opening login page");
        self.ui.open_base()
    }

    /// Type into the username field
    pub fn enter_username(&mut self, username: &str) -> ProbeResult<()> {
        tracing::info!(username, "entering username");
        self.ui.fill(&login::USERNAME, username)
    }

    /// Type into the password field
    pub fn enter_password(&mut self, password: &str) -> ProbeResult<()> {
        tracing::info!(password = "****", "entering password");
        self.ui.fill(&login::PASSWORD, password)
    }

    /// Click the login button
    pub fn click_login(&mut self) -> ProbeResult<()> {
        tracing::info!("clicking login button");
        self.ui.click(&login::BUTTON)
    }

    /// Fill both fields and submit
    pub fn login(&mut self, username: &str, password: &str) -> ProbeResult<()> {
        self.enter_username(username)?;
        self.enter_password(password)?;
        self.click_login()
    }

    /// [`LoginPage::login`] with a credential pair
    pub fn login_as(&mut self, credentials: &Credentials) -> ProbeResult<()> {
        self.login(credentials.username, credentials.password)
    }

    /// Empty the username field
    pub fn clear_username(&mut self) -> ProbeResult<()> {
        self.ui.clear(&login::USERNAME)
    }

    /// Empty the password field
    pub fn clear_password(&mut self) -> ProbeResult<()> {
        self.ui.clear(&login::PASSWORD)
    }

    /// Wait until the username, password and button are visible
    pub fn wait_for_form(&mut self) -> ProbeResult<()> {
        for locator in [&login::USERNAME, &login::PASSWORD, &login::BUTTON] {
            self.ui.element_visible(locator)?;
        }
        Ok(())
    }

    /// Text of the error banner
    pub fn error_message(&mut self) -> ProbeResult<String> {
        self.ui.text(&login::ERROR)
    }

    /// Dismiss the error banner
    pub fn close_error(&mut self) -> ProbeResult<()> {
        tracing::info!("closing login error");
        self.ui.click(&login::ERROR_CLOSE)
    }

    /// Wait until no error banner is shown
    pub fn error_absent(&mut self) -> ProbeResult<()> {
        self.ui.element_not_visible(&login::ERROR)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::data::{errors, users};
    use crate::pages::testing;

    #[test]
    fn test_login_reaches_inventory() {
        let mut ui = testing::logged_in();
        let mut page = LoginPage::new(&mut ui);
        assert!(!page.is_loaded().unwrap());
        assert_eq!(
            page.url().unwrap(),
            "https://www.saucedemo.com/inventory.html"
        );
    }

    #[test]
    fn test_wrong_credentials_then_close() {
        let mut ui = testing::ui();
        let mut page = LoginPage::new(&mut ui);
        page.open().unwrap();
        page.login_as(&users::WRONG).unwrap();
        assert_eq!(page.error_message().unwrap(), errors::WRONG_LOGIN);
        page.close_error().unwrap();
        page.error_absent().unwrap();
        assert!(page.is_loaded().unwrap());
    }

    #[test]
    fn test_cleared_password_is_mandatory() {
        let mut ui = testing::ui();
        let mut page = LoginPage::new(&mut ui);
        page.open().unwrap();
        page.wait_for_form().unwrap();
        page.enter_username("standard_user").unwrap();
        page.enter_password("secret_sauce").unwrap();
        page.clear_password().unwrap();
        page.click_login().unwrap();
        assert_eq!(page.error_message().unwrap(), errors::MANDATORY_PASSWORD);
        page.clear_username().unwrap();
        page.click_login().unwrap();
        assert_eq!(page.error_message().unwrap(), errors::MANDATORY_USERNAME);
    }

    #[test]
    fn test_page_name() {
        let mut ui = testing::ui();
        assert_eq!(LoginPage::new(&mut ui).page_name(), "login");
    }
}

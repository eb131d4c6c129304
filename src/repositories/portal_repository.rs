use std::time::Duration;

use scraper::{Html, Selector};
use tracing::info;

use crate::error::{BillsError, Result};
use crate::models::{Credentials, FormField};

// ASP.NET control ids on the portal's login page. The hidden-input set
// varies per session (viewstate tokens), these names do not.
const LOGIN_FORM_ID: &str = "Form1";
const LOGIN_BUTTON_FIELD: &str = "LoginControl1:OSLoginBN";
const LOGIN_BUTTON_VALUE: &str = "Login";
const USERNAME_FIELD: &str = "LoginControl1:OSUserNameTB";
const PASSWORD_FIELD: &str = "LoginControl1:OSPasswordTB";

// Where the portal should land us after a successful login.
const RETURN_URL: &str = "/OneStop/default.aspx";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Session-bound access to the billing portal. The login flow is cookie
/// based: the client must carry cookies from the initial GET through the
/// login POST and its redirect chain.
pub struct PortalRepository {
    client: reqwest::Client,
    login_url: String,
}

impl PortalRepository {
    pub fn new(login_url: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| BillsError::Configuration(format!("could not build HTTP client: {e}")))?;
        Ok(Self { client, login_url })
    }

    /// Logs in and returns the body of the post-login dashboard page. Two
    /// requests: a GET to harvest the hidden form fields, then the login
    /// POST, whose redirect lands on the account dashboard.
    pub async fn login(&self, credentials: &Credentials) -> Result<String> {
        let login_page = self
            .client
            .get(&self.login_url)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| BillsError::authentication("login page GET", e))?
            .text()
            .await
            .map_err(|e| BillsError::authentication("login page body read", e))?;

        let fields = login_form_fields(&login_page, credentials)?;
        info!("submitting login with {} form fields", fields.len());

        let pairs: Vec<(&str, &str)> = fields
            .iter()
            .map(|f| (f.name.as_str(), f.value.as_str()))
            .collect();

        let dashboard = self
            .client
            .post(&self.login_url)
            .query(&[("ReturnUrl", RETURN_URL)])
            .form(&pairs)
            .send()
            .await
            .and_then(|res| res.error_for_status())
            .map_err(|e| BillsError::authentication("login POST", e))?
            .text()
            .await
            .map_err(|e| BillsError::authentication("dashboard body read", e))?;

        Ok(dashboard)
    }
}

/// Builds the login POST body from the login page: every hidden input of
/// the login form, plus the fixed login-button field, plus the credentials.
/// Pure so the form contract is testable without a server.
pub fn login_form_fields(login_page: &str, credentials: &Credentials) -> Result<Vec<FormField>> {
    let document = Html::parse_document(login_page);

    let form_selector = Selector::parse(&format!("form#{LOGIN_FORM_ID}"))
        .expect("login form selector is valid");
    // First match wins; the portal renders a single login form.
    let form = document
        .select(&form_selector)
        .next()
        .ok_or_else(|| BillsError::structure(format!("login form #{LOGIN_FORM_ID} not found")))?;

    let hidden_selector =
        Selector::parse(r#"input[type="hidden"]"#).expect("hidden input selector is valid");

    let mut fields: Vec<FormField> = Vec::new();
    for input in form.select(&hidden_selector) {
        // Unnamed inputs cannot be posted.
        let Some(name) = input.value().attr("name") else {
            continue;
        };
        let value = input.value().attr("value").unwrap_or("");
        set_field(&mut fields, name, value);
    }

    set_field(&mut fields, LOGIN_BUTTON_FIELD, LOGIN_BUTTON_VALUE);
    set_field(&mut fields, USERNAME_FIELD, &credentials.username);
    set_field(&mut fields, PASSWORD_FIELD, &credentials.password);

    Ok(fields)
}

// Overwrite-or-append: a hidden field with the same name must not be
// posted twice.
fn set_field(fields: &mut Vec<FormField>, name: &str, value: &str) {
    match fields.iter_mut().find(|f| f.name == name) {
        Some(existing) => existing.value = value.to_string(),
        None => fields.push(FormField::new(name, value)),
    }
}

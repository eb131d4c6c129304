use rust_decimal::Decimal;

/// Portal login credentials, read from configuration once per run.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// One form input destined for the login POST body. Collected from the
/// login page's hidden inputs, then extended with the fixed login-button
/// field and the credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: String,
    pub value: String,
}

impl FormField {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Balance state of a single portal account, one per sub-table of the
/// account-details grid.
///
/// `balance_display` is the portal's rendered text (currency symbol and
/// all); `balance_amount` is always derived from it by stripping every
/// non-digit, non-dot character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountBalance {
    pub account_number: String,
    pub account_name: String,
    pub balance_display: String,
    pub balance_amount: Decimal,
}

/// Rendering projection of an [`AccountBalance`]. The balance column keeps
/// the portal's display string verbatim.
#[derive(Debug, Clone)]
pub struct ReportRow {
    pub account: String,
    pub name: String,
    pub balance: String,
}

impl From<&AccountBalance> for ReportRow {
    fn from(balance: &AccountBalance) -> Self {
        Self {
            account: balance.account_number.clone(),
            name: balance.account_name.clone(),
            balance: balance.balance_display.clone(),
        }
    }
}

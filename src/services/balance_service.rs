use std::str::FromStr;

use rust_decimal::Decimal;
use scraper::{ElementRef, Html, Selector};

use crate::error::{BillsError, Result};
use crate::models::AccountBalance;

// The account-details DataGrid and the label spans inside it. The portal
// generates composite control ids with a per-row prefix, so spans are
// matched on these stable id fragments rather than full ids.
const ACCOUNT_GRID_ID: &str = "AccountDetailsDG";
const BALANCE_MARKER: &str = "BalanceDueLBL";
const ACCOUNT_NUMBER_MARKER: &str = "AccountNumberLBL";
const ACCOUNT_NAME_MARKER: &str = "AccountNameLBL";

/// Extracts one [`AccountBalance`] per sub-table of the account-details
/// grid, in document order. Any missing element or non-numeric balance is
/// an error, never a skipped or zeroed record.
pub fn extract_balances(page_html: &str) -> Result<Vec<AccountBalance>> {
    let document = Html::parse_document(page_html);

    let grid_selector =
        Selector::parse(&format!("#{ACCOUNT_GRID_ID}")).expect("grid selector is valid");
    // First match wins, as with the login form.
    let grid = document.select(&grid_selector).next().ok_or_else(|| {
        BillsError::structure(format!("account grid #{ACCOUNT_GRID_ID} not found"))
    })?;

    let table_selector = Selector::parse("table").expect("table selector is valid");

    let mut balances = Vec::new();
    for account_table in grid.select(&table_selector) {
        let balance_display = labeled_span_text(account_table, BALANCE_MARKER)?;
        let balance_amount = parse_balance(&balance_display)?;
        let account_number = labeled_span_text(account_table, ACCOUNT_NUMBER_MARKER)?;
        let account_name = labeled_span_text(account_table, ACCOUNT_NAME_MARKER)?;

        balances.push(AccountBalance {
            account_number,
            account_name,
            balance_display,
            balance_amount,
        });
    }

    Ok(balances)
}

/// Keeps only balances strictly above `min_balance`.
pub fn filter_due(balances: Vec<AccountBalance>, min_balance: Decimal) -> Vec<AccountBalance> {
    balances
        .into_iter()
        .filter(|b| b.balance_amount > min_balance)
        .collect()
}

/// Parses a displayed balance ("$1,234.56") into a [`Decimal`] by dropping
/// every character that is not an ASCII digit or a dot.
pub fn parse_balance(display: &str) -> Result<Decimal> {
    let stripped: String = display
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if stripped.is_empty() {
        return Err(BillsError::Parse {
            text: display.to_string(),
            reason: "no digits present".to_string(),
        });
    }

    Decimal::from_str(&stripped).map_err(|e| BillsError::Parse {
        text: display.to_string(),
        reason: e.to_string(),
    })
}

// Text of the first descendant span whose id contains `marker`.
fn labeled_span_text(scope: ElementRef<'_>, marker: &str) -> Result<String> {
    let selector =
        Selector::parse(&format!(r#"span[id*="{marker}"]"#)).expect("marker selector is valid");
    let span = scope.select(&selector).next().ok_or_else(|| {
        BillsError::structure(format!(
            "no span with id matching *{marker}* in an account table"
        ))
    })?;
    Ok(span.text().collect::<String>().trim().to_string())
}

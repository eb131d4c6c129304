use crate::models::{AccountBalance, ReportRow};

// Rendering bound for the mail body, in display columns.
const MAX_WIDTH: usize = 78;
const COLUMN_GAP: usize = 2;
const HEADERS: [&str; 3] = ["Account", "Name", "Balance"];

/// Report for the due balances, or `None` when nothing is due — in that
/// case no table is rendered and no mail must be sent.
pub fn due_report(balances: &[AccountBalance]) -> Option<String> {
    if balances.is_empty() {
        return None;
    }
    Some(render(balances))
}

/// Renders the due balances as a fixed-width plain-text table:
///
/// ```text
/// Account  Name      Balance
/// =======  ========  =======
/// 1001     Smith, J   $45.00
/// ```
///
/// Account and name are left-aligned, the balance column is right-aligned
/// and shows the portal's display string verbatim. Lines never exceed 78
/// columns; overlong cells wrap onto continuation lines.
pub fn render(balances: &[AccountBalance]) -> String {
    let rows: Vec<ReportRow> = balances.iter().map(ReportRow::from).collect();
    let widths = column_widths(&rows);

    let mut lines = Vec::new();
    lines.push(render_line(&HEADERS.map(String::from), &widths, false));
    let gap = " ".repeat(COLUMN_GAP);
    lines.push(widths.map(|w| "=".repeat(w)).join(gap.as_str()));
    for row in &rows {
        let cells = [row.account.clone(), row.name.clone(), row.balance.clone()];
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, width)| wrap_cell(cell, width))
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);
        for i in 0..height {
            let line_cells = [
                wrapped[0].get(i).cloned().unwrap_or_default(),
                wrapped[1].get(i).cloned().unwrap_or_default(),
                wrapped[2].get(i).cloned().unwrap_or_default(),
            ];
            lines.push(render_line(&line_cells, &widths, true));
        }
    }

    lines.join("\n")
}

// Natural widths capped so that three columns plus gaps fit MAX_WIDTH.
// When the total overflows, the widest column gives way first.
fn column_widths(rows: &[ReportRow]) -> [usize; 3] {
    let mut widths = [
        HEADERS[0].chars().count(),
        HEADERS[1].chars().count(),
        HEADERS[2].chars().count(),
    ];
    for row in rows {
        widths[0] = widths[0].max(row.account.chars().count());
        widths[1] = widths[1].max(row.name.chars().count());
        widths[2] = widths[2].max(row.balance.chars().count());
    }

    let budget = MAX_WIDTH - 2 * COLUMN_GAP;
    while widths.iter().sum::<usize>() > budget {
        let widest = (0..3).max_by_key(|&i| widths[i]).expect("three columns");
        widths[widest] -= 1;
    }
    widths
}

fn render_line(cells: &[String; 3], widths: &[usize; 3], align_balance_right: bool) -> String {
    let gap = " ".repeat(COLUMN_GAP);
    let balance = if align_balance_right {
        format!("{:>width$}", cells[2], width = widths[2])
    } else {
        format!("{:<width$}", cells[2], width = widths[2])
    };
    let line = format!(
        "{:<w0$}{gap}{:<w1$}{gap}{balance}",
        cells[0],
        cells[1],
        w0 = widths[0],
        w1 = widths[1],
    );
    line.trim_end().to_string()
}

// Splits a cell into width-sized chunks; an empty cell still occupies one
// (blank) line.
fn wrap_cell(text: &str, width: usize) -> Vec<String> {
    if text.is_empty() {
        return vec![String::new()];
    }
    let chars: Vec<char> = text.chars().collect();
    chars
        .chunks(width.max(1))
        .map(|chunk| chunk.iter().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn account(number: &str, name: &str, display: &str) -> AccountBalance {
        AccountBalance {
            account_number: number.to_string(),
            account_name: name.to_string(),
            balance_display: display.to_string(),
            balance_amount: Decimal::from_str(
                &display
                    .chars()
                    .filter(|c| c.is_ascii_digit() || *c == '.')
                    .collect::<String>(),
            )
            .unwrap(),
        }
    }

    #[test]
    fn no_qualifying_accounts_means_no_report() {
        assert!(due_report(&[]).is_none());
    }

    #[test]
    fn qualifying_accounts_produce_a_report() {
        let report = due_report(&[account("1001", "Smith, J", "$45.00")]).unwrap();
        assert!(report.contains("1001"));
        assert!(report.contains("$45.00"));
    }

    #[test]
    fn header_then_rows_in_extraction_order() {
        let report = render(&[
            account("1001", "Smith, J", "$45.00"),
            account("2002", "Doe, A", "$12.50"),
        ]);
        let lines: Vec<&str> = report.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Account"));
        assert!(lines[0].contains("Name"));
        assert!(lines[0].ends_with("Balance"));
        assert!(lines[1].starts_with("======="));
        assert!(lines[2].starts_with("1001"));
        assert!(lines[2].contains("Smith, J"));
        assert!(lines[3].starts_with("2002"));
        assert!(lines[3].contains("Doe, A"));
    }

    #[test]
    fn balance_column_shows_display_string_verbatim() {
        let report = render(&[account("1001", "Smith, J", "$1,234.56")]);
        assert!(report.contains("$1,234.56"));
    }

    #[test]
    fn balance_column_is_right_aligned() {
        let report = render(&[
            account("1001", "Smith, J", "$145.00"),
            account("2002", "Doe, A", "$9.50"),
        ]);
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines[2].ends_with("$145.00"));
        assert!(lines[3].ends_with("$9.50"));
        // Right alignment pads the shorter balance out to the same column.
        assert_eq!(lines[2].len(), lines[3].len());
    }

    #[test]
    fn lines_never_exceed_the_width_bound() {
        let long_name = "Pendergast-Worthington Family Revocable Living Trust \
                         of the Greater Inland Empire Region";
        let report = render(&[account("1001", long_name, "$45.00")]);

        for line in report.lines() {
            assert!(line.chars().count() <= 78, "overlong line: {line:?}");
        }
    }

    #[test]
    fn overlong_cells_wrap_onto_continuation_lines() {
        let long_name = "x".repeat(200);
        let report = render(&[account("1001", &long_name, "$45.00")]);
        let lines: Vec<&str> = report.lines().collect();

        // Header, separator, then more than one line for the single row.
        assert!(lines.len() > 3);
        let rejoined: String = lines[2..].concat();
        assert_eq!(rejoined.matches('x').count(), 200);
    }
}

//! Server-rendered HTML for the browser form and balance views.

use rust_decimal::Decimal;

use super::error::ApiError;
use crate::domain::models::{Balance, ExpenditureRecord};

const STYLE: &str = "body { font-family: Arial, sans-serif; margin: 40px; }
.card { background: #f5f5f5; padding: 20px; margin: 20px 0; border-radius: 8px; }
table { border-collapse: collapse; }
th, td { padding: 6px 14px; text-align: right; }
th:first-child, td:first-child { text-align: left; }
.negative { color: #b00020; }
label { display: block; margin: 8px 0; }";

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n<style>\n{STYLE}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n{body}\n<p><a href=\"/\">Home</a> | <a href=\"/dashboard\">Balances</a></p>\n</body>\n</html>\n",
        title = escape(title),
    )
}

const EXPENDITURE_FORM: &str = r#"<div class="card">
<h2>Record an expenditure</h2>
<form method="post" action="/expenditures">
<label>Child <input type="text" name="child" required></label>
<label>Amount <input type="number" name="amount" step="0.01" required></label>
<label>Description <input type="text" name="description" required></label>
<label>Date <input type="date" name="date" required></label>
<label>Your email <input type="email" name="email" required></label>
<button type="submit">Save</button>
</form>
</div>
<div class="card">
<h2>Data</h2>
<ul>
<li><a href="/api/dashboard">Balances (JSON)</a></li>
<li><a href="/api/expenditures">Expenditures (JSON)</a></li>
<li><a href="/health">Health</a></li>
</ul>
</div>"#;

/// Landing page: current balances above the expenditure form
pub fn landing<'a>(balances: impl IntoIterator<Item = &'a Balance>) -> String {
    let body = format!("<div class=\"card\">\n{}\n</div>\n{EXPENDITURE_FORM}", balance_table(balances));
    layout("Allowance Ledger", &body)
}

/// Landing page when balances cannot be computed; the form stays usable
pub fn landing_unavailable(error: &ApiError) -> String {
    let body = format!(
        "<div class=\"card negative\"><p>Balances are unavailable: {}</p></div>\n{EXPENDITURE_FORM}",
        escape(&error.to_string())
    );
    layout("Allowance Ledger", &body)
}

pub fn dashboard<'a>(balances: impl IntoIterator<Item = &'a Balance>) -> String {
    layout("Balances", &balance_table(balances))
}

fn balance_table<'a>(balances: impl IntoIterator<Item = &'a Balance>) -> String {
    let rows: String = balances
        .into_iter()
        .map(|b| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td>{}</tr>\n",
                escape(&b.child_id),
                money(b.total_earned),
                money(b.total_spent),
                balance_cell(b.balance),
            )
        })
        .collect();

    if rows.is_empty() {
        "<p>No allowance or expenditure data yet.</p>".to_string()
    } else {
        format!("<table>\n<tr><th>Child</th><th>Earned</th><th>Spent</th><th>Balance</th></tr>\n{rows}</table>")
    }
}

pub fn confirmation(record: &ExpenditureRecord) -> String {
    let body = format!(
        "<div class=\"card\"><p>Recorded {} spent by {} on {}: {}</p></div>",
        money(record.amount),
        escape(&record.child_id),
        record.date,
        escape(&record.description),
    );
    layout("Expenditure saved", &body)
}

pub fn error_page(error: &ApiError) -> String {
    let body = format!("<div class=\"card\"><p>{}</p></div>", escape(&error.to_string()));
    layout("Something went wrong", &body)
}

fn money(amount: Decimal) -> String {
    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{sign}${:.2}", amount.abs())
}

fn balance_cell(balance: Decimal) -> String {
    if balance.is_sign_negative() && !balance.is_zero() {
        format!("<td class=\"negative\">{}</td>", money(balance))
    } else {
        format!("<td>{}</td>", money(balance))
    }
}

pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_escape() {
        assert_eq!(escape("<b>Tom & \"Jerry\"</b>"), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    }

    #[test]
    fn test_money_formatting() {
        assert_eq!(money(dec!(9)), "$9.00");
        assert_eq!(money(dec!(-5.5)), "-$5.50");
        assert_eq!(money(-Decimal::ZERO), "$0.00");
        assert_eq!(money(dec!(-0.00)), "$0.00");
    }

    #[test]
    fn test_dashboard_lists_each_child() {
        let balances = [
            Balance::checked("Ava", dec!(14), dec!(5)).unwrap(),
            Balance::checked("<Ben>", dec!(0), dec!(2)).unwrap(),
        ];
        let html = dashboard(&balances);

        assert!(html.contains("<td>Ava</td><td>$14.00</td><td>$5.00</td><td>$9.00</td>"));
        assert!(html.contains("&lt;Ben&gt;"));
        assert!(html.contains("class=\"negative\">-$2.00"));
    }

    #[test]
    fn test_empty_dashboard() {
        assert!(dashboard(Vec::<&Balance>::new()).contains("No allowance or expenditure data yet."));
    }

    #[test]
    fn test_landing_has_balances_and_form_fields() {
        let balances = [Balance::checked("Ava", dec!(14), dec!(5)).unwrap()];
        let html = landing(&balances);

        assert!(html.contains("<td>Ava</td>"));
        for field in ["child", "amount", "description", "date", "email"] {
            assert!(html.contains(&format!("name=\"{field}\"")), "missing {field}");
        }
    }

    #[test]
    fn test_landing_without_balances_keeps_form() {
        let error = ApiError::SourceUnavailable(crate::storage::SourceUnavailableError::new("down"));
        let html = landing_unavailable(&error);

        assert!(html.contains("Balances are unavailable"));
        assert!(html.contains("action=\"/expenditures\""));
    }
}

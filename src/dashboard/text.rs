//! Plain text rendering of the dashboard for the console client.

use std::fmt::Write;

use crate::{
    dashboard::{Dashboard, view::signed_amount},
    html::format_currency,
};

/// Render the dashboard as lines of text.
///
/// Selected transactions are marked with `[x]`.
pub fn render(dashboard: &Dashboard) -> String {
    let mut output = String::new();

    if let Some(error) = dashboard.error() {
        let _ = writeln!(output, "! {error}");
    }

    let totals = dashboard.totals();
    let _ = writeln!(
        output,
        "Income: {}  Expenses: {}  Balance: {}",
        format_currency(totals.income),
        format_currency(totals.expense),
        format_currency(totals.balance),
    );

    if dashboard.is_loading() {
        output.push_str("Loading transactions...\n");
        return output;
    }

    if dashboard.transactions().is_empty() {
        output.push_str("No transactions added yet.\n");
        return output;
    }

    let id_width = dashboard
        .transactions()
        .iter()
        .map(|transaction| transaction.id.to_string().len())
        .max()
        .unwrap_or(1);

    for transaction in dashboard.transactions() {
        let mark = if dashboard.selected().contains(&transaction.id) {
            'x'
        } else {
            ' '
        };
        let _ = writeln!(
            output,
            "[{mark}] {:>id_width$}  {:<7}  {:>12}  {}",
            transaction.id,
            transaction.kind.as_str(),
            signed_amount(transaction),
            transaction.name,
        );
    }

    output
}

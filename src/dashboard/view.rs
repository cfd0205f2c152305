//! HTML for the dashboard: the error banner, the summary cards and the transaction history.

use maud::{Markup, html};

use crate::{
    dashboard::{Dashboard, Totals},
    html::{CARD_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, format_currency},
    transaction::{Transaction, TransactionType},
};

/// Render the dashboard's current state.
///
/// The totals are computed from the transactions on display every time this is called.
pub fn dashboard_view(dashboard: &Dashboard) -> Markup {
    html! {
        @if let Some(error) = dashboard.error() {
            div
                role="alert"
                class="w-full p-4 mb-4 text-sm text-red-800 rounded-lg bg-red-50 dark:bg-gray-800 dark:text-red-400"
            {
                (error)
            }
        }

        (totals_view(&dashboard.totals()))

        section class="w-full mt-8" {
            h2 class="text-xl font-semibold mb-4" { "Transaction History" }

            @if dashboard.is_loading() {
                p { "Loading transactions..." }
            } @else if dashboard.transactions().is_empty() {
                p { "No transactions added yet." }
            } @else {
                (history_table(dashboard.transactions()))
            }
        }
    }
}

fn totals_view(totals: &Totals) -> Markup {
    html! {
        div class="flex flex-col sm:flex-row gap-4 w-full" {
            (total_card("total-income", "Total Income", totals.income, "income"))
            (total_card("total-expense", "Total Expense", totals.expense, "expense"))
            (total_card(
                "balance",
                "Balance",
                totals.balance,
                if totals.balance < 0.0 { "expense" } else { "income" },
            ))
        }
    }
}

fn total_card(id: &str, label: &str, amount: f64, class: &str) -> Markup {
    html! {
        div class=(CARD_STYLE) {
            h3 class="text-sm text-gray-500 dark:text-gray-400" { (label) }
            p id=(id) class={ "text-2xl font-bold " (class) } { (format_currency(amount)) }
        }
    }
}

fn history_table(transactions: &[Transaction]) -> Markup {
    html! {
        table class="w-full text-sm text-left" {
            thead class=(TABLE_HEADER_STYLE) {
                tr {
                    th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Amount" }
                    th scope="col" class=(TABLE_CELL_STYLE) { "Type" }
                }
            }

            tbody {
                @for transaction in transactions {
                    tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id) {
                        td class=(TABLE_CELL_STYLE) { (transaction.name) }
                        td class={ (TABLE_CELL_STYLE) " " (kind_class(transaction.kind)) } {
                            (signed_amount(transaction))
                        }
                        td class=(TABLE_CELL_STYLE) { (transaction.kind) }
                    }
                }
            }
        }
    }
}

fn kind_class(kind: TransactionType) -> &'static str {
    match kind {
        TransactionType::Income => "income",
        TransactionType::Expense => "expense",
    }
}

/// The amount with "+" for income and "-" for expenses, e.g. "+$12.50".
pub(crate) fn signed_amount(transaction: &Transaction) -> String {
    let sign = match transaction.kind {
        TransactionType::Income => '+',
        TransactionType::Expense => '-',
    };

    format!("{sign}{}", format_currency(transaction.amount))
}

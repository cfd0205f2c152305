//! The client-side state of a user's dashboard.
//!
//! [Dashboard] only changes in response to the outcome of a request, it never
//! talks to the server itself. See [DashboardSession](crate::dashboard::DashboardSession)
//! for the code that makes the requests.

use std::{collections::BTreeSet, fmt::Display};

use crate::{
    Error,
    dashboard::{
        Totals,
        messages::{FETCH_FAILED, INVALID_AMOUNT, MISSING_NAME},
    },
    transaction::{NewTransaction, Transaction, TransactionId, TransactionType},
};

/// The transactions on display, which of them are selected and the current error banner.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dashboard {
    transactions: Vec<Transaction>,
    selected: BTreeSet<TransactionId>,
    error: Option<String>,
    loading: bool,
}

impl Dashboard {
    /// An empty dashboard that has not started loading.
    pub fn new() -> Self {
        Self::default()
    }

    /// The transactions in the order the server returned them, followed by any added since.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// The IDs of the transactions selected for batch deletion.
    pub fn selected(&self) -> &BTreeSet<TransactionId> {
        &self.selected
    }

    /// The selected IDs in ascending order.
    pub fn selected_ids(&self) -> Vec<TransactionId> {
        self.selected.iter().copied().collect()
    }

    /// The message for the error banner, if there is one.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether the initial fetch is still in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Income, expense and balance over every transaction currently on display.
    pub fn totals(&self) -> Totals {
        Totals::from_transactions(&self.transactions)
    }

    /// Mark the start of the initial fetch.
    pub fn start_loading(&mut self) {
        self.loading = true;
    }

    /// Apply the outcome of the initial fetch.
    ///
    /// On success the transactions are replaced, the error banner is cleared
    /// and any selection of a transaction that no longer exists is dropped.
    /// On failure the error banner is set and the transactions are left as
    /// they were.
    pub fn finish_loading<E: Display>(&mut self, result: Result<Vec<Transaction>, E>) {
        match result {
            Ok(transactions) => {
                self.selected
                    .retain(|id| transactions.iter().any(|transaction| transaction.id == *id));
                self.transactions = transactions;
                self.error = None;
            }
            Err(error) => {
                tracing::warn!("Could not fetch transactions: {error}");
                self.error = Some(FETCH_FAILED.to_owned());
            }
        }

        self.loading = false;
    }

    /// Check the raw form input for a new transaction before it is sent.
    ///
    /// Returns `None` and sets the error banner if the name is blank or the
    /// amount is not a positive number, in which case no request should be made.
    pub fn validate_new_transaction(
        &mut self,
        name: &str,
        amount_text: &str,
        kind: TransactionType,
    ) -> Option<NewTransaction> {
        match parse_new_transaction(name, amount_text, kind) {
            Ok(new_transaction) => Some(new_transaction),
            Err(message) => {
                self.error = Some(message.to_owned());
                None
            }
        }
    }

    /// Show a transaction the server has just created.
    pub fn transaction_added(&mut self, transaction: Transaction) {
        self.transactions.push(transaction);
        self.error = None;
    }

    /// Remove a transaction the server has just deleted.
    pub fn transaction_deleted(&mut self, id: TransactionId) {
        self.transactions.retain(|transaction| transaction.id != id);
        self.selected.remove(&id);
        self.error = None;
    }

    /// Remove the transactions the server has just deleted in a batch and clear the selection.
    pub fn transactions_deleted(&mut self, ids: &[TransactionId]) {
        self.transactions
            .retain(|transaction| !ids.contains(&transaction.id));
        self.selected.clear();
        self.error = None;
    }

    /// Show `message` in the error banner, leaving the transactions and selection untouched.
    pub fn request_failed(&mut self, message: &str) {
        self.error = Some(message.to_owned());
    }

    /// Select `id` if it is not selected, otherwise deselect it.
    ///
    /// IDs that are not on display are ignored.
    pub fn toggle(&mut self, id: TransactionId) {
        if !self.transactions.iter().any(|transaction| transaction.id == id) {
            return;
        }

        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Whether there is anything to batch delete.
    pub fn can_delete_selected(&self) -> bool {
        !self.selected.is_empty()
    }
}

fn parse_new_transaction(
    name: &str,
    amount_text: &str,
    kind: TransactionType,
) -> Result<NewTransaction, &'static str> {
    if name.trim().is_empty() {
        return Err(MISSING_NAME);
    }

    let amount: f64 = amount_text
        .trim()
        .parse()
        .map_err(|_| INVALID_AMOUNT)?;

    NewTransaction::new(name, amount, kind).map_err(|error| match error {
        Error::EmptyTransactionName => MISSING_NAME,
        _ => INVALID_AMOUNT,
    })
}

#[cfg(test)]
mod tests {
    use time::OffsetDateTime;

    use crate::{
        dashboard::{
            Dashboard,
            messages::{ADD_FAILED, FETCH_FAILED, INVALID_AMOUNT, MISSING_NAME},
        },
        transaction::{Transaction, TransactionId, TransactionType},
        user::UserID,
    };

    fn transaction(id: i64, amount: f64, kind: TransactionType) -> Transaction {
        Transaction {
            id: TransactionId::new(id),
            owner_id: UserID::new(1),
            name: format!("Transaction {id}"),
            amount,
            kind,
            created_at: OffsetDateTime::UNIX_EPOCH,
        }
    }

    fn loaded_dashboard(transactions: Vec<Transaction>) -> Dashboard {
        let mut dashboard = Dashboard::new();
        dashboard.start_loading();
        dashboard.finish_loading::<String>(Ok(transactions));
        dashboard
    }

    #[test]
    fn loading_ends_after_success() {
        let mut dashboard = Dashboard::new();
        dashboard.start_loading();
        assert!(dashboard.is_loading());

        dashboard.finish_loading::<String>(Ok(vec![transaction(1, 10.0, TransactionType::Income)]));

        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.transactions().len(), 1);
        assert_eq!(dashboard.error(), None);
    }

    #[test]
    fn loading_ends_after_failure() {
        let mut dashboard = Dashboard::new();
        dashboard.start_loading();

        dashboard.finish_loading(Err("connection refused"));

        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.error(), Some(FETCH_FAILED));
        assert!(dashboard.transactions().is_empty());
    }

    #[test]
    fn rejects_non_positive_amounts() {
        let mut dashboard = Dashboard::new();

        for amount_text in ["0", "-5", "abc", "", "NaN", "inf"] {
            let result =
                dashboard.validate_new_transaction("Rent", amount_text, TransactionType::Expense);

            assert_eq!(result, None, "amount {amount_text:?} should be rejected");
            assert_eq!(dashboard.error(), Some(INVALID_AMOUNT));
        }
    }

    #[test]
    fn rejects_blank_name() {
        let mut dashboard = Dashboard::new();

        let result = dashboard.validate_new_transaction("  ", "10", TransactionType::Expense);

        assert_eq!(result, None);
        assert_eq!(dashboard.error(), Some(MISSING_NAME));
    }

    #[test]
    fn accepts_valid_input() {
        let mut dashboard = Dashboard::new();

        let new_transaction = dashboard
            .validate_new_transaction("Salary", " 5000 ", TransactionType::Income)
            .unwrap();

        assert_eq!(new_transaction.amount(), 5000.0);
        assert_eq!(new_transaction.name(), "Salary");
    }

    #[test]
    fn adding_clears_error() {
        let mut dashboard = loaded_dashboard(vec![]);
        dashboard.request_failed("oops");

        dashboard.transaction_added(transaction(1, 10.0, TransactionType::Income));

        assert_eq!(dashboard.error(), None);
        assert_eq!(dashboard.totals().income, 10.0);
    }

    #[test]
    fn toggle_flips_selection() {
        let mut dashboard = loaded_dashboard(vec![transaction(1, 10.0, TransactionType::Income)]);
        let id = TransactionId::new(1);

        dashboard.toggle(id);
        assert!(dashboard.selected().contains(&id));
        assert!(dashboard.can_delete_selected());

        dashboard.toggle(id);
        assert!(dashboard.selected().is_empty());
        assert!(!dashboard.can_delete_selected());
    }

    #[test]
    fn toggle_ignores_unknown_id() {
        let mut dashboard = loaded_dashboard(vec![transaction(1, 10.0, TransactionType::Income)]);

        dashboard.toggle(TransactionId::new(2));

        assert!(dashboard.selected().is_empty());
    }

    #[test]
    fn single_delete_removes_from_selection() {
        let mut dashboard = loaded_dashboard(vec![
            transaction(1, 10.0, TransactionType::Income),
            transaction(2, 5.0, TransactionType::Expense),
        ]);
        dashboard.toggle(TransactionId::new(1));
        dashboard.toggle(TransactionId::new(2));

        dashboard.transaction_deleted(TransactionId::new(1));

        assert_eq!(dashboard.selected_ids(), vec![TransactionId::new(2)]);
        assert_eq!(dashboard.transactions().len(), 1);
    }

    #[test]
    fn batch_delete_clears_selection() {
        let mut dashboard = loaded_dashboard(vec![
            transaction(1, 10.0, TransactionType::Income),
            transaction(2, 5.0, TransactionType::Expense),
            transaction(3, 1.0, TransactionType::Expense),
        ]);
        dashboard.toggle(TransactionId::new(1));
        dashboard.toggle(TransactionId::new(3));

        dashboard.transactions_deleted(&dashboard.selected_ids());

        assert!(dashboard.selected().is_empty());
        assert_eq!(dashboard.transactions().len(), 1);
        assert_eq!(dashboard.transactions()[0].id, TransactionId::new(2));
    }

    #[test]
    fn failure_leaves_state_untouched() {
        let mut dashboard = loaded_dashboard(vec![transaction(1, 10.0, TransactionType::Income)]);
        dashboard.toggle(TransactionId::new(1));
        let before = dashboard.clone();

        dashboard.request_failed("Failed to delete transaction. Please try again.");

        assert_eq!(dashboard.transactions(), before.transactions());
        assert_eq!(dashboard.selected(), before.selected());
        assert_eq!(
            dashboard.error(),
            Some("Failed to delete transaction. Please try again.")
        );
    }

    #[test]
    fn reload_drops_stale_selection() {
        let mut dashboard = loaded_dashboard(vec![
            transaction(1, 10.0, TransactionType::Income),
            transaction(2, 5.0, TransactionType::Expense),
        ]);
        dashboard.toggle(TransactionId::new(1));
        dashboard.toggle(TransactionId::new(2));

        dashboard.finish_loading::<String>(Ok(vec![transaction(2, 5.0, TransactionType::Expense)]));

        assert_eq!(dashboard.selected_ids(), vec![TransactionId::new(2)]);
    }

    #[test]
    fn successful_reload_clears_error() {
        let mut dashboard = loaded_dashboard(vec![]);
        dashboard.request_failed(ADD_FAILED);

        dashboard.start_loading();
        dashboard.finish_loading::<String>(Ok(vec![transaction(1, 10.0, TransactionType::Income)]));

        assert_eq!(dashboard.error(), None);
        assert_eq!(dashboard.transactions().len(), 1);
    }

    #[test]
    fn successful_reload_after_failed_fetch_clears_error() {
        let mut dashboard = Dashboard::new();
        dashboard.start_loading();
        dashboard.finish_loading(Err("connection refused"));
        assert_eq!(dashboard.error(), Some(FETCH_FAILED));

        dashboard.start_loading();
        dashboard.finish_loading::<String>(Ok(vec![]));

        assert_eq!(dashboard.error(), None);
    }
}

use crate::{
    dashboard::{
        Dashboard, TransactionApi,
        messages::{ADD_FAILED, DELETE_FAILED, DELETE_MANY_FAILED},
    },
    transaction::{TransactionId, TransactionType},
};

/// Drives a [Dashboard] by making requests through a [TransactionApi].
///
/// Each user action makes at most one request and then applies its outcome
/// to the dashboard. Failures never propagate, they show up in the error banner.
#[derive(Debug)]
pub struct DashboardSession<A> {
    api: A,
    dashboard: Dashboard,
}

impl<A> DashboardSession<A>
where
    A: TransactionApi,
{
    /// Create a session with an empty dashboard.
    pub fn new(api: A) -> Self {
        Self {
            api,
            dashboard: Dashboard::new(),
        }
    }

    /// The current state of the dashboard.
    pub fn dashboard(&self) -> &Dashboard {
        &self.dashboard
    }

    /// The API the session makes requests with.
    pub fn api(&self) -> &A {
        &self.api
    }

    /// Fetch the user's transactions.
    pub async fn mount(&mut self) {
        self.dashboard.start_loading();
        let result = self.api.list().await;
        self.dashboard.finish_loading(result);
    }

    /// Validate the input and, if it is valid, create the transaction.
    ///
    /// Returns whether a transaction was created.
    pub async fn add_transaction(
        &mut self,
        name: &str,
        amount_text: &str,
        kind: TransactionType,
    ) -> bool {
        let Some(new_transaction) = self
            .dashboard
            .validate_new_transaction(name, amount_text, kind)
        else {
            return false;
        };

        match self.api.create(&new_transaction).await {
            Ok(transaction) => {
                self.dashboard.transaction_added(transaction);
                true
            }
            Err(error) => {
                tracing::warn!("Could not add transaction: {error}");
                self.dashboard.request_failed(ADD_FAILED);
                false
            }
        }
    }

    /// Delete a single transaction.
    pub async fn delete_transaction(&mut self, id: TransactionId) {
        match self.api.delete(id).await {
            Ok(()) => self.dashboard.transaction_deleted(id),
            Err(error) => {
                tracing::warn!("Could not delete transaction {id}: {error}");
                self.dashboard.request_failed(DELETE_FAILED);
            }
        }
    }

    /// Select or deselect a transaction for batch deletion.
    pub fn toggle(&mut self, id: TransactionId) {
        self.dashboard.toggle(id);
    }

    /// Delete every selected transaction in one request.
    ///
    /// Does nothing when the selection is empty.
    pub async fn delete_selected(&mut self) {
        if !self.dashboard.can_delete_selected() {
            return;
        }

        let ids = self.dashboard.selected_ids();

        match self.api.delete_many(&ids).await {
            Ok(()) => self.dashboard.transactions_deleted(&ids),
            Err(error) => {
                tracing::warn!("Could not delete {} transactions: {error}", ids.len());
                self.dashboard.request_failed(DELETE_MANY_FAILED);
            }
        }
    }
}

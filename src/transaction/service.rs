//! Ownership-scoped operations on transactions that sit between the route handlers and the store.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    transaction::{
        NewTransaction, SQLiteTransactionStore, Transaction, TransactionId, TransactionStore,
    },
    user::UserID,
};

/// The state needed by the transaction route handlers.
#[derive(Debug, Clone)]
pub struct TransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl TransactionState {
    /// Get a service that reads and writes transactions in the app database.
    pub fn service(&self) -> TransactionService<SQLiteTransactionStore> {
        TransactionService::new(SQLiteTransactionStore::new(self.db_connection.clone()))
    }
}

impl FromRef<AppState> for TransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Adds, lists and deletes the transactions of a single authenticated user at a time.
#[derive(Debug, Clone)]
pub struct TransactionService<S> {
    store: S,
}

impl<S> TransactionService<S>
where
    S: TransactionStore,
{
    /// Create a service backed by `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Record a new transaction for `owner`.
    ///
    /// # Errors
    /// Returns any error from the underlying store.
    pub fn add(&self, owner: UserID, new_transaction: NewTransaction) -> Result<Transaction, Error> {
        let transaction = self.store.insert(owner, new_transaction)?;
        tracing::debug!("User {owner} created transaction {}", transaction.id);

        Ok(transaction)
    }

    /// Get every transaction owned by `owner`, oldest first.
    ///
    /// # Errors
    /// Returns any error from the underlying store.
    pub fn list(&self, owner: UserID) -> Result<Vec<Transaction>, Error> {
        self.store.find(owner)
    }

    /// Delete the transaction `id` owned by `owner`.
    ///
    /// # Errors
    /// Returns a:
    /// - [Error::DeleteMissingTransaction] if `id` does not exist or belongs
    ///   to another user, in which case nothing is deleted,
    /// - or any error from the underlying store.
    pub fn delete_one(&self, owner: UserID, id: TransactionId) -> Result<(), Error> {
        if self.store.find_one(owner, id)?.is_none() {
            return Err(Error::DeleteMissingTransaction);
        }

        self.store.delete_by_id(owner, id)?;
        tracing::debug!("User {owner} deleted transaction {id}");

        Ok(())
    }

    /// Delete every transaction in `ids` that `owner` owns.
    ///
    /// Unknown and foreign IDs are skipped, so asking for the same deletion
    /// twice succeeds both times. Returns how many transactions were removed.
    ///
    /// # Errors
    /// Returns any error from the underlying store.
    pub fn delete_many(&self, owner: UserID, ids: &[TransactionId]) -> Result<usize, Error> {
        let deleted = self.store.delete_many(owner, ids)?;
        tracing::debug!(
            "User {owner} deleted {deleted} of {} requested transactions",
            ids.len()
        );

        Ok(deleted)
    }
}

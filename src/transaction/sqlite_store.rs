//! Implements a SQLite backed transaction store.
use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::{Connection, params_from_iter, types::Value};
use time::OffsetDateTime;

use crate::{
    Error,
    transaction::{
        NewTransaction, Transaction, TransactionId, TransactionStore, core::map_transaction_row,
    },
    user::UserID,
};

/// The most IDs bound to one `DELETE` statement.
///
/// SQLite limits the number of parameters in a statement to 32766.
const DELETE_BATCH_SIZE: usize = 500;

/// Stores transactions in a SQLite database.
///
/// Note that because a transaction depends on the [User](crate::user::User)
/// model, the user table must be set up in the database, see [crate::initialize_db].
#[derive(Debug, Clone)]
pub struct SQLiteTransactionStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteTransactionStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, Error> {
        self.connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)
    }
}

impl TransactionStore for SQLiteTransactionStore {
    /// Create a new transaction in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn insert(
        &self,
        owner: UserID,
        new_transaction: NewTransaction,
    ) -> Result<Transaction, Error> {
        let connection = self.lock()?;

        let transaction = connection
            .prepare(
                "INSERT INTO \"transaction\" (user_id, name, amount, type, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)
                 RETURNING id, user_id, name, amount, type, created_at",
            )?
            .query_row(
                (
                    owner.as_i64(),
                    new_transaction.name(),
                    new_transaction.amount(),
                    new_transaction.kind(),
                    OffsetDateTime::now_utc(),
                ),
                map_transaction_row,
            )?;

        Ok(transaction)
    }

    /// Retrieve the transactions owned by `owner`, oldest first.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn find(&self, owner: UserID) -> Result<Vec<Transaction>, Error> {
        let connection = self.lock()?;

        connection
            .prepare(
                "SELECT id, user_id, name, amount, type, created_at FROM \"transaction\"
                 WHERE user_id = :user_id
                 ORDER BY id ASC",
            )?
            .query_map(&[(":user_id", &owner.as_i64())], map_transaction_row)?
            .map(|maybe_transaction| maybe_transaction.map_err(Error::from))
            .collect()
    }

    /// Retrieve a transaction in the database by its `id` and `owner`.
    ///
    /// Returns `None` if the transaction does not exist or is owned by someone else.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn find_one(&self, owner: UserID, id: TransactionId) -> Result<Option<Transaction>, Error> {
        let connection = self.lock()?;

        let result = connection
            .prepare(
                "SELECT id, user_id, name, amount, type, created_at FROM \"transaction\"
                 WHERE id = :id AND user_id = :user_id",
            )?
            .query_row(
                &[(":id", &id.as_i64()), (":user_id", &owner.as_i64())],
                map_transaction_row,
            );

        match result {
            Ok(transaction) => Ok(Some(transaction)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    /// Delete a transaction by its `id` and `owner`.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn delete_by_id(&self, owner: UserID, id: TransactionId) -> Result<(), Error> {
        let connection = self.lock()?;

        connection.execute(
            "DELETE FROM \"transaction\" WHERE id = :id AND user_id = :user_id",
            &[(":id", &id.as_i64()), (":user_id", &owner.as_i64())],
        )?;

        Ok(())
    }

    /// Delete the transactions in `ids` that are owned by `owner`.
    ///
    /// The IDs are deleted in batches of `DELETE_BATCH_SIZE` inside a single
    /// database transaction, so either every owned transaction in `ids` is
    /// deleted or none are.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DatabaseLockError] if the database lock is poisoned,
    /// - or [Error::SqlError] if there is some SQL error.
    fn delete_many(&self, owner: UserID, ids: &[TransactionId]) -> Result<usize, Error> {
        if ids.is_empty() {
            return Ok(0);
        }

        let connection = self.lock()?;
        let db_transaction = connection.unchecked_transaction()?;
        let mut rows_affected = 0;

        for batch in ids.chunks(DELETE_BATCH_SIZE) {
            let placeholders = (0..batch.len())
                .map(|i| format!("?{}", i + 2))
                .collect::<Vec<_>>()
                .join(", ");
            let query = format!(
                "DELETE FROM \"transaction\" WHERE user_id = ?1 AND id IN ({placeholders})"
            );

            let params = std::iter::once(Value::Integer(owner.as_i64()))
                .chain(batch.iter().map(|id| Value::Integer(id.as_i64())));

            rows_affected += db_transaction
                .prepare_cached(&query)?
                .execute(params_from_iter(params))?;
        }

        db_transaction.commit()?;

        Ok(rows_affected)
    }
}
